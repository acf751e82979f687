//! Extension to Language Classification
//!
//! Fixed lookup table used while indexing. Unknown extensions map to
//! `plaintext`.

/// Extension (without dot) to language name.
const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("rs", "rust"),
    ("py", "python"),
    ("go", "go"),
    ("java", "java"),
    ("rb", "ruby"),
    ("php", "php"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("swift", "swift"),
    ("kt", "kotlin"),
    ("html", "html"),
    ("css", "css"),
    ("scss", "scss"),
    ("vue", "vue"),
    ("svelte", "svelte"),
    ("json", "json"),
    ("yml", "yaml"),
    ("yaml", "yaml"),
    ("toml", "toml"),
    ("md", "markdown"),
    ("sh", "shell"),
    ("sql", "sql"),
];

/// Classify a file extension. Case-insensitive; unknown -> `plaintext`.
pub fn language_for_extension(extension: &str) -> &'static str {
    let lowered = extension.to_ascii_lowercase();
    LANGUAGE_TABLE
        .iter()
        .find(|(ext, _)| *ext == lowered)
        .map(|(_, lang)| *lang)
        .unwrap_or("plaintext")
}

/// Extensions treated as code files by content-scanning search modes.
pub const CODE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "rs", "py", "go", "java", "rb", "php", "c", "h", "cpp",
    "hpp", "cs", "swift", "kt", "vue", "svelte", "sql",
];

/// Whether an extension is on the code-file allow-list.
pub fn is_code_extension(extension: &str) -> bool {
    let lowered = extension.to_ascii_lowercase();
    CODE_EXTENSIONS.contains(&lowered.as_str())
}
