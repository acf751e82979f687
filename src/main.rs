//! Buildforge CLI
//!
//! Four entry points: index a project, search it, ask a grounded question,
//! or run a full orchestrated build task.

use std::sync::Arc;

use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use buildforge::core::{TaskEvent, TaskEventPayload};
use buildforge::llm::{GenerationConfig, OpenAiProvider};
use buildforge::tools::builtin_registry;
use buildforge::{
    CodeSearch, ContextEngine, IntelligentChatEngine, SearchResult, TaskOrchestrator, TaskStatus,
};

#[derive(Parser)]
#[command(name = "buildforge")]
#[command(about = "Agentic build orchestration and code grounding", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a project and print its summary
    Index {
        /// Project root to index
        path: String,
    },
    /// Search an indexed project
    Search {
        /// Project root to index before searching
        path: String,
        /// Query text (ignored for the fixed-pattern modes)
        #[arg(default_value = "")]
        query: String,
        /// Search mode
        #[arg(long, value_enum, default_value_t = SearchMode::Content)]
        mode: SearchMode,
    },
    /// Ask a grounded question about a project
    Chat {
        /// Project root to ground answers in
        path: String,
        /// The question
        query: String,
    },
    /// Run an orchestrated build task
    Run {
        /// The natural-language build request
        prompt: String,
        /// Project root the task operates on
        #[arg(long)]
        project: String,
        /// Model to plan and generate with
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,
        /// API key; falls back to OPENAI_API_KEY
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchMode {
    Name,
    Content,
    Definition,
    Endpoints,
    Database,
    Auth,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("buildforge={}", default_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Index { path } => {
            let mut engine = ContextEngine::new();
            engine.build(&path)?;
            println!("{}", engine.project_summary());
        }
        Commands::Search { path, query, mode } => {
            let mut engine = ContextEngine::new();
            engine.build(&path)?;
            let search = CodeSearch::new(&engine);
            let results = match mode {
                SearchMode::Name => search.search_by_name(&query),
                SearchMode::Content => search.search_by_content(&query),
                SearchMode::Definition => search.find_definition(&query),
                SearchMode::Endpoints => search.find_api_endpoints(),
                SearchMode::Database => search.find_database_queries(),
                SearchMode::Auth => search.find_auth_logic(),
            };
            print_results(&results);
        }
        Commands::Chat { path, query } => {
            let mut engine = ContextEngine::new();
            engine.build(&path)?;
            let mut chat = IntelligentChatEngine::new();
            let response = chat.process_query(&engine, &query);
            println!("{}", response.reply);
        }
        Commands::Run {
            prompt,
            project,
            model,
            api_key,
        } => {
            let api_key = match api_key {
                Some(key) => key,
                None => std::env::var("OPENAI_API_KEY")
                    .context("pass --api-key or set OPENAI_API_KEY to run tasks")?,
            };
            let provider = Arc::new(OpenAiProvider::new(GenerationConfig::new(
                api_key.clone(),
                model.clone(),
            ))?);
            let registry = Arc::new(builtin_registry(provider.clone())?);

            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<TaskEvent>();
            let printer = tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    match event.payload {
                        TaskEventPayload::Thought { message } => println!("* {}", message),
                        TaskEventPayload::Progress {
                            current,
                            total,
                            status,
                        } => {
                            println!("[{}/{}] {}", current, total, status.unwrap_or_default())
                        }
                        TaskEventPayload::ToolCall { tool, .. } => println!("-> {}", tool),
                        TaskEventPayload::ToolResult { tool, result } => {
                            let ok = result
                                .get("success")
                                .and_then(|v| v.as_bool())
                                .unwrap_or(false);
                            println!("<- {} ({})", tool, if ok { "ok" } else { "failed" });
                        }
                        TaskEventPayload::Error { message } => eprintln!("error: {}", message),
                        TaskEventPayload::Complete {
                            project_path,
                            files_created,
                        } => println!("done: {} files created in {}", files_created, project_path),
                    }
                }
            });

            let orchestrator = TaskOrchestrator::new(provider, registry)
                .with_events(tx)
                .with_default_api_key(api_key)
                .with_default_model(model);
            let task = orchestrator.execute_task(&prompt, &project).await;
            // Close the channel so the printer drains and exits.
            drop(orchestrator);
            printer.await.ok();

            if task.status == TaskStatus::Failed {
                anyhow::bail!("task {} failed: {}", task.id, task.errors.join("; "));
            }
        }
    }

    Ok(())
}

fn print_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("no results");
        return;
    }
    for result in results {
        let line = result
            .line_number
            .map(|n| format!(":{}", n))
            .unwrap_or_default();
        println!("{}{} ({:.1})", result.file.path, line, result.relevance);
        if let Some(snippet) = &result.snippet {
            println!("{}", snippet);
        }
    }
}
