//! coding-crew CLI
//!
//! Submits one coding task to the multi-agent workflow and prints the final
//! state. The resulting state record is the only observable output of a run.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coding_crew::{build_provider, coding_pipeline, Config, PipelineState, Relevance};

/// The task submitted when none is given on the command line.
const DEFAULT_TASK: &str = "Write me a Javascript code to add two variables";

#[derive(Parser, Debug)]
#[command(
    name = "coding-crew",
    version,
    about = "Multi-agent code generation: relevance check, language selection, planning, coding, supervision"
)]
struct Cli {
    /// The coding task to hand to the workflow
    #[arg(default_value = DEFAULT_TASK)]
    task: String,

    /// Override the supervisor dispatch ceiling
    #[arg(long, env = "MAX_ITERATIONS")]
    max_iterations: Option<u32>,

    /// Print the final state record as JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(max) = cli.max_iterations {
        config.max_iterations = max;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    info!(task = %cli.task, model = %config.model, "starting coding-crew");

    // Provider construction never aborts startup; failures degrade to the
    // lazy-failing stand-in and the relevance gate fails closed.
    let provider = build_provider(&config);
    let pipeline = coding_pipeline(provider, config.max_iterations)?;

    let final_state = pipeline.run(PipelineState::new(&cli.task)).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&final_state)?);
    } else {
        print_summary(&final_state);
    }
    Ok(())
}

fn print_summary(state: &PipelineState) {
    println!("\n=== Workflow Result ===");
    println!("Task:      {}", state.task);
    println!("Relevance: {:?}", state.relevance);

    if state.relevance != Relevance::Relevant {
        println!("\nThe task was not classified as code generation; nothing was produced.");
        return;
    }

    if let Some(language) = state.language {
        println!("Language:  {language}");
    }
    println!("Attempts:  {}", state.attempt);

    if let Some(plan) = &state.plan {
        println!("\n--- Plan ---\n{plan}");
    }
    if let Some(code) = &state.code {
        println!("\n--- Code ---\n{code}");
    }
}
