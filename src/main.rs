use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

use lead_cleaner::config::Config;
use lead_cleaner::export::{self, PriorityFilter};
use lead_cleaner::ingest;
use lead_cleaner::observability::init_logging;
use lead_cleaner::{DedupKey, LeadPipeline, LeadSummary, PipelineResult};

#[derive(Parser)]
#[command(name = "lead_cleaner")]
#[command(about = "Lead scoring and validation for sales-lead CSV exports")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Leads CSV to process
    #[arg(long, short)]
    input: PathBuf,
    /// Remove duplicates based on: company, owner-email, owner-phone, company-owner-email, none.
    /// Defaults to the config file setting.
    #[arg(long)]
    dedup: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, score and export a leads file
    Process {
        #[command(flatten)]
        input: InputArgs,
        /// Where to write the cleaned CSV (defaults to the configured output path)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print lead counts without writing an export
    Summary {
        #[command(flatten)]
        input: InputArgs,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print scored leads of one priority tier as CSV on stdout
    Show {
        #[command(flatten)]
        input: InputArgs,
        /// all, high, medium or low
        #[arg(long, default_value = "all")]
        priority: PriorityFilter,
    },
}

fn resolve_dedup_key(args: &InputArgs, config: &Config) -> Result<Option<DedupKey>> {
    let key = match &args.dedup {
        Some(selection) => DedupKey::parse_selection(selection)?,
        None => config.dedup_key()?,
    };
    Ok(key)
}

fn run_pipeline(args: &InputArgs, config: &Config) -> Result<PipelineResult> {
    let dedup_key = resolve_dedup_key(args, config)?;
    let batch = ingest::read_leads_from_path(&args.input)
        .with_context(|| format!("Failed to load leads from {}", args.input.display()))?;

    let pipeline = LeadPipeline::new(dedup_key);
    Ok(pipeline.run(batch))
}

fn print_summary(summary: &LeadSummary) {
    println!("\n📊 Lead Summary");
    println!("   Total leads: {}", summary.total_leads);
    println!("   Valid emails: {}", summary.valid_emails);
    println!("   High priority: {}", summary.high_priority);
    println!("   Medium priority: {}", summary.medium_priority);
    println!("   Low priority: {}", summary.low_priority);
    if summary.duplicates_removed > 0 {
        println!("✅ Removed {} duplicates.", summary.duplicates_removed);
    } else {
        println!("   No duplicates found.");
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load().context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging);

    let outcome = match cli.command {
        Commands::Process { input, output } => {
            run_pipeline(&input, &config).and_then(|result| {
                let output_path = output.unwrap_or_else(|| config.output_path());
                export::write_leads_to_path(&output_path, &result.batch).with_context(|| {
                    format!("Failed to write cleaned leads to {}", output_path.display())
                })?;
                print_summary(&result.summary);
                println!("   Output file: {}", output_path.display());
                Ok(())
            })
        }
        Commands::Summary { input, json } => run_pipeline(&input, &config).and_then(|result| {
            if json {
                println!("{}", serde_json::to_string_pretty(&result.summary)?);
            } else {
                print_summary(&result.summary);
            }
            Ok(())
        }),
        Commands::Show { input, priority } => run_pipeline(&input, &config).and_then(|result| {
            let selected = export::filter_by_priority(&result.batch, priority);
            info!("Showing {} {} leads", selected.len(), priority);
            export::write_records(io::stdout().lock(), &result.batch.headers, selected)?;
            Ok(())
        }),
    };

    if let Err(e) = &outcome {
        error!("Run failed: {:#}", e);
    }
    outcome
}
