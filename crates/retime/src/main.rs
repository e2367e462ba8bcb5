use anyhow::{anyhow, bail, Context, Result};
use dotenvy::dotenv;
use std::path::Path;
use std::sync::Arc;

use retimecore::api::{extract_access_token, resolve_access_token};
use retimecore::core::init_logger;
use retimecore::media::{parse_start_time, parse_utc_offset, LibraryPageSource, ManifestSource, PlannedUpdate};
use retimecore::{
    DelayRange, GoProApiClient, MediaEntry, MediaSource, Pacer, RetimestampReport, Retimestamper, Settings,
    UpdateOutcome,
};

mod cli;

use cli::{Cli, Commands, InputArgs};

/// Main entry point
///
/// Loads `.env`, settings and the logger, then dispatches to the subcommand.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    let cli = Cli::parse_args();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.verbose {
        settings.log_level = "debug".to_string();
    }
    init_logger(&settings.log_level)?;

    match cli.command {
        Commands::Fix {
            input,
            token,
            token_page,
            dry_run,
            min_delay_ms,
            max_delay_ms,
        } => {
            if dry_run {
                return run_plan(&settings, &input);
            }
            if let Some(min) = min_delay_ms {
                settings.min_delay_ms = min;
            }
            if let Some(max) = max_delay_ms {
                settings.max_delay_ms = max;
            }
            run_fix(&settings, &input, token, token_page.as_deref()).await
        }
        Commands::Plan { input } => run_plan(&settings, &input),
        Commands::InspectToken { page } => run_inspect_token(&page),
    }
}

/// Selected chunks and the resolved UTC start time
fn load_input(settings: &Settings, input: &InputArgs) -> Result<(Vec<MediaEntry>, chrono::DateTime<chrono::Utc>)> {
    let source: Box<dyn MediaSource> = match (&input.manifest, &input.page) {
        (Some(manifest), _) => Box::new(
            ManifestSource::from_path(manifest).with_context(|| format!("reading manifest {}", manifest.display()))?,
        ),
        (None, Some(page)) => Box::new(
            LibraryPageSource::from_path(page).with_context(|| format!("reading page {}", page.display()))?,
        ),
        (None, None) => bail!("either --manifest or --page is required"),
    };

    let entries = source.selected_media()?;
    log::info!("{} selected item(s) from {}", entries.len(), source.name());

    let start_text = input
        .start
        .as_deref()
        .or_else(|| source.start_time_hint())
        .ok_or_else(|| anyhow!("no start time: pass --start with the first chunk's capture time"))?;

    let offset = parse_utc_offset(input.utc_offset.as_deref().unwrap_or(&settings.utc_offset))?;
    let start = parse_start_time(start_text, offset)?;

    Ok((entries, start))
}

/// Print the computed capture times without touching the media API
fn run_plan(settings: &Settings, input: &InputArgs) -> Result<()> {
    let (entries, start) = load_input(settings, input)?;
    let (group, plan) = Retimestamper::plan(start, entries)?;

    println!("Recording {} ({} chunks), nothing will be sent:", group.group_id(), plan.len());
    print_plan(&plan);
    Ok(())
}

async fn run_fix(
    settings: &Settings,
    input: &InputArgs,
    token: Option<String>,
    token_page: Option<&Path>,
) -> Result<()> {
    let page_html = match token_page.or(input.page.as_deref()) {
        Some(path) => Some(std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?),
        None => None,
    };
    let explicit = token.as_deref().or(settings.access_token.as_deref());
    let token = resolve_access_token(explicit, page_html.as_deref())?;

    let (entries, start) = load_input(settings, input)?;

    let client = GoProApiClient::from_settings(settings, token)?;
    let pacer = Pacer::new(DelayRange::new(settings.min_delay_ms, settings.max_delay_ms)?);
    let mut retimer = Retimestamper::new(Arc::new(client), pacer);

    let report = retimer.run(start, entries).await?;
    print_report(&report);

    if !report.is_complete_success() {
        bail!("{} of {} updates failed", report.failed(), report.chunks.len());
    }
    Ok(())
}

fn run_inspect_token(page: &Path) -> Result<()> {
    let html = std::fs::read_to_string(page).with_context(|| format!("reading {}", page.display()))?;
    extract_access_token(&html)?;
    println!("✅ access token found in {}", page.display());
    Ok(())
}

fn print_plan(plan: &[PlannedUpdate]) {
    for update in plan {
        println!("  {:<16} {:<24} {}", update.filename, update.media_id, update.captured_at_wire());
    }
}

fn print_report(report: &RetimestampReport) {
    println!(
        "Recording {}: {} updated, {} failed",
        report.group_id,
        report.updated(),
        report.failed()
    );
    for chunk in &report.chunks {
        let status = match &chunk.outcome {
            UpdateOutcome::Updated => "✅".to_string(),
            UpdateOutcome::Failed(reason) => format!("❌ {}", reason),
        };
        println!("  {:<16} {:<24} {} {}", chunk.filename, chunk.media_id, chunk.captured_at, status);
    }
}
