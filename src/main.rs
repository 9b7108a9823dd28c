use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use compliance_verifier::cli::{Args, Command, OutputFormat, report_discovery};
use compliance_verifier::knowledge::{Component, TestProcedure};
use compliance_verifier::{
    ExtractedRecord, KnowledgeTables, ParsedReport, ReportProcessor, ReportSummary, SessionStats,
    VerifierConfig,
};
use std::path::PathBuf;
use std::process;
use tracing::{debug, warn};

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    setup_logging(&args);

    match run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Fatal error - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Set up structured logging on stderr based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("compliance_verifier={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Main command runner
///
/// Loads the configuration and knowledge base once, then dispatches to the
/// selected subcommand.
fn run(args: Args) -> Result<()> {
    // Explicit --config path, else the platform config directory, else defaults
    let config =
        VerifierConfig::discover(args.config.as_deref()).context("Failed to load configuration")?;

    // --knowledge-base overrides the path named in the config file
    let tables_path = args
        .knowledge_base
        .clone()
        .or_else(|| config.knowledge_base_path.clone());
    let tables = KnowledgeTables::load(tables_path.as_deref())
        .context("Failed to load knowledge base")?;

    match args.command {
        Command::Verify { paths, format } => verify(config, &tables, &paths, format),
        Command::Component { part_number } => {
            show_component(&tables, &part_number);
            Ok(())
        }
        Command::Procedure { keyword } => {
            show_procedure(&tables, &keyword);
            Ok(())
        }
        Command::Stats => {
            show_stats(&config, &tables);
            Ok(())
        }
    }
}

fn verify(
    config: VerifierConfig,
    tables: &KnowledgeTables,
    paths: &[PathBuf],
    format: OutputFormat,
) -> Result<()> {
    let processor = ReportProcessor::new(config).context("Failed to build report processor")?;

    // Expand directories into the report files they contain
    let reports = report_discovery::collect_reports(paths)?;
    let mut session = SessionStats::new(tables.components.len());
    let mut json_reports = Vec::new();

    for path in &reports {
        match processor.process_path(path) {
            Ok(report) => {
                session.record_report(&report);
                match format {
                    OutputFormat::Text => print_report(&report),
                    OutputFormat::Json => json_reports.push(serde_json::to_value(&report)?),
                }
            }
            Err(error) => {
                // Report the failure and continue with the next file
                warn!("Skipping {}: {}", path.display(), error);
                session.record_failure();
                match format {
                    OutputFormat::Text => println!(
                        "{} {}: {}",
                        "Could not parse".bright_red().bold(),
                        path.display(),
                        error
                    ),
                    OutputFormat::Json => json_reports.push(serde_json::json!({
                        "filename": path.display().to_string(),
                        "error": error.to_string(),
                    })),
                }
            }
        }
    }

    // Print session summary
    match format {
        OutputFormat::Text => print_session(&session),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "reports": json_reports,
                "session": session,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_report(report: &ParsedReport) {
    println!("\n{}", report.filename.bright_green().bold());

    if report.is_empty() {
        println!(
            "  {}",
            "No recognizable data was extracted from the report.".yellow()
        );
        return;
    }

    let summary = ReportSummary::from_records(&report.records);
    println!(
        "  Found {} Passed, {} Failed, and {} Other items.",
        summary.passed.len().to_string().bright_green(),
        summary.failed.len().to_string().bright_red(),
        summary.other.len().to_string().bright_white()
    );

    let buckets = [
        ("Passed", summary.passed.as_slice(), Color::BrightGreen),
        ("Failed", summary.failed.as_slice(), Color::BrightRed),
        ("Other", summary.other.as_slice(), Color::BrightBlack),
    ];
    for (title, records, color) in buckets {
        if records.is_empty() {
            continue;
        }
        println!("  {}", title.color(color).bold());
        for record in records {
            print_record(record);
        }
    }

    if report.unmatched_lines > 0 {
        println!(
            "  {} {}",
            "Unmatched lines:".bright_black(),
            report.unmatched_lines
        );
    }
    if report.used_summary_fallback {
        println!(
            "  {}",
            "Generic PASS from summary phrase; no test lines were recognised".yellow()
        );
    }
}

fn print_record(record: &ExtractedRecord) {
    match record {
        ExtractedRecord::Test(test) => {
            println!(
                "    {} {}",
                "Test:".bright_cyan(),
                test.test_name.bright_white()
            );
            println!("      Result:   {}", test.result);
            println!("      Standard: {}", test.standard_or_sentinel());
            if let Some(actual) = &test.actual {
                println!("      Actual:   {}", actual);
            }
        }
        ExtractedRecord::Profile(profile) => {
            println!(
                "    {} {} ({})",
                "Test:".bright_cyan(),
                profile.test_name().bright_white(),
                profile.result()
            );
            for (label, value) in profile.details() {
                println!("      {}: {}", label, value);
            }
        }
    }
}

fn print_session(session: &SessionStats) {
    println!("\n{}", "Session Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Reports verified:".bright_cyan(),
        session.reports_verified.to_string().bright_white()
    );
    if session.reports_failed > 0 {
        println!(
            "  {} {}",
            "Reports failed:".bright_red(),
            session.reports_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Components in DB:".bright_cyan(),
        session.components_in_db.to_string().bright_white()
    );
}

fn show_component(tables: &KnowledgeTables, part_number: &str) {
    match tables.components.lookup(part_number) {
        Some(component) => print_component(component),
        None => println!("{}", "Part number not found in the database.".yellow()),
    }
}

fn print_component(component: &Component) {
    println!(
        "{} {}",
        "Details for:".bright_green().bold(),
        component.part_number.to_uppercase().bright_white().bold()
    );
    for (i, (key, value)) in component.attributes.iter().enumerate() {
        println!("  {}. {}: {}", i + 1, key.bright_cyan(), value);
    }
}

fn show_procedure(tables: &KnowledgeTables, keyword: &str) {
    match tables.procedures.find_procedure(keyword) {
        Some(procedure) => print_procedure(procedure),
        None => println!(
            "{}",
            format!("No detailed procedure found for '{}'.", keyword.trim()).yellow()
        ),
    }
}

fn print_procedure(procedure: &TestProcedure) {
    println!(
        "{} {}",
        "Generated Procedure for:".bright_green().bold(),
        procedure.name.bright_white().bold()
    );
    println!("  {} {}", "Standard:".bright_cyan(), procedure.standard);
    println!("  {} {}", "Description:".bright_cyan(), procedure.description);
    if let Some(url) = &procedure.image_url {
        println!("  {} {}", "Setup image:".bright_cyan(), url);
    }

    println!("  {}", "Test Procedure:".bright_cyan());
    for step in &procedure.procedure {
        println!("    - {}", step);
    }
    println!("  {}", "Required Equipment:".bright_cyan());
    for item in &procedure.equipment {
        println!("    - {}", item);
    }
}

fn show_stats(config: &VerifierConfig, tables: &KnowledgeTables) {
    println!("{}", "Compliance Verifier".bright_green().bold());
    println!(
        "  {} {}",
        "Test procedures:".bright_cyan(),
        tables.procedures.len()
    );
    println!(
        "  {} {}",
        "Components in DB:".bright_cyan(),
        tables.components.len()
    );
    println!(
        "  {} {}",
        "Standard mappings:".bright_cyan(),
        config.standards.len()
    );
    println!(
        "  {} {}",
        "Summary fallback:".bright_cyan(),
        config
            .summary_fallback_phrase
            .as_deref()
            .unwrap_or("disabled")
    );
}
