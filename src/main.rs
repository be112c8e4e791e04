use clap::Parser;
use seasonsort::{
    AppError, BatchReport, Classification, Cli, Commands, OutputFormat, RuleSet,
    RuleTableConfig, classify_directory, classify_file, classify_path,
};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so reports on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            config,
            format,
            path,
        } => run_classify(&config, format, &path),
        Commands::Check { config } => run_check(&config),
        Commands::Match { config, dir, names } => run_match(&config, dir, &names),
    };

    if let Err(e) = result {
        tracing::error!("Error: {e}");
        process::exit(1);
    }
}

fn load_rules(config_path: &Path) -> anyhow::Result<RuleSet> {
    tracing::info!("Loading rule table from: {}", config_path.display());
    Ok(RuleTableConfig::load(config_path)?)
}

fn run_classify(config_path: &Path, format: OutputFormat, path: &Path) -> anyhow::Result<()> {
    let rules = load_rules(config_path)?;
    let report = match classify_path(path, &rules) {
        Ok(report) => report,
        Err(AppError::Batch(err)) => {
            // Show what was classified before the run stopped
            print_output(&err.report, format)?;
            return Err(err.into());
        }
        Err(e) => return Err(e.into()),
    };

    print_output(&report, format)?;
    Ok(())
}

fn print_output(report: &BatchReport, format: OutputFormat) -> seasonsort::Result<()> {
    match format {
        OutputFormat::Text => print_report(report),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn run_check(config_path: &Path) -> anyhow::Result<()> {
    let rules = load_rules(config_path)?;

    println!("Rule table OK: {} shows", rules.len());
    if !rules.skip_patterns().is_empty() {
        println!("  Global skip patterns: {}", rules.skip_patterns().len());
    }
    for group in rules.groups() {
        println!(
            "  {}: {} directory, {} file, {} skip",
            group.show(),
            group.dir_patterns().len(),
            group.file_patterns().len(),
            group.skip_patterns().len()
        );
    }

    Ok(())
}

fn run_match(config_path: &Path, dir: bool, names: &[String]) -> anyhow::Result<()> {
    let rules = load_rules(config_path)?;
    let mut conflicts = 0;

    for name in names {
        let result = if dir {
            classify_directory(name, &rules)
        } else {
            classify_file(name, &rules)
        };

        match result {
            Ok(Classification::Classified(id)) => println!("{name}\t{id}"),
            Ok(Classification::Unclassified(miss)) => println!("{name}\t- ({miss})"),
            Err(conflict) => {
                println!("{name}\t! {conflict}");
                conflicts += 1;
            }
        }
    }

    if conflicts > 0 {
        anyhow::bail!("{conflicts} of {} names produced a conflict", names.len());
    }

    Ok(())
}

fn print_report(report: &BatchReport) {
    println!("\n=== Classification Report ===");

    for outcome in &report.outcomes {
        let kind = if outcome.entry.is_dir { "dir " } else { "file" };
        match &outcome.classification {
            Classification::Classified(id) => {
                println!("  ✓ [{kind}] {} -> {id}", outcome.entry.name);
            }
            Classification::Unclassified(miss) if !miss.is_skip() => {
                println!("  ? [{kind}] {} ({miss})", outcome.entry.name);
            }
            Classification::Unclassified(_) => {}
        }
    }

    println!("\nSummary:");
    println!("  Total entries: {}", report.total());
    println!("  Classified: {}", report.classified().count());
    println!("  Unclassified: {}", report.misses().count());
    println!("  Skipped: {}", report.skipped().count());
}
