use crate::analyzers::ClimateAnalyzer;
use crate::cli::args::Cli;
use crate::error::Result;
use crate::readers::{IngestStats, ObservationReader};
use crate::utils::progress::ProgressReporter;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    let reader = ObservationReader::with_mmap(cli.mmap);
    let mut analyzer = ClimateAnalyzer::new();
    let mut totals = IngestStats::default();

    for path in &cli.files {
        println!("Opening file: {}", path.display());

        let progress =
            ProgressReporter::new_spinner(&format!("Processing {}...", path.display()), cli.quiet);

        match reader.ingest_file(path, &mut analyzer) {
            Ok(stats) => {
                progress.finish_with_message(&format!(
                    "{}: {} records, {} malformed",
                    path.display(),
                    stats.records_ingested,
                    stats.malformed_lines
                ));
                totals.merge(&stats);
            }
            Err(e) => {
                progress.finish_with_message(&format!("{}: skipped", path.display()));
                eprintln!("ERROR: cannot read {}: {}", path.display(), e);
            }
        }
    }

    debug!(
        "Run complete: {} records ingested, {} malformed lines, {} regions",
        totals.records_ingested,
        totals.malformed_lines,
        analyzer.region_count()
    );

    if !analyzer.is_empty() {
        print!("{}", analyzer.report());
    }

    Ok(())
}

/// Route diagnostics to stderr; stdout carries only status lines and the report
fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let default_filter = if verbose {
        "tdv_processor=debug"
    } else {
        "tdv_processor=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
