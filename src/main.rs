use clap::Parser;
use reelpick::core::config::{self, CliOverrides};
use reelpick::logging::DeferredLogFile;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "reelpick", about = "Movie recommendations in your terminal")]
struct Args {
    /// Base URL of the recommendation service (overrides REELPICK_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Show a popup when the movie catalog cannot be loaded
    #[arg(long)]
    alert_on_catalog_failure: bool,

    /// Where to write the debug log
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let cli = CliOverrides {
        backend_url: args.backend_url,
        alert_on_catalog_failure: args.alert_on_catalog_failure,
        log_file: args.log_file,
    };

    // File logger: the terminal belongs to the UI. Its path is a config
    // value, so records are buffered until config has been resolved.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let log_sink = DeferredLogFile::new();
    let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_sink.clone());

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            log::warn!("{e}, using defaults");
            Default::default()
        }
    };
    let resolved = config::resolve(&file_config, &cli);

    let attached = File::create(&resolved.log_file).and_then(|file| log_sink.attach(file));
    if let Err(e) = attached {
        eprintln!("Warning: cannot write log file {}: {e}", resolved.log_file);
        let _ = log_sink.discard();
    }

    log::info!(
        "Reelpick starting up against {} (max_suggestions={}, catalog_failure_alert={})",
        resolved.backend_url,
        resolved.max_suggestions,
        resolved.catalog_failure_alert
    );

    reelpick::tui::run(resolved)
}
