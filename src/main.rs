use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use taxgrid::core::config::{self, CliOverrides, TaxgridConfig};
use taxgrid::tui;

#[derive(Parser)]
#[command(name = "taxgrid", about = "Terminal table for viewing and editing tax records")]
struct Args {
    /// API base URL (overrides config file and TAXGRID_API_BASE)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger is not up yet, so a config error is held and logged below
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (TaxgridConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            log_file: args.log_file,
        },
    );

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("taxgrid starting up against {}", resolved.base_url);

    tui::run(resolved)
}
