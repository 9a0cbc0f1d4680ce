use clap::Parser;
use navstack::core::config::{self, CliOverrides};
use navstack::core::session;
use navstack::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "navstack", about = "Component navigation stack demo")]
struct Args {
    /// Start with a single root screen instead of the last session
    #[arg(long)]
    fresh: bool,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // A broken config file is reported once and otherwise ignored.
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::NavConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            log_level: args.log_level,
            fresh: args.fresh,
        },
    );

    // Initialize file logger - writes to navstack.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("navstack.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("navstack starting up with {:?}", resolved);

    let session_dir = match session::session_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            log::warn!("Sessions disabled: {}", e);
            None
        }
    };

    tui::run(resolved, session_dir)
}
