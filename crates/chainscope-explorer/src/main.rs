#![forbid(unsafe_code)]

//! ChainScope explorer binary entry point.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use chainscope_explorer::app::{AppModel, ScreenId};
use chainscope_explorer::cli;
use chainscope_explorer::demo::DemoDataSource;
use chainscope_runtime::{Program, ProgramConfig};

fn main() {
    let opts = cli::Opts::parse();
    init_tracing();

    let source = match DemoDataSource::new(Duration::from_millis(opts.fetch_latency_ms)) {
        Ok(source) => Arc::new(source),
        Err(e) => {
            eprintln!("Failed to load demo data: {e}");
            std::process::exit(1);
        }
    };
    let catalog = source.catalog();
    let mut model = AppModel::new(source, catalog);
    if let Some(screen) = ScreenId::from_number(opts.start_screen) {
        model.current_screen = screen;
    }

    let config = ProgramConfig {
        mouse: opts.mouse,
        tick_interval: Duration::from_millis(opts.tick_ms.max(10)),
    };
    match Program::new(model, config) {
        Ok(mut program) => {
            if let Err(e) = program.run() {
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize terminal: {e}");
            std::process::exit(1);
        }
    }
}

/// Route tracing output to a file when `CHAINSCOPE_LOG` is set; stderr
/// would corrupt the raw-mode screen.
fn init_tracing() {
    let Ok(path) = std::env::var("CHAINSCOPE_LOG") else {
        return;
    };
    match std::fs::File::create(&path) {
        Ok(file) => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            eprintln!("Cannot open log file {path}: {e}");
        }
    }
}
