#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args by hand to keep the binary lean. Environment variables with
//! the `CHAINSCOPE_` prefix supply defaults that explicit flags override.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
ChainScope — supply-chain risk explorer

USAGE:
    chainscope-explorer [OPTIONS]

OPTIONS:
    --screen=N           Start on screen N, 1-indexed (default: 1)
    --no-mouse           Disable mouse event capture
    --tick-ms=N          Input poll / animation tick in milliseconds (default: 100)
    --fetch-latency-ms=N Simulated backend latency (default: 250)
    --help, -h           Show this help message
    --version, -V        Show version

SCREENS:
    1  Risk Alerts       Global hotspot map, supply-chain risk tree, alert feed
    2  Supply Chain      Component/manufacturer tree explorer
    3  Regulatory        Node selection with regulation lookup

KEYBINDINGS:
    1-3             Switch screens
    Tab / Shift-Tab Cycle through screens
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    CHAINSCOPE_SCREEN            Override --screen
    CHAINSCOPE_TICK_MS           Override --tick-ms
    CHAINSCOPE_FETCH_LATENCY_MS  Override --fetch-latency-ms
    CHAINSCOPE_LOG               Write tracing output to this file";

/// Parsed command-line options.
pub struct Opts {
    /// Starting screen (1-indexed).
    pub start_screen: u16,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Poll/tick interval in milliseconds.
    pub tick_ms: u64,
    /// Simulated backend latency in milliseconds.
    pub fetch_latency_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            start_screen: 1,
            mouse: true,
            tick_ms: 100,
            fetch_latency_ms: 250,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("CHAINSCOPE_SCREEN")
            && let Ok(n) = val.parse()
        {
            opts.start_screen = n;
        }
        if let Ok(val) = env::var("CHAINSCOPE_TICK_MS")
            && let Ok(n) = val.parse()
        {
            opts.tick_ms = n;
        }
        if let Ok(val) = env::var("CHAINSCOPE_FETCH_LATENCY_MS")
            && let Ok(n) = val.parse()
        {
            opts.fetch_latency_ms = n;
        }

        let args: Vec<String> = env::args().skip(1).collect();
        for arg in &args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("chainscope-explorer {VERSION}");
                    process::exit(0);
                }
                "--no-mouse" => {
                    opts.mouse = false;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--screen=") {
                        opts.start_screen = parse_or_exit(val, "--screen");
                    } else if let Some(val) = other.strip_prefix("--tick-ms=") {
                        opts.tick_ms = parse_or_exit(val, "--tick-ms");
                    } else if let Some(val) = other.strip_prefix("--fetch-latency-ms=") {
                        opts.fetch_latency_ms = parse_or_exit(val, "--fetch-latency-ms");
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
        }

        opts
    }
}

fn parse_or_exit<T: std::str::FromStr>(val: &str, flag: &str) -> T {
    match val.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Invalid {flag} value: {val}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.start_screen, 1);
        assert!(opts.mouse);
        assert_eq!(opts.tick_ms, 100);
        assert_eq!(opts.fetch_latency_ms, 250);
    }

    #[test]
    fn help_text_lists_screens_and_env() {
        assert!(HELP_TEXT.contains("Risk Alerts"));
        assert!(HELP_TEXT.contains("Supply Chain"));
        assert!(HELP_TEXT.contains("Regulatory"));
        assert!(HELP_TEXT.contains("CHAINSCOPE_LOG"));
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
