use gocook::cli::{self, CliArgs};
use gocook::util::{init_logging, parse_level, LoggingConfig};
use gocook::{GocookConfig, NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, Level};

fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let config = GocookConfig::default();
    init_logging_from_args(&args, &config);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match args.mode() {
        Ok(mode) => cli::run(mode, &args.dir, &config),
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &GocookConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    init_logging(LoggingConfig {
        level,
        use_json: config.log_json,
        ..Default::default()
    });
}
