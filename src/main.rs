//! stepctx: emit the run step's typed context as JSON.
//!
//! Invoked by the CI runner (or by hand) inside a custom workflow run
//! step. Reads the step's named inputs from the environment, writes the
//! assembled context to stdout.
//!
//! Usage:
//!   stepctx [--pretty]     build the context and print it as JSON
//!   stepctx decode [RAW]   decode one escaped argument string (argument
//!                          or stdin) and print it shell-quoted
//!   stepctx --dump-config  print the merged configuration as TOML

use std::io::Read;

use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use stepctx::config::Config;
use stepctx::logging;
use stepctx::parse;
use stepctx::step::{EnvSource, RunStep};

fn init_logging(config: &Config) {
    let level = match config.settings.log_level.as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Build the step context from the environment and print it.
fn run_step(config: &Config, pretty: bool) {
    let outcome = RunStep::from_source(&EnvSource, &config.inputs.extra);
    logging::log_outcome(&outcome);

    match outcome {
        Ok(step) => {
            let json = if pretty || config.settings.pretty {
                serde_json::to_string_pretty(&step)
            } else {
                serde_json::to_string(&step)
            };
            println!("{}", json.unwrap());
        }
        Err(e) => {
            eprintln!("stepctx: {e}");
            std::process::exit(1);
        }
    }
}

/// Decode one escaped argument string and print it shell-quoted.
fn run_decode(raw_arg: Option<&str>) {
    let raw = match raw_arg {
        Some(v) => v.to_string(),
        None => {
            let mut buf = String::new();
            if std::io::stdin().read_to_string(&mut buf).is_err() {
                eprintln!("stepctx: failed to read stdin");
                std::process::exit(1);
            }
            buf.trim_end_matches('\n').to_string()
        }
    };

    match parse::decode(&raw) {
        Ok(args) => match shlex::try_join(args.iter().map(String::as_str)) {
            Ok(line) => println!("{line}"),
            Err(_) => {
                eprintln!("stepctx: decoded arguments contain a NUL byte");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("stepctx: {e}");
            std::process::exit(1);
        }
    }
}

fn usage() -> ! {
    eprintln!("usage: stepctx [--pretty] | stepctx decode [RAW] | stepctx --dump-config");
    std::process::exit(2);
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::load();
    init_logging(&config);

    match args.first().map(String::as_str) {
        None => run_step(&config, false),
        Some("--pretty") if args.len() == 1 => run_step(&config, true),
        Some("--dump-config") if args.len() == 1 => {
            print!("{}", toml::to_string(&config).unwrap());
        }
        Some("decode") if args.len() <= 2 => run_decode(args.get(1).map(String::as_str)),
        Some(_) => usage(),
    }
}
