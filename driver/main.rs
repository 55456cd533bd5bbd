#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

mod subcommand;

use std::sync::Once;
use std::{path, process};

pub struct DriverConfig {
    include_path: Option<path::PathBuf>,
    persist_history: bool,
}

static TRACING_INIT: Once = Once::new();

/// Installs a tracing subscriber if `RUST_LOG` is set
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() {
    use clap::{crate_version, App, Arg, SubCommand};

    init_tracing();

    let matches = App::new("marl")
        .version(crate_version!())
        .about("Interpreter and REPL for the Marl language")
        .subcommand(
            SubCommand::with_name("repl")
                .about("Starts an interactive REPL")
                .arg(
                    Arg::with_name("INCLUDE")
                        .short("i")
                        .long("include")
                        .value_name("FILE")
                        .help("file to evaluate before starting REPL"),
                )
                .arg(
                    Arg::with_name("NO_HISTORY")
                        .long("no-history")
                        .takes_value(false)
                        .help("Don't load or save REPL history"),
                ),
        )
        .subcommand(
            SubCommand::with_name("eval")
                .about("Evaluates a Marl source file")
                .arg(
                    Arg::with_name("INPUT")
                        .help("Input source file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    if let Some(eval_matches) = matches.subcommand_matches("eval") {
        let input_path = match eval_matches.value_of("INPUT") {
            Some(input_param) => path::Path::new(input_param),
            None => {
                eprintln!("Input file not specified");
                process::exit(1);
            }
        };

        if !subcommand::eval::eval_input_file(input_path) {
            process::exit(2);
        }
    } else {
        // The REPL is the default when no subcommand is given
        let repl_matches = matches.subcommand_matches("repl");

        let cfg = DriverConfig {
            include_path: repl_matches
                .and_then(|repl_matches| repl_matches.value_of("INCLUDE"))
                .map(path::PathBuf::from),
            persist_history: !repl_matches
                .map_or(false, |repl_matches| repl_matches.is_present("NO_HISTORY")),
        };

        subcommand::repl::interactive_loop(&cfg);
    }
}
