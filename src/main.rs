use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::{Subcommand, ValueEnum};
use env_logger::Builder;
use log::{debug, info};

use scoping_interpreter as scoping;

use scoping::error::ScopeError;
use scoping::interpreter::{Interpreter, ScopingMode, DEFAULT_MAX_DEPTH};
use scoping::output::Stdout;
use scoping::printer::Printer;
use scoping::program::Program;

#[derive(ClapParser, Debug)]
#[command(version, about = "Static vs dynamic scoping interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a JSON program file, or the built-in example when none is given
    Run {
        filename: Option<PathBuf>,

        /// Scoping rule(s) to run the program under
        #[arg(long, value_enum, default_value_t = Mode::Both)]
        mode: Mode,

        /// Maximum function call depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Prints a JSON program file, or the built-in example, as pseudo-source
    Show { filename: Option<PathBuf> },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Static,
    Dynamic,
    Both,
}

impl Mode {
    fn scoping_modes(self) -> &'static [ScopingMode] {
        match self {
            Mode::Static => &[ScopingMode::Static],
            Mode::Dynamic => &[ScopingMode::Dynamic],
            Mode::Both => &[ScopingMode::Static, ScopingMode::Dynamic],
        }
    }
}

/// sysexits: 65 for a program that cannot be loaded, 70 for a failed run.
fn exit_code(error: &ScopeError) -> i32 {
    if error.is_runtime() {
        70
    } else {
        65
    }
}

fn load_program(filename: Option<PathBuf>) -> Program {
    match filename {
        Some(filename) => match Program::load(&filename) {
            Ok(program) => {
                info!(
                    "Loaded {} statements from {:?}",
                    program.statements.len(),
                    filename
                );
                program
            }

            Err(e) => {
                debug!("Load debug: {}", e);
                eprintln!("Failed to load {:?}: {}", filename, e);
                std::process::exit(exit_code(&e));
            }
        },

        None => {
            info!("No filepath provided, using the built-in example");
            Program::example()
        }
    }
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Configure env_logger to write to file with module and source line
    Builder::new()
        .format(|buf, record| {
            // Strip 'scoping_interpreter::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("scoping_interpreter::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Run {
            filename,
            mode,
            max_depth,
        } => {
            info!("Running Run subcommand");
            let program = load_program(filename);
            let mut failure: Option<i32> = None;

            for (i, &scoping_mode) in mode.scoping_modes().iter().enumerate() {
                if mode == Mode::Both {
                    if i > 0 {
                        println!();
                    }
                    println!("{} Scoping Output:", scoping_mode.title());
                }

                let interpreter =
                    Interpreter::with_output(scoping_mode, Stdout).with_max_depth(max_depth);

                // Each mode gets its own interpreter, so a failure here leaves
                // the next run untouched.
                match program.run_with(interpreter) {
                    Ok(_) => info!("{} run completed", scoping_mode),

                    Err(e) => {
                        debug!("Runtime debug: {}", e);
                        eprintln!("{}", e);
                        failure = failure.max(Some(exit_code(&e)));
                    }
                }
            }

            if let Some(code) = failure {
                debug!("At least one run failed, exiting with code {}", code);
                std::process::exit(code);
            }
        }

        Commands::Show { filename } => {
            info!("Running Show subcommand");
            let program = load_program(filename);
            print!("{}", Printer.print_program(&program.statements));
            for name in &program.calls {
                println!("{}()", name);
            }
        }
    }

    Ok(())
}
