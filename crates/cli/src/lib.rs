//! Command-line front end for yapi2ts.

use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod common;
pub mod config;
mod logging;

pub use logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "yapi2ts",
    version,
    about = "Generate TypeScript declarations from YAPI interface definitions"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the project's categories and interfaces
    List(commands::list::ListArgs),
    /// Generate one TypeScript module per selected interface
    Generate(commands::generate::GenerateArgs),
}

/// Parse `args` and run the command. Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            return 1;
        }
    };

    runtime.block_on(dispatch(args))
}

async fn dispatch(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::List(args)) => commands::list::run(args).await,
            Some(Commands::Generate(args)) => commands::generate::run(args).await,
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}
