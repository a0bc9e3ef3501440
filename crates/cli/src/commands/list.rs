//! `yapi2ts list`: print the project's categories.

use clap::Args;
use console::style;
use tracing::debug;
use yapi2ts_core::InterfaceCategory;

use crate::commands::{ConnectionArgs, connect, run_cli_async};
use crate::common::{plural, spinner};
use crate::config::Config;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Run `yapi2ts list` and return its exit code.
pub async fn run(args: ListArgs) -> i32 {
    run_cli_async(|| run_inner(args)).await
}

async fn run_inner(args: ListArgs) -> Result<(), String> {
    let config = Config::load(args.connection.overrides()).map_err(|err| err.to_string())?;
    debug!(?config, "Loaded configuration.");
    let client = connect(&config)?;

    let spinner = spinner("Fetching interface listing...");
    let categories = client.fetch_categories().await;
    spinner.finish_and_clear();
    let categories =
        categories.map_err(|err| format!("Failed to fetch YAPI interfaces: {err}"))?;

    if categories.is_empty() {
        println!("No interfaces found.");
        return Ok(());
    }

    for category in &categories {
        print_category(category);
    }
    Ok(())
}

fn print_category(category: &InterfaceCategory) {
    println!(
        "{} {}",
        style(&category.name).bold().cyan(),
        style(format!("({})", plural(category.interfaces.len(), "interface"))).dim()
    );
    for interface in &category.interfaces {
        println!(
            "  {:>8}  {:<7} {}  {}",
            interface.id,
            interface.method.to_uppercase(),
            interface.path,
            style(&interface.title).dim()
        );
    }
}
