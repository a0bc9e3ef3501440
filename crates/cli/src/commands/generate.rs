//! `yapi2ts generate`: write one module per selected interface.

use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgGroup, Args};
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use yapi2ts_core::{
    BatchCoordinator, BatchOptions, BatchResult, FsModuleStore, Selection, select,
};

use crate::commands::{ConnectionArgs, connect, run_cli_async};
use crate::common::{format_elapsed_ms, plural, spinner};
use crate::config::{CollisionSetting, Config};

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("selection").args(["all", "categories", "ids"])))]
pub struct GenerateArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(long, help = "Generate every interface of the project (default)")]
    pub all: bool,

    #[arg(
        long = "category",
        value_name = "NAME",
        help = "Generate the interfaces of a category. Repeatable"
    )]
    pub categories: Vec<String>,

    #[arg(long = "id", value_name = "ID", help = "Generate one interface by id. Repeatable")]
    pub ids: Vec<u64>,

    #[arg(long, value_name = "DIR", help = "Output directory. Defaults to ./yapi")]
    pub out: Option<PathBuf>,

    #[arg(long, value_name = "N", help = "Maximum concurrent detail fetches, 0 for no limit")]
    pub concurrency: Option<usize>,

    #[arg(long, value_enum, help = "What to do when two interfaces map to the same file")]
    pub collision: Option<CollisionSetting>,
}

impl GenerateArgs {
    fn selection(&self) -> Selection {
        if !self.ids.is_empty() {
            Selection::Ids(self.ids.clone())
        } else if !self.categories.is_empty() {
            Selection::Categories(self.categories.clone())
        } else {
            Selection::All
        }
    }
}

/// Run `yapi2ts generate` and return its exit code. Exits 1 unless a module was written.
pub async fn run(args: GenerateArgs) -> i32 {
    run_cli_async(|| run_inner(args)).await
}

async fn run_inner(args: GenerateArgs) -> Result<(), String> {
    let mut overrides = args.connection.overrides();
    overrides.out_dir = args.out.clone();
    overrides.concurrency = args.concurrency;
    overrides.collision = args.collision;
    let config = Config::load(overrides).map_err(|err| err.to_string())?;
    debug!(?config, "Loaded configuration.");
    let client = connect(&config)?;

    let spinner_bar = spinner("Fetching interface listing...");
    let categories = client.fetch_categories().await;
    spinner_bar.finish_and_clear();
    let categories =
        categories.map_err(|err| format!("Failed to fetch YAPI interfaces: {err}"))?;

    let selected = select(&categories, &args.selection()).map_err(|err| err.to_string())?;
    if selected.is_empty() {
        return Err("No interfaces matched the selection".to_string());
    }

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let store = FsModuleStore;
    let coordinator = BatchCoordinator::new(&client, &store)
        .with_options(BatchOptions {
            concurrency: config.concurrency,
            collision: config.collision,
        })
        .with_cancellation(cancel);

    let start = Instant::now();
    let spinner_bar = spinner(&format!(
        "Generating {}...",
        plural(selected.len(), "module")
    ));
    let outcome = coordinator.run(&selected, &config.out_dir).await;
    spinner_bar.finish_and_clear();
    watcher.abort();

    let result = outcome.map_err(|err| format!("Generation failed: {err}"))?;
    print_summary(&result, &config, &format_elapsed_ms(start));

    if result.is_success() {
        Ok(())
    } else {
        Err("No modules were written".to_string())
    }
}

fn print_summary(result: &BatchResult, config: &Config, elapsed: &str) {
    if result.is_success() {
        println!(
            "{} Wrote {} to {} ({elapsed})",
            style("✓").green().bold(),
            plural(result.succeeded_count, "module"),
            config.out_dir.display()
        );
    }

    if !result.degraded.is_empty() {
        println!(
            "{} {} generated from the listing only:",
            style("!").yellow().bold(),
            plural(result.degraded.len(), "interface")
        );
        for entry in &result.degraded {
            println!("    #{}  {}", entry.interface_id, style(&entry.reason).dim());
        }
    }

    if !result.failures.is_empty() {
        println!(
            "{} {} not written:",
            style("✗").red().bold(),
            plural(result.failures.len(), "module")
        );
        for failure in &result.failures {
            println!("    #{}  {}", failure.interface_id, style(&failure.reason).dim());
        }
    }
}
