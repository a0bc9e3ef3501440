//! Subcommand implementations.

pub mod generate;
pub mod list;

use std::path::PathBuf;

use clap::Args;
use yapi2ts_core::YapiClient;

use crate::config::{Config, ConfigOverrides};

/// Run a command body and turn its error into an exit code.
pub async fn run_cli_async<F, Fut>(f: F) -> i32
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    match f().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

/// Where the YAPI server is and how to authenticate.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    #[arg(long, value_name = "PATH", help = "Config file. Defaults to ./yapi2ts.toml, then ~/.yapi2ts/config.toml")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "URL", help = "YAPI server URL (overrides YAPI2TS_BASE_URL)")]
    pub base_url: Option<String>,

    #[arg(long, value_name = "TOKEN", help = "YAPI project token (overrides YAPI2TS_TOKEN)")]
    pub token: Option<String>,
}

impl ConnectionArgs {
    /// The connection flags as config overrides.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            ..ConfigOverrides::default()
        }
    }
}

pub(crate) fn connect(config: &Config) -> Result<YapiClient, String> {
    YapiClient::new(config.base_url.clone(), config.token.clone())
        .map_err(|err| format!("Failed to build HTTP client: {err}"))
}
