use crate::args::Cli;
use crate::config::{preload_env, AppConfig, DataSource};
use crate::fetch::fetch_catalog;
use crate::model::QuakeCatalog;
use crate::report::QuakeReport;
use anyhow::Context;
use clap::Parser;
use reqwest::Client;
use std::ffi::OsString;
use tracing::info;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct Application {
    config: AppConfig,
}

impl Application {
    /// Load the env file, then parse argv so `QUAKE_*` values from it apply.
    pub fn init() -> anyhow::Result<Application> {
        let args: Vec<OsString> = std::env::args_os().collect();
        preload_env(&args);
        Self::from_cli(Cli::parse_from(args))
    }

    pub fn from_cli(cli: Cli) -> anyhow::Result<Application> {
        Ok(Application {
            config: AppConfig::setup(cli)?,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    async fn load_catalog(&self) -> anyhow::Result<QuakeCatalog> {
        match self.config.source {
            DataSource::Remote => {
                let client = Client::builder()
                    .user_agent(APP_USER_AGENT)
                    .build()
                    .context("Failed to build HTTP client")?;
                fetch_catalog(&client, &self.config.query, &self.config.cache).await
            }
            DataSource::Cache => {
                info!("Reading cached response from {}", self.config.cache.path().display());
                self.config.cache.load()
            }
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let catalog = self.load_catalog().await?;
        let report = QuakeReport::build(&catalog)?;

        if self.config.output.json {
            println!("{}", report.to_json()?);
        } else {
            for line in report.summary_lines() {
                println!("{}", line);
            }
            for chart in report.charts()? {
                println!();
                println!("{}", chart);
            }
        }

        if let Some(dir) = &self.config.output.charts_dir {
            report.save_charts(dir)?;
        }

        Ok(())
    }
}
