use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use domain_feed::{
    kev_sources::cisa,
    lifecycle,
    triage::{triage, FeedSnapshot, TriageRules},
};
use dotenvy::dotenv;
use env_logger::Env;
use lazy_static::lazy_static;

mod configuration;
mod report;

use crate::configuration::FeedSettings;

const REPORT_FILE_NAME: &str = "index.html";

fn main() -> Result<()> {
    let opts = Opts::parse();

    dotenv().ok();

    // Setup logger
    {
        #[cfg(debug_assertions)]
        let default_env_filter = "debug";
        #[cfg(not(debug_assertions))]
        let default_env_filter = "info";

        let env = Env::default().default_filter_or(default_env_filter);
        env_logger::Builder::from_env(env)
            .try_init()
            .context("Failed to setup logger")?;
    }

    let settings = FeedSettings::try_from_env()?;

    // A failed fetch degrades to an empty report; only filesystem errors
    // abort the run.
    let snapshot = match cisa::fetch_catalog(&settings.url) {
        Ok(catalog) => FeedSnapshot::Loaded(triage(&TriageRules::default(), catalog.vulnerabilities)),
        Err(e) => {
            log::error!("{} fetch failed: {}", cisa::SOURCE_NAME, e);
            FeedSnapshot::Unavailable(e.to_string())
        }
    };

    let html = report::render(&lifecycle::msp_dataset(), &snapshot, Utc::now());

    let report_path = check_output_path(&opts.output_dir).join(REPORT_FILE_NAME);

    fs::write(&report_path, html)
        .with_context(|| format!("could not write {}", report_path.display()))?;

    log::info!("{}", report_message(&snapshot, &report_path));

    Ok(())
}

#[derive(Parser)]
#[command(author, version = version(), about)]
#[command(disable_help_subcommand = true)]
struct Opts {
    /// Directory the rendered report is written to
    #[arg(short = 'o', long = "output", default_value_t = String::from("public"))]
    output_dir: String,
}

/// Handle output directory creation if not existing
fn check_output_path(output_dir: &str) -> &Path {
    let output_path = Path::new(output_dir);
    if !output_path.exists() {
        log::info!("creating {}", output_path.display());
        fs::create_dir_all(output_path).expect("could not create output path");
    }
    output_path
}

fn report_message(snapshot: &FeedSnapshot, report_path: &Path) -> String {
    match snapshot {
        FeedSnapshot::Loaded(entries) => format!(
            "wrote {} with {} active threats",
            report_path.display(),
            entries.len()
        ),
        FeedSnapshot::Unavailable(_) => {
            format!("wrote {} without live feed data", report_path.display())
        }
    }
}

fn version() -> &'static str {
    #[cfg(debug_assertions)]
    lazy_static! {
        static ref VERSION: String = format!("{}+dev", env!("CARGO_PKG_VERSION"));
    }

    #[cfg(not(debug_assertions))]
    lazy_static! {
        static ref VERSION: String = env!("CARGO_PKG_VERSION").to_string();
    }
    &VERSION
}
