//! CLI command implementations.

pub mod charts;
pub mod filter;
pub mod inspect;
pub mod samples;

use std::path::Path;

use vizlink::{Dashboard, SampleDataset};

use crate::cli::DataSource;
use crate::config;

/// Build a dashboard from the configuration and load the requested data.
pub fn load_dashboard(
    source: &DataSource,
    config_path: Option<&Path>,
) -> Result<Dashboard, Box<dyn std::error::Error>> {
    let mut dashboard = Dashboard::with_config(config::load(config_path)?)?;

    match (&source.file, &source.sample) {
        (Some(file), _) => dashboard.load_file(file)?,
        (None, Some(name)) => dashboard.load_sample(name.parse::<SampleDataset>()?)?,
        (None, None) => return Err("provide a FILE or --sample <name>".into()),
    }

    Ok(dashboard)
}

/// Display name of the loaded dataset.
pub fn dataset_name(dashboard: &Dashboard) -> String {
    dashboard
        .source()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "(none)".to_string())
}
