//! Batch generation over a directory of brand configs

use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::brand;
use crate::error::Result;
use crate::manifest::{self, GeneratedProject};

/// Extension a file must carry to be treated as a brand config
pub const CONFIG_EXTENSION: &str = ".json";

/// A brand config discovered in the config directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandEntry {
    /// File name as listed, e.g. `acme.json`
    pub file_name: String,
    /// File name with the extension stripped, used as the output subdirectory
    pub brand_id: String,
    pub path: PathBuf,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Brand ids whose projects were generated
    pub succeeded: Vec<String>,
    /// File name and failure reason for each brand that failed
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// List brand configs in `config_dir`, sorted by file name
///
/// Only regular files directly inside the directory whose name ends in `.json`
/// are returned.
pub fn discover(config_dir: &Path) -> std::io::Result<Vec<BrandEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(config_dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            let lossy = entry.file_name().to_string_lossy().to_string();
            if lossy.ends_with(CONFIG_EXTENSION) {
                warn!("Skipping configuration with non UTF-8 file name: {}", lossy);
            }
            continue;
        };
        if let Some(brand_id) = file_name.strip_suffix(CONFIG_EXTENSION) {
            entries.push(BrandEntry {
                brand_id: brand_id.to_string(),
                path: entry.path(),
                file_name,
            });
        }
    }

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

/// Load, derive and generate a single brand
pub fn process_brand(config_path: &Path, output_dir: &Path) -> Result<GeneratedProject> {
    let config = brand::load(config_path)?;
    manifest::generate(&config, output_dir)
}

/// Generate a project for every brand config in `config_dir`
///
/// Each brand writes into `<output_base>/<brand_id>`. A failing brand is logged
/// and recorded in the report; the remaining brands are still processed.
pub fn run(config_dir: &Path, output_base: &Path) -> std::io::Result<BatchReport> {
    fs::create_dir_all(output_base)?;

    let mut report = BatchReport::default();

    for entry in discover(config_dir)? {
        info!("Processing configuration: {}", entry.file_name);
        let output_dir = output_base.join(&entry.brand_id);

        match process_brand(&entry.path, &output_dir) {
            Ok(_) => {
                info!("Successfully generated project for {}", entry.brand_id);
                report.succeeded.push(entry.brand_id);
            }
            Err(e) => {
                error!("Failed to process {}: {}", entry.file_name, e);
                report.failed.push((entry.file_name, e.to_string()));
            }
        }
    }

    info!(
        "Batch complete: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    Ok(report)
}
