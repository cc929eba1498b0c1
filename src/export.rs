use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::aggregate::filter_by_category;
use crate::error::ExportError;
use crate::models::DealRecord;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub deals: usize,
}

/// File-name stem for a category: lowercase, spaces become underscores.
pub fn category_slug(category: &str) -> String {
    category.to_lowercase().replace(' ', "_").trim().to_string()
}

pub fn log_file_name(category: &str, at: DateTime<Local>) -> String {
    format!("{}-{}.log", category_slug(category), at.format(TIMESTAMP_FORMAT))
}

/// One `[Deal #n] title:` / url / blank-line block per deal, numbered from 1.
pub fn render_log(deals: &[&DealRecord]) -> String {
    let mut out = String::new();
    for (i, deal) in deals.iter().enumerate() {
        let _ = write!(out, "[Deal #{}] {}:\n{}\n\n", i + 1, deal.title_or_na(), deal.url_or_na());
    }
    out
}

/// Append every deal of `category` to a timestamped log under `logs_dir`,
/// creating the directory on demand.
pub fn export_category_log(
    logs_dir: &Path,
    category: &str,
    deals: &[DealRecord],
) -> Result<ExportSummary, ExportError> {
    export_category_log_at(logs_dir, category, deals, Local::now())
}

pub fn export_category_log_at(
    logs_dir: &Path,
    category: &str,
    deals: &[DealRecord],
    at: DateTime<Local>,
) -> Result<ExportSummary, ExportError> {
    fs::create_dir_all(logs_dir).map_err(|source| ExportError::Io {
        path: logs_dir.to_path_buf(),
        source,
    })?;

    let path = logs_dir.join(log_file_name(category, at));
    let matching = filter_by_category(deals, category);
    let contents = render_log(&matching);

    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.clone(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(io_err)?;
    file.write_all(contents.as_bytes()).map_err(io_err)?;

    info!(
        target: "export",
        path = %path.display(),
        category,
        deals = matching.len(),
        "deal log written"
    );
    Ok(ExportSummary {
        path,
        deals: matching.len(),
    })
}
