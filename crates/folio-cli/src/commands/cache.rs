//! Cache commands - inspect or clear the session's project cache.

use crate::output;
use anyhow::Result;
use clap::Subcommand;
use folio_cache::{FileStore, ProjectsCache};
use folio_config::FolioConfig;
use folio_core::filter_label;
use std::process::ExitCode;

/// Cache subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Show what the session cache holds
    Show,
    /// Remove the cached project list
    Clear,
}

fn open(config: &FolioConfig) -> ProjectsCache<FileStore> {
    ProjectsCache::new(FileStore::new(config.session_path()))
}

/// Run the cache show command
pub fn show(config: &FolioConfig) -> Result<ExitCode> {
    let cache = open(config);
    let Some(snapshot) = cache.load() else {
        output::info(&format!(
            "No cached project list for session '{}'",
            config.session_id
        ));
        return Ok(ExitCode::SUCCESS);
    };

    output::header(&format!("Session '{}'", config.session_id));
    let rows = [
        ("Location", cache.store().root().display().to_string()),
        ("Filter", filter_label(snapshot.selected_type).to_string()),
        ("Projects", snapshot.projects.len().to_string()),
        ("Featured", snapshot.featured_count.to_string()),
        (
            "Non-featured",
            format!(
                "{} of {}",
                snapshot.non_featured_loaded(),
                snapshot.non_featured_total
            ),
        ),
        (
            "Last page",
            format!(
                "{} (page size {})",
                snapshot.non_featured_page, snapshot.page_limit
            ),
        ),
        ("Scroll offset", format!("{:.0}px", snapshot.scroll_position)),
    ];
    for (label, value) in rows {
        println!("{} {value}", output::dim(&format!("{label:<14}")));
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the cache clear command
pub fn clear(config: &FolioConfig) -> Result<ExitCode> {
    open(config).clear()?;
    output::success(&format!(
        "Cleared project cache for session '{}'",
        config.session_id
    ));
    Ok(ExitCode::SUCCESS)
}
