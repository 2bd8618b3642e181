//! Server config discovery and wiki page naming

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Lowercase server prefixes as typed on the command line, and how the wiki
/// capitalizes them in template titles.
const WIKI_SERVER_NAMES: &[(&str, &str)] = &[
    ("civcraft", "Civcraft"),
    ("civclassic", "CivClassic"),
    ("civmc", "CivMC"),
];

/// A server's FactoryMod config, e.g. `resources/civclassic 2.0.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// File stem, like `civclassic 2.0`.
    pub label: String,
    pub path: PathBuf,
}

/// Find every `*.yaml` / `*.yml` file below `resources`, sorted by label.
pub fn find_server_configs(resources: &Path) -> Vec<ServerConfig> {
    let mut configs: Vec<ServerConfig> = WalkDir::new(resources)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str())?;
            if ext != "yaml" && ext != "yml" {
                return None;
            }
            let label = path.file_stem()?.to_str()?.to_string();
            debug!(label = %label, path = %path.display(), "found server config");
            Some(ServerConfig {
                label,
                path: path.to_path_buf(),
            })
        })
        .collect();
    configs.sort_by(|a, b| a.label.cmp(&b.label));
    configs
}

/// Look up a server's config by label.
pub fn server_config(resources: &Path, label: &str) -> Result<ServerConfig> {
    let mut configs = find_server_configs(resources);
    match configs.iter().position(|c| c.label == label) {
        Some(i) => Ok(configs.swap_remove(i)),
        None => Err(Error::UnknownServer {
            label: label.to_string(),
            known: configs.into_iter().map(|c| c.label).collect(),
        }),
    }
}

/// `civclassic 2.0` as the wiki writes it: `CivClassic 2.0`.
pub fn wiki_server_name(label: &str) -> String {
    WIKI_SERVER_NAMES
        .iter()
        .fold(label.to_string(), |name, (from, to)| name.replace(from, to))
}

/// Title of the template page holding a factory's tables.
pub fn page_title(factory: &str, server: &str) -> String {
    format!(
        "Template:FactoryModConfig_{}_({})",
        factory,
        wiki_server_name(server)
    )
}

/// What happened to a page written by [`write_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Written,
    Unchanged,
}

/// Write `text` to `<dir>/<title>.wiki`, leaving the file alone when it
/// already holds exactly this text.
pub fn write_page(dir: &Path, title: &str, text: &str) -> Result<PageOutcome> {
    let file_name: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    let path = dir.join(format!("{}.wiki", file_name));
    let io_err = |source| Error::Io {
        path: path.clone(),
        source,
    };

    if fs::read_to_string(&path).is_ok_and(|current| current == text) {
        info!(page = %title, "page unchanged, skipping");
        return Ok(PageOutcome::Unchanged);
    }

    fs::create_dir_all(dir).map_err(io_err)?;
    fs::write(&path, text).map_err(io_err)?;
    info!(page = %title, path = %path.display(), "page written");
    Ok(PageOutcome::Written)
}

#[derive(Debug, Default)]
pub struct PageStats {
    pub written: usize,
    pub unchanged: usize,
}

impl PageStats {
    pub fn record(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Written => self.written += 1,
            PageOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

impl fmt::Display for PageStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} pages, {} unchanged",
            self.written, self.unchanged
        )
    }
}
