//! FactoryMod config reader and wiki table generator
//!
//! Loads a FactoryMod YAML config into typed models, resolves recipe
//! references and the upgrade graph between factories, and renders the wiki
//! tables for a factory.

pub mod duration;
pub mod error;
pub mod models;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod servers;

use std::path::Path;

use serde_yaml::Value;

pub use crate::duration::{parse_duration, Duration, Seconds};
pub use crate::error::{Error, Result};
pub use crate::models::{Config, Factory, Recipe, RecipeType};
pub use crate::render::render;
pub use crate::resolve::{resolve, Diagnostics};

/// Deserialize a config document without resolving it.
pub fn load_config(yaml: &str) -> Result<Config> {
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(data) => schema::deserialize(&data),
        _ => Err(Error::NotAMapping),
    }
}

/// Deserialize and resolve a config document.
pub fn load_and_resolve(yaml: &str) -> Result<(Config, Diagnostics)> {
    let mut config = load_config(yaml)?;
    let diagnostics = resolve(&mut config)?;
    Ok((config, diagnostics))
}

/// Read, deserialize and resolve a config file.
pub fn load_file(path: &Path) -> Result<(Config, Diagnostics)> {
    let yaml = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_and_resolve(&yaml)
}
