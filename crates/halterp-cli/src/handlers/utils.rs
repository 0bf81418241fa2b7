//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::mapping::Mapping;
use halterp_core::{coercions, Error as CoreError, HalRepresentation, Interpreter};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read and parse a HAL document; `-` reads standard input
pub fn read_document(path: &Path) -> Result<HalRepresentation> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        content
    } else {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        std::fs::read_to_string(path)?
    };

    tracing::debug!(path = %path.display(), bytes = content.len(), "Read document");

    HalRepresentation::from_json(&content).map_err(|e| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: "a JSON document".to_string(),
        message: match e {
            CoreError::Json { source, .. } => source.to_string(),
            other => other.to_string(),
        },
    })
}

/// Find a mapping file, falling back to the configured mappings directory
pub fn locate_mapping(mapping: &Path, config: &Config) -> Result<PathBuf> {
    if mapping.exists() {
        return Ok(mapping.to_path_buf());
    }

    let mut paths_to_try = Vec::new();
    if let Some(dir) = &config.defaults.mappings_dir {
        paths_to_try.push(dir.join(mapping));
        for extension in ["yaml", "yml", "json", "toml"] {
            paths_to_try.push(dir.join(mapping).with_extension(extension));
        }
    }

    paths_to_try
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| Error::FileNotFound {
            path: mapping.to_path_buf(),
        })
}

/// Load a mapping and declare its interpreter
///
/// A `base_url` given on the command line replaces the mapping's own; the
/// configured default only fills in a missing one.
pub fn load_interpreter(
    mapping: &Path,
    base_url: Option<&str>,
    config: &Config,
) -> Result<Interpreter<Value>> {
    let path = locate_mapping(mapping, config)?;
    let mut mapping = Mapping::from_file(&path)?;

    if let Some(base_url) = base_url {
        mapping.override_context(coercions::BASE_URL, base_url);
    } else if let Some(base_url) = &config.defaults.base_url {
        mapping.default_context(coercions::BASE_URL, base_url.as_str());
    }

    tracing::debug!(
        mapping = %mapping.source().display(),
        base_url = ?mapping.context.get(coercions::BASE_URL),
        "Declaring interpreter from mapping"
    );

    mapping.into_interpreter()
}
