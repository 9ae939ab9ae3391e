//! Loading descriptor sets and defaults tables from disk or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use protoplan_compiler::{CompileError, CompilerConfig, DescriptorPool};
use protoplan_core::{FeatureSetDefaults, parse_descriptor_set};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{path}' is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("no message or enum named `{0}`")]
    UnknownType(String),
}

/// A built pool plus the configuration it was built with.
pub struct Schema {
    pub pool: DescriptorPool,
    pub config: CompilerConfig,
}

pub fn load_schema(descriptor_set: &Path, defaults: Option<&Path>) -> Result<Schema, LoadError> {
    let mut config = CompilerConfig::default();
    if let Some(path) = defaults {
        let text = read_input(path)?;
        let table = FeatureSetDefaults::from_json(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config = config.defaults(table);
    }

    let text = read_input(descriptor_set)?;
    let pool = parse_pool(&text, &config).map_err(|e| match e {
        CompileError::Json(source) => LoadError::Json {
            path: descriptor_set.to_path_buf(),
            source,
        },
        other => LoadError::Compile(other),
    })?;
    Ok(Schema { pool, config })
}

/// Build a pool from the JSON form of a descriptor set.
pub fn parse_pool(json: &str, config: &CompilerConfig) -> Result<DescriptorPool, CompileError> {
    let set = parse_descriptor_set(json)?;
    debug!(files = set.file.len(), "descriptor set parsed");
    DescriptorPool::from_descriptor_set(&set, config)
}

fn read_input(path: &Path) -> Result<String, LoadError> {
    let read_error = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_error)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(read_error)
}
