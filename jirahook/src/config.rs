use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::body::BodyNormalizer;
use crate::mentions::{DirectoryMentions, DisabledMentions, MentionResolver, StaticDirectory, User};
use crate::transformer::CommentTransformer;

/// Main jirahook configuration
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Configuration for mention resolution
    #[serde(default)]
    pub mentions: MentionConfig,
}

/// Configuration for resolving `[~user]` mention tokens
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct MentionConfig {
    /// Replace mention tokens with mention markup. Stays off until the
    /// message markup renders mentions.
    #[serde(default)]
    pub enabled: bool,
    /// Users mention tokens are resolved against
    #[serde(default)]
    pub directory: Vec<User>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    pub fn mention_resolver(&self) -> Box<dyn MentionResolver + Send + Sync> {
        if !self.mentions.enabled {
            if !self.mentions.directory.is_empty() {
                warn!("Mention directory configured but mentions are disabled");
            }
            return Box::new(DisabledMentions);
        }

        let directory = StaticDirectory::new(self.mentions.directory.clone());
        info!(users = directory.len(), "Resolving mentions against the directory");
        Box::new(DirectoryMentions::new(directory))
    }

    pub fn transformer(&self) -> CommentTransformer {
        CommentTransformer::new(BodyNormalizer::new().with_mentions(self.mention_resolver()))
    }
}

pub fn load(filename: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(filename).map_err(|source| ConfigError::Io {
        path: filename.to_owned(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: filename.to_owned(),
        source,
    })
}
