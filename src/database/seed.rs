use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::models::ActivityCatalog;

const DEFAULT_SEED: &str = include_str!("../../data/activities.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid activity `{activity}`: {reason}")]
    Invalid { activity: String, reason: String },
}

/// The dataset compiled into the binary.
pub fn default_seed() -> Result<ActivityCatalog, SeedError> {
    parse_seed(DEFAULT_SEED)
}

pub fn load_seed_file(path: &Path) -> Result<ActivityCatalog, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_seed(&raw)?;
    info!(path = %path.display(), activities = catalog.len(), "Loaded seed file");
    Ok(catalog)
}

/// Parses and validates a seed document. Duplicate participants within an
/// activity are collapsed, keeping the first occurrence.
pub fn parse_seed(raw: &str) -> Result<ActivityCatalog, SeedError> {
    let parsed: ActivityCatalog = serde_json::from_str(raw)?;

    let mut catalog = ActivityCatalog::new();
    for (name, mut activity) in parsed {
        if name.trim().is_empty() {
            return Err(SeedError::Invalid {
                activity: name,
                reason: "name must not be empty".to_string(),
            });
        }
        if activity.max_participants == 0 {
            return Err(SeedError::Invalid {
                activity: name,
                reason: "max_participants must be greater than zero".to_string(),
            });
        }

        let before = activity.participants.len();
        let mut seen = Vec::with_capacity(before);
        activity.participants.retain(|p| {
            if seen.contains(p) {
                false
            } else {
                seen.push(p.clone());
                true
            }
        });
        if activity.participants.len() != before {
            warn!(
                activity = %name,
                dropped = before - activity.participants.len(),
                "Dropped duplicate participants from seed"
            );
        }

        catalog.push(name, activity);
    }
    Ok(catalog)
}
