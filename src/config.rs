use std::{
    env,
    fmt::{Debug, Display},
    path::PathBuf,
    str::FromStr,
};

use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; missing or unparsable values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: try_load(&lookup, "HOST", "127.0.0.1".to_string()),
            port: try_load(&lookup, "PORT", 8000),
            static_dir: try_load(&lookup, "STATIC_DIR", PathBuf::from("static")),
            seed_path: lookup("ACTIVITIES_SEED_PATH")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Debug,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value `{raw}`: {e}, using default: {default:?}");
            default
        }
    }
}
