use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::ext::{read_text, BestEffortPathExt};

pub const CONFIG_FILE_NAME: &str = "asciitree.yaml";

const AUTO_SLASH_KEY: &str = "autoSlash";
const HISTORY_LIMIT_KEY: &str = "historyLimit";

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Editor behavior that can be tuned per project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Run the markdown auto-slash pass before strict parsing.
    pub auto_slash: bool,
    /// Maximum number of history entries, 0 meaning unlimited.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_slash: true,
            history_limit: 200,
        }
    }
}

impl EditorConfig {
    /// Loads `asciitree.yaml` from `root`, falling back to defaults if it does not exist.
    pub async fn read(root: &Path) -> Result<Self, ConfigError> {
        let path = get_config_file_path(root);
        match Self::from_path(path).await {
            Err(ConfigError::ReadError { file_path, source })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!("No config file at {file_path}, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub async fn from_path(path: PathBuf) -> Result<Self, ConfigError> {
        debug!("Reading config file: {}", path.best_effort_path_display());
        let contents = read_text(&path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn apply_entries(&mut self, top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<(), ConfigError> {
        for (key, value) in top_level {
            let Yaml::Value(Scalar::String(key)) = key else {
                warn!("Ignoring non-string config key: {:?}", key);
                continue;
            };
            match &**key {
                AUTO_SLASH_KEY => self.auto_slash = Self::bool_value(AUTO_SLASH_KEY, value)?,
                HISTORY_LIMIT_KEY => self.history_limit = Self::limit_value(HISTORY_LIMIT_KEY, value)?,
                unknown => warn!("Ignoring unknown config key '{unknown}'"),
            }
        }
        Ok(())
    }

    fn bool_value(key: &str, value: &Yaml) -> Result<bool, ConfigError> {
        match value {
            Yaml::Value(Scalar::Boolean(flag)) => Ok(*flag),
            _ => InvalidValueSnafu {
                key,
                expected: "a boolean",
            }
            .fail(),
        }
    }

    fn limit_value(key: &str, value: &Yaml) -> Result<usize, ConfigError> {
        match value {
            Yaml::Value(Scalar::Integer(limit)) => usize::try_from(*limit).ok().context(InvalidValueSnafu {
                key,
                expected: "a non-negative integer",
            }),
            _ => InvalidValueSnafu {
                key,
                expected: "a non-negative integer",
            }
            .fail(),
        }
    }
}

impl TryFrom<&str> for EditorConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().ok_or(ConfigError::MalformedConfig)?;
        let top_level = document.as_mapping().ok_or(ConfigError::TopLevelNotMap)?;

        let mut config = Self::default();
        config.apply_entries(top_level)?;
        debug!("Loaded config: {config:?}");
        Ok(config)
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be {}", key, expected))]
    InvalidValue { key: String, expected: &'static str },
}
