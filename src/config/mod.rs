//! Project configuration loaded from `asciitree.yaml`.

mod editor_config;

pub use editor_config::{ConfigError, EditorConfig, CONFIG_FILE_NAME};
