//! Handles settings for the application.
//!
//! Sources, lowest priority first: the TOML config file, `BUDGEE_*`
//! environment variables, command-line flags.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/budgee.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Context file every command reads and rewrites.
    pub context: PathBuf,
    /// Log level for the `budgee` and `engine` targets.
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            context: PathBuf::from("budgee.json"),
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn load(config_path: Option<&str>, context: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("BUDGEE"))
            .build()?
            .try_deserialize()?;

        if let Some(context) = context {
            settings.context = context;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_file(content: &str) -> PathBuf {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_configs");
        std::fs::create_dir_all(&root).unwrap();
        let path = root.join(format!("budgee_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let settings = Settings::load(Some("does/not/exist.toml"), None).unwrap();
        assert_eq!(settings.level, Settings::default().level);
    }

    #[test]
    fn file_values_are_read_and_flag_wins() {
        let path = config_file("context = \"books/home.json\"\nlevel = \"debug\"\n");
        let path_str = path.to_str().unwrap();

        let settings = Settings::load(Some(path_str), None).unwrap();
        assert_eq!(settings.context, PathBuf::from("books/home.json"));
        assert_eq!(settings.level, "debug");

        let settings = Settings::load(Some(path_str), Some(PathBuf::from("other.json"))).unwrap();
        assert_eq!(settings.context, PathBuf::from("other.json"));

        std::fs::remove_file(&path).unwrap();
    }
}
