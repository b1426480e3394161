use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::io::storage::{FileStorage, atomic_write, validate_key};
use crate::model::config::Config;
use crate::ops::controller::TaskList;

/// Error type for config file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not edit {path}: {source}")]
    EditError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("invalid config key: {0:?}")]
    InvalidKey(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Default config file path, respecting XDG_CONFIG_HOME
pub fn default_config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("taskpad").join("config.toml")
}

/// Default data directory, respecting XDG_DATA_HOME
pub fn default_data_dir() -> PathBuf {
    let data_dir = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_dir.join("taskpad")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config file. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// The data directory the config resolves to
pub fn data_dir(config: &Config) -> PathBuf {
    config
        .storage
        .dir
        .clone()
        .unwrap_or_else(default_data_dir)
}

/// Config file, parsed config and data directory after applying overrides
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub config: Config,
    pub data_dir: PathBuf,
}

impl Settings {
    /// Resolve settings from optional `--config` / `--data-dir` overrides.
    pub fn resolve(
        config_override: Option<&Path>,
        data_dir_override: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let config_path = config_override
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);
        let config = read_config(&config_path)?;
        let data_dir = data_dir_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir(&config));
        Ok(Settings {
            config_path,
            config,
            data_dir,
        })
    }

    /// Load the task list from the configured data directory.
    pub fn open_list(&self) -> TaskList<FileStorage> {
        TaskList::load(FileStorage::new(&self.data_dir), &self.config.storage.key)
    }
}

/// Set a dotted key (e.g. `ui.colors.background`) in the config file,
/// preserving the rest of the document's formatting. Creates the file if
/// it doesn't exist. The edited document must still parse as a [`Config`].
pub fn set_config_value(path: &Path, key: &str, value: &str) -> Result<(), ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let mut doc: toml_edit::DocumentMut = text.parse().map_err(|e| ConfigError::EditError {
        path: path.to_path_buf(),
        source: e,
    })?;

    set_dotted(&mut doc, key, parse_value(value))?;

    let updated = doc.to_string();
    let config = toml::from_str::<Config>(&updated).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.message().to_string(),
    })?;
    validate_key(&config.storage.key).map_err(|e| ConfigError::InvalidValue {
        key: "storage.key".to_string(),
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    atomic_write(path, updated.as_bytes()).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `true`/`false` become booleans, everything else a string.
fn parse_value(value: &str) -> toml_edit::Value {
    match value {
        "true" => toml_edit::Value::from(true),
        "false" => toml_edit::Value::from(false),
        _ => toml_edit::Value::from(value),
    }
}

fn set_dotted(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: toml_edit::Value,
) -> Result<(), ConfigError> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::InvalidKey(key.to_string()));
    }
    let (leaf, tables) = parts
        .split_last()
        .ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;

    let mut table = doc.as_table_mut();
    for name in tables {
        if !table.contains_key(name) {
            table.insert(name, toml_edit::Item::Table(toml_edit::Table::new()));
        }
        table = table
            .get_mut(name)
            .and_then(|item| item.as_table_mut())
            .ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;
    }
    table.insert(leaf, toml_edit::value(value));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::Tab;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.storage.key, "todos");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[storage\nkey = ").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn data_dir_prefers_configured_dir() {
        let mut config = Config::default();
        config.storage.dir = Some(PathBuf::from("/srv/tasks"));
        assert_eq!(data_dir(&config), PathBuf::from("/srv/tasks"));
    }

    #[test]
    fn resolve_applies_overrides() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[storage]\ndir = \"/from/config\"\nkey = \"work\"\n").unwrap();

        let settings = Settings::resolve(Some(&config_path), None).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/from/config"));
        assert_eq!(settings.config.storage.key, "work");

        let cli_dir = tmp.path().join("data");
        let settings = Settings::resolve(Some(&config_path), Some(&cli_dir)).unwrap();
        assert_eq!(settings.data_dir, cli_dir);
    }

    #[test]
    fn open_list_reads_the_configured_key() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        let data = tmp.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(
            data.join("todos.json"),
            r#"[{"id":1,"text":"from disk","completed":false}]"#,
        )
        .unwrap();

        let settings = Settings::resolve(Some(&config_path), Some(&data)).unwrap();
        let list = settings.open_list();
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].text, "from disk");
    }

    #[test]
    fn set_value_creates_file_and_tables() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sub").join("config.toml");

        set_config_value(&path, "ui.colors.background", "#000000").unwrap();
        set_config_value(&path, "ui.show_key_hints", "false").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.ui.colors.get("background").unwrap(), "#000000");
        assert!(!config.ui.show_key_hints);
    }

    #[test]
    fn set_value_preserves_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "# my tasks\n[storage]\nkey = \"todos\" # default\n").unwrap();

        set_config_value(&path, "ui.default_tab", "pending").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("# my tasks"));
        assert!(text.contains("key = \"todos\" # default"));
        assert_eq!(read_config(&path).unwrap().ui.default_tab, Tab::Pending);
    }

    #[test]
    fn set_value_rejects_values_that_break_the_schema() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let err = set_config_value(&path, "ui.default_tab", "someday").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn set_value_rejects_unusable_storage_key() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[storage]\nkey = \"todos\"\n").unwrap();

        for bad in ["a/b", "..", ""] {
            let err = set_config_value(&path, "storage.key", bad).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidValue { key, .. } if key == "storage.key"),
                "{bad:?} gave {err}"
            );
        }
        assert_eq!(read_config(&path).unwrap().storage.key, "todos");

        set_config_value(&path, "storage.key", "work").unwrap();
        assert_eq!(read_config(&path).unwrap().storage.key, "work");
    }

    #[test]
    fn set_value_rejects_empty_key_segments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        assert!(matches!(
            set_config_value(&path, "ui..colors", "x"),
            Err(ConfigError::InvalidKey(_))
        ));
    }
}
