use crate::core::resolver::LargeNumStrategy;
use crate::errors::{AppError, AppResult};
use crate::models::destination::Destination;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// File name of the persisted print history.
pub const HISTORY_FILE_NAME: &str = "mercadoria-history.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding the internal log and the label counter.
    pub database: String,
    pub products_file: String,
    pub addresses_file: String,
    pub history_file: String,
    /// Where the rendered label page is written.
    pub output_dir: String,
    /// External print command; the page path is appended. None = save only.
    pub print_command: Option<String>,
    pub label_width_mm: u32,
    pub label_height_mm: u32,
    pub counter_enabled: bool,
    pub counter_category: String,
    pub picking_large_num: LargeNumStrategy,
    pub default_destination: Destination,
}

impl Default for Config {
    fn default() -> Self {
        let dir = Self::config_dir();
        let path = |name: &str| dir.join(name).to_string_lossy().to_string();
        Self {
            database: path("etiqueta.sqlite"),
            products_file: path("BASE_CADASTRO.json"),
            addresses_file: path("BASE_END.json"),
            history_file: path(HISTORY_FILE_NAME),
            output_dir: path("labels"),
            print_command: None,
            label_width_mm: 90,
            label_height_mm: 42,
            counter_enabled: true,
            counter_category: "mercadoria".to_string(),
            picking_large_num: LargeNumStrategy::Auto,
            default_destination: Destination::Buffer,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("etiqueta")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".etiqueta")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("etiqueta.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn products_path(&self) -> PathBuf {
        expand_tilde(&self.products_file)
    }

    pub fn addresses_path(&self) -> PathBuf {
        expand_tilde(&self.addresses_file)
    }

    pub fn history_path(&self) -> PathBuf {
        expand_tilde(&self.history_file)
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Rendered label page (overwritten on every print).
    pub fn output_file(&self) -> PathBuf {
        expand_tilde(&self.output_dir).join("last-labels.html")
    }

    /// Initialize config directory, config file, SQLite database and history file.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        if !is_test {
            let yaml = serde_yaml::to_string(self)?;
            fs::write(Self::config_file(), yaml)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        let db_path = self.database_path();
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }
        println!("✅ Database:    {:?}", db_path);

        let history = self.history_path();
        if !history.exists() {
            if let Some(parent) = history.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&history, "[]")?;
        }
        println!("✅ History:     {:?}", history);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str(
            "label_width_mm: 100\npicking_large_num: prefix_digits\ndefault_destination: separacao\n",
        )
        .unwrap();

        assert_eq!(cfg.label_width_mm, 100);
        assert_eq!(cfg.label_height_mm, 42);
        assert_eq!(cfg.picking_large_num, LargeNumStrategy::PrefixDigits);
        assert_eq!(cfg.default_destination, Destination::Picking);
        assert!(cfg.counter_enabled);
        assert!(cfg.history_file.ends_with(HISTORY_FILE_NAME));
    }
}
