use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Region and country names that never identify an area on their own.
pub const DEFAULT_AREA_DENYLIST: &[&str] = &[
    "India",
    "West Bengal",
    "North 24 Parganas",
    "South 24 Parganas",
    "Kolkata District",
    "Howrah",
    "Hooghly",
    "Nadia",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    pub refresh_interval_secs: u64,
    pub recent_hours: i64,
    pub page_size: usize,
    pub area_denylist: Vec<String>,
    pub default_rating: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            refresh_interval_secs: 30,
            recent_hours: 24,
            page_size: 100,
            area_denylist: DEFAULT_AREA_DENYLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_rating: 5.0,
        }
    }
}

impl Config {
    /// Return the configuration directory.
    /// `WASTEDESK_HOME` wins over the platform default.
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var("WASTEDESK_HOME")
            && !custom.trim().is_empty()
        {
            return PathBuf::from(custom);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("wastedesk")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".wastedesk")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("wastedesk.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("wastedesk.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.refresh_interval_secs == 0 {
            return Err(AppError::Config(
                "refresh_interval_secs must be greater than zero".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(AppError::Config("page_size must be greater than zero".into()));
        }
        if !(0.0..=5.0).contains(&self.default_rating) {
            return Err(AppError::Config(
                "default_rating must be between 0 and 5".into(),
            ));
        }
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
