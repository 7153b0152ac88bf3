use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What the auto-checkout sweep does when a single record fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepPolicy {
    /// Record the failure and keep closing the other sessions.
    Continue,
    /// Stop at the first failing record.
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_company_id")]
    pub company_id: i64,
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
    #[serde(default = "default_office_end")]
    pub default_office_end: f64,
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_sweep_policy")]
    pub sweep_on_error: SweepPolicy,
}

fn default_company_id() -> i64 {
    1
}
fn default_timezone() -> String {
    "UTC".to_string()
}
fn default_office_end() -> f64 {
    18.0
}
fn default_radius_km() -> f64 {
    0.5
}
fn default_sweep_policy() -> SweepPolicy {
    SweepPolicy::Continue
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            company_id: default_company_id(),
            default_timezone: default_timezone(),
            default_office_end: default_office_end(),
            default_radius_km: default_radius_km(),
            sweep_on_error: default_sweep_policy(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rgeoattend")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rgeoattend")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rgeoattend.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rgeoattend.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the workflow cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..24.0).contains(&self.default_office_end) {
            return Err(AppError::Config(format!(
                "default_office_end must be between 0 and 24 (got {})",
                self.default_office_end
            )));
        }
        if self.default_radius_km <= 0.0 {
            return Err(AppError::Config(format!(
                "default_radius_km must be greater than 0 (got {})",
                self.default_radius_km
            )));
        }
        if self.default_timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(AppError::InvalidTimezone(self.default_timezone.clone()));
        }
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("cannot serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
