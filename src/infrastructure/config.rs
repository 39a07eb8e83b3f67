use crate::domain::calibration::Tolerance;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub calibration: CalibrationSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalibrationSettings {
    /// Largest absolute error (kPa) still reported as acceptable
    #[serde(default = "default_tolerance_kpa")]
    pub tolerance_kpa: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_tolerance_kpa() -> f64 {
    Tolerance::DEFAULT_KPA
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            tolerance_kpa: default_tolerance_kpa(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl CalibrationSettings {
    pub fn tolerance(&self) -> anyhow::Result<Tolerance> {
        Tolerance::new(self.tolerance_kpa).ok_or_else(|| {
            anyhow::anyhow!(
                "calibration.tolerance_kpa must be a finite, non-negative number (got {})",
                self.tolerance_kpa
            )
        })
    }
}

/// Load `config/calibration.*` (optional) overlaid with `CALIBRATION__*` env vars.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/calibration")
}

pub fn load_app_config_from(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("CALIBRATION")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-wide; keep these tests serial
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_without_file() {
        let _lock = TEST_LOCK.lock().unwrap();

        let config = load_app_config_from("config/does-not-exist").unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.calibration.tolerance_kpa, 0.5);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_shipped_config_file() {
        let _lock = TEST_LOCK.lock().unwrap();

        let config = load_app_config().unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.calibration.tolerance_kpa, 0.5);
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.calibration.tolerance().unwrap(), Tolerance::default());
    }

    #[test]
    fn test_env_overrides_tolerance() {
        let _lock = TEST_LOCK.lock().unwrap();

        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::set_var("CALIBRATION__CALIBRATION__TOLERANCE_KPA", "0.25");
        }

        let config = load_app_config_from("config/does-not-exist").unwrap();

        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::remove_var("CALIBRATION__CALIBRATION__TOLERANCE_KPA");
        }

        assert_eq!(config.calibration.tolerance_kpa, 0.25);
        assert_eq!(config.calibration.tolerance().unwrap().kpa(), 0.25);
    }

    #[test]
    fn test_invalid_tolerance_is_reported() {
        let settings = CalibrationSettings { tolerance_kpa: -1.0 };
        assert!(settings.tolerance().is_err());
    }
}
