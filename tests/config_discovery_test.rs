//! Configuration discovery through the environment
//!
//! Kept in its own test binary so that changing `STRQUEUE_CONFIG` cannot
//! race with other tests reading the environment. Tests in this file take
//! the lock before touching it.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use strqueue::config::ConfigManager;
use tempfile::tempdir;

const CONFIG_VAR: &str = "STRQUEUE_CONFIG";

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Points `STRQUEUE_CONFIG` at a path until dropped, then restores it
struct ScopedConfigVar {
    previous: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedConfigVar {
    fn set(path: &Path) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = env::var_os(CONFIG_VAR);
        env::set_var(CONFIG_VAR, path);
        Self { previous, _lock: lock }
    }
}

impl Drop for ScopedConfigVar {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => env::set_var(CONFIG_VAR, value),
            None => env::remove_var(CONFIG_VAR),
        }
    }
}

#[test]
fn test_load_discovers_file_from_environment() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("from-env.toml");
    let config_content = r#"
[queue]
initial-capacity = 32
memory-limit = "2KB"
track-memory = true

[logging]
level = "warn"
"#;
    fs::write(&config_path, config_content).expect("Failed to write config file");

    {
        let _guard = ScopedConfigVar::set(&config_path);
        let manager = ConfigManager::load().expect("Failed to load config");

        assert_eq!(manager.config_file_path(), Some(&config_path));
        let queue_config = manager.get_queue_config().expect("Invalid queue config");
        assert_eq!(queue_config.initial_capacity, 32);
        assert_eq!(queue_config.memory_limit, Some(2048));
        assert!(queue_config.enable_memory_tracking);

        let log_config = manager.get_log_config().expect("Invalid log config");
        assert_eq!(log_config.console_level, log::LevelFilter::Warn);
    }

    assert_ne!(env::var_os(CONFIG_VAR), Some(config_path.into_os_string()));
}

#[test]
fn test_load_reports_broken_file_from_environment() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[queue\n").expect("Failed to write config file");

    let _guard = ScopedConfigVar::set(&config_path);
    let error = match ConfigManager::load() {
        Ok(_) => panic!("Broken TOML named by the environment should not load"),
        Err(error) => error,
    };
    assert!(error.to_string().contains("Failed to parse config file"));
}
