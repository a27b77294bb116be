//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to the current directory.
//! Installed builds use platform locations:
//! - Linux: `~/.config/arplace/` (config), `~/.local/share/arplace/` (data)
//! - Windows/macOS: the platform data directory for both

use std::path::PathBuf;

/// Returns true when running in development mode (cargo run or debug build).
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("arplace"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join("arplace"))
}

/// Path to the config file (`./arplace.json` in dev mode)
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("arplace.json"))
        .unwrap_or_else(|| PathBuf::from("arplace.json"))
}

/// Path to the logs directory (`./logs/` in dev mode)
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Ensure config and log directories exist. No-op in dev mode.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }

    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}
