use anyhow::Result;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "questionnaire-wizard";

/// Resolve deployment folder (absolute path)
pub fn resolve_deployment_folder() -> PathBuf {
    // Prefer the folder where the executable runs from
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            return dir.to_path_buf();
        }
    }

    // Fallback: current working directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Per-user data folder, or the deployment folder when the platform has none.
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| resolve_deployment_folder().join(APP_DIR))
}

/// Default settings file location (`<config dir>/questionnaire-wizard/questionnaire.toml`).
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("questionnaire.toml"))
}

/// Resolve log folder (absolute path), creating it if needed.
pub fn resolve_log_folder(configured: Option<&Path>) -> Result<PathBuf> {
    ensure_folder(configured, "logs")
}

/// Resolve export folder (absolute path), creating it if needed.
pub fn resolve_export_folder(configured: Option<&Path>) -> Result<PathBuf> {
    ensure_folder(configured, "exports")
}

fn ensure_folder(configured: Option<&Path>, default_leaf: &str) -> Result<PathBuf> {
    let dir = match configured {
        Some(p) => p.to_path_buf(),
        None => default_data_folder().join(default_leaf),
    };
    std::fs::create_dir_all(&dir)
        .map_err(|e| anyhow::anyhow!("Failed to create folder {:?}: {}", dir, e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_folder_is_created() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let wanted = tmp.path().join("nested").join("logs");
        let got = resolve_log_folder(Some(&wanted)).expect("resolve");
        assert_eq!(got, wanted);
        assert!(wanted.is_dir());
    }

    #[test]
    fn default_folders_live_under_app_dir() {
        assert!(default_data_folder().ends_with(APP_DIR));
        if let Some(cfg) = default_config_file() {
            assert!(cfg.ends_with("questionnaire-wizard/questionnaire.toml"));
        }
    }
}
