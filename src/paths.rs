//! Path utilities and file system helpers

use std::path::PathBuf;

/// Gets the application data directory
pub fn get_app_data_dir() -> Result<PathBuf, String> {
    dirs::data_dir()
        .map(|p| p.join("com.waytrust.desktop"))
        .ok_or_else(|| "Could not find app data directory".to_string())
}

/// Clears all application data
pub fn clear_app_data() -> Result<(), String> {
    let app_dir = get_app_data_dir()?;
    if app_dir.exists() {
        std::fs::remove_dir_all(&app_dir)
            .map_err(|e| format!("Failed to clear app data: {}", e))?;
    }
    Ok(())
}

/// Gets the app configuration file path (API key, model overrides)
pub fn get_app_config_path() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join(".app_config.json"))
}

/// Gets the persisted user session file path
pub fn get_session_path() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join("session.json"))
}

/// Gets the active language code file path
pub fn get_language_path() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join(".language"))
}

/// Gets the travel-buddy chat database file path
pub fn get_buddy_db_path() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join("buddy_history.db"))
}

/// Gets the directory where plan packages and offline packs are written
pub fn get_exports_dir() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join("Exports"))
}

/// Gets the directory for cached landmark visualisations
pub fn get_visuals_dir() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join("History").join("Visuals"))
}
