use std::path::PathBuf;

/// Data directory of the IDE backend (~/.omniglot)
pub fn omniglot_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".omniglot")
}

/// Path of config.json inside the data directory
pub fn config_json_path() -> PathBuf {
    omniglot_dir().join("config.json")
}
