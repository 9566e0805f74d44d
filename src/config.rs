use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Carnet";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/Carnet/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Carnet")
}

/// Path of the single on-device database file.
/// The `hospital.db` filename is kept for compatibility with existing installs.
pub fn database_path() -> PathBuf {
    app_data_dir().join("hospital.db")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "carnet=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Carnet"));
    }

    #[test]
    fn database_path_under_app_data() {
        let path = database_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("hospital.db"));
    }

    #[test]
    fn app_name_is_carnet() {
        assert_eq!(APP_NAME, "Carnet");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert!(!APP_VERSION.is_empty());
    }
}
