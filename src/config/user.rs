//! User configuration loading.
//!
//! User config location: $XDG_CONFIG_HOME/multi-rename/multi-rename.toml
//! Fallback: the platform config directory (~/.config on Linux).

use std::path::PathBuf;

use crate::config::Settings;

/// Returns the path to the user configuration file.
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) if !xdg_config.is_empty() => PathBuf::from(xdg_config),
        _ => dirs::config_dir()?,
    };
    Some(base.join("multi-rename").join("multi-rename.toml"))
}

/// Load settings from the user config file, falling back to defaults when
/// the file is missing or unparseable. A parse failure is logged, not
/// propagated; a broken config file must not disable the feature.
pub fn load_settings() -> Settings {
    let Some(path) = user_config_path() else {
        return Settings::default();
    };
    load_settings_from(&path)
}

pub fn load_settings_from(path: &std::path::Path) -> Settings {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return Settings::default(),
    };
    match toml::from_str(&contents) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!(
                target: "multi_rename::config",
                "ignoring unparseable config at {}: {err}",
                path.display()
            );
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    #[test]
    #[serial]
    fn user_config_path_uses_xdg_config_home_when_set() {
        let original = env::var("XDG_CONFIG_HOME").ok();

        // SAFETY: serialized test; env manipulation is confined to it
        unsafe {
            env::set_var("XDG_CONFIG_HOME", "/custom/config");
        }
        let path = user_config_path();

        // SAFETY: restoring original env state
        unsafe {
            match original {
                Some(val) => env::set_var("XDG_CONFIG_HOME", val),
                None => env::remove_var("XDG_CONFIG_HOME"),
            }
        }

        assert_eq!(
            path,
            Some(PathBuf::from(
                "/custom/config/multi-rename/multi-rename.toml"
            ))
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = load_settings_from(std::path::Path::new("/nonexistent/multi-rename.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn valid_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "one_shot_separator = \"|\"").unwrap();
        writeln!(file, "single_cursor_fallback = false").unwrap();

        let settings = load_settings_from(file.path());
        assert_eq!(settings.one_shot_separator, "|");
        assert!(!settings.single_cursor_fallback);
    }

    #[test]
    fn unparseable_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "one_shot_separator = [not toml").unwrap();

        let settings = load_settings_from(file.path());
        assert_eq!(settings, Settings::default());
    }
}
