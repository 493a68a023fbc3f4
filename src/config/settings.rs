use serde::{Deserialize, Serialize};

/// User-tunable behavior of the engine.
///
/// All fields have defaults; a partial config file overrides only what it
/// names.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Separator between names in the one-shot prompt
    pub one_shot_separator: String,
    /// Delegate to the editor's single rename when fewer than two cursors
    /// are active
    pub single_cursor_fallback: bool,
    /// Label for the status indicator while a session is open
    pub status_text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            one_shot_separator: ",".to_string(),
            single_cursor_fallback: true,
            status_text: "multi-rename: invoke again to apply, cancel to stop tracking"
                .to_string(),
        }
    }
}
