pub mod settings;
pub mod user;

pub use settings::Settings;
pub use user::{load_settings, load_settings_from, user_config_path};
