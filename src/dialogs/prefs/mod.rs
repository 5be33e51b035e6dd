pub mod prefs;

pub use prefs::{AppSettings, render_settings_window};
