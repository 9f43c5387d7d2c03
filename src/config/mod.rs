//! Configuration for clubwatch
//!
//! Path resolution and user settings.

pub mod paths;
pub mod settings;

pub use paths::ClubwatchPaths;
pub use settings::{NotificationSettings, Settings};
