pub mod config;
pub mod events;
pub mod gui;
pub mod prefs;
pub mod sys;
pub mod util;
