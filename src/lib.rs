pub mod config;
pub mod icons;
pub mod menu;
pub mod paths;
pub mod presenter;
pub mod service;
#[cfg(target_os = "linux")]
pub mod tray;
