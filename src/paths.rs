use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "plex-tray";

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join(APP_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    config_dir().map(|p| p.join("config.json"))
}

fn icons_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .context("Could not determine data directory")
        .map(|p| p.join("icons"))
}

/// Where the user keeps the hand-made template, e.g. `~/.local/share/icons/plex`.
pub fn base_icon_dir() -> Result<PathBuf> {
    icons_dir().map(|p| p.join("plex"))
}

pub fn base_icon_path() -> Result<PathBuf> {
    base_icon_dir().map(|p| p.join("plex-base.svg"))
}

pub fn status_icon_dir() -> Result<PathBuf> {
    icons_dir().map(|p| p.join("hicolor").join("scalable").join("status"))
}

pub fn repo_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn open_url(url: &str) -> Result<()> {
    open::that_detached(url).with_context(|| format!("Failed to open {}", url))
}

pub fn open_folder(path: &Path) -> Result<()> {
    open::that_detached(path).with_context(|| format!("Failed to open {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_have_correct_suffixes() {
        let cases: Vec<(Result<PathBuf>, &str)> = vec![
            (config_dir(), "plex-tray"),
            (config_path(), "plex-tray/config.json"),
            (base_icon_dir(), "icons/plex"),
            (base_icon_path(), "icons/plex/plex-base.svg"),
            (status_icon_dir(), "icons/hicolor/scalable/status"),
        ];

        for (result, expected_suffix) in cases {
            let path = result.unwrap();
            assert!(path.ends_with(expected_suffix), "path {:?} should end with {}", path, expected_suffix);
        }
    }

    #[test]
    fn repo_dir_contains_manifest() {
        assert!(repo_dir().join("Cargo.toml").exists());
    }
}
