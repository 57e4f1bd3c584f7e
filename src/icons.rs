use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Running,
    Loading,
    Stopped,
}

impl IconKind {
    pub const ALL: [IconKind; 3] = [IconKind::Running, IconKind::Loading, IconKind::Stopped];

    pub fn key(&self) -> &'static str {
        match self {
            IconKind::Running => "running",
            IconKind::Loading => "loading",
            IconKind::Stopped => "stopped",
        }
    }
}

/// Colors for the generated status icons. `placeholder` must match the
/// fill color used in the base SVG.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IconTheme {
    pub name_prefix: String,
    pub placeholder: String,
    pub running: String,
    pub loading: String,
    pub stopped: String,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            name_prefix: "plex-status".to_string(),
            placeholder: "#e5a00d".to_string(),
            running: "#e5a00d".to_string(),
            loading: "#07A0C3".to_string(),
            stopped: "#DD1C1A".to_string(),
        }
    }
}

impl IconTheme {
    pub fn color(&self, kind: IconKind) -> &str {
        match kind {
            IconKind::Running => &self.running,
            IconKind::Loading => &self.loading,
            IconKind::Stopped => &self.stopped,
        }
    }

    pub fn icon_name(&self, kind: IconKind) -> String {
        format!("{}-{}", self.name_prefix, kind.key())
    }
}

pub fn colorize(base_svg: &str, placeholder: &str, color: &str) -> String {
    base_svg.replace(placeholder, color)
}

/// Parses `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Rebuilds every status icon from the base SVG. Runs on each startup so the
/// output always tracks the current template and colors.
pub fn ensure_status_icons(base_svg: &Path, out_dir: &Path, theme: &IconTheme) -> Result<Vec<PathBuf>> {
    if !base_svg.exists() {
        anyhow::bail!("Base icon SVG not found at {}", base_svg.display());
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create icon directory {}", out_dir.display()))?;

    let base = std::fs::read_to_string(base_svg)
        .with_context(|| format!("Failed to read {}", base_svg.display()))?;

    let mut written = Vec::with_capacity(IconKind::ALL.len());
    for kind in IconKind::ALL {
        let out_path = out_dir.join(format!("{}.svg", theme.icon_name(kind)));
        let svg = colorize(&base, &theme.placeholder, theme.color(kind));
        std::fs::write(&out_path, svg)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        log::debug!("Wrote status icon {}", out_path.display());
        written.push(out_path);
    }

    Ok(written)
}
