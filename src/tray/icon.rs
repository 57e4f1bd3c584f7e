use crate::icons::{parse_hex_color, IconKind, IconTheme};
use anyhow::{Context, Result};
use tray_icon::Icon;

const ICON_SIZE: u32 = 64;
const BADGE_RADIUS: i32 = 26;
const RIM_WIDTH: i32 = 4;

/// Pre-rendered RGBA badges, one per status.
pub struct StatusIcons {
    running: Icon,
    loading: Icon,
    stopped: Icon,
}

impl StatusIcons {
    pub fn render(theme: &IconTheme) -> Result<Self> {
        Ok(Self {
            running: create_icon(theme, IconKind::Running)?,
            loading: create_icon(theme, IconKind::Loading)?,
            stopped: create_icon(theme, IconKind::Stopped)?,
        })
    }

    pub fn get(&self, kind: IconKind) -> Icon {
        match kind {
            IconKind::Running => self.running.clone(),
            IconKind::Loading => self.loading.clone(),
            IconKind::Stopped => self.stopped.clone(),
        }
    }
}

fn create_icon(theme: &IconTheme, kind: IconKind) -> Result<Icon> {
    let color = theme.color(kind);
    let rgb = parse_hex_color(color)
        .with_context(|| format!("Invalid {} icon color {:?}", kind.key(), color))?;
    let data = draw_badge(rgb, ICON_SIZE);
    Ok(Icon::from_rgba(data, ICON_SIZE, ICON_SIZE)?)
}

fn draw_badge(rgb: [u8; 3], size: u32) -> Vec<u8> {
    let mut data = vec![0u8; (size * size * 4) as usize];
    let center = (size as i32) / 2;
    let outer = BADGE_RADIUS * BADGE_RADIUS;
    let inner = (BADGE_RADIUS - RIM_WIDTH) * (BADGE_RADIUS - RIM_WIDTH);
    let rim = rgb.map(|c| c / 2);

    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let dx = x - center;
            let dy = y - center;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq > outer {
                continue;
            }

            let [r, g, b] = if dist_sq > inner { rim } else { rgb };
            let idx = ((y as u32 * size + x as u32) * 4) as usize;
            data[idx] = r;
            data[idx + 1] = g;
            data[idx + 2] = b;
            data[idx + 3] = 255;
        }
    }

    data
}
