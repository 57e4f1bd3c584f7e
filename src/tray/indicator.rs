use super::icon::StatusIcons;
use crate::icons::IconKind;
use crate::menu::builder::MenuHandles;
use crate::presenter::IndicatorView;
use tray_icon::TrayIcon;

/// The tray icon plus the menu items the watcher rewrites.
pub struct TrayIndicator {
    tray: TrayIcon,
    icons: StatusIcons,
    menu: MenuHandles,
    shown: Option<IconKind>,
}

impl TrayIndicator {
    pub fn new(tray: TrayIcon, icons: StatusIcons, menu: MenuHandles) -> Self {
        Self { tray, icons, menu, shown: None }
    }
}

impl IndicatorView for TrayIndicator {
    fn set_icon(&mut self, icon: IconKind, tooltip: &str) {
        // Each set_icon writes a fresh PNG for the appindicator, so skip repeats.
        if self.shown != Some(icon) {
            match self.tray.set_icon(Some(self.icons.get(icon))) {
                Ok(()) => self.shown = Some(icon),
                Err(e) => log::warn!("Failed to set tray icon: {}", e),
            }
        }
        if let Err(e) = self.tray.set_tooltip(Some(tooltip)) {
            log::debug!("Failed to set tooltip: {}", e);
        }
    }

    fn set_status_text(&mut self, text: &str) {
        self.menu.status.set_text(text);
    }

    fn set_action(&mut self, label: &str, enabled: bool) {
        self.menu.action.set_text(label);
        self.menu.action.set_enabled(enabled);
    }

    fn set_secondary_enabled(&mut self, enabled: bool) {
        self.menu.web.set_enabled(enabled);
    }

    fn deactivate(&mut self) {
        if let Err(e) = self.tray.set_visible(false) {
            log::debug!("Failed to hide tray icon: {}", e);
        }
    }
}
