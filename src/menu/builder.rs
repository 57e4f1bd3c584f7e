use super::MenuAction;
use anyhow::Result;
use tray_icon::menu::{Menu, MenuItem, PredefinedMenuItem};

/// Items the watcher rewrites after every poll.
pub struct MenuHandles {
    pub status: MenuItem,
    pub action: MenuItem,
    pub web: MenuItem,
}

pub fn build_menu(name: &str) -> Result<(Menu, MenuHandles)> {
    let menu = Menu::new();

    let status = MenuItem::new(format!("Checking {}…", name), false, None);
    let action = item(MenuAction::Toggle, &format!("Start/Stop {}", name), true);
    let web = item(MenuAction::OpenWeb, &format!("Open {} Web", name), false);

    menu.append_items(&[
        &status,
        &action,
        &web,
        &PredefinedMenuItem::separator(),
        &item(MenuAction::OpenRepo, "Open Code Repository", true),
        &item(MenuAction::OpenBaseIcons, "Open Base Icon Folder", true),
        &item(MenuAction::OpenStatusIcons, "Open Status Icons Folder", true),
        &PredefinedMenuItem::separator(),
        &item(MenuAction::Quit, "Quit", true),
    ])?;

    Ok((menu, MenuHandles { status, action, web }))
}

fn item(action: MenuAction, label: &str, enabled: bool) -> MenuItem {
    MenuItem::with_id(action.id(), label, enabled, None)
}
