pub mod icon;
pub mod indicator;

use crate::config::WatcherConfig;
use crate::icons::IconKind;
use crate::menu::builder::build_menu;
use crate::menu::router::{EventHandler, EventRoute, EventRouter, HandlerResult};
use crate::menu::MenuAction;
use crate::paths;
use crate::presenter::Watcher;
use crate::service::Systemctl;
use anyhow::{Context, Result};
use gtk::glib;
use icon::StatusIcons;
use indicator::TrayIndicator;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use tray_icon::menu::{MenuEvent, MenuEventReceiver};
use tray_icon::TrayIconBuilder;

const MENU_POLL_INTERVAL: Duration = Duration::from_millis(100);

type TrayWatcher = Watcher<Systemctl, TrayIndicator>;

/// Targets of the "open" menu items.
pub struct Links {
    pub web_url: String,
    pub repo_dir: PathBuf,
    pub base_icon_dir: PathBuf,
    pub status_icon_dir: PathBuf,
}

struct TrayApp {
    watcher: RefCell<TrayWatcher>,
    links: Links,
}

type AppHandle = Rc<TrayApp>;

/// Builds the indicator and runs the GTK main loop on the calling thread
/// until Quit or SIGINT/SIGTERM.
pub fn run(config: &WatcherConfig, links: Links) -> Result<()> {
    gtk::init().context("Failed to initialize GTK")?;

    let icons = StatusIcons::render(&config.icons)?;
    let (menu, handles) = build_menu(&config.display_name)?;

    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip(format!("Checking {}…", config.display_name))
        .with_icon(icons.get(IconKind::Loading))
        .build()
        .context("Failed to create tray icon")?;

    let service = Systemctl::new(&config.service_name).user_scope(config.user_unit);
    let view = TrayIndicator::new(tray, icons, handles);
    let app: AppHandle = Rc::new(TrayApp {
        watcher: RefCell::new(Watcher::new(service, view, &config.display_name)),
        links,
    });

    app.watcher.borrow_mut().refresh();
    start_polling(&app, config.poll_interval());
    setup_menu_events(&app);
    setup_signal_handlers(&app);

    log::info!("Watching {} every {:?}", config.service_name, config.poll_interval());
    gtk::main();
    log::info!("Main loop stopped");
    Ok(())
}

fn start_polling(app: &AppHandle, interval: Duration) {
    let app = Rc::clone(app);
    glib::timeout_add_local(interval, move || {
        if app.watcher.borrow_mut().on_tick() {
            glib::ControlFlow::Continue
        } else {
            glib::ControlFlow::Break
        }
    });
}

fn setup_menu_events(app: &AppHandle) {
    let router = build_router();
    let receiver = MenuEvent::receiver();
    let app = Rc::clone(app);

    glib::timeout_add_local(MENU_POLL_INTERVAL, move || {
        process_pending_events(receiver, &router, &app)
    });
}

fn process_pending_events(
    receiver: &MenuEventReceiver,
    router: &EventRouter<AppHandle>,
    app: &AppHandle,
) -> glib::ControlFlow {
    while let Ok(event) = receiver.try_recv() {
        log::debug!("Menu event: {}", event.id.0);

        match router.route(&event.id.0, app) {
            Ok(HandlerResult::Continue) => {}
            Ok(HandlerResult::Quit) => {
                shutdown(app);
                return glib::ControlFlow::Break;
            }
            Err(e) => log::error!("Error handling menu event: {:#}", e),
        }
    }
    glib::ControlFlow::Continue
}

fn setup_signal_handlers(app: &AppHandle) {
    for signal in [libc::SIGINT, libc::SIGTERM] {
        let app = Rc::clone(app);
        glib::unix_signal_add_local(signal, move || {
            log::info!("Received signal {}", signal);
            shutdown(&app);
            glib::ControlFlow::Continue
        });
    }
}

fn shutdown(app: &AppHandle) {
    if app.watcher.borrow_mut().on_quit() {
        log::info!("Quitting application");
        gtk::main_quit();
    }
}

fn route(action: MenuAction, handler: EventHandler<AppHandle>) -> EventRoute<AppHandle> {
    EventRoute { action, handler }
}

fn build_router() -> EventRouter<AppHandle> {
    EventRouter::new(vec![
        route(MenuAction::Toggle, toggle),
        route(MenuAction::OpenWeb, |app: &AppHandle| open_url(&app.links.web_url)),
        route(MenuAction::OpenRepo, |app: &AppHandle| open_folder(&app.links.repo_dir)),
        route(MenuAction::OpenBaseIcons, |app: &AppHandle| open_folder(&app.links.base_icon_dir)),
        route(MenuAction::OpenStatusIcons, |app: &AppHandle| open_folder(&app.links.status_icon_dir)),
        route(MenuAction::Quit, |_: &AppHandle| {
            log::info!("Quit requested");
            Ok(HandlerResult::Quit)
        }),
    ])
}

/// Shows the pending state now and runs the blocking command from an idle
/// callback, after GTK has had a chance to repaint.
fn toggle(app: &AppHandle) -> Result<HandlerResult> {
    let Some(action) = app.watcher.borrow_mut().begin_toggle() else {
        return Ok(HandlerResult::Continue);
    };

    let app = Rc::clone(app);
    glib::idle_add_local_once(move || {
        // Failures are already surfaced in the status line.
        let _ = app.watcher.borrow_mut().finish_toggle(action);
    });
    Ok(HandlerResult::Continue)
}

fn open_url(url: &str) -> Result<HandlerResult> {
    if let Err(e) = paths::open_url(url) {
        log::warn!("{:#}", e);
    }
    Ok(HandlerResult::Continue)
}

fn open_folder(path: &Path) -> Result<HandlerResult> {
    if let Err(e) = paths::open_folder(path) {
        log::warn!("{:#}", e);
    }
    Ok(HandlerResult::Continue)
}
