use anyhow::Result;
use plex_tray::config::WatcherConfig;
use plex_tray::{icons, paths};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting Plex Tray...");

    let config = WatcherConfig::load_or_default();

    let base_icon_dir = paths::base_icon_dir()?;
    let status_icon_dir = paths::status_icon_dir()?;
    icons::ensure_status_icons(&paths::base_icon_path()?, &status_icon_dir, &config.icons)?;

    run(&config, base_icon_dir, status_icon_dir)
}

#[cfg(target_os = "linux")]
fn run(
    config: &WatcherConfig,
    base_icon_dir: std::path::PathBuf,
    status_icon_dir: std::path::PathBuf,
) -> Result<()> {
    let links = plex_tray::tray::Links {
        web_url: config.web_url.clone(),
        repo_dir: paths::repo_dir(),
        base_icon_dir,
        status_icon_dir,
    };
    plex_tray::tray::run(config, links)?;
    log::info!("Plex Tray stopped");
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_: &WatcherConfig, _: std::path::PathBuf, _: std::path::PathBuf) -> Result<()> {
    anyhow::bail!("plex-tray needs systemd and an appindicator tray; only Linux is supported")
}
