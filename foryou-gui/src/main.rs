mod app;
mod theme;

use std::path::PathBuf;
use std::sync::Arc;

use eframe::{egui, NativeOptions};
use foryou_core::{
    spawn_provider, AppConfig, Catalog, ForYouProvider, PreferencesStore, RouteTable,
    TopLevelNavigator, FOR_YOU,
};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::{AppInit, ForYouApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let config = AppConfig::load();
    let data_dir = data_dir(&config);
    info!(dir = %data_dir.display(), "using data directory");

    let catalog = runtime.block_on(Catalog::load_from_dir_or_sample(&data_dir));
    let prefs = runtime.block_on(PreferencesStore::load_from_dir(&data_dir));
    let provider = Arc::new(ForYouProvider::new(catalog, prefs));
    let interests = provider.interests_source();
    let feed = provider.feed_source();
    let (intent_tx, intent_rx) = mpsc::channel(64);

    let provider_handle = {
        let guard = runtime.enter();
        let handle = spawn_provider(provider, intent_rx);
        drop(guard);
        handle
    };

    let navigator = match RouteTable::app().and_then(|routes| TopLevelNavigator::new(routes, FOR_YOU.route)) {
        Ok(navigator) => navigator,
        Err(e) => {
            error!(error = %e, "failed to build the navigation graph");
            std::process::exit(1);
        }
    };

    let init = AppInit {
        runtime: runtime.clone(),
        provider: provider_handle,
        intents: intent_tx,
        interests,
        feed,
        navigator,
        config,
    };

    eframe::run_native(
        "For You",
        NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([960.0, 800.0])
                .with_min_inner_size([360.0, 480.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            // remote avatars, topic icons and header images
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(ForYouApp::new(init))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn data_dir(config: &AppConfig) -> PathBuf {
    config.data_dir().unwrap_or_else(|e| {
        let fallback = std::env::current_dir().unwrap_or_default().join(".foryou");
        warn!(error = %e, fallback = %fallback.display(), "no config directory");
        fallback
    })
}
