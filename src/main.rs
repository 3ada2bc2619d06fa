// src/main.rs
//
// Calculatrice scientifique — point d’entrée NATIF
// ------------------------------------------------
// But:
// - Journalisation (tracing) : RUST_LOG=calculatrice_sci=debug pour suivre les jetons
// - eframe::run_native + NativeOptions
//
// IMPORTANT (structure projet):
// - `impl eframe::App for AppCalc` vit dans src/app.rs
// - Ici: point d’entrée seulement

use eframe::egui;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

mod app;
mod noyau;

use app::AppCalc;

const TITRE_APP: &str = "Calculatrice scientifique";

fn installer_journal() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> eframe::Result<()> {
    installer_journal();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([640.0, 760.0])
            .with_min_inner_size([520.0, 620.0]),
        ..Default::default()
    };

    tracing::info!("démarrage");

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    )
}
