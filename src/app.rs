// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App : raccourci ESC, horloge des minuteries
//
// Important:
// - La session ne connaît pas l’horloge : c’est ici qu’on la fait avancer,
//   et qu’on redemande un rendu juste à temps pour l’échéance.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Instant;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = bouton "C" (remise à zéro de la session)
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.appuyer("C");
        }

        if let Some(reste) = self.tic(Instant::now()) {
            ctx.request_repaint_after(reste);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });

        // un clic a pu planifier une minuterie pendant ce rendu
        if let Some(reste) = self.tic(Instant::now()) {
            ctx.request_repaint_after(reste);
        }
    }
}
