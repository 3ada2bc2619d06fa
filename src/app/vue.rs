// src/app/vue.rs
//
// Vue (UI egui) — fine couche sur la session
// -------------------------------------------
// Objectifs :
// - Chaque bouton envoie SON étiquette comme jeton (aucune logique ici)
// - Bascules de mode : toggle_value sur copies locales, puis jeton
// - Graphe : grille (graduations), axes, une polyligne par tronçon
// - Intégration : trois champs texte ; le focus choisit le champ actif
//
// Note :
// - Les champs texte éditent une COPIE puis la rendent à la session
//   (editer_champ / editer_fonction_graphe / editer_fenetre).

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::session::Champ;
use crate::noyau::{graduations, troncons, Fenetre, Vue};

/// Pavé principal (4 colonnes).
const PAVE: &[[&str; 4]] = &[
    ["C", "del", "±", "/"],
    ["7", "8", "9", "*"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", ".", "^", "="],
];

/// Fonctions, opérateur log et constantes.
const FONCTIONS: &[[&str; 4]] = &[
    ["sin", "cos", "tan", "sqrt"],
    ["sec", "csc", "cot", "log"],
    ["asin", "acos", "atan", "i"],
    ["asec", "acsc", "acot", "x"],
    ["π", "e", "φ", "τ"],
];

const TAILLE_BOUTON: [f32; 2] = [56.0, 32.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.heading("Calculatrice scientifique");
        ui.add_space(6.0);

        self.ui_modes(ui);
        ui.add_space(6.0);
        self.ui_ecran(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        match self.session.vue() {
            Vue::Standard => self.ui_standard(ui),
            Vue::Graphe => self.ui_graphe(ui),
            Vue::Integration => self.ui_integration(ui),
        }
    }

    fn ui_modes(&mut self, ui: &mut egui::Ui) {
        let mode = self.session.mode();

        ui.horizontal(|ui| {
            for (mut actif, texte, jeton) in [
                (mode.degres, "DEG", "deg/rad"),
                (mode.complexe, "ℂ", "complex"),
                (mode.algebrique, "ALG", "algebraic"),
            ] {
                if ui.toggle_value(&mut actif, texte).clicked() {
                    self.appuyer(jeton);
                }
            }
        });
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                // rappel de l’opération enchaînée en cours (ex: "12 +")
                if let Some((gauche, op)) = self.session.operation_en_attente() {
                    ui.weak(format!("{gauche} {}", op.symbole()));
                }
                ui.label(
                    egui::RichText::new(self.session.affichage())
                        .monospace()
                        .size(26.0),
                );
            });
    }

    /* ------------------------ Vue standard ------------------------ */

    fn ui_standard(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_top(|ui| {
            self.grille_boutons(ui, "pave", PAVE);
            ui.separator();
            self.grille_boutons(ui, "fonctions", FONCTIONS);
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            self.bouton(ui, "graph");
            self.bouton(ui, "integrate");
        });
    }

    fn grille_boutons(&mut self, ui: &mut egui::Ui, id: &str, rangees: &[[&str; 4]]) {
        egui::Grid::new(id)
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in rangees {
                    for jeton in rangee {
                        self.bouton(ui, jeton);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, jeton: &str) {
        if ui
            .add_sized(TAILLE_BOUTON, egui::Button::new(jeton))
            .clicked()
        {
            self.appuyer(jeton);
        }
    }

    /* ------------------------ Vue graphe ------------------------ */

    fn ui_graphe(&mut self, ui: &mut egui::Ui) {
        let mut fonction = self.session.graphe().fonction.clone();

        ui.horizontal(|ui| {
            ui.label("f(x) =");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut fonction)
                    .desired_width(240.0)
                    .id_salt("graphe_fonction")
                    .code_editor(),
            );
            if resp.changed() {
                self.session.editer_fonction_graphe(&fonction);
                self.recaler_echeance();
            }

            let entree = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if entree {
                self.appuyer("plot");
            }
            self.bouton(ui, "plot");
            self.bouton(ui, "back");
        });

        let avant = self.session.graphe().fenetre;
        let mut f = avant;
        ui.horizontal(|ui| {
            for (valeur, titre) in [
                (&mut f.x_min, "x min "),
                (&mut f.x_max, "x max "),
                (&mut f.y_min, "y min "),
                (&mut f.y_max, "y max "),
            ] {
                ui.add(egui::DragValue::new(valeur).speed(0.1).prefix(titre));
            }
        });
        // fenêtre dégénérée refusée : le repère diviserait par zéro
        if f != avant && f.x_min < f.x_max && f.y_min < f.y_max {
            self.session.editer_fenetre(f);
            self.recaler_echeance();
        }

        ui.add_space(6.0);
        self.ui_trace(ui);
    }

    fn ui_trace(&self, ui: &mut egui::Ui) {
        let taille = egui::vec2(ui.available_width(), ui.available_height().max(260.0));
        let (resp, painter) = ui.allocate_painter(taille, egui::Sense::hover());
        let cadre = resp.rect;
        let fenetre: Fenetre = self.session.graphe().fenetre;

        let vers = |x: f64, y: f64| {
            let (sx, sy) = fenetre.vers_ecran(x, y, cadre.width() as f64, cadre.height() as f64);
            cadre.min + egui::vec2(sx as f32, sy as f32)
        };

        let grille = egui::Stroke::new(0.5, ui.visuals().weak_text_color());
        let axe = egui::Stroke::new(1.5, ui.visuals().text_color());
        let courbe = egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE);

        for x in graduations(fenetre.x_min, fenetre.x_max) {
            painter.line_segment([vers(x, fenetre.y_min), vers(x, fenetre.y_max)], grille);
        }
        for y in graduations(fenetre.y_min, fenetre.y_max) {
            painter.line_segment([vers(fenetre.x_min, y), vers(fenetre.x_max, y)], grille);
        }

        if fenetre.axe_x_visible() {
            painter.line_segment([vers(fenetre.x_min, 0.0), vers(fenetre.x_max, 0.0)], axe);
        }
        if fenetre.axe_y_visible() {
            painter.line_segment([vers(0.0, fenetre.y_min), vers(0.0, fenetre.y_max)], axe);
        }

        // échantillons mis en cache par la session (validation / fenêtre)
        let Some(points) = self.session.points_trace() else {
            return;
        };
        for t in troncons(points) {
            // un point isolé ne se relie à rien
            if t.len() < 2 {
                continue;
            }
            let ligne = t.iter().map(|p| vers(p.x, p.y)).collect();
            painter.add(egui::Shape::line(ligne, courbe));
        }
    }

    /* ------------------------ Vue intégration ------------------------ */

    fn ui_integration(&mut self, ui: &mut egui::Ui) {
        for (champ, jeton, titre) in [
            (Champ::BorneInf, "lower", "a ="),
            (Champ::BorneSup, "upper", "b ="),
            (Champ::Fonction, "function", "f(x) ="),
        ] {
            let etat = self.session.integration();
            let mut texte = match champ {
                Champ::BorneInf => etat.borne_inf.clone(),
                Champ::BorneSup => etat.borne_sup.clone(),
                Champ::Fonction => etat.fonction.clone(),
            };

            ui.horizontal(|ui| {
                ui.add_sized([48.0, 20.0], egui::Label::new(titre));
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut texte)
                        .desired_width(240.0)
                        .id_salt(jeton)
                        .code_editor(),
                );

                let ailleurs = self.session.integration().champ_actif != champ;
                if resp.gained_focus() || (ailleurs && resp.changed()) {
                    self.appuyer(jeton);
                }
                if resp.changed() {
                    self.session.editer_champ(&texte);
                    self.recaler_echeance();
                }
            });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            self.bouton(ui, "calculate");
            self.bouton(ui, "back");
        });
    }
}
