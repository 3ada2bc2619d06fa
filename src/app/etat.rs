//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : porter la session du noyau et l’échéance de sa minuterie.
//! Toute la logique de calcul vit dans `noyau::session` ; ici on ne fait
//! que transmettre des jetons et surveiller l’horloge.
//!
//! Contrats :
//! - Une seule échéance à la fois, celle de la dernière minuterie planifiée.
//! - Une échéance périmée (jeton remplacé/annulé) est ignorée par la session.

use std::time::{Duration, Instant};

use crate::noyau::{Reglages, Session};

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub session: Session,

    /// (jeton de minuterie, instant d’expiration)
    echeance: Option<(u64, Instant)>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_reglages(Reglages::default())
    }
}

impl AppCalc {
    pub fn avec_reglages(reglages: Reglages) -> Self {
        Self {
            session: Session::avec_reglages(reglages),
            echeance: None,
        }
    }

    /// Bouton / raccourci : transmet le jeton, puis recale l’échéance.
    pub fn appuyer(&mut self, jeton: &str) {
        self.session.appuyer(jeton);
        self.recaler_echeance();
    }

    /// Après une édition de champ (la session annule alors sa minuterie).
    pub fn recaler_echeance(&mut self) {
        self.echeance = match self.session.minuterie() {
            // minuterie inchangée : on garde l’instant déjà calculé
            Some(m) => match self.echeance {
                Some((jeton, quand)) if jeton == m.jeton => Some((jeton, quand)),
                _ => Some((m.jeton, Instant::now() + m.delai)),
            },
            None => None,
        };
    }

    /// Appelé à chaque frame. Retourne le temps restant avant la prochaine échéance
    /// (pour redemander un rendu), None s’il n’y en a pas.
    pub fn tic(&mut self, maintenant: Instant) -> Option<Duration> {
        let (jeton, quand) = self.echeance?;

        if maintenant < quand {
            return Some(quand - maintenant);
        }

        self.echeance = None;
        if !self.session.expirer(jeton) {
            tracing::debug!(jeton, "échéance périmée");
        }
        self.recaler_echeance();
        self.echeance.map(|(_, q)| q.saturating_duration_since(maintenant))
    }
}
