//! src/noyau/reglages.rs
//!
//! Réglages de session (constantes + Default, aucun fichier).
//!
//! Contrats :
//! - Injectés à la création de la session, jamais modifiés par un jeton.
//! - "C" remet la session à zéro MAIS conserve ses réglages.

use std::time::Duration;

use super::trace::Fenetre;

/// Message d’erreur visible avant retour automatique à "0".
const DELAI_ERREUR: Duration = Duration::from_secs(2);

/// Bannière "∫(…) = …" visible avant remplacement par la valeur seule.
const DELAI_RESULTAT: Duration = Duration::from_secs(3);

const BORNE_INF_DEFAUT: &str = "0";
const BORNE_SUP_DEFAUT: &str = "1";

#[derive(Clone, Debug, PartialEq)]
pub struct Reglages {
    pub fenetre: Fenetre,
    pub delai_erreur: Duration,
    pub delai_resultat: Duration,
    pub borne_inf: String,
    pub borne_sup: String,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            fenetre: Fenetre::default(),
            delai_erreur: DELAI_ERREUR,
            delai_resultat: DELAI_RESULTAT,
            borne_inf: BORNE_INF_DEFAUT.to_string(),
            borne_sup: BORNE_SUP_DEFAUT.to_string(),
        }
    }
}
