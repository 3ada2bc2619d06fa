//! Noyau de calcul (sans vue)
//!
//! Organisation interne :
//! - format.rs      : affichage / lecture des réels ("NaN", "Infinity", "-0" => "0")
//! - complexe.rs    : Complexe + Nombre étiqueté, texte aller-retour
//! - fonctions.rs   : Mode, fonctions unaires (sqrt + trig), opérateurs binaires
//! - jetons.rs      : tokenisation
//! - rpn.rs         : shunting-yard + construction Expr
//! - expr.rs        : AST réel + évaluation
//! - eval.rs        : pipeline complet + erreurs
//! - integration.rs : Simpson composite (1000 intervalles)
//! - trace.rs       : échantillonnage, tronçons, graduations
//! - reglages.rs    : délais, fenêtre et bornes par défaut
//! - session.rs     : machine à états (jeton -> session)

pub mod complexe;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod integration;
pub mod jetons;
pub mod reglages;
pub mod rpn;
pub mod session;
pub mod trace;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale (celle de la vue)
pub use reglages::Reglages;
pub use session::{Session, Vue};
pub use trace::{graduations, troncons, Fenetre};
