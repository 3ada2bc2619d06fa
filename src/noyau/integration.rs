// src/noyau/integration.rs
//
// Intégrale définie par Simpson composite, partition FIXE (1000 intervalles, pair).
//   h = (b - a) / n
//   S = f(a) + f(b) + Σ_{i=1}^{n-1} w_i·f(a + i·h),  w_i = 4 (i impair), 2 (i pair)
//   ∫ ≈ h/3 · S
//
// Contrats :
// - Bornes illisibles => BornesInvalides AVANT tout échantillonnage.
// - Un seul échec de l’évaluateur (n’importe quel point) => FonctionInvalide, aucun résultat partiel.
// - Valeurs non finies : PAS une erreur (propagées telles quelles).

use thiserror::Error;

use super::eval::{ErreurEval, Expression};
use super::format::lire_reel;

/// Nombre d’intervalles (pair, exigé par Simpson).
pub const INTERVALLES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurIntegration {
    #[error("invalid bounds")]
    BornesInvalides,

    #[error("invalid function: {0}")]
    FonctionInvalide(#[from] ErreurEval),
}

/// ∫_a^b f(x) dx, f donnée en texte (variable x).
pub fn integrer(fonction: &str, a: f64, b: f64) -> Result<f64, ErreurIntegration> {
    let f = Expression::compiler(fonction)?;
    Ok(simpson(|x| f.evaluer_en(x), a, b)?)
}

/// Variante “champs texte” : les bornes sont validées d’abord.
pub fn integrer_textes(
    fonction: &str,
    borne_inf: &str,
    borne_sup: &str,
) -> Result<f64, ErreurIntegration> {
    let (a, b) = lire_bornes(borne_inf, borne_sup)?;
    integrer(fonction, a, b)
}

fn lire_bornes(borne_inf: &str, borne_sup: &str) -> Result<(f64, f64), ErreurIntegration> {
    let lire = |s: &str| lire_reel(s).filter(|v| v.is_finite());
    match (lire(borne_inf), lire(borne_sup)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(ErreurIntegration::BornesInvalides),
    }
}

/// Simpson composite sur une fonction faillible : la première erreur arrête tout.
fn simpson<F>(f: F, a: f64, b: f64) -> Result<f64, ErreurEval>
where
    F: Fn(f64) -> Result<f64, ErreurEval>,
{
    let n = INTERVALLES;
    let h = (b - a) / n as f64;

    let mut somme = f(a)? + f(b)?;
    for i in 1..n {
        let poids = if i % 2 == 1 { 4.0 } else { 2.0 };
        somme += poids * f(a + i as f64 * h)?;
    }

    Ok(h / 3.0 * somme)
}
