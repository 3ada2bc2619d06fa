// src/noyau/trace.rs
//
// Échantillonnage pour le tracé (indépendant du rendu)
// ---------------------------------------------------
// - 1001 abscisses régulières sur [xMin, xMax] (1000 pas)
// - un point est OMIS (pas de sentinelle) si y non fini, hors [yMin, yMax],
//   ou si l’évaluateur échoue en ce x
// - troncons() coupe la suite aux trous : le rendu ne relie jamais à travers
// - pas_agreable() / graduations() : espacement des lignes de grille
// - Fenetre::vers_ecran() : repère graphe -> surface largeur × hauteur

use super::eval::{ErreurEval, Expression};

/// Nombre de pas (donc PAS + 1 abscisses).
pub const PAS: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fenetre {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Fenetre {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
        }
    }
}

impl Fenetre {
    /// Graphe -> surface (origine en haut à gauche, y vers le bas).
    pub fn vers_ecran(&self, x: f64, y: f64, largeur: f64, hauteur: f64) -> (f64, f64) {
        let sx = largeur * (x - self.x_min) / (self.x_max - self.x_min);
        let sy = hauteur * (1.0 - (y - self.y_min) / (self.y_max - self.y_min));
        (sx, sy)
    }

    /// Axe horizontal visible (y = 0 dans la fenêtre).
    pub fn axe_x_visible(&self) -> bool {
        self.y_min <= 0.0 && self.y_max >= 0.0
    }

    /// Axe vertical visible (x = 0 dans la fenêtre).
    pub fn axe_y_visible(&self) -> bool {
        self.x_min <= 0.0 && self.x_max >= 0.0
    }
}

/// Point retenu ; `indice` = rang de l’abscisse (0..=PAS), sert à détecter les trous.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub indice: usize,
    pub x: f64,
    pub y: f64,
}

/// Échantillonne `fonction` (variable x) ; erreur seulement si le texte ne compile pas.
pub fn echantillonner(fonction: &str, fenetre: &Fenetre) -> Result<Vec<Point>, ErreurEval> {
    let f = Expression::compiler(fonction)?;
    Ok(echantillonner_expr(&f, fenetre))
}

pub fn echantillonner_expr(f: &Expression, fenetre: &Fenetre) -> Vec<Point> {
    let largeur = fenetre.x_max - fenetre.x_min;

    (0..=PAS)
        .filter_map(|i| {
            let x = fenetre.x_min + (i as f64 / PAS as f64) * largeur;
            let y = f.evaluer_en(x).ok()?;
            (y.is_finite() && y >= fenetre.y_min && y <= fenetre.y_max)
                .then_some(Point { indice: i, x, y })
        })
        .collect()
}

/// Découpe en suites d’indices consécutifs (une polyligne par tronçon).
pub fn troncons(points: &[Point]) -> Vec<&[Point]> {
    let mut out = Vec::new();
    let mut debut = 0;

    for k in 1..points.len() {
        if points[k].indice != points[k - 1].indice + 1 {
            out.push(&points[debut..k]);
            debut = k;
        }
    }
    if debut < points.len() {
        out.push(&points[debut..]);
    }
    out
}

/// Espacement “agréable” des lignes de grille (≈ 10 lignes sur `etendue`).
/// brut = etendue/10, magnitude = 10^⌊log10 brut⌋, normalisé = brut/magnitude :
/// < 1.5 => 1·m ; < 3 => 2·m ; < 7 => 5·m ; sinon 10·m.
pub fn pas_agreable(etendue: f64) -> f64 {
    let brut = etendue / 10.0;
    if !(brut.is_finite() && brut > 0.0) {
        return f64::NAN;
    }

    // 10^e exact (entier) des deux côtés : 0.7/0.1 donnerait 6.999…
    let e = brut.log10().floor() as i32;
    let dix_e = 10f64.powi(e.abs());
    let normalise = if e >= 0 { brut / dix_e } else { brut * dix_e };

    let facteur = if normalise < 1.5 {
        1.0
    } else if normalise < 3.0 {
        2.0
    } else if normalise < 7.0 {
        5.0
    } else {
        10.0
    };

    if e >= 0 {
        facteur * dix_e
    } else {
        facteur / dix_e
    }
}

/// Positions des lignes de grille : ceil(min/pas)·pas, +pas, … ≤ max.
pub fn graduations(min: f64, max: f64) -> Vec<f64> {
    let pas = pas_agreable(max - min);
    if !pas.is_finite() || pas <= 0.0 {
        return Vec::new();
    }

    let premier = (min / pas).ceil();
    let dernier = (max / pas).floor();
    if dernier < premier {
        return Vec::new();
    }

    // par rang entier : pas d’accumulation d’erreur (0.1 + 0.1 + …)
    let n = (dernier - premier) as usize;
    (0..=n).map(|k| (premier + k as f64) * pas).collect()
}
