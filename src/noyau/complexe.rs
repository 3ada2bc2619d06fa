// src/noyau/complexe.rs
//
// Complexes (f64) + nombre étiqueté Réel | Complexe.
// - Opérateurs + - * / (division par 0 => indéfini {NaN,NaN})
// - Puissance entière par exponentiation binaire (n < 0 non supporté => indéfini)
// - Racine carrée par forme polaire
// - Texte : format_complexe / parse_complexe (aller-retour garanti sur nos sorties)
//
// Indéfini = les DEUX composantes NaN. Jamais une seule.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};

use super::format::{format_reel, lire_reel};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complexe {
    pub re: f64,
    pub im: f64,
}

impl Complexe {
    pub const I: Complexe = Complexe { re: 0.0, im: 1.0 };

    /// Résultat indéfini (domaine, parsing, opération non supportée).
    pub const NAN: Complexe = Complexe {
        re: f64::NAN,
        im: f64::NAN,
    };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub const fn reel(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn est_indefini(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn module_carre(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    pub fn module(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Argument dans ]-π, π].
    pub fn argument(&self) -> f64 {
        self.im.atan2(self.re)
    }

    /// z^n, n ≥ 0. z^0 = 1 (même pour z = 0).
    pub fn puissance(self, n: i64) -> Complexe {
        if n < 0 || self.est_indefini() {
            return Complexe::NAN;
        }

        let mut e = n as u64;
        let mut acc = Complexe::one();
        let mut b = self;

        while e > 0 {
            if (e & 1) == 1 {
                acc = acc * b;
            }
            e >>= 1;
            if e > 0 {
                b = b * b;
            }
        }
        acc
    }

    /// √z = √r · (cos(θ/2) + i·sin(θ/2)), branche principale.
    pub fn racine(self) -> Complexe {
        if self.est_indefini() {
            return Complexe::NAN;
        }
        // axe réel négatif : imaginaire pur exact (cos(π/2) ≠ 0 en f64)
        if self.im == 0.0 && self.re < 0.0 {
            return Complexe::new(0.0, (-self.re).sqrt());
        }
        let r = self.module().sqrt();
        let theta = self.argument() / 2.0;
        Complexe::new(r * theta.cos(), r * theta.sin())
    }
}

/* ------------------------ Opérateurs ------------------------ */

impl Add for Complexe {
    type Output = Complexe;
    fn add(self, b: Complexe) -> Complexe {
        Complexe::new(self.re + b.re, self.im + b.im)
    }
}

impl Sub for Complexe {
    type Output = Complexe;
    fn sub(self, b: Complexe) -> Complexe {
        Complexe::new(self.re - b.re, self.im - b.im)
    }
}

impl Mul for Complexe {
    type Output = Complexe;
    fn mul(self, b: Complexe) -> Complexe {
        Complexe::new(
            self.re * b.re - self.im * b.im,
            self.re * b.im + self.im * b.re,
        )
    }
}

impl Div for Complexe {
    type Output = Complexe;
    fn div(self, b: Complexe) -> Complexe {
        let d = b.module_carre();
        if d == 0.0 {
            return Complexe::NAN;
        }
        Complexe::new(
            (self.re * b.re + self.im * b.im) / d,
            (self.im * b.re - self.re * b.im) / d,
        )
    }
}

impl Neg for Complexe {
    type Output = Complexe;
    fn neg(self) -> Complexe {
        Complexe::new(-self.re, -self.im)
    }
}

impl Zero for Complexe {
    fn zero() -> Self {
        Complexe::reel(0.0)
    }
    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

impl One for Complexe {
    fn one() -> Self {
        Complexe::reel(1.0)
    }
}

impl fmt::Display for Complexe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_complexe(*self))
    }
}

/* ------------------------ Texte ------------------------ */

/// Affichage :
/// - réel pur       : "3", "-2.5"
/// - imaginaire pur : "i", "-i", "4i"
/// - mixte          : "3+4i", "-3-i" (coefficient unité élidé)
pub fn format_complexe(c: Complexe) -> String {
    if c.est_indefini() {
        return "NaN".to_string();
    }
    if c.im == 0.0 {
        return format_reel(c.re);
    }

    let partie_im = |m: f64| {
        if m == 1.0 {
            "i".to_string()
        } else {
            format!("{}i", format_reel(m))
        }
    };

    if c.re == 0.0 {
        return if c.im < 0.0 {
            format!("-{}", partie_im(-c.im))
        } else {
            partie_im(c.im)
        };
    }

    let signe = if c.im < 0.0 { '-' } else { '+' };
    format!("{}{signe}{}", format_reel(c.re), partie_im(c.im.abs()))
}

/// Lecture tolérante : indéfini {NaN,NaN} si le texte ne se lit pas.
pub fn parse_complexe(s: &str) -> Complexe {
    lire_complexe(s).unwrap_or(Complexe::NAN)
}

/// Littéral complexe strict : se termine par 'i' ET se relit entièrement.
/// ("pi", "Infinity", "sin(x)" ne sont PAS des littéraux.)
pub fn est_litteral_complexe(s: &str) -> bool {
    let t = s.trim();
    t.ends_with('i') && lire_complexe(t).is_some()
}

/// Grammaire :
///   réel | [réel] signe [coeff] "i" | [signe] [coeff] "i"
/// Le premier caractère est sauté lors de la recherche du signe séparateur :
/// "-3-4i" => re = "-3", im = "-4". Les signes d’exposant ("1e-3") ne coupent pas.
fn lire_complexe(s: &str) -> Option<Complexe> {
    let t: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if t.is_empty() {
        return None;
    }

    let Some(corps) = t.strip_suffix('i') else {
        let re = lire_reel(&t)?;
        return Some(if re.is_nan() {
            Complexe::NAN
        } else {
            Complexe::reel(re)
        });
    };

    let coupure = corps
        .char_indices()
        .skip(1)
        .find(|&(k, c)| {
            (c == '+' || c == '-') && !matches!(corps[..k].chars().last(), Some('e' | 'E'))
        })
        .map(|(k, _)| k);

    match coupure {
        Some(k) => {
            let re = lire_reel(&corps[..k])?;
            let im = coefficient(&corps[k..])?;
            Some(Complexe::new(re, im))
        }
        None => Some(Complexe::new(0.0, coefficient(corps)?)),
    }
}

/// Coefficient imaginaire : "" / "+" => 1, "-" => -1.
fn coefficient(s: &str) -> Option<f64> {
    match s {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => lire_reel(s),
    }
}

/* ------------------------ Nombre étiqueté ------------------------ */

/// Valeur portée par la session derrière un résultat affiché (le texte n’est
/// relu que pour une saisie tapée).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nombre {
    Reel(f64),
    Complexe(Complexe),
}

impl Nombre {
    pub fn en_complexe(self) -> Complexe {
        match self {
            Nombre::Reel(x) => Complexe::reel(x),
            Nombre::Complexe(c) => c,
        }
    }

    pub fn oppose(self) -> Nombre {
        match self {
            Nombre::Reel(x) => Nombre::Reel(-x),
            Nombre::Complexe(c) => Nombre::Complexe(-c),
        }
    }
}

impl fmt::Display for Nombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nombre::Reel(x) => f.write_str(&format_reel(*x)),
            Nombre::Complexe(c) => f.write_str(&format_complexe(*c)),
        }
    }
}
