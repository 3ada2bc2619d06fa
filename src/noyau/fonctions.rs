// src/noyau/fonctions.rs
//
// Opérations numériques de base (réel + complexe)
// -----------------------------------------------
// - Mode : drapeaux (degrés / complexe / algébrique), remplacé en bloc à chaque bascule
// - Fonction : table unaire sqrt + trig + trig réciproque/inverse
// - Operateur : binaire + - * / ^ log, avec promotion complexe si un côté l’est
//
// Trig en complexe : NON supportée => indéfini {NaN,NaN} (jamais une valeur “plausible”).
// sec/csc/cot et leurs inverses suivent la sémantique flottante (1/0 => ±Infinity).

use super::complexe::{Complexe, Nombre};

/* ------------------------ Mode ------------------------ */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mode {
    pub degres: bool,
    pub complexe: bool,
    pub algebrique: bool,
}

impl Mode {
    pub fn bascule_degres(self) -> Mode {
        Mode {
            degres: !self.degres,
            ..self
        }
    }

    pub fn bascule_complexe(self) -> Mode {
        Mode {
            complexe: !self.complexe,
            ..self
        }
    }

    pub fn bascule_algebrique(self) -> Mode {
        Mode {
            algebrique: !self.algebrique,
            ..self
        }
    }
}

/* ------------------------ Fonctions unaires ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Asec,
    Acsc,
    Acot,
}

impl Fonction {
    pub const TOUTES: [Fonction; 13] = [
        Fonction::Sqrt,
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Sec,
        Fonction::Csc,
        Fonction::Cot,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Asec,
        Fonction::Acsc,
        Fonction::Acot,
    ];

    /// Étiquette du bouton (et nom dans une expression algébrique).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sqrt => "sqrt",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sec => "sec",
            Fonction::Csc => "csc",
            Fonction::Cot => "cot",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Asec => "asec",
            Fonction::Acsc => "acsc",
            Fonction::Acot => "acot",
        }
    }

    pub fn depuis_jeton(jeton: &str) -> Option<Fonction> {
        if jeton == "√" {
            return Some(Fonction::Sqrt);
        }
        Self::TOUTES.into_iter().find(|f| f.nom() == jeton)
    }

    /// Réel -> réel. Directes : entrée convertie degrés -> radians si `degres`.
    /// Inverses : résultat converti radians -> degrés si `degres`.
    pub fn appliquer_reel(self, x: f64, degres: bool) -> f64 {
        use Fonction::*;

        let vers_rad = |a: f64| if degres { a.to_radians() } else { a };
        let depuis_rad = |a: f64| if degres { a.to_degrees() } else { a };

        match self {
            Sqrt => x.sqrt(),

            Sin => vers_rad(x).sin(),
            Cos => vers_rad(x).cos(),
            Tan => vers_rad(x).tan(),
            Sec => 1.0 / vers_rad(x).cos(),
            Csc => 1.0 / vers_rad(x).sin(),
            Cot => 1.0 / vers_rad(x).tan(),

            Asin => depuis_rad(x.asin()),
            Acos => depuis_rad(x.acos()),
            Atan => depuis_rad(x.atan()),
            Asec => depuis_rad((1.0 / x).acos()),
            Acsc => depuis_rad((1.0 / x).asin()),
            Acot => depuis_rad((1.0 / x).atan()),
        }
    }

    /// Applique sur un nombre étiqueté.
    /// - complexe : seule √ est définie (forme polaire)
    /// - réel négatif sous √ en mode complexe : racine complexe
    pub fn appliquer(self, n: Nombre, mode: Mode) -> Nombre {
        match n {
            Nombre::Complexe(c) => match self {
                Fonction::Sqrt => Nombre::Complexe(c.racine()),
                _ => Nombre::Complexe(Complexe::NAN),
            },
            Nombre::Reel(x) if self == Fonction::Sqrt && x < 0.0 && mode.complexe => {
                Nombre::Complexe(Complexe::reel(x).racine())
            }
            Nombre::Reel(x) => Nombre::Reel(self.appliquer_reel(x, mode.degres)),
        }
    }
}

/* ------------------------ Opérateurs binaires ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    /// a log b = logarithme de a en base b
    Log,
}

impl Operateur {
    pub fn depuis_jeton(jeton: &str) -> Option<Operateur> {
        match jeton {
            "+" => Some(Operateur::Plus),
            "-" => Some(Operateur::Moins),
            "*" => Some(Operateur::Fois),
            "/" => Some(Operateur::Divise),
            "^" => Some(Operateur::Puissance),
            "log" => Some(Operateur::Log),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "-",
            Operateur::Fois => "*",
            Operateur::Divise => "/",
            Operateur::Puissance => "^",
            Operateur::Log => "log",
        }
    }

    /// Réel ⊕ réel reste réel ; dès qu’un côté est complexe, tout passe en complexe.
    pub fn appliquer(self, gauche: Nombre, droite: Nombre) -> Nombre {
        match (gauche, droite) {
            (Nombre::Reel(a), Nombre::Reel(b)) => Nombre::Reel(self.reel(a, b)),
            (a, b) => Nombre::Complexe(self.complexe(a.en_complexe(), b.en_complexe())),
        }
    }

    fn reel(self, a: f64, b: f64) -> f64 {
        match self {
            Operateur::Plus => a + b,
            Operateur::Moins => a - b,
            Operateur::Fois => a * b,
            Operateur::Divise => a / b,
            Operateur::Puissance => a.powf(b),
            Operateur::Log => a.ln() / b.ln(),
        }
    }

    fn complexe(self, a: Complexe, b: Complexe) -> Complexe {
        match self {
            Operateur::Plus => a + b,
            Operateur::Moins => a - b,
            Operateur::Fois => a * b,
            Operateur::Divise => a / b,
            // exposant entier naturel seulement
            Operateur::Puissance => match exposant_entier(b) {
                Some(n) => a.puissance(n),
                None => Complexe::NAN,
            },
            Operateur::Log => Complexe::NAN,
        }
    }
}

fn exposant_entier(b: Complexe) -> Option<i64> {
    if b.im != 0.0 || !b.re.is_finite() || b.re.fract() != 0.0 {
        return None;
    }
    if b.re.abs() > i64::MAX as f64 {
        return None;
    }
    Some(b.re as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proche(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn sinus_degres_et_radians() {
        assert!(proche(Fonction::Sin.appliquer_reel(90.0, true), 1.0));
        assert!(proche(
            Fonction::Sin.appliquer_reel(std::f64::consts::FRAC_PI_2, false),
            1.0
        ));
    }

    #[test]
    fn inverses_en_degres() {
        assert!(proche(Fonction::Asin.appliquer_reel(1.0, true), 90.0));
        assert!(proche(Fonction::Acot.appliquer_reel(1.0, true), 45.0));
        assert!(proche(
            Fonction::Acos.appliquer_reel(-1.0, false),
            std::f64::consts::PI
        ));
    }

    #[test]
    fn reciproques_semantique_flottante() {
        assert!(proche(Fonction::Sec.appliquer_reel(0.0, false), 1.0));
        assert_eq!(Fonction::Csc.appliquer_reel(0.0, false), f64::INFINITY);
        assert_eq!(Fonction::Cot.appliquer_reel(0.0, false), f64::INFINITY);
        assert!(proche(Fonction::Asec.appliquer_reel(2.0, true), 60.0));
    }

    #[test]
    fn racine_negative_selon_mode() {
        let reel = Mode::default();
        let cplx = reel.bascule_complexe();

        match Fonction::Sqrt.appliquer(Nombre::Reel(-4.0), reel) {
            Nombre::Reel(x) => assert!(x.is_nan()),
            autre => panic!("attendu réel NaN, obtenu {autre:?}"),
        }
        match Fonction::Sqrt.appliquer(Nombre::Reel(-4.0), cplx) {
            Nombre::Complexe(c) => assert!(proche(c.re, 0.0) && proche(c.im, 2.0)),
            autre => panic!("attendu complexe, obtenu {autre:?}"),
        }
    }

    #[test]
    fn trig_complexe_non_supportee() {
        let z = Nombre::Complexe(Complexe::new(1.0, 1.0));
        for f in Fonction::TOUTES {
            let out = f.appliquer(z, Mode::default());
            if f == Fonction::Sqrt {
                continue;
            }
            match out {
                Nombre::Complexe(c) => assert!(c.re.is_nan() && c.im.is_nan(), "{f:?}"),
                autre => panic!("{f:?} => {autre:?}"),
            }
        }
    }

    #[test]
    fn jetons_reconnus() {
        assert_eq!(Fonction::depuis_jeton("acsc"), Some(Fonction::Acsc));
        assert_eq!(Fonction::depuis_jeton("√"), Some(Fonction::Sqrt));
        assert_eq!(Fonction::depuis_jeton("sinh"), None);
        assert_eq!(Operateur::depuis_jeton("log"), Some(Operateur::Log));
        assert_eq!(Operateur::depuis_jeton("%"), None);
    }

    #[test]
    fn operateurs_et_promotion() {
        let r = Operateur::Plus.appliquer(Nombre::Reel(2.0), Nombre::Complexe(Complexe::I));
        assert_eq!(r, Nombre::Complexe(Complexe::new(2.0, 1.0)));

        let p = Operateur::Puissance.appliquer(
            Nombre::Complexe(Complexe::new(1.0, 1.0)),
            Nombre::Reel(2.0),
        );
        assert_eq!(p, Nombre::Complexe(Complexe::new(0.0, 2.0)));

        match Operateur::Puissance.appliquer(Nombre::Complexe(Complexe::I), Nombre::Reel(0.5)) {
            Nombre::Complexe(c) => assert!(c.est_indefini()),
            autre => panic!("{autre:?}"),
        }
    }

    #[test]
    fn logarithme_en_base() {
        match Operateur::Log.appliquer(Nombre::Reel(8.0), Nombre::Reel(2.0)) {
            Nombre::Reel(x) => assert!(proche(x, 3.0)),
            autre => panic!("{autre:?}"),
        }
    }
}
