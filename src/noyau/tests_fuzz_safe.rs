//! Tests fuzz safe : robustesse + déterminisme de la machine à états.
//!
//! But : marteler la session avec des suites de touches sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur de suite bornée
//! - budget temps global
//! - invariants : jamais de panique, écran jamais vide,
//!   opérateur enchaîné => opération ET opérande en attente,
//!   bascule de mode => seul le drapeau change, "C" => session initiale

use std::time::{Duration, Instant};

use super::reglages::Reglages;
use super::session::{Saisie, Session, Vue};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Clavier ------------------------ */

const TOUCHES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "±", "del", "=", "+", "-", "*", "/",
    "^", "log", "sqrt", "sin", "cos", "tan", "sec", "csc", "cot", "asin", "acos", "atan", "asec",
    "acsc", "acot", "π", "e", "φ", "τ", "i", "x", "deg/rad", "complex", "algebraic", "graph",
    "integrate", "back", "plot", "lower", "upper", "function", "calculate",
    // bruit : jetons inconnus
    "", "?", "sinh", "==",
];

/// "C" est rare : sinon les suites ne vont jamais loin.
fn touche(rng: &mut Rng) -> &'static str {
    if rng.pick(40) == 0 {
        "C"
    } else {
        TOUCHES[rng.pick(TOUCHES.len() as u32) as usize]
    }
}

const BASCULES: &[&str] = &["deg/rad", "complex", "algebraic"];

/// Photographie comparable (NaN compris : on compare le texte Debug).
fn photo(s: &Session) -> String {
    format!("{s:?}")
}

fn check_invariants(s: &Session, historique: &[&str]) {
    assert!(
        !s.affichage().is_empty(),
        "écran vide après {historique:?}"
    );
    if s.mode().algebrique {
        assert!(matches!(s.saisie(), Saisie::Brouillon { .. }), "{historique:?}");
    } else {
        assert!(matches!(s.saisie(), Saisie::Chainee { .. }), "{historique:?}");
    }
}

/// Transition `avant --jeton--> apres` : propriétés qui dépendent du jeton.
fn check_transition(avant: &Session, jeton: &str, apres: &Session, historique: &[&str]) {
    let standard = avant.vue() == Vue::Standard;

    // opérateur en calcul enchaîné (hors construction d’un littéral complexe)
    let litteral = avant.mode().complexe && matches!(jeton, "+" | "-");
    let enchaine = matches!(avant.saisie(), Saisie::Chainee { .. });
    if standard && enchaine && !litteral && matches!(jeton, "+" | "-" | "*" | "/" | "^" | "log") {
        assert!(apres.operation_en_attente().is_some(), "{historique:?}");
        assert!(apres.attente_operande(), "{historique:?}");
        assert!(apres.minuterie().is_none(), "{historique:?}");
    }

    if standard && BASCULES.contains(&jeton) {
        assert_ne!(apres.mode(), avant.mode(), "{historique:?}");
        assert_eq!(apres.affichage(), avant.affichage(), "{historique:?}");
        assert_eq!(apres.vue(), avant.vue(), "{historique:?}");
        assert_eq!(apres.attente_operande(), avant.attente_operande(), "{historique:?}");
        assert_eq!(apres.minuterie(), avant.minuterie(), "{historique:?}");
        assert_eq!(
            format!("{:?}", apres.operation_en_attente()),
            format!("{:?}", avant.operation_en_attente()),
            "{historique:?}"
        );
        // deux fois la même bascule : retour à l’identique
        assert_eq!(photo(&apres.apres(jeton)), photo(avant), "{historique:?}");
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_suites_de_touches() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..150 {
        budget(t0, max);

        let mut s = Session::default();
        let mut historique = Vec::new();

        for _ in 0..40 {
            let j = touche(&mut rng);
            historique.push(j);
            let avant = s.clone();
            s.appuyer(j);
            check_invariants(&s, &historique);
            check_transition(&avant, j, &s, &historique);

            // échéance immédiate de toute minuterie (hôte pressé)
            if let Some(m) = s.minuterie() {
                if rng.pick(2) == 0 {
                    assert!(s.expirer(m.jeton));
                    assert!(s.minuterie().is_none());
                    check_invariants(&s, &historique);
                }
            }
        }
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let rejouer = |seed: u64| {
        let mut rng = Rng::new(seed);
        let mut s = Session::default();
        for _ in 0..200 {
            s.appuyer(touche(&mut rng));
        }
        s
    };

    let a = rejouer(0xBADC0DE_u64);
    let b = rejouer(0xBADC0DE_u64);
    assert_eq!(a.affichage(), b.affichage());
    assert_eq!(a.vue(), b.vue());
    assert_eq!(a.mode(), b.mode());
}

#[test]
fn fuzz_safe_c_ramene_la_session_initiale() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let reglages = Reglages {
        borne_inf: "-1".to_string(),
        ..Reglages::default()
    };
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..60 {
        budget(t0, max);

        let mut s = Session::avec_reglages(reglages.clone());
        for _ in 0..25 {
            s.appuyer(touche(&mut rng));
        }
        s.appuyer("C");
        assert_eq!(s, Session::avec_reglages(reglages.clone()));
    }
}

#[test]
fn fuzz_safe_jetons_inconnus_sans_effet() {
    let mut rng = Rng::new(0xFEED_u64);

    for _ in 0..60 {
        let mut s = Session::default();
        for _ in 0..15 {
            s.appuyer(touche(&mut rng));
        }
        let affichage = s.affichage().to_string();
        let vue = s.vue();
        let minuterie = s.minuterie();

        for bruit in ["", "?", "sinh", "==", "AC"] {
            s.appuyer(bruit);
        }
        assert_eq!(s.affichage(), affichage);
        assert_eq!(s.vue(), vue);
        assert_eq!(s.minuterie().map(|m| m.jeton), minuterie.map(|m| m.jeton));
    }
}

#[test]
fn fuzz_safe_bascules_gardent_la_minuterie() {
    let mut rng = Rng::new(0x7161_u64);

    for _ in 0..60 {
        let mut s = Session::default();
        for _ in 0..20 {
            s.appuyer(touche(&mut rng));
        }
        // intégrale de l’écran courant : bannière OU message d’erreur, minuterie dans les deux cas
        for j in ["back", "integrate", "calculate"] {
            s.appuyer(j);
        }
        let m = s.minuterie().expect("minuterie après calculate");

        for _ in 0..6 {
            s.appuyer(BASCULES[rng.pick(BASCULES.len() as u32) as usize]);
        }
        assert_eq!(s.minuterie(), Some(m));
        assert!(s.expirer(m.jeton));
        assert!(!s.affichage().is_empty());
    }
}

#[test]
fn fuzz_safe_retour_standard_toujours_possible() {
    let mut rng = Rng::new(0xABCD_u64);

    for _ in 0..60 {
        let mut s = Session::default();
        for _ in 0..20 {
            s.appuyer(touche(&mut rng));
        }
        s.appuyer("back");
        if let Some(m) = s.minuterie() {
            s.expirer(m.jeton);
        }
        assert_eq!(s.vue(), Vue::Standard);
    }
}
