//! Tests scientifiques (campagne) : propriétés de bout en bout, par la session.
//!
//! But : rejouer les séquences de touches d’un utilisateur et vérifier l’écran.
//! - calcul enchaîné réel et complexe
//! - degrés / radians
//! - philosophie algébrique
//! - intégration, tracé, graduations
//! - budget temps global (échantillonnage / Simpson répétés)

use std::time::{Duration, Instant};

use super::complexe::{format_complexe, parse_complexe, Complexe, Nombre};
use super::eval::{evaluer, Liaisons};
use super::format::format_decimales;
use super::integration::integrer;
use super::reglages::Reglages;
use super::session::{Session, Vue};
use super::trace::{echantillonner, graduations, pas_agreable, troncons, Fenetre};

fn ecran(jetons: &[&str]) -> String {
    let mut s = Session::default();
    for j in jetons {
        s.appuyer(j);
    }
    s.affichage().to_string()
}

fn ecran_reel(jetons: &[&str]) -> f64 {
    let txt = ecran(jetons);
    txt.parse()
        .unwrap_or_else(|e| panic!("jetons={jetons:?} écran={txt:?} err={e}"))
}

fn proche(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() < tol, "{a} != {b}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Calcul enchaîné ------------------------ */

#[test]
fn sci_enchaine_reel() {
    assert_eq!(ecran(&["5", "+", "3", "+", "2", "="]), "10");
    assert_eq!(ecran(&["2", "^", "1", "0", "="]), "1024");
    assert_eq!(ecran(&["7", "-", "9", "*", "3", "="]), "-6");
    assert_eq!(ecran(&["1", "/", "0", "="]), "Infinity");
    assert_eq!(ecran(&["0", "/", "0", "="]), "NaN");
}

#[test]
fn sci_enchaine_complexe() {
    // (3+4i) + (1-2i) = 4+2i
    assert_eq!(
        ecran(&["complex", "3", "+", "4", "i", "+", "1", "-", "2", "i", "="]),
        "4+2i"
    );
    // (1+2i)(3+4i) = -5+10i
    assert_eq!(
        ecran(&["complex", "1", "+", "2", "i", "*", "3", "+", "4", "i", "="]),
        "-5+10i"
    );
    // i^4 = 1
    assert_eq!(ecran(&["complex", "i", "^", "4", "="]), "1");
    // réel ⊕ complexe : promotion
    assert_eq!(ecran(&["complex", "2", "*", "i", "="]), "2i");
    // sans 'i' final, "3-1" reste un calcul enchaîné
    for jetons in [
        &["2", "*", "3", "-", "1", "="][..],
        &["9", "-", "4", "+", "2", "/", "7", "="][..],
    ] {
        let complexe: Vec<&str> = std::iter::once("complex").chain(jetons.iter().copied()).collect();
        assert_eq!(ecran(&complexe), ecran(jetons), "{jetons:?}");
    }
}

#[test]
fn sci_complexe_texte_aller_retour() {
    for z in [
        Complexe::new(4.0, 2.0),
        Complexe::new(-3.0, -4.0),
        Complexe::new(0.0, 1.0),
        Complexe::new(2.5, 0.0),
    ] {
        assert_eq!(parse_complexe(&format_complexe(z)), z);
    }
    assert_eq!(format!("{}", Nombre::Complexe(Complexe::new(-3.0, -1.0))), "-3-i");
}

/* ------------------------ Degrés / radians ------------------------ */

#[test]
fn sci_sinus_selon_unite() {
    proche(ecran_reel(&["deg/rad", "9", "0", "sin"]), 1.0, 1e-12);
    proche(ecran_reel(&["deg/rad", "1", "asin"]), 90.0, 1e-12);
    proche(ecran_reel(&["algebraic", "π", "/", "2", "sin", "="]), 1.0, 1e-12);

    // l’évaluateur algébrique reste en radians, même en mode degrés
    proche(
        ecran_reel(&["deg/rad", "algebraic", "π", "/", "2", "sin", "="]),
        1.0,
        1e-12,
    );
}

#[test]
fn sci_constantes() {
    proche(ecran_reel(&["π", "="]), std::f64::consts::PI, 1e-15);
    proche(ecran_reel(&["τ", "="]), std::f64::consts::TAU, 1e-15);
    proche(ecran_reel(&["φ", "="]), (1.0 + 5f64.sqrt()) / 2.0, 1e-15);
    proche(ecran_reel(&["φ", "*", "2", "="]), 1.0 + 5f64.sqrt(), 1e-12);
}

/* ------------------------ Algébrique ------------------------ */

#[test]
fn sci_algebrique_priorites() {
    assert_eq!(ecran(&["algebraic", "2", "+", "3", "*", "4", "="]), "14");
    assert_eq!(ecran(&["algebraic", "2", "^", "3", "^", "2", "="]), "512");
    proche(
        ecran_reel(&["algebraic", "2", "log", "="]),
        2f64.ln(),
        1e-15,
    );
}

#[test]
fn sci_algebrique_erreur_affichee() {
    assert_eq!(
        ecran(&["algebraic", "y", "="]),
        // "y" n’est pas une touche : l’écran reste "0"
        "0"
    );
    assert_eq!(
        ecran(&["algebraic", "x", "+", "1", "="]),
        "Error: undefined symbol x"
    );
}

/* ------------------------ Intégration ------------------------ */

#[test]
fn sci_integrale_carre() {
    let v = integrer("x^2", 0.0, 1.0).unwrap();
    assert_eq!(format_decimales(v, 8), "0.33333333");

    assert_eq!(
        ecran(&["algebraic", "x", "^", "2", "integrate", "calculate"]),
        "∫(x^2) = 0.33333333"
    );
}

#[test]
fn sci_integrale_constantes_ecran() {
    // bornes par défaut [0, 1] ; π passe par la préparation
    let s = ecran(&["algebraic", "π", "*", "x", "integrate", "calculate"]);
    assert_eq!(s, "∫(π*x) = 1.57079633");
}

/* ------------------------ Tracé ------------------------ */

#[test]
fn sci_trace_trou_a_la_singularite() {
    let f = Fenetre {
        x_min: -1.0,
        x_max: 1.0,
        y_min: -1e6,
        y_max: 1e6,
    };
    let pts = echantillonner("1/x", &f).unwrap();
    let t = troncons(&pts);
    assert_eq!(t.len(), 2);
    assert_eq!(t[0].len() + t[1].len(), 1000);
}

#[test]
fn sci_trace_par_la_session() {
    let mut s = Session::default();
    for j in ["algebraic", "x", "^", "2", "graph", "plot"] {
        s.appuyer(j);
    }
    assert_eq!(s.vue(), Vue::Graphe);
    let pts = s.points_trace().expect("tracé prêt");
    assert!(pts.iter().all(|p| p.y <= 10.0 && p.y >= 0.0));
}

#[test]
fn sci_pas_agreable_et_graduations() {
    assert_eq!(pas_agreable(20.0), 2.0);
    assert_eq!(pas_agreable(100.0), 10.0);
    assert_eq!(pas_agreable(4.0), 0.5);

    let g = graduations(-10.0, 10.0);
    assert!(g.windows(2).all(|w| (w[1] - w[0] - 2.0).abs() < 1e-12));
}

/* ------------------------ Session ------------------------ */

#[test]
fn sci_c_idempotent() {
    let r = Reglages::default();
    let mut s = Session::avec_reglages(r.clone());
    for j in ["complex", "4", "±", "sqrt", "*", "2", "integrate", "upper"] {
        s.appuyer(j);
    }
    s.editer_champ("5");
    s.appuyer("C");
    assert_eq!(s, Session::avec_reglages(r.clone()));
    s.appuyer("C");
    assert_eq!(s, Session::avec_reglages(r));
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_echantillonnage_repete() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    for k in 1..=20 {
        let f = Fenetre {
            x_min: -(k as f64),
            x_max: k as f64,
            ..Fenetre::default()
        };
        let pts = echantillonner("sin(x)*x", &f).unwrap();
        assert!(!pts.is_empty());
        budget(t0, max);
    }
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 80 termes : profondeur d’AST modérée
    let expr = vec!["1/2"; 80].join(" + ");
    budget(t0, max);

    assert_eq!(evaluer(&expr, &Liaisons::new()), Ok(40.0));
}
