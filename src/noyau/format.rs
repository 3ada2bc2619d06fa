// src/noyau/format.rs
//
// Affichage des réels (f64) pour l’écran de la calculatrice.
// - Forme la plus courte qui se relit exactement (`{}` de Rust, jamais d’exposant)
// - Non-finis : "NaN", "Infinity", "-Infinity" (pas de "inf" : contient un 'i')
// - -0 => "0"

/* ------------------------ Réels ------------------------ */

/// Texte d’un réel tel qu’il apparaît à l’écran.
pub fn format_reel(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{x}")
}

/// Réel avec un nombre fixe de décimales (bannière d’intégrale : 8).
pub fn format_decimales(x: f64, decimales: usize) -> String {
    if !x.is_finite() {
        return format_reel(x);
    }
    let s = format!("{x:.decimales$}");
    // "-0.00000000" => "0.00000000"
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return s[1..].to_string();
    }
    s
}

/// Relit un réel affiché par `format_reel`.
/// None si le texte n’est pas un littéral réel (expression, complexe…).
pub fn lire_reel(s: &str) -> Option<f64> {
    let t = s.trim();
    match t {
        "NaN" | "+NaN" => return Some(f64::NAN),
        // "+Infinity" : partie imaginaire de format_complexe ("1+Infinityi")
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // On refuse les orthographes "inf"/"nan" que `parse` accepterait :
    // l’écran ne les produit jamais.
    if t.is_empty() || t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    t.parse::<f64>().ok()
}
