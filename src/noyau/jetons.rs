// src/noyau/jetons.rs

use super::eval::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes + variables (tout ce qui n’est pas nombre / opérateur)
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction, une constante ou une variable.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    /// Moins unaire (produit par le RPN, jamais par tokenize).
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (ex: 12, 0.5, .5, 1e-3, 2.5E+4)
/// - opérateurs + - * / ^ (et × ÷ − unicode)
/// - parenthèses ( )
/// - π τ φ √ (=> ident pi / tau / phi / sqrt)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Opérateurs + parenthèses
        let op = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(t) = op {
            out.push(t);
            i += 1;
            continue;
        }

        // Symboles unicode de l’écran
        let symbole = match c {
            'π' => Some("pi"),
            'τ' => Some("tau"),
            'φ' => Some("phi"),
            '√' => Some("sqrt"),
            _ => None,
        };
        if let Some(nom) = symbole {
            out.push(Tok::Ident(nom.to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }

            // exposant seulement si suivi d’un chiffre : "2e" reste 2·e
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let texte: String = chars[start..i].iter().collect();
            let v = texte
                .parse::<f64>()
                .map_err(|_| ErreurEval::NombreInvalide(texte.clone()))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEval::CaractereInattendu(c));
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
