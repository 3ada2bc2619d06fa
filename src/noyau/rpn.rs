// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Insérer les multiplications implicites (2pi, 3x, 2(x+1), (a)(b))
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est une fonction connue => fonction unaire (postfixée en RPN)
//    - si name est une constante (pi, e, tau, phi) => nombre
//    - sinon => variable (Expr::Var), résolue à l’évaluation
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur => Tok::Neg (préfixe)
//    - précédence : entre * / et ^ => "-2^2" = -4, "2^-2" = 0.25
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::eval::ErreurEval;
use super::expr::{Appel, Expr};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    Appel::depuis_nom(name).is_some()
}

fn constante(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "tau" => Some(std::f64::consts::TAU),
        "e" => Some(std::f64::consts::E),
        "phi" => Some((1.0 + 5f64.sqrt()) / 2.0),
        _ => None,
    }
}

/// Insère `*` entre une valeur et ce qui commence une nouvelle valeur.
///
/// Exemple:
///   [Num(2), Ident("pi")]              -> [Num(2), Star, Ident("pi")]
///   [RPar, LPar]                       -> [RPar, Star, LPar]
///   [Ident("sin"), LPar, ...]          -> inchangé (fonction)
pub fn inserer_multiplications(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());

    for tok in tokens {
        let fin_de_valeur = match out.last() {
            Some(Tok::Num(_)) | Some(Tok::RPar) => true,
            Some(Tok::Ident(name)) => !is_fonction_ident(name),
            _ => false,
        };
        let debut_de_valeur = matches!(tok, Tok::Num(_) | Tok::Ident(_) | Tok::LPar);

        if fin_de_valeur && debut_de_valeur {
            out.push(Tok::Star);
        }
        out.push(tok);
    }

    out
}

/// Dépile tant que le sommet doit sortir avant `tok` (binaire).
fn depile_pour(tok: &Tok, ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }
        if let Tok::Ident(name) = top {
            if is_fonction_ident(name.as_str()) {
                break;
            }
        }

        let p_top = precedence(top);
        let p_tok = precedence(tok);

        let doit_pop = if is_right_associative(tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if !doit_pop {
            break;
        }
        if let Some(t) = ops.pop() {
            out.push(t);
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Slash, Num(2), RPar]
///   rpn:    [Ident("pi"), Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurEval::Parentheses);
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Ident(name)) if is_fonction_ident(name)) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                // préfixe : rien à dépiler
                ops.push(Tok::Neg);
            }

            Tok::Plus if !prev_was_value => {
                // plus unaire : ignoré
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::Neg => {
                depile_pour(&tok, &mut ops, &mut out);
                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::Parentheses);
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Num(v)),

            Tok::Neg => {
                let x = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                let a = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;

                let (a, b) = (Box::new(a), Box::new(b));
                st.push(match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                });
            }

            Tok::Ident(name) => {
                if let Some(appel) = Appel::depuis_nom(&name) {
                    let x = st.pop().ok_or(ErreurEval::ArgumentManquant(name))?;
                    st.push(Expr::Appel(appel, Box::new(x)));
                } else if let Some(v) = constante(&name) {
                    st.push(Expr::Num(v));
                } else {
                    st.push(Expr::Var(name));
                }
            }

            Tok::LPar | Tok::RPar => return Err(ErreurEval::Parentheses),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(ErreurEval::ExpressionInvalide),
    }
}
