// src/noyau/expr.rs
//
// AST flottant de l’évaluateur algébrique.
// - Num : constante déjà résolue (pi, e, tau, phi compris)
// - Var : variable, valeur fournie à l’évaluation (ex: x)
// - Appel : fonction unaire (table trig de fonctions.rs + ln/log/exp/abs)
//
// Angles en radians. Division par zéro = ±Infinity (pas une erreur).
// Erreur de domaine : √, ln, log, log10 d’un négatif.

use super::eval::ErreurEval;
use super::fonctions::Fonction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appel {
    Table(Fonction),
    Ln,
    Log10,
    Exp,
    Abs,
}

impl Appel {
    pub fn depuis_nom(name: &str) -> Option<Appel> {
        match name {
            // log(x) = logarithme naturel (convention de l’évaluateur)
            "ln" | "log" => Some(Appel::Ln),
            "log10" => Some(Appel::Log10),
            "exp" => Some(Appel::Exp),
            "abs" => Some(Appel::Abs),
            _ => Fonction::depuis_jeton(name).map(Appel::Table),
        }
    }

    fn nom(self) -> &'static str {
        match self {
            Appel::Table(f) => f.nom(),
            Appel::Ln => "ln",
            Appel::Log10 => "log10",
            Appel::Exp => "exp",
            Appel::Abs => "abs",
        }
    }

    fn appliquer(self, x: f64) -> Result<f64, ErreurEval> {
        match self {
            Appel::Table(Fonction::Sqrt) | Appel::Ln | Appel::Log10 if x < 0.0 => {
                Err(ErreurEval::Domaine(self.nom()))
            }
            Appel::Table(f) => Ok(f.appliquer_reel(x, false)),
            Appel::Ln => Ok(x.ln()),
            Appel::Log10 => Ok(x.log10()),
            Appel::Exp => Ok(x.exp()),
            Appel::Abs => Ok(x.abs()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(String),

    Neg(Box<Expr>),
    Appel(Appel, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évalue l’arbre ; `valeur_de` résout les variables.
    pub fn evaluer(&self, valeur_de: &dyn Fn(&str) -> Option<f64>) -> Result<f64, ErreurEval> {
        Ok(match self {
            Expr::Num(v) => *v,
            Expr::Var(name) => {
                valeur_de(name).ok_or_else(|| ErreurEval::SymboleInconnu(name.clone()))?
            }

            Expr::Neg(x) => -x.evaluer(valeur_de)?,
            Expr::Appel(f, x) => f.appliquer(x.evaluer(valeur_de)?)?,

            Expr::Add(a, b) => a.evaluer(valeur_de)? + b.evaluer(valeur_de)?,
            Expr::Sub(a, b) => a.evaluer(valeur_de)? - b.evaluer(valeur_de)?,
            Expr::Mul(a, b) => a.evaluer(valeur_de)? * b.evaluer(valeur_de)?,
            Expr::Div(a, b) => a.evaluer(valeur_de)? / b.evaluer(valeur_de)?,
            Expr::Pow(a, b) => a.evaluer(valeur_de)?.powf(b.evaluer(valeur_de)?),
        })
    }
}
