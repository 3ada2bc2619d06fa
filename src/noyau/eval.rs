//! Noyau — évaluateur algébrique (pipeline réel)
//!
//! tokenize -> multiplications implicites -> RPN -> Expr -> f64
//!
//! Deux formes :
//! - `evaluer(texte, liaisons)` : compile + évalue une fois (touche "=")
//! - `Expression::compiler` puis `evaluer_en(x)` : compile une fois, évalue
//!   1000/1001 fois (intégration, tracé)

use std::collections::HashMap;

use thiserror::Error;

use super::expr::Expr;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, inserer_multiplications, to_rpn};

/// Variable libre des fonctions tracées / intégrées.
pub const VARIABLE: &str = "x";

pub type Liaisons = HashMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurEval {
    #[error("empty expression")]
    Vide,

    #[error("unexpected character '{0}'")]
    CaractereInattendu(char),

    #[error("invalid number '{0}'")]
    NombreInvalide(String),

    #[error("unbalanced parentheses")]
    Parentheses,

    #[error("invalid expression")]
    ExpressionInvalide,

    #[error("undefined symbol {0}")]
    SymboleInconnu(String),

    #[error("{0} requires an argument")]
    ArgumentManquant(String),

    #[error("{0} of a negative number")]
    Domaine(&'static str),
}

/// Expression compilée (arbre prêt à évaluer).
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    arbre: Expr,
}

impl Expression {
    pub fn compiler(texte: &str) -> Result<Self, ErreurEval> {
        let s = texte.trim();
        if s.is_empty() {
            return Err(ErreurEval::Vide);
        }

        let jetons = inserer_multiplications(tokenize(s)?);
        let rpn = to_rpn(&jetons)?;
        tracing::trace!(expr = s, rpn = %format_tokens(&rpn), "expression compilée");

        Ok(Self {
            arbre: from_rpn(&rpn)?,
        })
    }

    pub fn evaluer(&self, liaisons: &Liaisons) -> Result<f64, ErreurEval> {
        self.arbre.evaluer(&|nom| liaisons.get(nom).copied())
    }

    /// Évalue avec la seule liaison `x = valeur` (sans allouer de table).
    pub fn evaluer_en(&self, valeur: f64) -> Result<f64, ErreurEval> {
        self.arbre
            .evaluer(&|nom| (nom == VARIABLE).then_some(valeur))
    }
}

/// API publique : évalue une expression avec des liaisons de variables.
pub fn evaluer(texte: &str, liaisons: &Liaisons) -> Result<f64, ErreurEval> {
    Expression::compiler(texte)?.evaluer(liaisons)
}

/// Remplace les orthographes de l’écran par celles de l’évaluateur.
/// π -> pi ; τ -> 2*pi
pub fn preparer(texte: &str) -> String {
    texte.replace('π', "pi").replace('τ', "2*pi")
}
