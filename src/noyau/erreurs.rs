//! src/noyau/erreurs.rs
//!
//! Erreurs typées, une famille par étape du pipeline :
//! - LexError    : jetons (caractère inconnu, littéral invalide, nombres collés)
//! - SyntaxError : shunting-yard (parenthèses, virgule mal placée)
//! - EvalError   : évaluation postfixe (identifiant inconnu, pile vide, résidu)
//!
//! Toutes sont terminales pour un appel : pas de résultat partiel.

use thiserror::Error;

/// Erreur de tokenisation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("invalid numeric literal '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    /// Contrôle après réparation des négatifs : deux nombres sans opérateur.
    #[error("operator expected between {left} and {right} (token {index})")]
    AdjacentNumbers { left: f64, right: f64, index: usize },
}

/// Erreur de conversion infixe -> postfixe.
/// `index` = position du jeton fautif dans la suite de jetons.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("mismatched parentheses (token {index})")]
    MismatchedParens { index: usize },

    #[error("mismatched parentheses or comma (token {index})")]
    MisplacedSeparator { index: usize },

    #[error("unknown operator '{symbol}' (token {index})")]
    UnknownOperator { symbol: char, index: usize },
}

/// Erreur d’évaluation de la suite postfixe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("unknown token '{0}'")]
    UnknownToken(String),

    #[error("invalid token '{0}' in postfix sequence")]
    InvalidToken(String),

    #[error("insufficient operands for '{callable}': expected {expected}, found {found}")]
    InsufficientOperands {
        callable: String,
        expected: usize,
        found: usize,
    },

    /// Résidu de pile ≠ 1 : 0 (vide) ou plusieurs valeurs.
    #[error("{}", malformed_message(.remaining))]
    Malformed { remaining: usize },
}

fn malformed_message(remaining: &usize) -> String {
    if *remaining == 0 {
        "malformed expression: nothing to evaluate".to_string()
    } else {
        format!("malformed expression: {remaining} values remained after evaluation")
    }
}

/// Famille d’une erreur (pour un aiguillage côté appelant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
    Eval,
}

/// Erreur publique du point d’entrée `evaluate`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl EvaluationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvaluationError::Lex(_) => ErrorKind::Lex,
            EvaluationError::Syntax(_) => ErrorKind::Syntax,
            EvaluationError::Eval(_) => ErrorKind::Eval,
        }
    }
}

/// Entrée refusée par `Registry::with_function` / `with_constant`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid name '{0}': only ASCII letters are allowed")]
    InvalidName(String),

    #[error("function '{0}' must take at least one argument")]
    ZeroArity(String),

    #[error("name '{0}' is already registered")]
    Duplicate(String),
}
