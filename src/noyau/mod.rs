//! Noyau d’évaluation
//!
//! Organisation interne :
//! - registre.rs : opérateurs, fonctions, constantes (lecture seule)
//! - jetons.rs   : tokenisation + réparation des littéraux négatifs
//! - rpn.rs      : shunting-yard (infixe -> postfixe)
//! - eval.rs     : évaluation postfixe + pipeline complet
//! - erreurs.rs  : erreurs par étape (lex / syntaxe / évaluation)

pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod registre;
pub mod rpn;

#[cfg(test)]
mod tests_etapes;



// API publique minimale
pub use erreurs::{ErrorKind, EvalError, EvaluationError, LexError, RegistryError, SyntaxError};
pub use eval::{evaluate, evaluate_with, trace_with, Evaluation};
pub use registre::Registry;
