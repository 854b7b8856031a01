//! Calculatrice RPN — bibliothèque
//!
//! Évalue des expressions arithmétiques textuelles en f64 :
//! littéraux, constantes (pi, e), opérateurs + - * / % ^ !, fonctions
//! abs/min/max/floor/ceil/round, parenthèses et appels à plusieurs arguments.
//!
//! ```
//! assert_eq!(calc_rpn::evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
//! assert_eq!(calc_rpn::evaluate("max(3, 7)").unwrap(), 7.0);
//! ```

pub mod noyau;

pub use noyau::{
    evaluate, evaluate_with, trace_with, ErrorKind, EvalError, Evaluation, EvaluationError,
    LexError, Registry, RegistryError, SyntaxError,
};
