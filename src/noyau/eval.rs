//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> shunting-yard (postfixe) -> pile d’opérandes -> f64
//!
//! Le registre est seulement emprunté ; chaque appel alloue ses propres
//! jetons et piles, rien ne survit d’un appel à l’autre.

use log::{debug, trace};

use super::erreurs::{EvalError, EvaluationError};
use super::jetons::{format_tokens, tokenize, Token};
use super::registre::Registry;
use super::rpn::to_postfix;

/// Résultat détaillé d’une évaluation (jetons, postfixe, valeur).
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub tokens: Vec<Token>,
    pub postfix: Vec<Token>,
    pub value: f64,
}

impl Evaluation {
    /// Démarche lisible : une ligne par étape.
    pub fn describe(&self) -> String {
        format!(
            "Tokens: {}\nPostfix: {}\nValue: {}",
            format_tokens(&self.tokens),
            format_tokens(&self.postfix),
            self.value
        )
    }
}

/// API publique : évalue une expression avec le registre standard.
pub fn evaluate(expression: &str) -> Result<f64, EvaluationError> {
    evaluate_with(expression, Registry::standard())
}

pub fn evaluate_with(expression: &str, registry: &Registry) -> Result<f64, EvaluationError> {
    trace_with(expression, registry).map(|e| e.value)
}

/// Comme `evaluate_with`, mais garde les étapes intermédiaires.
pub fn trace_with(expression: &str, registry: &Registry) -> Result<Evaluation, EvaluationError> {
    // 1) Jetons
    let tokens = tokenize(expression)?;
    debug!("tokens: {}", format_tokens(&tokens));

    // 2) Postfixe
    let postfix = to_postfix(&tokens, registry)?;
    debug!("postfix: {}", format_tokens(&postfix));

    // 3) Valeur
    let value = evaluate_postfix(&postfix, registry)?;
    debug!("value: {value}");

    Ok(Evaluation {
        tokens,
        postfix,
        value,
    })
}

/// Évalue une suite postfixe.
///
/// - Num : empilé
/// - Ident : fonction => appliquée ; constante => empilée ; sinon `UnknownToken`
/// - Op : appliqué (`InvalidToken` si absent du registre)
/// - ( ) , : `InvalidToken` (n’ont rien à faire en postfixe)
///
/// Un appelable d’arité n consomme les n derniers opérandes ; ils sont passés
/// dans l’ordre de déclaration (le plus profond de la pile = premier argument).
pub fn evaluate_postfix(postfix: &[Token], registry: &Registry) -> Result<f64, EvalError> {
    let mut st: Vec<f64> = Vec::new();

    for tok in postfix {
        if let Some(callable) = registry.callable(tok) {
            let arity = callable.arity();
            if st.len() < arity {
                return Err(EvalError::InsufficientOperands {
                    callable: callable.name(),
                    expected: arity,
                    found: st.len(),
                });
            }

            // split_off garde l’ordre gauche -> droite
            let args = st.split_off(st.len() - arity);
            let v = callable.apply(&args);
            trace!("eval: {}{:?} = {v}", callable.name(), args);
            st.push(v);
            continue;
        }

        match tok {
            Token::Num(n) => st.push(*n),
            Token::Ident(name) => {
                let v = registry
                    .lookup_constant(name)
                    .ok_or_else(|| EvalError::UnknownToken(name.clone()))?;
                st.push(v);
            }
            Token::Op(_) | Token::LPar | Token::RPar | Token::Comma => {
                return Err(EvalError::InvalidToken(tok.to_string()));
            }
        }
    }

    match st.as_slice() {
        [v] => Ok(*v),
        rest => Err(EvalError::Malformed {
            remaining: rest.len(),
        }),
    }
}
