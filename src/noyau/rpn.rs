// src/noyau/rpn.rs
//
// Shunting-yard : jetons infixes -> postfixe (RPN)
//
// Règles:
// - Num / Ident non-fonction (constante ou inconnu) : sortie directe
//   (un identifiant inconnu sera refusé par eval.rs, pas ici)
// - Ident fonction : empilé, sorti après sa parenthèse fermante
// - Op o1 : dépile tant que le sommet est un opérateur o2 avec
//     prec(o1) < prec(o2), ou o1 associatif à gauche et prec(o1) <= prec(o2)
//   => "2^3^2" groupe à droite, "8-3-2" groupe à gauche
// - ',' : dépile jusqu’à '(' ; cette '(' doit ouvrir un appel de fonction
// - ')' : dépile jusqu’à '(' , jette '(' , sort la fonction éventuelle
// - fin : vide la pile ; une parenthèse restante = parenthèses non appariées

use log::trace;

use super::erreurs::SyntaxError;
use super::jetons::Token;
use super::registre::Registry;

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("max"), LPar, Num(3), Comma, Num(7), RPar, Op('!')]
///   rpn:    [Num(3), Num(7), Ident("max"), Op('!')]
pub fn to_postfix(tokens: &[Token], registry: &Registry) -> Result<Vec<Token>, SyntaxError> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Token> = Vec::new();

    for (index, tok) in tokens.iter().enumerate() {
        match tok {
            Token::Num(_) => out.push(tok.clone()),

            Token::Ident(name) => {
                if registry.is_function(name) {
                    ops.push(tok.clone());
                } else {
                    out.push(tok.clone());
                }
            }

            Token::Op(symbol) => {
                let o1 = registry
                    .lookup_operator(*symbol)
                    .ok_or(SyntaxError::UnknownOperator {
                        symbol: *symbol,
                        index,
                    })?;

                // '(' et fonctions bloquent : seul un opérateur au sommet peut sortir.
                while let Some(Token::Op(top)) = ops.last() {
                    let Some(o2) = registry.lookup_operator(*top) else {
                        break;
                    };

                    let doit_pop = o1.precedence < o2.precedence
                        || (o1.is_left_associative() && o1.precedence <= o2.precedence);
                    if !doit_pop {
                        break;
                    }

                    if let Some(popped) = ops.pop() {
                        trace!("rpn: '{symbol}' pops '{popped}'");
                        out.push(popped);
                    }
                }

                ops.push(tok.clone());
            }

            Token::Comma => {
                pop_until_left_paren(&mut ops, &mut out)
                    .ok_or(SyntaxError::MisplacedSeparator { index })?;

                // la '(' du sommet doit appartenir à un appel de fonction : "(1, 2)" est refusé
                let owner = ops.len().checked_sub(2).and_then(|i| ops.get(i));
                let in_call = matches!(owner, Some(Token::Ident(name)) if registry.is_function(name));
                if !in_call {
                    return Err(SyntaxError::MisplacedSeparator { index });
                }
            }

            Token::LPar => ops.push(Token::LPar),

            Token::RPar => {
                pop_until_left_paren(&mut ops, &mut out)
                    .ok_or(SyntaxError::MismatchedParens { index })?;

                // jette la '('
                ops.pop();

                // si une fonction est au sommet, on la sort aussi
                if let Some(Token::Ident(name)) = ops.last() {
                    if registry.is_function(name) {
                        if let Some(f) = ops.pop() {
                            out.push(f);
                        }
                    }
                }
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Token::LPar | Token::RPar) {
            return Err(SyntaxError::MismatchedParens {
                index: tokens.len(),
            });
        }
        out.push(op);
    }

    Ok(out)
}

/// Dépile vers la sortie jusqu’à trouver '(' (laissée au sommet).
/// `None` si la pile se vide sans '('.
fn pop_until_left_paren(ops: &mut Vec<Token>, out: &mut Vec<Token>) -> Option<()> {
    while !matches!(ops.last()?, Token::LPar) {
        out.push(ops.pop()?);
    }
    Some(())
}
