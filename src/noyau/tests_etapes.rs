//! Tests par étape : registre, jetons, postfixe, pile d’évaluation.
//!
//! Chaque étape est testée isolément (entrées construites à la main),
//! le pipeline complet est couvert par tests_scientifiques.rs.

use super::erreurs::{EvalError, LexError, RegistryError, SyntaxError};
use super::eval::{evaluate_postfix, evaluate_with};
use super::jetons::{format_tokens, repair_negative_literals, tokenize, Token};
use super::registre::{factorial, Associativity, Registry};
use super::rpn::to_postfix;

use Token::{Comma, Ident, LPar, Num, Op, RPar};

fn rpn_txt(expr: &str) -> String {
    let reg = Registry::standard();
    let tokens = tokenize(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    let rpn = to_postfix(&tokens, reg).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    format_tokens(&rpn)
}

fn syntax_err(expr: &str) -> SyntaxError {
    let tokens = tokenize(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    match to_postfix(&tokens, Registry::standard()) {
        Ok(rpn) => panic!("expr={expr:?} devrait échouer, rpn={}", format_tokens(&rpn)),
        Err(e) => e,
    }
}

/* ------------------------ Registre ------------------------ */

#[test]
fn registre_operateurs_standard() {
    let reg = Registry::standard();

    let plus = reg.lookup_operator('+').expect("+");
    assert_eq!((plus.precedence, plus.arity), (1, 2));
    assert!(plus.is_left_associative());

    let pow = reg.lookup_operator('^').expect("^");
    assert_eq!(pow.precedence, 5);
    assert_eq!(pow.associativity, Associativity::Right);

    let fact = reg.lookup_operator('!').expect("!");
    assert_eq!((fact.precedence, fact.arity), (7, 1));
    assert_eq!(fact.associativity, Associativity::Right);

    for symbol in ['*', '/', '%'] {
        assert_eq!(reg.lookup_operator(symbol).map(|o| o.precedence), Some(3));
    }
    assert!(reg.lookup_operator('&').is_none());
}

#[test]
fn registre_fonctions_et_constantes() {
    let reg = Registry::standard();

    for (name, arity) in [("abs", 1), ("min", 2), ("max", 2), ("floor", 1), ("ceil", 1), ("round", 1)] {
        assert_eq!(reg.lookup_function(name).map(|f| f.arity), Some(arity), "{name}");
    }
    assert!(reg.lookup_function("sqrt").is_none());

    assert_eq!(reg.lookup_constant("pi"), Some(std::f64::consts::PI));
    assert_eq!(reg.lookup_constant("e"), Some(std::f64::consts::E));
    assert_eq!(reg.lookup_constant("tau"), None);
}

#[test]
fn registre_standard_partage() {
    assert!(std::ptr::eq(Registry::standard(), Registry::standard()));
}

#[test]
fn registre_extension() {
    let reg = Registry::default()
        .with_function("Double", 1, |a| a[0] * 2.0)
        .and_then(|r| r.with_constant("tau", std::f64::consts::TAU))
        .expect("extension valide");

    assert_eq!(evaluate_with("double(21)", &reg), Ok(42.0));
    assert_eq!(evaluate_with("DOUBLE(1) + 1", &reg), Ok(3.0));
    assert_eq!(evaluate_with("tau / 2", &reg), Ok(std::f64::consts::PI));

    // le registre standard n’est pas touché
    assert!(Registry::standard().lookup_function("double").is_none());
}

#[test]
fn registre_extension_refusee() {
    let base = Registry::default;

    assert_eq!(
        base().with_function("max", 2, |a| a[0]).err(),
        Some(RegistryError::Duplicate("max".into()))
    );
    assert_eq!(
        base().with_constant("PI", 3.0).err(),
        Some(RegistryError::Duplicate("pi".into()))
    );
    assert_eq!(
        base().with_function("f2", 1, |a| a[0]).err(),
        Some(RegistryError::InvalidName("f2".into()))
    );
    assert_eq!(
        base().with_function("zero", 0, |_| 0.0).err(),
        Some(RegistryError::ZeroArity("zero".into()))
    );
}

#[test]
fn factorielle_historique() {
    assert_eq!(factorial(5.0), 120.0);
    assert_eq!(factorial(2.0), 2.0);
    // la boucle ne tourne pas : valeur rendue telle quelle
    assert_eq!(factorial(0.0), 0.0);
    assert_eq!(factorial(1.0), 1.0);
    assert_eq!(factorial(-3.0), -3.0);
    // 3.5 * 2 * 3
    assert_eq!(factorial(3.5), 21.0);
    assert_eq!(factorial(1000.0), f64::INFINITY);
}

/* ------------------------ Jetons ------------------------ */

#[test]
fn jetons_de_base() {
    assert_eq!(
        tokenize("MAX(3, 7.5)"),
        Ok(vec![Ident("max".into()), LPar, Num(3.0), Comma, Num(7.5), RPar])
    );
    assert_eq!(
        tokenize(".5 + 5.%2"),
        Ok(vec![Num(0.5), Op('+'), Num(5.0), Op('%'), Num(2.0)])
    );
    assert_eq!(tokenize("5!^2"), Ok(vec![Num(5.0), Op('!'), Op('^'), Num(2.0)]));
    assert_eq!(tokenize("  "), Ok(vec![]));
}

#[test]
fn jetons_moins_colle_ou_isole() {
    // signe collé à un chiffre : littéral négatif
    assert_eq!(tokenize("2 * -3"), Ok(vec![Num(2.0), Op('*'), Num(-3.0)]));
    assert_eq!(tokenize("-.5"), Ok(vec![Num(-0.5)]));
    // '-' suivi d’autre chose : opérateur
    assert_eq!(tokenize("- x"), Ok(vec![Op('-'), Ident("x".into())]));
    assert_eq!(tokenize("-(1)"), Ok(vec![Op('-'), LPar, Num(1.0), RPar]));
}

#[test]
fn jetons_reparation_negatifs() {
    let attendu = vec![Num(5.0), Op('-'), Num(3.0)];
    assert_eq!(tokenize("5 -3"), Ok(attendu.clone()));
    assert_eq!(tokenize("5-3"), Ok(attendu.clone()));
    assert_eq!(tokenize("5 - 3"), Ok(attendu));

    assert_eq!(
        tokenize("5 -3 -2"),
        Ok(vec![Num(5.0), Op('-'), Num(3.0), Op('-'), Num(2.0)])
    );

    // après une parenthèse, le littéral reste négatif
    assert_eq!(tokenize("(2) -3"), Ok(vec![LPar, Num(2.0), RPar, Num(-3.0)]));
}

#[test]
fn reparation_seule() {
    let repare = repair_negative_literals(vec![Num(1.0), Num(-0.0), Ident("pi".into()), Num(-2.0)]);
    assert_eq!(
        repare,
        vec![Num(1.0), Op('-'), Num(0.0), Ident("pi".into()), Num(-2.0)]
    );
}

#[test]
fn jetons_erreurs() {
    assert_eq!(
        tokenize("2 $ 3"),
        Err(LexError::UnexpectedChar { ch: '$', position: 2 })
    );
    assert_eq!(
        tokenize("π"),
        Err(LexError::UnexpectedChar { ch: 'π', position: 0 })
    );
    assert_eq!(
        tokenize("\"2\""),
        Err(LexError::UnexpectedChar { ch: '"', position: 0 })
    );
    assert_eq!(
        tokenize("2 3"),
        Err(LexError::AdjacentNumbers { left: 2.0, right: 3.0, index: 1 })
    );
    // "1.2" puis ".3"
    assert!(matches!(tokenize("1.2.3"), Err(LexError::AdjacentNumbers { .. })));
}

#[test]
fn format_jetons() {
    let tokens = tokenize("max(2.5, pi) * -1").expect("jetons");
    assert_eq!(format_tokens(&tokens), "max ( 2.5 , pi ) * -1");
}

/* ------------------------ Postfixe ------------------------ */

#[test]
fn postfixe_precedence_et_associativite() {
    assert_eq!(rpn_txt("2 + 3 * 4"), "2 3 4 * +");
    assert_eq!(rpn_txt("2 * 3 + 4"), "2 3 * 4 +");
    assert_eq!(rpn_txt("8 - 3 - 2"), "8 3 - 2 -");
    assert_eq!(rpn_txt("2 ^ 3 ^ 2"), "2 3 2 ^ ^");
    assert_eq!(rpn_txt("(2 + 3) * 4"), "2 3 + 4 *");
    assert_eq!(rpn_txt("5! * 2"), "5 ! 2 *");
    assert_eq!(rpn_txt("2 ^ 3!"), "2 3 ! ^");
    assert_eq!(rpn_txt("3!!"), "3 ! !");
}

#[test]
fn postfixe_fonctions() {
    assert_eq!(rpn_txt("max(3, 7)"), "3 7 max");
    assert_eq!(rpn_txt("max(1 + 2, 3 * 4)"), "1 2 + 3 4 * max");
    assert_eq!(rpn_txt("min(abs(-2), 1) ^ 2"), "-2 abs 1 min 2 ^");
    // constantes et inconnus passent en sortie, résolus à l’évaluation
    assert_eq!(rpn_txt("pi * foo"), "pi foo *");
}

#[test]
fn postfixe_parentheses_non_appariees() {
    assert_eq!(syntax_err("(2 + 3"), SyntaxError::MismatchedParens { index: 4 });
    assert_eq!(syntax_err("2 + 3)"), SyntaxError::MismatchedParens { index: 3 });
    assert_eq!(syntax_err("max(1, 2"), SyntaxError::MismatchedParens { index: 5 });
}

#[test]
fn postfixe_virgule_mal_placee() {
    assert_eq!(syntax_err("1, 2"), SyntaxError::MisplacedSeparator { index: 1 });
    assert_eq!(syntax_err(", 2"), SyntaxError::MisplacedSeparator { index: 0 });
    // groupe sans fonction
    assert_eq!(syntax_err("(1, 2)"), SyntaxError::MisplacedSeparator { index: 2 });
    assert_eq!(syntax_err("max((1, 2))"), SyntaxError::MisplacedSeparator { index: 4 });
}

/* ------------------------ Pile d’évaluation ------------------------ */

#[test]
fn pile_ordre_des_arguments() {
    let reg = Registry::standard();
    assert_eq!(evaluate_postfix(&[Num(10.0), Num(4.0), Op('-')], reg), Ok(6.0));
    assert_eq!(evaluate_postfix(&[Num(10.0), Num(4.0), Op('/')], reg), Ok(2.5));
    assert_eq!(evaluate_postfix(&[Num(2.0), Num(10.0), Op('^')], reg), Ok(1024.0));
    assert_eq!(
        evaluate_postfix(&[Num(9.0), Num(2.0), Ident("min".into())], reg),
        Ok(2.0)
    );
}

#[test]
fn pile_erreurs() {
    let reg = Registry::standard();

    assert_eq!(
        evaluate_postfix(&[Num(1.0), Op('+')], reg),
        Err(EvalError::InsufficientOperands {
            callable: "+".into(),
            expected: 2,
            found: 1
        })
    );
    assert_eq!(
        evaluate_postfix(&[Ident("foo".into())], reg),
        Err(EvalError::UnknownToken("foo".into()))
    );
    assert_eq!(
        evaluate_postfix(&[Num(1.0), LPar], reg),
        Err(EvalError::InvalidToken("(".into()))
    );
    assert_eq!(
        evaluate_postfix(&[Num(1.0), Num(2.0), Op('&')], reg),
        Err(EvalError::InvalidToken("&".into()))
    );
    assert_eq!(evaluate_postfix(&[], reg), Err(EvalError::Malformed { remaining: 0 }));
    assert_eq!(
        evaluate_postfix(&[Num(1.0), Num(2.0)], reg),
        Err(EvalError::Malformed { remaining: 2 })
    );
}

#[test]
fn messages_lisibles() {
    assert_eq!(
        EvalError::Malformed { remaining: 0 }.to_string(),
        "malformed expression: nothing to evaluate"
    );
    assert_eq!(
        EvalError::Malformed { remaining: 3 }.to_string(),
        "malformed expression: 3 values remained after evaluation"
    );
    assert_eq!(
        SyntaxError::MismatchedParens { index: 4 }.to_string(),
        "mismatched parentheses (token 4)"
    );
}
