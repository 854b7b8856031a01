// src/noyau/jetons.rs

use std::fmt;

use super::erreurs::LexError;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Num(f64),

    // Constantes, fonctions ou inconnus : résolus plus tard via le registre.
    Ident(String),

    // + - * / % ^ !
    Op(char),

    LPar,
    RPar,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{n}"),
            Token::Ident(name) => f.write_str(name),
            Token::Op(symbol) => write!(f, "{symbol}"),
            Token::LPar => f.write_str("("),
            Token::RPar => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// Symboles d’opérateurs reconnus par le lexer (un caractère chacun).
pub const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '%', '^', '!'];

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux : 12, 2.5, .5, 5. (pas d’exposant)
/// - signe collé : "-3" est UN littéral (cf. `repair_negative_literals`)
/// - opérateurs + - * / % ^ !
/// - parenthèses ( ) et séparateur ,
/// - identifiants [a-zA-Z]+ (normalisés en minuscules)
///
/// Après lecture : réparation des négatifs, puis contrôle “deux nombres collés”.
pub fn tokenize(s: &str) -> Result<Vec<Token>, LexError> {
    let raw = lex(s)?;
    let out = repair_negative_literals(raw);
    check_adjacent_numbers(&out)?;
    Ok(out)
}

/// Lecture brute, sans réparation.
fn lex(s: &str) -> Result<Vec<Token>, LexError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Token::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Token::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Token::Comma);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Nombre (éventuellement signé) : le '-' n’en fait partie que s’il est
        // immédiatement suivi d’un chiffre ou de ".chiffre".
        let signed = c == '-' && starts_number(&chars, i + 1);
        if signed || starts_number(&chars, i) {
            let start = i;
            if signed {
                i += 1;
            }
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let literal: String = chars[start..i].iter().collect();
            let n = literal.parse::<f64>().map_err(|_| LexError::InvalidNumber {
                literal: literal.clone(),
                position: start,
            })?;
            out.push(Token::Num(n));
            continue;
        }

        if OPERATOR_CHARS.contains(&c) {
            out.push(Token::Op(c));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z]+
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Token::Ident(word.to_ascii_lowercase()));
            continue;
        }

        return Err(LexError::UnexpectedChar { ch: c, position: i });
    }

    Ok(out)
}

/// Un nombre commence en `i` : chiffre, ou '.' suivi d’un chiffre.
fn starts_number(chars: &[char], i: usize) -> bool {
    match chars.get(i) {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// "5 -3" est lu [5, -3] : deux nombres voisins dont le second est négatif.
/// On retire le signe et on insère l’opérateur '-' entre les deux : [5, -, 3].
/// Un '-' déjà isolé (à côté d’une parenthèse, d’un opérateur…) n’est pas touché.
pub fn repair_negative_literals(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());

    for tok in tokens {
        if let (Some(Token::Num(_)), Token::Num(n)) = (out.last(), &tok) {
            if n.is_sign_negative() {
                out.push(Token::Op('-'));
                out.push(Token::Num(-n));
                continue;
            }
        }
        out.push(tok);
    }

    out
}

/// Contrôle rapide : jamais deux nombres adjacents dans une expression valide.
fn check_adjacent_numbers(tokens: &[Token]) -> Result<(), LexError> {
    for (index, pair) in tokens.windows(2).enumerate() {
        if let [Token::Num(left), Token::Num(right)] = pair {
            return Err(LexError::AdjacentNumbers {
                left: *left,
                right: *right,
                index: index + 1,
            });
        }
    }
    Ok(())
}

/// Format utilitaire (trace) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
