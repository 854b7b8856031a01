// src/noyau/registre.rs
//
// Registre : opérateurs, fonctions, constantes.
// - construit une fois, jamais muté ensuite
// - partagé en lecture (&Registry) par rpn.rs et eval.rs
// - recherches pures : l’absence n’est pas une erreur (Option)
//
// Opérateurs et fonctions partagent la même forme “appelable” :
// arité fixe + transformation numérique fn(&[f64]) -> f64.
// Seule la manière dont le shunting-yard les dépile les distingue.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use num_traits::FloatConst;

use super::erreurs::RegistryError;
use super::jetons::Token;

/// Transformation numérique pure ; `args.len()` == arité déclarée.
pub type Transform = fn(&[f64]) -> f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone)]
pub struct OperatorDef {
    pub symbol: char,
    /// Plus grand = lie plus fort. Seul l’ordre compte.
    pub precedence: u8,
    pub associativity: Associativity,
    pub arity: usize,
    pub apply: Transform,
}

impl OperatorDef {
    pub fn is_left_associative(&self) -> bool {
        self.associativity == Associativity::Left
    }
}

#[derive(Clone)]
pub struct FunctionDef {
    pub name: String,
    pub arity: usize,
    pub apply: Transform,
}

// Debug à la main : on n’affiche pas le pointeur de fonction.
impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("symbol", &self.symbol)
            .field("precedence", &self.precedence)
            .field("associativity", &self.associativity)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Variante fermée : ce qu’un jeton postfixe peut appeler.
#[derive(Clone, Copy, Debug)]
pub enum Callable<'r> {
    Operator(&'r OperatorDef),
    Function(&'r FunctionDef),
}

impl Callable<'_> {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Operator(op) => op.arity,
            Callable::Function(f) => f.arity,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Callable::Operator(op) => op.symbol.to_string(),
            Callable::Function(f) => f.name.clone(),
        }
    }

    /// `args` dans l’ordre de déclaration (gauche -> droite).
    pub fn apply(&self, args: &[f64]) -> f64 {
        match self {
            Callable::Operator(op) => (op.apply)(args),
            Callable::Function(f) => (f.apply)(args),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Registry {
    operators: HashMap<char, OperatorDef>,
    functions: HashMap<String, FunctionDef>,
    constants: HashMap<String, f64>,
}

static STANDARD: OnceLock<Registry> = OnceLock::new();

impl Default for Registry {
    fn default() -> Self {
        Self::build_standard()
    }
}

impl Registry {
    /// Registre standard partagé (construit au premier appel).
    pub fn standard() -> &'static Registry {
        STANDARD.get_or_init(Registry::build_standard)
    }

    fn build_standard() -> Registry {
        use Associativity::{Left, Right};

        let operators = [
            op('+', 1, Left, 2, |a| a[0] + a[1]),
            op('-', 1, Left, 2, |a| a[0] - a[1]),
            op('*', 3, Left, 2, |a| a[0] * a[1]),
            op('/', 3, Left, 2, |a| a[0] / a[1]),
            // reste tronqué (signe du dividende)
            op('%', 3, Left, 2, |a| a[0] % a[1]),
            op('^', 5, Right, 2, |a| a[0].powf(a[1])),
            op('!', 7, Right, 1, |a| factorial(a[0])),
        ];

        let functions = [
            fun("abs", 1, |a| a[0].abs()),
            fun("min", 2, |a| a[0].min(a[1])),
            fun("max", 2, |a| a[0].max(a[1])),
            fun("floor", 1, |a| a[0].floor()),
            fun("ceil", 1, |a| a[0].ceil()),
            // demi -> loin de zéro
            fun("round", 1, |a| a[0].round()),
        ];

        Registry {
            operators: operators.into_iter().map(|o| (o.symbol, o)).collect(),
            functions: functions.into_iter().map(|f| (f.name.clone(), f)).collect(),
            constants: HashMap::from([("pi".to_string(), f64::PI()), ("e".to_string(), f64::E())]),
        }
    }

    /* ------------------------ Recherches ------------------------ */

    pub fn lookup_operator(&self, symbol: char) -> Option<&OperatorDef> {
        self.operators.get(&symbol)
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    pub fn lookup_constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Appelable désigné par un jeton (opérateur ou identifiant de fonction).
    pub fn callable(&self, tok: &Token) -> Option<Callable<'_>> {
        match tok {
            Token::Op(symbol) => self.lookup_operator(*symbol).map(Callable::Operator),
            Token::Ident(name) => self.lookup_function(name).map(Callable::Function),
            _ => None,
        }
    }

    /* ------------------------ Extension (avant partage) ------------------------ */

    /// Ajoute une fonction. Le nom est normalisé en minuscules
    /// (le tokenizer replie la casse des identifiants).
    pub fn with_function(
        mut self,
        name: &str,
        arity: usize,
        apply: Transform,
    ) -> Result<Registry, RegistryError> {
        let name = self.check_new_name(name)?;
        if arity == 0 {
            return Err(RegistryError::ZeroArity(name));
        }
        self.functions
            .insert(name.clone(), FunctionDef { name, arity, apply });
        Ok(self)
    }

    pub fn with_constant(mut self, name: &str, value: f64) -> Result<Registry, RegistryError> {
        let name = self.check_new_name(name)?;
        self.constants.insert(name, value);
        Ok(self)
    }

    fn check_new_name(&self, name: &str) -> Result<String, RegistryError> {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        let name = name.to_ascii_lowercase();
        if self.functions.contains_key(&name) || self.constants.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        Ok(name)
    }
}

fn op(
    symbol: char,
    precedence: u8,
    associativity: Associativity,
    arity: usize,
    apply: Transform,
) -> OperatorDef {
    OperatorDef {
        symbol,
        precedence,
        associativity,
        arity,
        apply,
    }
}

fn fun(name: &str, arity: usize, apply: Transform) -> FunctionDef {
    FunctionDef {
        name: name.to_string(),
        arity,
        apply,
    }
}

/// Factorielle “historique” : value = a ; pour i = 2, 3, … tant que i < a : value *= i.
///
/// Entiers ≥ 2 : factorielle usuelle. Sinon la boucle ne tourne pas (ou partiellement) :
/// 0 -> 0, 1 -> 1, négatif -> inchangé, 3.5 -> 3.5*2*3 = 21.
/// Arrêt dès que le produit est infini (le résultat ne peut plus changer).
pub fn factorial(a: f64) -> f64 {
    let mut value = a;
    let mut i = 2.0_f64;
    while i < a && value.is_finite() {
        value *= i;
        i += 1.0;
    }
    value
}
