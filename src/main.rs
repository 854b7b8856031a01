// src/main.rs
//
// Calculatrice RPN — pilote en ligne de commande
// ----------------------------------------------
// But:
// - lire l’expression depuis les arguments (mots joints par des espaces)
// - afficher la valeur, ou l’erreur sur stderr avec un code de sortie 1
// - --trace : affiche jetons + postfixe avant la valeur
//
// Le noyau n’imprime rien : les traces détaillées passent par `log`
// (RUST_LOG=debug pour les voir).

use std::process::ExitCode;

use calc_rpn::{trace_with, Registry};
use clap::Parser;

/// Évalue une expression arithmétique (ex: "5! * 2", "max(3, 7)", "2 ^ 3 ^ 2").
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Affiche les jetons et la suite postfixe.
    #[arg(short, long)]
    trace: bool,

    /// Expression (plusieurs mots acceptés : `calc_rpn 5 -3`).
    #[arg(required = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let expression = args.expression.join(" ");

    match trace_with(&expression, Registry::standard()) {
        Ok(evaluation) => {
            if args.trace {
                println!("{}", evaluation.describe());
            } else {
                println!("{}", evaluation.value);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
