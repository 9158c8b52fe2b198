//! Noyau exact (rationnels non réduits)
//!
//! Organisation interne :
//! - rationnel.rs : Rationnel (num/den BigInt, jamais réduit) + opérations
//! - lecture.rs   : lecture décimale tronquée (division longue)
//! - jetons.rs    : tokenisation (Num / Op / Groupe)
//! - eval.rs      : réduction gauche-droite + table des opérateurs
//! - erreur.rs    : erreurs typées

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod lecture;
pub mod rationnel;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurNoyau, Resultat};
pub use eval::{eval_expression, evaluate, Demarche};
pub use jetons::{tokenize, Tok};
pub use rationnel::Rationnel;
