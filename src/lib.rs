//! Calculatrice exacte
//!
//! - noyau   : rationnels non réduits, jetons, réduction gauche-droite
//! - session : lignes + commandes `$file` / `$div` / `$echo`, état explicite

pub mod noyau;
pub mod session;

pub use noyau::{eval_expression, evaluate, tokenize, ErreurNoyau, Rationnel, Tok};
pub use session::{executer_flux, ErreurSession, Session};
