// src/noyau/erreur.rs
//
// Erreurs du noyau (typées).
// Aucune ne termine le processus : l’appelant décide (abandonner la ligne, continuer, quitter).

use std::result::Result as StdResult;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurNoyau {
    /// Caractère hors alphabet, ou parenthèse orpheline.
    #[error("caractère inattendu '{caractere}' en position {position}")]
    Lexicale { caractere: char, position: usize },

    /// Séquence de jetons qui n’a pas la forme opérande (opérateur opérande)*.
    #[error("séquence invalide : {0}")]
    Structurelle(String),

    #[error("opérateur inconnu '{symbole}' [{gauche} ; {droite}]")]
    OperateurInconnu {
        symbole: String,
        gauche: String,
        droite: String,
    },

    #[error("précondition arithmétique : {0}")]
    PreconditionArithmetique(String),
}

pub type Resultat<T, E = ErreurNoyau> = StdResult<T, E>;
