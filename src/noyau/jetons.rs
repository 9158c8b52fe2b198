// src/noyau/jetons.rs

use std::fmt;

use super::erreur::{ErreurNoyau, Resultat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Chiffres et point, convertis seulement à l’évaluation.
    Num(String),

    /// Suite de symboles parmi + - * / ^ ! (ex: "*", "^-").
    Op(String),

    // Texte brut entre parenthèses (sans la parenthèse fermante extérieure).
    // NOTE: re-tokenisé seulement quand l’évaluateur en a besoin.
    Groupe(String),
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(t) | Tok::Op(t) => f.write_str(t),
            Tok::Groupe(t) => write!(f, "({t})"),
        }
    }
}

fn est_chiffre(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^' | '!')
}

fn est_espace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

fn est_ouvrante(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn est_fermante(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

fn est_autorise(c: char) -> bool {
    est_chiffre(c) || est_operateur(c) || est_espace(c) || est_ouvrante(c) || est_fermante(c)
}

/// Pousse le tampon courant comme jeton (jamais de jeton vide).
fn vider(tampon: &mut String, nombre: bool, out: &mut Vec<Tok>) {
    if tampon.is_empty() {
        return;
    }
    let texte = std::mem::take(tampon);
    out.push(if nombre {
        Tok::Num(texte)
    } else {
        Tok::Op(texte)
    });
}

/// Tokenize une ligne en jetons plats.
///
/// - chiffres/point accumulés en Num, symboles d’opérateurs accumulés en Op ;
///   passer de l’un à l’autre termine le jeton courant
/// - espaces ignorés hors parenthèses (ils ne coupent pas un jeton : "1 2" -> "12")
/// - ( [ { ouvrent un Groupe, capturé tel quel jusqu’à la fermante de même profondeur ;
///   les trois styles sont interchangeables ("(1]" est accepté)
/// - tout autre caractère, une fermante orpheline ou un groupe non fermé => Lexicale
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let mut tampon = String::new();
    let mut accumule_nombre = true;

    // capture en cours : (position, caractère) de l’ouvrante extérieure
    let mut capture: Option<(usize, char)> = None;
    let mut profondeur: usize = 0;

    for (position, c) in s.chars().enumerate() {
        if !est_autorise(c) {
            return Err(ErreurNoyau::Lexicale {
                caractere: c,
                position,
            });
        }

        if capture.is_some() {
            if est_fermante(c) {
                if profondeur == 0 {
                    capture = None;
                    if !tampon.is_empty() {
                        out.push(Tok::Groupe(std::mem::take(&mut tampon)));
                    }
                    continue;
                }
                profondeur -= 1;
            } else if est_ouvrante(c) {
                profondeur += 1;
            }
            tampon.push(c);
            continue;
        }

        if est_ouvrante(c) {
            vider(&mut tampon, accumule_nombre, &mut out);
            capture = Some((position, c));
            profondeur = 0;
            continue;
        }

        if est_fermante(c) {
            return Err(ErreurNoyau::Lexicale {
                caractere: c,
                position,
            });
        }

        if est_espace(c) {
            continue;
        }

        let nombre = est_chiffre(c);
        if nombre != accumule_nombre {
            vider(&mut tampon, accumule_nombre, &mut out);
            accumule_nombre = nombre;
        }
        tampon.push(c);
    }

    if let Some((position, caractere)) = capture {
        return Err(ErreurNoyau::Lexicale {
            caractere,
            position,
        });
    }

    vider(&mut tampon, accumule_nombre, &mut out);
    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
