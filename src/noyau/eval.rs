//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> réduction gauche-droite -> Rationnel
//!
//! Remarque : il n’y a PAS de priorité des opérateurs. On replie toujours le
//! triplet le plus à gauche (opérande, opérateur, opérande), puis on recommence :
//! "2 + 3 * 4" vaut (2+3)*4 = 20/1.
//!
//! Les Groupe sont résolus à la demande (re-tokenize + réduction), sans grammaire dédiée,
//! sur une pile explicite de cadres plutôt que par récursion.

use log::{debug, error};

use super::erreur::{ErreurNoyau, Resultat};
use super::jetons::{format_tokens, tokenize, Tok};
use super::rationnel::Rationnel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    Factorielle,
}

impl Operateur {
    fn depuis_symbole(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Moins),
            '*' => Some(Self::Fois),
            '/' => Some(Self::Divise),
            '^' => Some(Self::Puissance),
            '!' => Some(Self::Factorielle),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Moins => '-',
            Self::Fois => '*',
            Self::Divise => '/',
            Self::Puissance => '^',
            Self::Factorielle => '!',
        }
    }

    /// `!` ignore `b` (voir `reduire`, qui ne l’évalue même pas).
    pub fn appliquer(self, a: &Rationnel, b: &Rationnel) -> Resultat<Rationnel> {
        match self {
            Self::Plus => Ok(a + b),
            Self::Moins => Ok(a - b),
            Self::Fois => Ok(a * b),
            Self::Divise => Ok(a / b),
            Self::Puissance => a.puissance(b),
            Self::Factorielle => a.factorielle(),
        }
    }
}

/// Lit un jeton Op : un symbole de la table, suivi seulement de signes + / -
/// appliqués à l’opérande de droite ("^-" => puissance, droite négée).
/// Renvoie (opérateur, négation de la droite).
fn lire_operateur(texte: &str) -> Option<(Operateur, bool)> {
    let mut chars = texte.chars();
    let op = Operateur::depuis_symbole(chars.next()?)?;

    let mut negation = false;
    for c in chars {
        match c {
            '-' => negation = !negation,
            '+' => {}
            _ => return None,
        }
    }
    Some((op, negation))
}

/// Opérande de gauche : jeton pas encore résolu, ou valeur déjà repliée.
enum Operande {
    Jeton(Tok),
    Valeur(Rationnel),
}

impl Default for Operande {
    fn default() -> Self {
        Operande::Valeur(Rationnel::default())
    }
}

impl Operande {
    fn contexte(&self) -> String {
        match self {
            Operande::Jeton(t) => t.to_string(),
            Operande::Valeur(v) => v.to_string(),
        }
    }
}

/// Un jeton en position d’opérande : valeur immédiate, ou groupe à réduire.
enum Feuille {
    Valeur(Rationnel),
    Groupe(String),
}

fn lire_feuille(jeton: Tok) -> Resultat<Feuille> {
    match jeton {
        Tok::Num(texte) => Rationnel::depuis_decimal(&texte).map(Feuille::Valeur),
        Tok::Groupe(texte) => Ok(Feuille::Groupe(texte)),
        Tok::Op(texte) => Err(ErreurNoyau::Structurelle(format!(
            "opérateur '{texte}' à la place d’une opérande"
        ))),
    }
}

/// Ce qu’un cadre fera de la valeur du groupe qu’il a empilé.
enum Attente {
    /// opérande de gauche de `_ op droite`
    Gauche {
        op: Operateur,
        negation: bool,
        droite: Tok,
    },
    /// opérande de droite de `a op _`
    Droite {
        a: Rationnel,
        op: Operateur,
        negation: bool,
    },
    /// valeur du cadre lui-même
    Fin,
}

/// Issue d’un pas sur le cadre du sommet.
enum Pas {
    Continuer,
    Empiler(String),
    Terminer(Rationnel),
}

/// Une séquence de jetons en cours de réduction.
struct Cadre {
    restants: std::vec::IntoIter<Tok>,
    gauche: Operande,
    attente: Option<Attente>,
    principal: bool,
}

impl Cadre {
    fn nouveau(jetons: Vec<Tok>, principal: bool) -> Resultat<Self> {
        if jetons.len() % 2 == 0 {
            return Err(ErreurNoyau::Structurelle(format!(
                "{} jetons, forme « opérande (opérateur opérande)* » attendue",
                jetons.len()
            )));
        }

        let mut restants = jetons.into_iter();
        let Some(premier) = restants.next() else {
            return Err(ErreurNoyau::Structurelle("séquence vide".into()));
        };
        Ok(Self {
            restants,
            gauche: Operande::Jeton(premier),
            attente: None,
            principal,
        })
    }

    /// Lit le triplet suivant (ou termine), sans valeur en attente.
    fn avancer(&mut self, notes: Option<&mut Vec<String>>) -> Resultat<Pas> {
        let Some(op_jeton) = self.restants.next() else {
            return match std::mem::take(&mut self.gauche) {
                Operande::Valeur(v) => Ok(Pas::Terminer(v)),
                Operande::Jeton(t) => match lire_feuille(t)? {
                    Feuille::Valeur(v) => Ok(Pas::Terminer(v)),
                    Feuille::Groupe(texte) => {
                        self.attente = Some(Attente::Fin);
                        Ok(Pas::Empiler(texte))
                    }
                },
            };
        };

        let Some(droite) = self.restants.next() else {
            return Err(ErreurNoyau::Structurelle(format!(
                "opérateur '{op_jeton}' sans opérande de droite"
            )));
        };

        let lu = match &op_jeton {
            Tok::Op(texte) => lire_operateur(texte),
            _ => None,
        };
        let Some((op, negation)) = lu else {
            let e = ErreurNoyau::OperateurInconnu {
                symbole: op_jeton.to_string(),
                gauche: self.gauche.contexte(),
                droite: droite.to_string(),
            };
            error!("{e}");
            return Err(e);
        };

        let a = match std::mem::take(&mut self.gauche) {
            Operande::Valeur(a) => a,
            Operande::Jeton(t) => match lire_feuille(t)? {
                Feuille::Valeur(a) => a,
                Feuille::Groupe(texte) => {
                    self.attente = Some(Attente::Gauche {
                        op,
                        negation,
                        droite,
                    });
                    return Ok(Pas::Empiler(texte));
                }
            },
        };
        self.droite(a, op, negation, droite, notes)
    }

    /// Reprend le cadre avec la valeur du groupe qu’il avait empilé.
    fn recevoir(&mut self, v: Rationnel, notes: Option<&mut Vec<String>>) -> Resultat<Pas> {
        match self.attente.take() {
            Some(Attente::Gauche {
                op,
                negation,
                droite,
            }) => self.droite(v, op, negation, droite, notes),
            Some(Attente::Droite { a, op, negation }) => self.replier(a, op, negation, Some(v), notes),
            Some(Attente::Fin) | None => Ok(Pas::Terminer(v)),
        }
    }

    fn droite(
        &mut self,
        a: Rationnel,
        op: Operateur,
        negation: bool,
        droite: Tok,
        notes: Option<&mut Vec<String>>,
    ) -> Resultat<Pas> {
        // `!` : la droite est consommée (forme en triplets) mais jamais évaluée.
        if op == Operateur::Factorielle {
            return self.replier(a, op, negation, None, notes);
        }

        match lire_feuille(droite)? {
            Feuille::Valeur(b) => self.replier(a, op, negation, Some(b), notes),
            Feuille::Groupe(texte) => {
                self.attente = Some(Attente::Droite { a, op, negation });
                Ok(Pas::Empiler(texte))
            }
        }
    }

    fn replier(
        &mut self,
        a: Rationnel,
        op: Operateur,
        negation: bool,
        b: Option<Rationnel>,
        notes: Option<&mut Vec<String>>,
    ) -> Resultat<Pas> {
        let b = b.map(|b| if negation { -b } else { b });
        let r = match &b {
            Some(b) => op.appliquer(&a, b)?,
            None => a.factorielle()?,
        };

        if let Some(notes) = notes {
            let d = b.as_ref().map_or_else(|| "_".to_string(), ToString::to_string);
            notes.push(format!("{a} {} {d} → {r}", op.symbole()));
        }

        self.gauche = Operande::Valeur(r);
        Ok(Pas::Continuer)
    }
}

/// Réduction itérative, triplet par triplet, de gauche à droite.
///
/// Les groupes ne passent pas par la pile d’appels : chaque groupe ouvert est un
/// `Cadre` sur une pile explicite, donc aucune limite d’imbrication.
/// `etapes` (optionnel) reçoit une ligne par repli du niveau principal.
fn reduire(jetons: Vec<Tok>, mut etapes: Option<&mut Vec<String>>) -> Resultat<Rationnel> {
    let mut pile = vec![Cadre::nouveau(jetons, true)?];
    let mut recu: Option<Rationnel> = None;

    while let Some(cadre) = pile.last_mut() {
        let notes = if cadre.principal {
            etapes.as_deref_mut()
        } else {
            None
        };

        let pas = match recu.take() {
            Some(v) => cadre.recevoir(v, notes)?,
            None => cadre.avancer(notes)?,
        };

        match pas {
            Pas::Continuer => {}
            Pas::Empiler(texte) => pile.push(Cadre::nouveau(tokenize(&texte)?, false)?),
            Pas::Terminer(v) => {
                pile.pop();
                if pile.is_empty() {
                    return Ok(v);
                }
                recu = Some(v);
            }
        }
    }

    Err(ErreurNoyau::Structurelle("réduction sans résultat".into()))
}

/// Évalue une suite de jetons (longueur impaire) en un Rationnel.
pub fn evaluate(jetons: Vec<Tok>) -> Resultat<Rationnel> {
    reduire(jetons, None)
}

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub etapes: Vec<String>,
}

/// API publique : tokenize + évalue une ligne, avec la démarche
/// (jetons + replis du niveau principal).
pub fn eval_expression(ligne: &str) -> Resultat<(Rationnel, Demarche)> {
    let jetons = tokenize(ligne)?;
    let jetons_txt = format_tokens(&jetons);
    debug!("jetons : {jetons_txt}");

    let mut etapes = Vec::new();
    let valeur = reduire(jetons, Some(&mut etapes))?;
    debug!("{} repli(s) -> {valeur}", etapes.len());

    Ok((
        valeur,
        Demarche {
            jetons: jetons_txt,
            etapes,
        },
    ))
}
