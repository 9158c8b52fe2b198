//! Session de calcul (ligne par ligne)
//!
//! État explicite, sans globales :
//! - écho des résultats (num/den) activé ou non
//! - fichier de sortie optionnel (sinon : la console fournie par l’appelant)
//! - dernier résultat (0/1 au départ)
//!
//! Commandes (ligne commençant par `$`) :
//! - `$file <chemin>` : redirige la sortie vers un fichier (créé/tronqué) ; `$file` seul : retour console
//! - `$div [n]`       : lecture décimale du dernier résultat, n chiffres (5 par défaut)
//! - `$echo`          : écho activé ; `$echo <quoi que ce soit>` : écho désactivé
//!
//! L’argument n’est pris en compte que s’il est seul : `$echo a b` réactive l’écho,
//! `$file a b` ferme le fichier, `$div 2 3` lit 5 chiffres.
//!
//! Une erreur abandonne la ligne (dernier résultat inchangé) ; l’appelant décide de la suite.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use thiserror::Error;

use crate::noyau::{eval_expression, Demarche, ErreurNoyau, Rationnel};

/// Chiffres de `$div` sans argument.
pub const DIGITS_DIV_DEFAUT: usize = 5;

#[derive(Debug, Error)]
pub enum ErreurSession {
    #[error(transparent)]
    Noyau(#[from] ErreurNoyau),
    #[error("entrée/sortie : {0}")]
    Io(#[from] io::Error),
    #[error("commande invalide : {0}")]
    Commande(String),
}

#[derive(Debug)]
pub struct Session {
    echo: bool,
    fichier: Option<(PathBuf, BufWriter<File>)>,
    dernier: Rationnel,
    demarche: Demarche,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            echo: true,
            fichier: None,
            dernier: Rationnel::default(),
            demarche: Demarche::default(),
        }
    }
}

impl Session {
    pub fn echo(&self) -> bool {
        self.echo
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    pub fn dernier(&self) -> &Rationnel {
        &self.dernier
    }

    /// Démarche du dernier calcul réussi.
    pub fn demarche(&self) -> &Demarche {
        &self.demarche
    }

    pub fn effacer_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    pub fn fichier(&self) -> Option<&Path> {
        self.fichier.as_ref().map(|(chemin, _)| chemin.as_path())
    }

    /// Traite une ligne : expression ou commande `$`.
    /// `console` reçoit la sortie tant qu’aucun fichier n’est ouvert.
    pub fn traiter_ligne<W: Write>(
        &mut self,
        ligne: &str,
        console: &mut W,
    ) -> Result<(), ErreurSession> {
        let ligne = ligne.trim_start();
        if ligne.trim_end().is_empty() {
            return Ok(());
        }

        if let Some(commande) = ligne.strip_prefix('$') {
            return self.commande(commande, console);
        }

        let (valeur, demarche) = eval_expression(ligne)?;
        self.dernier = valeur;
        self.demarche = demarche;

        if self.echo {
            let texte = self.dernier.to_string();
            self.ecrire(console, &texte)?;
        }
        Ok(())
    }

    fn commande<W: Write>(&mut self, commande: &str, console: &mut W) -> Result<(), ErreurSession> {
        let mots: Vec<&str> = commande.split_whitespace().collect();
        let (nom, argument) = match mots.as_slice() {
            [] => ("", None),
            [nom, argument] => (*nom, Some(*argument)),
            [nom, ..] => (*nom, None),
        };

        match nom {
            "file" => match argument {
                Some(chemin) => self.ouvrir_fichier(chemin)?,
                None => self.fermer_fichier()?,
            },
            "div" => {
                let digits = match argument {
                    None => DIGITS_DIV_DEFAUT,
                    Some(a) => a.parse::<usize>().map_err(|_| {
                        ErreurSession::Commande(format!(
                            "$div attend un nombre de chiffres, reçu '{a}'"
                        ))
                    })?,
                };
                let texte = self.dernier.lecture_decimale(digits)?;
                self.ecrire(console, &texte)?;
            }
            "echo" => self.echo = argument.is_none(),
            _ => warn!("commande inconnue ignorée : ${nom}"),
        }
        Ok(())
    }

    fn ouvrir_fichier(&mut self, chemin: &str) -> io::Result<()> {
        // un fichier déjà ouvert est d’abord vidé puis fermé
        self.fermer_fichier()?;
        let f = File::create(chemin)?;
        info!("sortie redirigée vers {chemin}");
        self.fichier = Some((PathBuf::from(chemin), BufWriter::new(f)));
        Ok(())
    }

    fn fermer_fichier(&mut self) -> io::Result<()> {
        if let Some((chemin, mut f)) = self.fichier.take() {
            f.flush()?;
            info!("sortie {} fermée", chemin.display());
        }
        Ok(())
    }

    fn ecrire<W: Write>(&mut self, console: &mut W, texte: &str) -> io::Result<()> {
        match self.fichier.as_mut() {
            Some((_, f)) => {
                writeln!(f, "{texte}")?;
                f.flush()
            }
            None => writeln!(console, "{texte}"),
        }
    }
}

/// Mode flux : lit `entree` ligne par ligne jusqu’à la fin.
/// Une ligne en erreur (y compris une ligne qui n’est pas de l’UTF-8) est
/// signalée (log) puis ignorée. Renvoie le nombre de lignes en erreur.
pub fn executer_flux<R: BufRead, W: Write>(entree: R, sortie: &mut W) -> io::Result<usize> {
    let mut session = Session::default();
    let mut echecs = 0usize;

    for (numero, octets) in entree.split(b'\n').enumerate() {
        let mut octets = octets?;
        if octets.last() == Some(&b'\r') {
            octets.pop();
        }

        let ligne = match String::from_utf8(octets) {
            Ok(ligne) => ligne,
            Err(e) => {
                echecs += 1;
                error!("ligne {} : UTF-8 invalide ({e})", numero + 1);
                continue;
            }
        };

        if let Err(e) = session.traiter_ligne(&ligne, sortie) {
            echecs += 1;
            error!("ligne {} : {e}", numero + 1);
        }
    }

    session.fermer_fichier()?;
    sortie.flush()?;
    Ok(echecs)
}
