//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la fenêtre (entrée, journal, erreur, digits, démarche)
//! et la Session de calcul, avec des opérations simples (C/CLR/AC) sans affichage.
//!
//! Contrats :
//! - Aucune évaluation directe ici : toute ligne passe par la Session.
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur la lecture décimale (digits) et sur la taille du journal.

use calculatrice_exacte::noyau::Demarche;
use calculatrice_exacte::Session;

/// Précision de la lecture décimale par défaut (bouton "Lecture").
const DIGITS_DEFAUT: usize = 20;

/// Garde-fou : on borne la précision (anti-gel).
pub const DIGITS_MAX: usize = 2000;

/// Garde-fou : le journal ne garde que les dernières lignes.
const JOURNAL_MAX: usize = 500;

#[derive(Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub journal: Vec<String>, // "> ligne" puis ce que la session a écrit
    pub erreur: String,

    // --- démarche du dernier calcul réussi ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub digits: usize,

    // --- calcul ---
    pub session: Session,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            journal: Vec::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            digits: DIGITS_DEFAUT,
            session: Session::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + journal + digits + session neuve).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.digits = DIGITS_DEFAUT;
        // l’ancienne session (et son fichier éventuel) est fermée ici
        self.session = Session::default();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer journal + erreur + démarche (la session garde écho, fichier, dernier résultat).
    pub fn clear_resultats(&mut self) {
        self.journal.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.session.effacer_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur (le journal est conservé).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.focus_entree = true;
    }

    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
        self.focus_entree = true;
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.session.set_echo(echo);
        self.focus_entree = true;
    }

    /// Ajoute au journal la ligne soumise puis la sortie brute de la session.
    pub fn journaliser(&mut self, ligne: &str, sortie: &[u8]) {
        self.journal.push(format!("> {ligne}"));
        let texte = String::from_utf8_lossy(sortie);
        self.journal.extend(texte.lines().map(str::to_string));

        if self.journal.len() > JOURNAL_MAX {
            let trop = self.journal.len() - JOURNAL_MAX;
            self.journal.drain(..trop);
        }
    }

    pub fn journal_texte(&self) -> String {
        self.journal.join("\n")
    }

    /* ------------------------ Envoi à la session ------------------------ */

    /// Enter / "=" : envoie l’entrée ; elle n’est effacée que si la ligne a réussi.
    pub fn envoyer_entree(&mut self) {
        if self.entree.trim().is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }
        let ligne = self.entree.clone();
        if self.eval_via_session(&ligne) {
            self.entree.clear();
        }
        self.focus_entree = true;
    }

    /// "Lecture" : `$div` avec la précision courante.
    pub fn lecture_decimale(&mut self) {
        let commande = format!("$div {}", self.digits);
        self.eval_via_session(&commande);
        self.focus_entree = true;
    }

    /// Passe une ligne à la Session, puis dépose sortie/erreur/démarche dans l’état.
    fn eval_via_session(&mut self, ligne: &str) -> bool {
        let mut console = Vec::new();
        let res = self.session.traiter_ligne(ligne, &mut console);
        self.journaliser(ligne, &console);

        match res {
            Ok(()) => {
                self.erreur.clear();
                self.demarche = self.session.demarche().clone();
                true
            }
            Err(e) => {
                log::warn!("ligne {ligne:?} : {e}");
                self.set_erreur(e.to_string());
                false
            }
        }
    }
}
