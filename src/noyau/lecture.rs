// src/noyau/lecture.rs
//
// Lecture décimale tronquée d’un Rationnel (division longue).
// Pas d’arrondi : on écrit exactement `digits` chiffres après le point.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::erreur::{ErreurNoyau, Resultat};
use super::rationnel::Rationnel;

impl Rationnel {
    /// "<partie entière>.<digits chiffres>", tronqué.
    ///
    /// - 314/100, 0 chiffre -> "3."
    /// - 1/3, 5 chiffres    -> "0.33333"
    /// - -1/3, 2 chiffres   -> "-0.33" (un seul signe, chiffres de la valeur absolue)
    pub fn lecture_decimale(&self, digits: usize) -> Resultat<String> {
        let den = self.denom();
        if den.is_zero() {
            return Err(ErreurNoyau::PreconditionArithmetique(format!(
                "lecture décimale d’une division par zéro : {self}"
            )));
        }

        let negatif = !self.numer().is_zero() && (self.numer().is_negative() ^ den.is_negative());
        let n = self.numer().abs();
        let d = den.abs();

        let entier = &n / &d;
        let mut reste: BigInt = &n - &d * &entier;

        let mut out = String::with_capacity(digits + 8);
        if negatif {
            out.push('-');
        }
        out.push_str(&entier.to_str_radix(10));
        out.push('.');

        for _ in 0..digits {
            reste *= 10u32;
            let chiffre = &reste / &d;
            out.push_str(&chiffre.to_str_radix(10));
            reste -= &d * &chiffre;
        }

        Ok(out)
    }
}
