// src/noyau/rationnel.rs
//
// Rationnel exact NON réduit : (num, den) en BigInt.
//
// IMPORTANT :
// - Jamais de pgcd : num/den grossissent au fil des opérations, et la lecture
//   décimale travaille sur ces valeurs brutes.
// - Égalité structurelle : 5/10 != 1/2.
// - den == 0 peut apparaître (division par zéro) : affichable tel quel,
//   mais lecture / puissance / factorielle le refusent (erreur typée, pas de panique).

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::erreur::{ErreurNoyau, Resultat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rationnel {
    num: BigInt,
    den: BigInt,
}

impl Default for Rationnel {
    /// 0/1
    fn default() -> Self {
        Self {
            num: BigInt::zero(),
            den: BigInt::one(),
        }
    }
}

impl Rationnel {
    /// Construit sans aucune normalisation.
    pub fn new_raw(num: BigInt, den: BigInt) -> Self {
        Self { num, den }
    }

    pub fn entier(n: impl Into<BigInt>) -> Self {
        Self::new_raw(n.into(), BigInt::one())
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    /// Littéral décimal -> rationnel.
    ///
    /// Les chiffres sont concaténés dans le numérateur (le point est ignoré),
    /// le dénominateur vaut 10^(nombre de chiffres après le point).
    /// - "3.14" -> 314/100
    /// - "42"   -> 42/1
    /// - ".5"   -> 5/10, "1." -> 1/1, "." -> 0/1
    ///
    /// Le tokenizer garantit déjà l’alphabet ; on refuse quand même un caractère
    /// étranger ou un second point plutôt que d’inventer une valeur.
    pub fn depuis_decimal(s: &str) -> Resultat<Self> {
        let mut num = BigInt::zero();
        let mut apres_point: Option<u32> = None;

        for (position, c) in s.chars().enumerate() {
            match c {
                '0'..='9' => {
                    num = num * 10u32 + u32::from(c as u8 - b'0');
                    if let Some(n) = apres_point.as_mut() {
                        *n += 1;
                    }
                }
                '.' if apres_point.is_none() => apres_point = Some(0),
                _ => {
                    return Err(ErreurNoyau::Lexicale {
                        caractere: c,
                        position,
                    })
                }
            }
        }

        let den = BigInt::from(10u32).pow(apres_point.unwrap_or(0));
        Ok(Self { num, den })
    }

    /// Vrai si la valeur est un entier exact (den non nul, num divisible par den).
    pub fn est_entier(&self) -> bool {
        !self.den.is_zero() && (&self.num % &self.den).is_zero()
    }

    /// Puissance entière, par multiplications successives (O(n)).
    ///
    /// L’exposant doit être un entier exact ; son signe est
    /// (num < 0) XOR (den < 0), et un exposant négatif échange num et den.
    pub fn puissance(&self, exposant: &Rationnel) -> Resultat<Self> {
        if !exposant.est_entier() {
            return Err(ErreurNoyau::PreconditionArithmetique(format!(
                "exposant non entier : {exposant}"
            )));
        }

        let negatif = exposant.num.is_negative() ^ exposant.den.is_negative();
        let mut reste = exposant.num.abs() / exposant.den.abs();

        let mut num = BigInt::one();
        let mut den = BigInt::one();
        while reste.is_positive() {
            num *= &self.num;
            den *= &self.den;
            reste -= 1u32;
        }

        if negatif {
            std::mem::swap(&mut num, &mut den);
        }
        Ok(Self { num, den })
    }

    /// n! pour un entier exact n >= 0, calculé comme n * (n-1) * ... * 2.
    ///
    /// Note : le produit part du quotient n lui-même, donc 0! vaut 0/1.
    pub fn factorielle(&self) -> Resultat<Self> {
        let signes_opposes = self.num.is_negative() ^ self.den.is_negative();
        if !self.est_entier() || (signes_opposes && !self.num.is_zero()) {
            return Err(ErreurNoyau::PreconditionArithmetique(format!(
                "factorielle d’un non-entier ou d’un négatif : {self}"
            )));
        }

        let n = &self.num / &self.den;
        let deux = BigInt::from(2u32);

        let mut i = &n - 1u32;
        let mut num = n;
        while i >= deux {
            num *= &i;
            i -= 1u32;
        }

        Ok(Self {
            num,
            den: BigInt::one(),
        })
    }
}

/* ------------------------ Opérations (sans réduction) ------------------------ */

impl Add for &Rationnel {
    type Output = Rationnel;

    fn add(self, rhs: Self) -> Rationnel {
        if self.den == rhs.den {
            return Rationnel::new_raw(&self.num + &rhs.num, self.den.clone());
        }
        Rationnel::new_raw(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl Sub for &Rationnel {
    type Output = Rationnel;

    fn sub(self, rhs: Self) -> Rationnel {
        if self.den == rhs.den {
            return Rationnel::new_raw(&self.num - &rhs.num, self.den.clone());
        }
        Rationnel::new_raw(
            &self.num * &rhs.den - &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl Mul for &Rationnel {
    type Output = Rationnel;

    fn mul(self, rhs: Self) -> Rationnel {
        // deux entiers : le dénominateur reste 1
        if self.den.is_one() && rhs.den.is_one() {
            return Rationnel::entier(&self.num * &rhs.num);
        }
        Rationnel::new_raw(&self.num * &rhs.num, &self.den * &rhs.den)
    }
}

impl Div for &Rationnel {
    type Output = Rationnel;

    /// Dénominateurs égaux : a.num / b.num directement (raccourci, voir DESIGN.md).
    fn div(self, rhs: Self) -> Rationnel {
        if self.den == rhs.den {
            return Rationnel::new_raw(self.num.clone(), rhs.num.clone());
        }
        Rationnel::new_raw(&self.num * &rhs.den, &self.den * &rhs.num)
    }
}

impl Neg for Rationnel {
    type Output = Rationnel;

    fn neg(self) -> Rationnel {
        Rationnel::new_raw(-self.num, self.den)
    }
}

macro_rules! par_valeur {
    ($tr:ident, $methode:ident) => {
        impl $tr for Rationnel {
            type Output = Rationnel;

            fn $methode(self, rhs: Rationnel) -> Rationnel {
                (&self).$methode(&rhs)
            }
        }
    };
}

par_valeur!(Add, add);
par_valeur!(Sub, sub);
par_valeur!(Mul, mul);
par_valeur!(Div, div);

/// Représentation exacte brute : num/den.
impl fmt::Display for Rationnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
