//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler tokenize + réduction sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - référence indépendante (repli gauche-droite sur BigInt) pour les expressions entières
//! - texte aléatoire : jamais de panique, seulement des erreurs typées

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_traits::One;

use super::{eval_expression, evaluate, tokenize, ErreurNoyau, Rationnel};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions entières (bornée) ------------------------ */

const OUVRANTES: [char; 3] = ['(', '[', '{'];
const FERMANTES: [char; 3] = [')', ']', '}'];

/// Terme : entier 0..=9 ou groupe. Renvoie (texte, valeur de référence).
fn gen_terme(rng: &mut Rng, depth: usize) -> (String, BigInt) {
    if depth == 0 || rng.pick(3) != 0 {
        let n = rng.pick(10);
        return (n.to_string(), BigInt::from(n));
    }

    let (texte, v) = gen_sequence(rng, depth - 1);
    let o = OUVRANTES[rng.pick(3) as usize];
    let f = FERMANTES[rng.pick(3) as usize];
    let espace = if rng.coin() { " " } else { "" };
    (format!("{o}{espace}{texte}{espace}{f}"), v)
}

/// Séquence plate « terme (op terme)* », repliée de gauche à droite pour la référence.
fn gen_sequence(rng: &mut Rng, depth: usize) -> (String, BigInt) {
    let (mut texte, mut acc) = gen_terme(rng, depth);

    let n = rng.pick(5);
    for _ in 0..n {
        let (t, v) = gen_terme(rng, depth);
        let op = match rng.pick(3) {
            0 => {
                acc += v;
                '+'
            }
            1 => {
                acc -= v;
                '-'
            }
            _ => {
                acc *= v;
                '*'
            }
        };
        if rng.coin() {
            texte = format!("{texte} {op} {t}");
        } else {
            texte = format!("{texte}{op}{t}");
        }
    }

    (texte, acc)
}

/* ------------------------ Texte aléatoire (alphabet + intrus) ------------------------ */

fn gen_texte(rng: &mut Rng, len: usize) -> String {
    // pas de ^ ni ! ici : un exposant aléatoire peut être énorme (boucle O(n))
    const ALPHABET: &[char] = &[
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', '+', '-', '*', '/', ' ', '(', ')',
        '[', ']', '&',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/// Sans ^ ni ! dans l’alphabet, aucune précondition arithmétique ne peut échouer :
/// seules les erreurs de forme sont possibles (la division par zéro donne une valeur).
fn is_erreur_attendue(e: &ErreurNoyau) -> bool {
    matches!(
        e,
        ErreurNoyau::Lexicale { .. }
            | ErreurNoyau::Structurelle(_)
            | ErreurNoyau::OperateurInconnu { .. }
    )
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_entiers_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_sequence(&mut rng, 3);
        let (v, _d) =
            eval_expression(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        // + - * entre entiers : le dénominateur reste 1
        assert!(v.denom().is_one(), "expr={expr:?} v={v}");
        assert_eq!(v.numer(), &attendu, "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..50 {
        let (ea, _) = gen_sequence(&mut a, 2);
        let (eb, _) = gen_sequence(&mut b, 2);
        assert_eq!(ea, eb);
        assert_eq!(
            eval_expression(&ea).map(|(v, _)| v),
            eval_expression(&eb).map(|(v, _)| v)
        );
    }
}

#[test]
fn fuzz_safe_texte_aleatoire_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let len = 1 + rng.pick(24) as usize;
        let texte = gen_texte(&mut rng, len);

        match eval_expression(&texte) {
            Ok((v, _d)) => {
                // lecture : jamais de panique, éventuellement refusée si den == 0
                let _ = v.lecture_decimale(8);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: texte={texte:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 5, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_puissance_et_factorielle_bornees() {
    let mut rng = Rng::new(0xFAC7_u64);

    for _ in 0..60 {
        let base = rng.pick(7);
        let exp = rng.pick(5);

        let v = evaluate(tokenize(&format!("{base} ^ {exp}")).unwrap()).unwrap();
        assert_eq!(v, Rationnel::entier(BigInt::from(base).pow(exp)));

        let n = 1 + rng.pick(8);
        let attendu: BigInt = (1..=n).map(BigInt::from).product();
        let v = evaluate(tokenize(&format!("{n} ! {exp}")).unwrap()).unwrap();
        assert_eq!(v, Rationnel::entier(attendu));
    }
}

#[test]
fn fuzz_safe_somme_plate_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // 0.5 + 0.5 + ... : dénominateurs égaux => pas de croissance du dénominateur
    let expr = vec!["0.5"; 5000].join(" + ");
    let (v, _d) = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert_eq!(v.to_string(), "25000/10");
    assert_eq!(v.lecture_decimale(1).unwrap(), "2500.0");
}
