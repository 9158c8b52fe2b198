//! Propriétés du noyau : exactitude, repli gauche-droite, groupes,
//! absence de réduction, puissance, factorielle, lecture, erreurs.

use num_bigint::BigInt;

use super::{evaluate, tokenize, ErreurNoyau, Rationnel, Tok};

fn r(n: i64, d: i64) -> Rationnel {
    Rationnel::new_raw(BigInt::from(n), BigInt::from(d))
}

fn eval_ok(s: &str) -> Rationnel {
    let jetons = tokenize(s).unwrap_or_else(|e| panic!("tokenize({s:?}) erreur: {e}"));
    evaluate(jetons).unwrap_or_else(|e| panic!("evaluate({s:?}) erreur: {e}"))
}

fn dec(s: &str) -> Rationnel {
    Rationnel::depuis_decimal(s).unwrap()
}

/* ------------------------ Exactitude ------------------------ */

#[test]
fn prop_lecture_exacte_des_litteraux() {
    let litteraux = [
        ("0.1", 1),
        ("0.1", 6),
        ("2.718281828459045235360287", 24),
        ("1000000000000000000000.000000000000000000001", 21),
        ("7", 3),
    ];
    for (s, digits) in litteraux {
        let lu = dec(s).lecture_decimale(digits).unwrap();

        // même partie entière, et partie fractionnaire complétée par des zéros
        let (ent, frac) = s.split_once('.').unwrap_or((s, ""));
        let mut attendu = format!("{ent}.{frac}");
        while attendu.len() < ent.len() + 1 + digits {
            attendu.push('0');
        }
        attendu.truncate(ent.len() + 1 + digits);
        assert_eq!(lu, attendu, "littéral {s:?}");
    }
}

#[test]
fn prop_lecture_tronquee_jamais_arrondie() {
    assert_eq!(dec("0.999").lecture_decimale(2).unwrap(), "0.99");
    assert_eq!(eval_ok("2 / 3").lecture_decimale(3).unwrap(), "0.666");
}

/* ------------------------ Repli gauche-droite ------------------------ */

#[test]
fn prop_pas_de_priorite() {
    assert_eq!(eval_ok("2 + 3 * 4"), r(20, 1));
    assert_ne!(eval_ok("2 + 3 * 4"), r(14, 1));
    assert_eq!(eval_ok("2 + (3 * 4)"), r(14, 1));
}

#[test]
fn prop_groupes() {
    assert_eq!(eval_ok("(1 + 2) * 3"), r(9, 1));
    assert_eq!(eval_ok("[1 + {2 * (3 - 1)}] * 2"), r(10, 1));
    assert_eq!(eval_ok("((((2))))"), r(2, 1));
}

/* ------------------------ Sans réduction ------------------------ */

#[test]
fn prop_croissance_sans_reduction() {
    let tiers = eval_ok("1 / 3");
    assert_eq!(tiers.denom(), &BigInt::from(3));

    // 0.5 * 0.50 vaut 1/4, mais reste 250/1000
    assert_eq!(eval_ok("0.5 * 0.50"), r(250, 1000));

    // chaîne de multiplications : dénominateur = produit des dénominateurs
    assert_eq!(eval_ok("0.5 * 0.5 * 0.5"), r(125, 1000));

    // 2/4 reste 2/4 même si égal à 1/2
    assert_ne!(eval_ok("2 / 4"), r(1, 2));
    assert_eq!(eval_ok("2 / 4"), r(2, 4));
}

#[test]
fn prop_division_raccourci_denominateurs_egaux() {
    // 0.6 / 0.4 : 6/10 et 4/10 => 6/4
    assert_eq!(eval_ok("0.6 / 0.4"), r(6, 4));
    // dénominateurs différents : forme croisée
    assert_eq!(eval_ok("0.6 / 0.04"), r(600, 40));
}

/* ------------------------ Puissance / factorielle ------------------------ */

#[test]
fn prop_puissance() {
    assert_eq!(eval_ok("2 ^ 3"), r(8, 1));
    assert_eq!(eval_ok("2 ^ -1"), r(1, 2));
    assert_eq!(eval_ok("0.5 ^ 2"), r(25, 100));
    assert_eq!(eval_ok("0.5 ^ -2"), r(100, 25));
    // exposant décimal mais entier exact
    assert_eq!(eval_ok("3 ^ 2.0"), r(9, 1));
}

#[test]
fn prop_factorielle_ignore_la_droite() {
    assert_eq!(eval_ok("5 ! 0"), r(120, 1));
    assert_eq!(eval_ok("5 ! 12345"), r(120, 1));
    assert_eq!(eval_ok("5 ! (1 + 2)"), r(120, 1));
    assert_eq!(eval_ok("3 ! 0 * 2"), r(12, 1));
}

/* ------------------------ Lecture ------------------------ */

#[test]
fn prop_lecture_decimale() {
    assert_eq!(dec("3.14").lecture_decimale(0).unwrap(), "3.");
    assert_eq!((dec("1") / dec("3")).lecture_decimale(5).unwrap(), "0.33333");
}

/* ------------------------ Chemins d’erreur ------------------------ */

#[test]
fn prop_erreur_lexicale() {
    assert!(matches!(
        tokenize("2 & 3"),
        Err(ErreurNoyau::Lexicale { caractere: '&', .. })
    ));
}

#[test]
fn prop_erreur_structurelle() {
    let jetons = vec![
        Tok::Num("1".into()),
        Tok::Op("+".into()),
        Tok::Num("2".into()),
        Tok::Op("*".into()),
    ];
    assert!(matches!(
        evaluate(jetons),
        Err(ErreurNoyau::Structurelle(_))
    ));
}

#[test]
fn prop_erreur_precondition() {
    assert!(matches!(
        r(2, 1).puissance(&dec("1.5")),
        Err(ErreurNoyau::PreconditionArithmetique(_))
    ));
    assert!(matches!(
        evaluate(tokenize("2 ^ 1.5").unwrap()),
        Err(ErreurNoyau::PreconditionArithmetique(_))
    ));
    assert!(matches!(
        evaluate(tokenize("2.5 ! 0").unwrap()),
        Err(ErreurNoyau::PreconditionArithmetique(_))
    ));
    assert!(matches!(
        evaluate(tokenize("(0 - 3) ! 0").unwrap()),
        Err(ErreurNoyau::PreconditionArithmetique(_))
    ));
}
