use hailstone_graph::*;
use num_bigint::BigInt;

fn big(v: &[u64]) -> Vec<BigInt> {
    v.iter().map(|&x| BigInt::from(x)).collect()
}

/// 軌道の各要素が次の要素へ正しく遷移しているか検証するヘルパー
fn verify_successors(seq: &[BigInt]) {
    assert_eq!(seq.last(), Some(&BigInt::from(1)), "trajectory must end at 1");
    for pair in seq.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if is_even(a) {
            assert_eq!(b, &(a / 2u32), "even step mismatch at {}", a);
        } else {
            assert_eq!(b, &(a * 3u32 + 1u32), "odd step mismatch at {}", a);
        }
    }
}

#[test]
fn test_run_successors_1_to_1000() {
    for n in 1u64..=1000 {
        let seq = run(&BigInt::from(n)).unwrap();
        assert_eq!(seq[0], BigInt::from(n));
        verify_successors(&seq);
    }
}

#[test]
fn test_run_odd_is_odd_subsequence() {
    for n in 1u64..=500 {
        let b = BigInt::from(n);
        let full = run(&b).unwrap();
        let odd = run_odd(&b).unwrap();
        let expected: Vec<BigInt> = full.into_iter().filter(is_odd).collect();
        assert_eq!(odd, expected, "n={}", n);
    }
}

#[test]
fn test_step_cycle() {
    assert_eq!(step(&BigInt::from(1)).unwrap(), BigInt::from(4));
    assert_eq!(step(&BigInt::from(4)).unwrap(), BigInt::from(2));
    assert_eq!(step(&BigInt::from(2)).unwrap(), BigInt::from(1));
}

#[test]
fn test_run_7_literal() {
    assert_eq!(
        run(&BigInt::from(7)).unwrap(),
        big(&[7, 22, 11, 34, 17, 52, 26, 13, 40, 20, 10, 5, 16, 8, 4, 2, 1])
    );
    assert_eq!(run_odd(&BigInt::from(7)).unwrap(), big(&[7, 11, 17, 13, 5, 1]));
}

#[test]
fn test_reject_non_natural() {
    for n in [0i64, -1, -4, -7] {
        let b = BigInt::from(n);
        assert!(matches!(step(&b), Err(HailstoneError::NotNatural(_))), "step({})", n);
        assert!(matches!(run(&b), Err(HailstoneError::NotNatural(_))), "run({})", n);
        assert!(matches!(run_odd(&b), Err(HailstoneError::NotNatural(_))), "run_odd({})", n);
        assert!(matches!(collapse(&b), Err(HailstoneError::NotNatural(_))), "collapse({})", n);
        assert!(matches!(sequence(&b), Err(HailstoneError::NotNatural(_))), "sequence({})", n);
    }
}

#[test]
fn test_reject_non_integer_text() {
    assert!(matches!(parse_natural("0.2"), Err(HailstoneError::NotInteger(_))));
    assert!(matches!(parse_natural("1e3"), Err(HailstoneError::NotInteger(_))));
    assert!(matches!(parse_natural("1_000"), Err(HailstoneError::NotInteger(_))));
    assert!(matches!(parse_natural("0"), Err(HailstoneError::NotNatural(_))));
    assert_eq!(parse_natural("27").unwrap(), BigInt::from(27));
}

#[test]
fn test_parity_predicates() {
    for n in (2i64..=200).step_by(2) {
        assert!(is_even(&BigInt::from(n)));
        assert!(!is_odd(&BigInt::from(n)));
    }
    for n in (-199i64..=199).step_by(2) {
        assert!(is_odd(&BigInt::from(n)), "{} should be odd", n);
    }
    let zero = BigInt::from(0);
    assert!(!is_even(&zero) && !is_odd(&zero) && !is_natural(&zero));
}

#[test]
fn test_unsequence_roundtrip() {
    for n in 1u64..=5000 {
        let b = BigInt::from(n);
        assert_eq!(unsequence(&sequence(&b).unwrap()).unwrap(), b, "n={}", n);
    }
}

#[test]
fn test_unsequence_invalid_is_recoverable() {
    let err = unsequence(&[0, 1]).unwrap_err();
    assert!(err.to_string().contains("not a valid hailstone encoding"));
}

#[test]
fn test_stats_match_run() {
    for n in 1u64..=300 {
        let b = BigInt::from(n);
        let seq = run(&b).unwrap();
        let stats = trajectory_stats(&b).unwrap();
        assert_eq!(stats.total_steps as usize, seq.len() - 1);
        assert_eq!(stats.max_value, seq.iter().max().unwrap().clone());
        assert_eq!(stats.odd_steps + stats.even_steps, stats.total_steps);
    }
}
