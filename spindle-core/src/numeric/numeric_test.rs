use super::*;
use approx::assert_relative_eq;

#[test]
fn test_sum_and_max() {
    let v = [1.0_f64, -2.0, 4.5, 0.5];
    assert_relative_eq!(sum(&v), 4.0);
    assert_relative_eq!(max(&v), 4.5);
    assert_eq!(sum::<f64>(&[]), 0.0);
    assert_eq!(max::<f64>(&[]), f64::NEG_INFINITY);
}

#[test]
fn test_arg_max_first_occurrence_wins() {
    let v = [3.0_f64, 5.0, 5.0, 1.0];
    assert_eq!(arg_max(&v), 1);
}

#[test]
fn test_arg_min_first_occurrence_wins() {
    let v = [3.0_f64, 1.0, 5.0, 1.0];
    assert_eq!(arg_min(&v), 1);
    assert_eq!(arg_min_max(&v), (1, 2));
}

#[test]
fn test_arg_min_max_empty() {
    let v: [f64; 0] = [];
    assert_eq!(arg_min_max(&v), (0, 0));
}

#[test]
fn test_soft_max_large_inputs_do_not_overflow() {
    let out = soft_max(&[1000.0_f64, 1000.0, 1000.0]);
    assert_eq!(out.len(), 3);
    for p in out {
        assert!(p.is_finite());
        assert_relative_eq!(p, 1.0 / 3.0, epsilon = 1e-12);
    }
}

#[test]
fn test_soft_max_sums_to_one() {
    let out = soft_max(&[0.1_f32, 2.0, -3.0, 0.7]);
    assert_relative_eq!(out.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    assert_eq!(arg_max(&out), 1);
}

#[test]
fn test_log_soft_max_matches_log_of_soft_max() {
    let v = [0.5_f64, -1.0, 2.0];
    let sm = soft_max(&v);
    let lsm = log_soft_max(&v);
    for (a, b) in sm.iter().zip(lsm.iter()) {
        assert_relative_eq!(a.ln(), *b, epsilon = 1e-12);
    }
}

#[test]
fn test_tanh_levels() {
    assert_eq!(TanhApprox::from_level(0).unwrap(), TanhApprox::Exact);
    assert_eq!(TanhApprox::from_level(1).unwrap(), TanhApprox::VarietyOfSound);
    assert_eq!(TanhApprox::from_level(2).unwrap(), TanhApprox::Anguita);
    assert!(TanhApprox::from_level(3).is_err());
    assert_eq!(TanhApprox::Anguita.level(), 2);
}

#[test]
fn test_tanh_approximations_stay_close_to_exact() {
    for i in -30..=30 {
        let x = i as f64 / 10.0;
        let exact = tanh(x, TanhApprox::Exact);
        assert_relative_eq!(exact, x.tanh());
        let vos = tanh(x, TanhApprox::VarietyOfSound);
        assert!((vos - exact).abs() < 1e-3, "x={} vos={} exact={}", x, vos, exact);
        let ang = tanh(x, TanhApprox::Anguita);
        assert!((ang - exact).abs() < 0.05, "x={} anguita={} exact={}", x, ang, exact);
    }
}

#[test]
fn test_tanh_anguita_saturates() {
    assert_relative_eq!(tanh(5.0_f64, TanhApprox::Anguita), 0.96016);
    assert_relative_eq!(tanh(-5.0_f64, TanhApprox::Anguita), -0.96016);
}

#[test]
fn test_slice_helpers() {
    let mut v = vec![1.0, 2.0, 3.0];
    let c = copy(&v);
    fill(&mut v, 7.0);
    assert_eq!(v, vec![7.0, 7.0, 7.0]);
    assert_eq!(c, vec![1.0, 2.0, 3.0]);
    assert_eq!(sign(-0.5_f64), -1);
    assert_eq!(sign(0.0_f64), 0);
    assert_eq!(sign(3.0_f32), 1);
    assert!(equal_approx(1.0, 1.0 + 1e-9));
    assert!(!equal_approx(1.0, 1.1));
}

#[test]
fn test_parse_f64_slice() {
    assert_eq!(parse_f64_slice(" 1.5 -2  3e1 ").unwrap(), vec![1.5, -2.0, 30.0]);
    assert!(parse_f64_slice("").unwrap().is_empty());
    assert!(matches!(
        parse_f64_slice("1.0 abc"),
        Err(crate::error::SpindleError::ParseError(_))
    ));
}
