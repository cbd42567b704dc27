use super::*;
use crate::config::registry::Registry;

#[test]
fn sample_is_reproducible() {
    let spec = Registry::builtin().sample;
    let a = sample_points(&spec);
    let b = sample_points(&spec);
    assert_eq!(a.len(), 50);
    assert_eq!(a, b);
}

#[test]
fn different_seed_changes_sample() {
    let mut spec = Registry::builtin().sample;
    let a = sample_points(&spec);
    spec.seed = 7;
    let b = sample_points(&spec);
    assert_ne!(a, b);
}

#[test]
fn sample_is_correlated_along_x_and_y() {
    let mut spec = Registry::builtin().sample;
    spec.count = 2000;
    let pts = sample_points(&spec);
    let n = pts.len() as f64;
    let mx = pts.iter().map(|p| p.x).sum::<f64>() / n;
    let my = pts.iter().map(|p| p.y).sum::<f64>() / n;
    let cov = pts.iter().map(|p| (p.x - mx) * (p.y - my)).sum::<f64>() / n;
    // Expected covariance is 0.7 * 1.4^2 ~= 1.37.
    assert!(cov > 0.9 && cov < 1.9, "cov = {cov}");
    assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite()));
}
