use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::registry::SampleSpec;
use crate::foundation::core::Vec3;

/// Draw the illustrative correlated 3-D sample described by `spec`.
///
/// Every call reseeds, so repeated mapping of the same scenes yields identical points.
pub fn sample_points(spec: &SampleSpec) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    (0..spec.count)
        .map(|_| {
            let x = gauss(&mut rng, spec.x_sigma);
            let y = x * spec.y_from_x + gauss(&mut rng, spec.y_sigma);
            let z = x * spec.z_from_x + y * spec.z_from_y + gauss(&mut rng, spec.z_sigma);
            Vec3::new(x, y, z)
        })
        .collect()
}

/// Zero-mean normal sample (Box-Muller, one variate per call).
fn gauss(rng: &mut StdRng, sigma: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    sigma * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

#[cfg(test)]
#[path = "../../tests/unit/visual/sampler.rs"]
mod tests;
