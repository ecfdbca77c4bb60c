//! Random tensor construction.
//!
//! The permutation property tests lean on these constructors for fixtures;
//! the `*_with_rng` variants take a seeded generator so every fixture is
//! reproducible.

use rand::distr::StandardUniform;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::scalar::{c64, Scalar};
use crate::storage::Dense;
use crate::tensor::Tensor;

/// Element types drawable from the uniform distribution on [0, 1).
pub trait RandomUniform: Scalar {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

impl RandomUniform for f64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardUniform)
    }
}

impl RandomUniform for c64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c64::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

/// Element types drawable from the standard normal distribution.
pub trait RandomNormal: Scalar {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

impl RandomNormal for f64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl RandomNormal for c64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        // Real and imaginary parts are independent N(0, 1/2), so |z|^2 has
        // mean 1.
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

/// Fill a fresh tensor of the given extents by drawing each element from
/// `sample`.
fn drawn<ElT, R, F>(extents: &[usize], rng: &mut R, sample: F) -> Tensor<ElT, Dense<ElT>>
where
    ElT: Scalar,
    R: Rng,
    F: Fn(&mut R) -> ElT,
{
    let size = extents.iter().product::<usize>().max(1);
    let data: Vec<ElT> = (0..size).map(|_| sample(rng)).collect();
    Tensor::from_vec(data, extents).expect("drawn element count matches the extents")
}

impl<ElT: RandomUniform> Tensor<ElT, Dense<ElT>> {
    /// Tensor of uniform random values in [0, 1), drawn from the thread
    /// RNG.
    pub fn random(extents: &[usize]) -> Self {
        Self::random_with_rng(extents, &mut rand::rng())
    }

    /// Tensor of uniform random values drawn from a caller-supplied RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use tenperm::Tensor;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let t1: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut rng);
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let t2: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut rng);
    ///
    /// assert_eq!(t1.data(), t2.data());
    /// ```
    pub fn random_with_rng<R: Rng>(extents: &[usize], rng: &mut R) -> Self {
        drawn(extents, rng, ElT::sample_uniform)
    }
}

impl<ElT: RandomNormal> Tensor<ElT, Dense<ElT>> {
    /// Tensor of standard normal values, drawn from the thread RNG.
    pub fn randn(extents: &[usize]) -> Self {
        Self::randn_with_rng(extents, &mut rand::rng())
    }

    /// Tensor of standard normal values drawn from a caller-supplied RNG.
    pub fn randn_with_rng<R: Rng>(extents: &[usize], rng: &mut R) -> Self {
        drawn(extents, rng, ElT::sample_normal)
    }
}
