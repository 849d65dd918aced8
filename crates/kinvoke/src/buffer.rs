//! Owned `f32` argument buffers lent to a kernel for one call.
//!
//! Sample inputs are drawn from N(0, 1) with a seeded ChaCha8 RNG and a
//! Box-Muller transform, so a failing run can be repeated with `--seed`.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::signature::KernelSignature;

/// A contiguous `f32` buffer passed to a kernel by pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelBuffer {
    data: Vec<f32>,
}

impl KernelBuffer {
    /// A buffer of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    /// A buffer of `len` standard-normal samples.
    pub fn randn(len: usize, rng: &mut ChaCha8Rng) -> Self {
        Self {
            data: (0..len).map(|_| box_muller(rng) as f32).collect(),
        }
    }

    /// One standard-normal buffer per parameter of `signature`.
    pub fn sample(signature: &KernelSignature, seed: u64) -> Vec<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        signature
            .args()
            .iter()
            .map(|spec| Self::randn(spec.len, &mut rng))
            .collect()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element view.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Pointer handed to the native call.
    ///
    /// For an empty buffer this is a dangling, non-null pointer.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut f32 {
        self.data.as_mut_ptr()
    }
}

impl From<Vec<f32>> for KernelBuffer {
    fn from(data: Vec<f32>) -> Self {
        Self { data }
    }
}

fn box_muller(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
