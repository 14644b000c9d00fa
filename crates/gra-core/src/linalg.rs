//! Dense complex vector helpers
//!
//! Free functions over `&[Complex64]`. Length checks report
//! [`MultiverseError::DimensionMismatch`]; numerical degeneracies are not
//! sanitized and NaN/Inf pass through.

use crate::error::{MultiverseError, Result};
use num_complex::Complex64;

/// Owned complex vector stored per state component
pub type ComplexVector = Vec<Complex64>;

/// Stabilizer added to norm products before division
pub const NORM_EPSILON: f64 = 1e-9;

/// Check both operands have the same length
#[inline]
fn ensure_same_len(a: &[Complex64], b: &[Complex64]) -> Result<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(MultiverseError::dimension_mismatch(a.len(), b.len()))
    }
}

/// Inner product `⟨a, b⟩`, conjugate-linear in `a`
///
/// # Errors
/// Returns [`MultiverseError::DimensionMismatch`] if lengths differ
#[inline]
pub fn vdot(a: &[Complex64], b: &[Complex64]) -> Result<Complex64> {
    ensure_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x.conj() * *y).sum())
}

/// Squared Euclidean norm
#[inline]
#[must_use]
pub fn norm_sqr(a: &[Complex64]) -> f64 {
    a.iter().map(Complex64::norm_sqr).sum()
}

/// Euclidean norm
#[inline]
#[must_use]
pub fn norm(a: &[Complex64]) -> f64 {
    norm_sqr(a).sqrt()
}

/// `a - scale * b`, element-wise
///
/// # Errors
/// Returns [`MultiverseError::DimensionMismatch`] if lengths differ
#[inline]
pub fn sub_scaled(a: &[Complex64], b: &[Complex64], scale: f64) -> Result<ComplexVector> {
    ensure_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| *x - *y * scale).collect())
}

/// Element-wise mean of equally sized vectors
///
/// # Errors
/// - [`MultiverseError::InvalidInput`] if `vectors` is empty
/// - [`MultiverseError::DimensionMismatch`] if lengths differ
pub fn mean<V: AsRef<[Complex64]>>(vectors: &[V]) -> Result<ComplexVector> {
    let Some(first) = vectors.first() else {
        return Err(MultiverseError::invalid_input("mean of zero vectors"));
    };

    let mut acc = first.as_ref().to_vec();
    for v in &vectors[1..] {
        let v = v.as_ref();
        ensure_same_len(&acc, v)?;
        for (a, x) in acc.iter_mut().zip(v) {
            *a += *x;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let n = vectors.len() as f64;
    for a in &mut acc {
        *a /= n;
    }
    Ok(acc)
}

/// Cosine similarity `Re⟨a, b⟩ / (‖a‖‖b‖ + 1e-9)`
///
/// # Errors
/// Returns [`MultiverseError::DimensionMismatch`] if lengths differ
#[inline]
pub fn cosine_similarity(a: &[Complex64], b: &[Complex64]) -> Result<f64> {
    let num = vdot(a, b)?.re;
    Ok(num / (norm(a) * norm(b) + NORM_EPSILON))
}

/// Lift real values into a complex vector
#[inline]
#[must_use]
pub fn from_real(values: &[f64]) -> ComplexVector {
    values.iter().map(|&re| Complex64::new(re, 0.0)).collect()
}
