//! Quadrature and difference kernels.
//!
//! Element-domain quantities live between nodes and voronoi quantities live
//! between elements. The two kernels here lift a sequence one domain up
//! (length `n` → `n + 1`), treating the values beyond both ends as zero:
//!
//! ```text
//! input:        v0      v1      v2
//! quadrature: ½v0  ½(v0+v1) ½(v1+v2)  ½v2
//! difference:  v0    v1-v0    v2-v1   -v2
//! ```
//!
//! The kernels are generic over the per-slot value ([`Batched`]), so the same
//! code serves scalar and 3-vector sequences.

use std::ops::{Add, Mul, Neg, Sub};

use strand_types::{StrandError, StrandResult};

/// A value that can be stored in one slot of a batched kernel sequence.
pub trait Batched:
    Copy + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self> + Mul<f64, Output = Self>
{
}

impl<T> Batched for T where
    T: Copy + Add<Output = T> + Sub<Output = T> + Neg<Output = T> + Mul<f64, Output = T>
{
}

fn check_lift<T>(context: &str, input: &[T], output: &[T]) -> StrandResult<()> {
    if input.is_empty() {
        return Err(StrandError::shape(context, 1, 0));
    }
    if output.len() != input.len() + 1 {
        return Err(StrandError::shape(context, input.len() + 1, output.len()));
    }
    Ok(())
}

/// Trapezoidal rule with zero end-points, written into `output`.
///
/// `output.len()` must be `input.len() + 1`.
pub fn quadrature_into<T: Batched>(input: &[T], output: &mut [T]) -> StrandResult<()> {
    check_lift("quadrature", input, output)?;
    let n = input.len();
    output[0] = input[0] * 0.5;
    output[n] = input[n - 1] * 0.5;
    for k in 1..n {
        output[k] = (input[k] + input[k - 1]) * 0.5;
    }
    Ok(())
}

/// Trapezoidal rule with zero end-points.
pub fn quadrature<T: Batched>(input: &[T]) -> StrandResult<Vec<T>> {
    let Some(&first) = input.first() else {
        return Err(StrandError::shape("quadrature", 1, 0));
    };
    let mut output = vec![first; input.len() + 1];
    quadrature_into(input, &mut output)?;
    Ok(output)
}

/// Two-point difference with zero end-points, written into `output`.
///
/// `output.len()` must be `input.len() + 1`.
pub fn difference_into<T: Batched>(input: &[T], output: &mut [T]) -> StrandResult<()> {
    check_lift("difference", input, output)?;
    let n = input.len();
    output[0] = input[0];
    output[n] = -input[n - 1];
    for k in 1..n {
        output[k] = input[k] - input[k - 1];
    }
    Ok(())
}

/// Two-point difference with zero end-points.
pub fn difference<T: Batched>(input: &[T]) -> StrandResult<Vec<T>> {
    let Some(&first) = input.first() else {
        return Err(StrandError::shape("difference", 1, 0));
    };
    let mut output = vec![first; input.len() + 1];
    difference_into(input, &mut output)?;
    Ok(output)
}

/// Forward difference of consecutive node values (`n` → `n - 1`).
pub fn position_difference<T: Batched>(positions: &[T]) -> StrandResult<Vec<T>> {
    if positions.len() < 2 {
        return Err(StrandError::shape("position difference", 2, positions.len()));
    }
    Ok(positions.windows(2).map(|w| w[1] - w[0]).collect())
}

/// Average of consecutive values (`n` → `n - 1`).
pub fn position_average<T: Batched>(values: &[T]) -> StrandResult<Vec<T>> {
    if values.len() < 2 {
        return Err(StrandError::shape("position average", 2, values.len()));
    }
    Ok(values.windows(2).map(|w| (w[1] + w[0]) * 0.5).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn quadrature_single_element() {
        let out = quadrature(&[4.0_f64]).unwrap();
        assert_eq!(out, vec![2.0, 2.0]);
    }

    #[test]
    fn difference_single_element() {
        let out = difference(&[DVec3::new(1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(out[0], DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(out[1], DVec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn into_rejects_wrong_output_length() {
        let input = [1.0_f64, 2.0];
        let mut out = [0.0_f64; 2];
        assert!(quadrature_into(&input, &mut out).is_err());
        assert!(difference_into(&input, &mut out).is_err());
    }
}
