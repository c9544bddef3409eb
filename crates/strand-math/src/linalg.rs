//! Element-wise linear algebra over batches of `DVec3` / `DMat3`.
//!
//! Every function walks paired slices of equal length and writes into a
//! caller-owned output slice, so hot loops never allocate.

use glam::{DMat3, DVec3};
use strand_types::{StrandError, StrandResult};

#[inline]
fn check_len(context: &str, expected: usize, actual: usize) -> StrandResult<()> {
    if expected != actual {
        return Err(StrandError::shape(context, expected, actual));
    }
    Ok(())
}

/// `out[k] = mats[k] * vecs[k]`
pub fn batch_matvec(mats: &[DMat3], vecs: &[DVec3], out: &mut [DVec3]) -> StrandResult<()> {
    check_len("batch_matvec", mats.len(), vecs.len())?;
    check_len("batch_matvec", mats.len(), out.len())?;
    for ((o, m), v) in out.iter_mut().zip(mats).zip(vecs) {
        *o = *m * *v;
    }
    Ok(())
}

/// `out[k] = mats[k]ᵀ * vecs[k]`
pub fn batch_transpose_matvec(
    mats: &[DMat3],
    vecs: &[DVec3],
    out: &mut [DVec3],
) -> StrandResult<()> {
    check_len("batch_transpose_matvec", mats.len(), vecs.len())?;
    check_len("batch_transpose_matvec", mats.len(), out.len())?;
    for ((o, m), v) in out.iter_mut().zip(mats).zip(vecs) {
        *o = m.transpose() * *v;
    }
    Ok(())
}

/// `out[k] = a[k] × b[k]`
pub fn batch_cross(a: &[DVec3], b: &[DVec3], out: &mut [DVec3]) -> StrandResult<()> {
    check_len("batch_cross", a.len(), b.len())?;
    check_len("batch_cross", a.len(), out.len())?;
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x.cross(*y);
    }
    Ok(())
}

/// `out[k] = a[k] · b[k]`
pub fn batch_dot(a: &[DVec3], b: &[DVec3], out: &mut [f64]) -> StrandResult<()> {
    check_len("batch_dot", a.len(), b.len())?;
    check_len("batch_dot", a.len(), out.len())?;
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x.dot(*y);
    }
    Ok(())
}

/// `out[k] = |v[k]|`
pub fn batch_norm(v: &[DVec3], out: &mut [f64]) -> StrandResult<()> {
    check_len("batch_norm", v.len(), out.len())?;
    for (o, x) in out.iter_mut().zip(v) {
        *o = x.length();
    }
    Ok(())
}

/// Diagonal matrix from three entries.
#[inline]
pub fn diag(a: f64, b: f64, c: f64) -> DMat3 {
    DMat3::from_diagonal(DVec3::new(a, b, c))
}

/// Diagonal entries of a matrix.
#[inline]
pub fn diagonal(m: &DMat3) -> DVec3 {
    DVec3::new(m.x_axis.x, m.y_axis.y, m.z_axis.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matvec_length_mismatch() {
        let mats = [DMat3::IDENTITY; 2];
        let vecs = [DVec3::X; 3];
        let mut out = [DVec3::ZERO; 2];
        assert!(batch_matvec(&mats, &vecs, &mut out).is_err());
    }

    #[test]
    fn transpose_matvec_inverts_rotation() {
        let q = crate::rotation::director_rotation(DVec3::new(0.2, -0.4, 0.9));
        let v = [DVec3::new(1.0, 2.0, 3.0)];
        let mut local = [DVec3::ZERO];
        let mut back = [DVec3::ZERO];
        batch_matvec(&[q], &v, &mut local).unwrap();
        batch_transpose_matvec(&[q], &local, &mut back).unwrap();
        assert!((back[0] - v[0]).length() < 1e-12);
    }
}
