//! Exponential and logarithmic maps for director frames.
//!
//! A director frame `Q` stores the material directors `d1, d2, d3` as its
//! rows, so `Q` maps lab-frame vectors into the local frame. Frames are
//! advanced with [`director_rotation`] and compared with [`log_rotation`].

use glam::{DMat3, DVec3};
use strand_types::constants::ROTATION_LOG_EPSILON;
use strand_types::{StrandError, StrandResult};

/// Skew-symmetric cross-product matrix: `skew(a) * b == a × b`.
#[inline]
pub fn skew(v: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(0.0, v.z, -v.y),
        DVec3::new(-v.z, 0.0, v.x),
        DVec3::new(v.y, -v.x, 0.0),
    )
}

/// Builds a frame whose rows are `d1, d2, d3`.
#[inline]
pub fn from_directors(d1: DVec3, d2: DVec3, d3: DVec3) -> DMat3 {
    DMat3::from_cols(d1, d2, d3).transpose()
}

/// Row `i` of a frame (the `i`-th material director in the lab frame).
#[inline]
pub fn director(q: &DMat3, i: usize) -> DVec3 {
    q.row(i)
}

/// Frame rotation `exp(-[v]×)` via the Rodrigues formula.
///
/// `Q ← director_rotation(dt·ω) Q` rotates a director frame by the local
/// angular velocity `ω` over `dt`.
pub fn director_rotation(v: DVec3) -> DMat3 {
    let theta = v.length();
    let axis = v / (theta + ROTATION_LOG_EPSILON);
    let k = skew(axis);
    DMat3::IDENTITY - k * theta.sin() + (k * k) * (1.0 - theta.cos())
}

/// Rotation vector `w` such that `exp([w]×) == r`.
///
/// Angles are recovered in `[0, π)`; the axis is ill-defined at exactly `π`.
pub fn log_rotation(r: &DMat3) -> DVec3 {
    let cos_theta = (0.5 * (r.x_axis.x + r.y_axis.y + r.z_axis.z - 1.0)).clamp(-1.0, 1.0);
    let theta = cos_theta.acos();
    // Antisymmetric part: (R21 - R12, R02 - R20, R10 - R01).
    let axial = DVec3::new(
        r.y_axis.z - r.z_axis.y,
        r.z_axis.x - r.x_axis.z,
        r.x_axis.y - r.y_axis.x,
    );
    let sin_theta = theta.sin();
    let scale = if sin_theta.abs() < 1e-7 {
        0.5
    } else {
        0.5 * theta / sin_theta
    };
    axial * scale
}

/// Relative rotation vector between consecutive frames, `-log(Q_{k+1} Q_kᵀ)`,
/// written into `out` (`out.len() == frames.len() - 1`).
pub fn inv_rotate_into(frames: &[DMat3], out: &mut [DVec3]) -> StrandResult<()> {
    if frames.len() < 2 {
        return Err(StrandError::shape("inv_rotate", 2, frames.len()));
    }
    if out.len() != frames.len() - 1 {
        return Err(StrandError::shape("inv_rotate", frames.len() - 1, out.len()));
    }
    for (o, pair) in out.iter_mut().zip(frames.windows(2)) {
        *o = -log_rotation(&(pair[1] * pair[0].transpose()));
    }
    Ok(())
}

/// Allocating variant of [`inv_rotate_into`].
pub fn inv_rotate(frames: &[DMat3]) -> StrandResult<Vec<DVec3>> {
    let mut out = vec![DVec3::ZERO; frames.len().saturating_sub(1)];
    inv_rotate_into(frames, &mut out)?;
    Ok(out)
}

/// Whether `q` is orthonormal with positive determinant, to `tolerance`.
pub fn is_proper_rotation(q: &DMat3, tolerance: f64) -> bool {
    let qqt = *q * q.transpose();
    let identity_error = (qqt - DMat3::IDENTITY).to_cols_array().iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    identity_error < tolerance && (q.determinant() - 1.0).abs() < tolerance
}
