//! Integration tests for strand-math.

use approx::assert_relative_eq;
use strand_math::calculus::{difference_into, quadrature_into};
use strand_math::linalg::{batch_cross, batch_norm, diag, diagonal};
use strand_math::rotation::{director_rotation, inv_rotate, is_proper_rotation, log_rotation};
use strand_math::{difference, position_average, position_difference, quadrature, DMat3, DVec3};
use strand_types::StrandError;

// ─── Quadrature Tests ─────────────────────────────────────────

#[test]
fn quadrature_length_and_endpoints() {
    let v = [1.0, 2.0, 3.0, 4.0];
    let out = quadrature(&v).unwrap();
    assert_eq!(out.len(), 5);
    assert_relative_eq!(out[0], 0.5);
    assert_relative_eq!(out[4], 2.0);
    assert_relative_eq!(out[2], 2.5);
}

#[test]
fn quadrature_conserves_sum() {
    let v: Vec<f64> = (0..17).map(|i| (i as f64 * 0.37).sin() + 2.0).collect();
    let out = quadrature(&v).unwrap();
    let sum_in: f64 = v.iter().sum();
    let sum_out: f64 = out.iter().sum();
    assert_relative_eq!(sum_in, sum_out, epsilon = 1e-12);
}

#[test]
fn quadrature_of_vectors() {
    let v = [DVec3::new(2.0, 0.0, -2.0), DVec3::new(4.0, 2.0, 0.0)];
    let out = quadrature(&v).unwrap();
    assert_eq!(out[0], DVec3::new(1.0, 0.0, -1.0));
    assert_eq!(out[1], DVec3::new(3.0, 1.0, -1.0));
    assert_eq!(out[2], DVec3::new(2.0, 1.0, 0.0));
}

#[test]
fn quadrature_empty_input_is_shape_error() {
    let v: [f64; 0] = [];
    assert!(matches!(quadrature(&v), Err(StrandError::Shape { .. })));
}

// ─── Difference Tests ─────────────────────────────────────────

#[test]
fn difference_boundary_identities() {
    let v = [DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.5, 0.5, 0.5), DVec3::new(-1.0, 4.0, 2.0)];
    let out = difference(&v).unwrap();
    assert_eq!(out.len(), 4);
    assert_eq!(out[0], v[0]);
    assert_eq!(out[3], -v[2]);
    for k in 1..3 {
        assert_eq!(out[k], v[k] - v[k - 1]);
    }
}

#[test]
fn difference_sums_to_zero() {
    let v: Vec<f64> = (0..9).map(|i| i as f64 * 1.5 - 3.0).collect();
    let out = difference(&v).unwrap();
    assert_relative_eq!(out.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
}

#[test]
fn into_variants_match_allocating() {
    let v = [3.0, -1.0, 7.0];
    let mut q = [0.0; 4];
    let mut d = [0.0; 4];
    quadrature_into(&v, &mut q).unwrap();
    difference_into(&v, &mut d).unwrap();
    assert_eq!(q.to_vec(), quadrature(&v).unwrap());
    assert_eq!(d.to_vec(), difference(&v).unwrap());
}

#[test]
fn into_wrong_output_length_is_shape_error() {
    let v = [3.0, -1.0, 7.0];
    let mut out = [0.0; 3];
    match difference_into(&v, &mut out) {
        Err(StrandError::Shape { expected, actual, .. }) => {
            assert_eq!(expected, 4);
            assert_eq!(actual, 3);
        }
        other => panic!("expected shape error, got {other:?}"),
    }
}

// ─── Position Helpers ─────────────────────────────────────────

#[test]
fn position_difference_and_average() {
    let x = [DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), DVec3::new(1.0, 2.0, 0.0)];
    let dx = position_difference(&x).unwrap();
    assert_eq!(dx, vec![DVec3::X, DVec3::new(0.0, 2.0, 0.0)]);
    let avg = position_average(&[1.0, 3.0, 7.0]).unwrap();
    assert_eq!(avg, vec![2.0, 5.0]);
    assert!(position_difference(&x[..1]).is_err());
}

// ─── Linear Algebra ───────────────────────────────────────────

#[test]
fn batched_cross_and_norm() {
    let a = [DVec3::X, DVec3::Y];
    let b = [DVec3::Y, DVec3::Z];
    let mut c = [DVec3::ZERO; 2];
    batch_cross(&a, &b, &mut c).unwrap();
    assert_eq!(c, [DVec3::Z, DVec3::X]);
    let mut n = [0.0; 2];
    batch_norm(&[DVec3::new(3.0, 4.0, 0.0), DVec3::ZERO], &mut n).unwrap();
    assert_eq!(n, [5.0, 0.0]);
}

#[test]
fn diag_round_trip() {
    let m = diag(1.0, 2.0, 3.0);
    assert_eq!(diagonal(&m), DVec3::new(1.0, 2.0, 3.0));
}

// ─── Rotation Tests ───────────────────────────────────────────

#[test]
fn director_rotation_is_proper() {
    let r = director_rotation(DVec3::new(0.3, -1.1, 2.0));
    assert!(is_proper_rotation(&r, 1e-12));
}

#[test]
fn director_rotation_about_z() {
    // Frame rotated by +90° about z: the lab x axis reads as local -y.
    let r = director_rotation(DVec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
    let local = r * DVec3::X;
    assert_relative_eq!(local.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(local.y, -1.0, epsilon = 1e-12);
}

#[test]
fn log_inverts_director_rotation() {
    let w = DVec3::new(0.4, 0.2, -0.7);
    let back = log_rotation(&director_rotation(w));
    assert_relative_eq!(back.x, -w.x, epsilon = 1e-12);
    assert_relative_eq!(back.y, -w.y, epsilon = 1e-12);
    assert_relative_eq!(back.z, -w.z, epsilon = 1e-12);
}

#[test]
fn inv_rotate_recovers_relative_rotation() {
    let step = DVec3::new(0.0, 0.05, 0.1);
    let q0 = DMat3::IDENTITY;
    let q1 = director_rotation(step) * q0;
    let q2 = director_rotation(step) * q1;
    let k = inv_rotate(&[q0, q1, q2]).unwrap();
    assert_eq!(k.len(), 2);
    for v in k {
        assert_relative_eq!(v.y, step.y, epsilon = 1e-12);
        assert_relative_eq!(v.z, step.z, epsilon = 1e-12);
    }
}
