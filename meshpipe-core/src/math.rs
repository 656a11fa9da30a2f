/// Row-vector matrix helpers
///
/// Matrices are row-major and points are row vectors: a point is transformed
/// as `v * M`, so in a product `A * B` the factor `A` is applied first.
use nalgebra::{Matrix4, RowVector4, Vector3};

use crate::error::TransformError;

/// Translation by `t` (translation lives in the bottom row).
#[rustfmt::skip]
pub fn translation(t: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        t.x, t.y, t.z, 1.0,
    )
}

pub fn inverse_translation(t: &Vector3<f32>) -> Matrix4<f32> {
    translation(&-t)
}

/// Axis-aligned scale.
#[rustfmt::skip]
pub fn scaling(s: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new(
        s.x, 0.0, 0.0, 0.0,
        0.0, s.y, 0.0, 0.0,
        0.0, 0.0, s.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Reciprocal scale. Fails when any component is zero.
pub fn inverse_scaling(s: &Vector3<f32>) -> Result<Matrix4<f32>, TransformError> {
    check_scale(s)?;
    Ok(scaling(&s.map(|c| 1.0 / c)))
}

/// Reject scales with a zero component.
pub fn check_scale(s: &Vector3<f32>) -> Result<(), TransformError> {
    match s.iter().position(|c| *c == 0.0) {
        Some(axis) => Err(TransformError::DegenerateScale {
            scale: [s.x, s.y, s.z],
            axis,
        }),
        None => Ok(()),
    }
}

/// Rotation about the vertical (Y) axis, angle in degrees.
#[rustfmt::skip]
pub fn rotation_y(degrees: f32) -> Matrix4<f32> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Matrix4::new(
        cos, 0.0, sin, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -sin, 0.0, cos, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Inverse of [`rotation_y`]; a pure rotation inverts by transposition.
pub fn inverse_rotation_y(degrees: f32) -> Matrix4<f32> {
    rotation_y(degrees).transpose()
}

/// Homogeneous point (`w = 1`).
pub fn point(p: &Vector3<f32>) -> RowVector4<f32> {
    RowVector4::new(p.x, p.y, p.z, 1.0)
}

/// Homogeneous direction (`w = 0`).
pub fn direction(d: &Vector3<f32>) -> RowVector4<f32> {
    RowVector4::new(d.x, d.y, d.z, 0.0)
}

/// Transform a row vector: `v' = v * m`.
pub fn transform_row(v: &RowVector4<f32>, m: &Matrix4<f32>) -> RowVector4<f32> {
    v * m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_identity(m: &Matrix4<f32>) {
        let diff = m - Matrix4::identity();
        assert!(diff.iter().all(|c| c.abs() < 1e-5), "not identity: {}", m);
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let t = translation(&Vector3::new(1.0, 2.0, 3.0));
        let p = transform_row(&point(&Vector3::new(1.0, 1.0, 1.0)), &t);
        assert_eq!(p, RowVector4::new(2.0, 3.0, 4.0, 1.0));

        let d = transform_row(&direction(&Vector3::new(1.0, 1.0, 1.0)), &t);
        assert_eq!(d, RowVector4::new(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_product_applies_left_factor_first() {
        let s = scaling(&Vector3::new(2.0, 2.0, 2.0));
        let t = translation(&Vector3::new(1.0, 0.0, 0.0));
        let p = transform_row(&point(&Vector3::new(1.0, 0.0, 0.0)), &(s * t));
        // Scaled to 2, then shifted to 3.
        assert!((p.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let r = rotation_y(90.0);
        let p = transform_row(&point(&Vector3::new(1.0, 0.0, 0.0)), &r);
        assert!(p.x.abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverses() {
        let t = Vector3::new(-4.0, 0.5, 9.0);
        assert_identity(&(translation(&t) * inverse_translation(&t)));
        assert_identity(&(rotation_y(37.0) * inverse_rotation_y(37.0)));

        let s = Vector3::new(0.05, -3.0, 7.0);
        assert_identity(&(scaling(&s) * inverse_scaling(&s).unwrap()));
    }

    #[test]
    fn test_zero_scale_is_degenerate() {
        let err = inverse_scaling(&Vector3::new(1.0, 0.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            TransformError::DegenerateScale {
                scale: [1.0, 0.0, 1.0],
                axis: 1
            }
        );
    }
}
