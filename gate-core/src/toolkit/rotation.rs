use nalgebra::Matrix3;

/// Frame rotation `[angle]_axis`: re-expresses a vector in a frame rotated by
/// `angle` radians about coordinate axis 1, 2 or 3
pub fn axis_rotation(axis: u8, angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    match axis {
        1 => Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c),
        2 => Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c),
        _ => Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0),
    }
}

/// `[a1]_ax1 [a2]_ax2 [a3]_ax3`, angles in radians
pub fn euler_to_matrix(angles: [f64; 3], axes: [u8; 3]) -> Matrix3<f64> {
    axis_rotation(axes[0], angles[0]) * axis_rotation(axes[1], angles[1]) * axis_rotation(axes[2], angles[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_axis_rotation_is_frame_rotation() {
        // Rotating the frame +90 deg about Z puts the old +Y on the new +X
        let v = axis_rotation(3, FRAC_PI_2) * Vector3::new(0.0, 1.0, 0.0);
        assert!((v - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_topocentric_axes() {
        let (lon, colat) = (30.0_f64.to_radians(), 50.0_f64.to_radians());
        let m = euler_to_matrix([-lon, -colat, std::f64::consts::PI], [3, 2, 3]);

        // Local +Z is the outward normal of the observation point
        let up = m * Vector3::z();
        let expected = Vector3::new(colat.sin() * lon.cos(), colat.sin() * lon.sin(), colat.cos());
        assert!((up - expected).norm() < 1e-12);

        // Local +X points north: towards the pole along the meridian
        let north = m * Vector3::x();
        assert!(north.z > 0.0);
        assert!(north.dot(&up).abs() < 1e-12);

        assert!((m.determinant() - 1.0).abs() < 1e-12);
    }
}
