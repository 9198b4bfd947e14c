//! Interpolation helpers:
//! - lerp_f32 / lerp_vec3 (component-wise)
//! - nlerp_quat (quaternion NLERP with shortest-arc normalization)
//! - quat_from_euler_xyz / euler_xyz_from_quat (intrinsic XYZ order, radians)

/// Quaternion identity (x, y, z, w).
pub const IDENTITY_QUAT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
pub(crate) fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
        q
    } else {
        IDENTITY_QUAT
    }
}

/// Quaternion NLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Returns a normalized quaternion (x,y,z,w).
#[inline]
pub fn nlerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    if dot4(a, b) < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
    }
    normalize4([
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ])
}

/// Quaternion for intrinsic XYZ Euler angles (radians).
pub fn quat_from_euler_xyz(e: [f32; 3]) -> [f32; 4] {
    let (s1, c1) = (e[0] * 0.5).sin_cos();
    let (s2, c2) = (e[1] * 0.5).sin_cos();
    let (s3, c3) = (e[2] * 0.5).sin_cos();
    [
        s1 * c2 * c3 + c1 * s2 * s3,
        c1 * s2 * c3 - s1 * c2 * s3,
        c1 * c2 * s3 + s1 * s2 * c3,
        c1 * c2 * c3 - s1 * s2 * s3,
    ]
}

/// Intrinsic XYZ Euler angles (radians) for a quaternion. The input is
/// normalized first; near gimbal lock the Z angle is pinned to zero.
pub fn euler_xyz_from_quat(q: [f32; 4]) -> [f32; 3] {
    let [x, y, z, w] = normalize4(q);
    let m11 = 1.0 - 2.0 * (y * y + z * z);
    let m12 = 2.0 * (x * y - w * z);
    let m13 = 2.0 * (x * z + w * y);
    let m22 = 1.0 - 2.0 * (x * x + z * z);
    let m23 = 2.0 * (y * z - w * x);
    let m32 = 2.0 * (y * z + w * x);
    let m33 = 1.0 - 2.0 * (x * x + y * y);

    let ey = m13.clamp(-1.0, 1.0).asin();
    if m13.abs() < 0.999_999_9 {
        [(-m23).atan2(m33), ey, (-m12).atan2(m11)]
    } else {
        [m32.atan2(m22), ey, 0.0]
    }
}
