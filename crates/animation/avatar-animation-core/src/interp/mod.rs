//! Interpolation and rotation helpers.
//!
//! Linear blending for vectors, NLERP with shortest-arc sign correction for
//! quaternions, and XYZ Euler <-> quaternion conversion for bone rotations.

pub mod functions;

pub use functions::{
    euler_xyz_from_quat, lerp_f32, lerp_vec3, nlerp_quat, quat_from_euler_xyz, IDENTITY_QUAT,
};
