//! Orthonormal shading frames.

use crate::core::common::abs;
use crate::core::geometry::Vector3f;

/// Constructs two unit vectors that form an orthonormal coordinate system
/// together with the given unit vector.
///
/// * `v1` - A unit vector.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3 = v1.cross(&v2);
    (v2, v3)
}

/// An orthonormal basis at a surface point with `z` aligned to the surface
/// normal. Converts directions between world space and the local space in
/// which hemispherical sampling is expressed.
#[derive(Copy, Clone, Debug)]
pub struct Frame {
    /// Tangent.
    pub x: Vector3f,

    /// Binormal.
    pub y: Vector3f,

    /// Normal.
    pub z: Vector3f,
}

impl Frame {
    /// Builds a frame from a normal. The two tangents are derived
    /// deterministically from the normal.
    ///
    /// * `z` - The normal; normalized here, need not be unit length.
    pub fn from_z(z: &Vector3f) -> Self {
        let z = z.normalize();
        let (x, y) = coordinate_system(&z);
        Self { x, y, z }
    }

    /// Converts a local direction to world space.
    ///
    /// * `v` - Direction in local space.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Converts a world direction to local space.
    ///
    /// * `v` - Direction in world space.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    /// Returns the frame's normal.
    pub fn normal(&self) -> Vector3f {
        self.z
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn non_degenerate_vector3() -> impl Strategy<Value = Vector3f> {
        (-1.0..1.0f32, -1.0..1.0f32, -1.0..1.0f32)
            .prop_filter("too short to normalize", |(x, y, z)| {
                x * x + y * y + z * z > 1e-4
            })
            .prop_map(|(x, y, z)| Vector3f::new(x, y, z))
    }

    proptest! {
        #[test]
        fn frame_is_orthonormal(n in non_degenerate_vector3()) {
            let frame = Frame::from_z(&n);

            prop_assert!((frame.x.length() - 1.0).abs() < 1e-5);
            prop_assert!((frame.y.length() - 1.0).abs() < 1e-5);
            prop_assert!((frame.z.length() - 1.0).abs() < 1e-5);

            prop_assert!(frame.x.dot(&frame.y).abs() < 1e-5);
            prop_assert!(frame.y.dot(&frame.z).abs() < 1e-5);
            prop_assert!(frame.z.dot(&frame.x).abs() < 1e-5);
        }

        #[test]
        fn world_local_round_trip(n in non_degenerate_vector3(), v in non_degenerate_vector3()) {
            let frame = Frame::from_z(&n);
            let back = frame.to_world(&frame.to_local(&v));
            prop_assert!((back - v).length() < 1e-4);
        }
    }

    #[test]
    fn local_z_is_normal() {
        let frame = Frame::from_z(&Vector3f::new(0.0, 0.0, 2.0));
        let local = frame.to_local(&Vector3f::new(0.0, 0.0, 1.0));
        assert!((local.z - 1.0).abs() < 1e-6);
        assert!(local.x.abs() < 1e-6 && local.y.abs() < 1e-6);
    }
}
