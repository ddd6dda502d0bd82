//! Pinhole camera.

use crate::core::common::Float;
use crate::core::geometry::{Point3f, Ray, Vector2f, Vector2i, Vector3f};

/// A pinhole camera that maps raster-space sample positions to primary rays.
/// Raster `(0, 0)` is the top-left corner of the image.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Center of projection.
    position: Point3f,

    /// Unit view direction.
    forward: Vector3f,

    /// Unit vector pointing to the right of the image.
    right: Vector3f,

    /// Unit vector pointing to the top of the image.
    up: Vector3f,

    /// Half extents of the image plane at unit distance.
    half_extents: Vector2f,

    /// Image resolution in pixels.
    resolution: Vector2i,
}

impl Camera {
    /// Creates a new `Camera`.
    ///
    /// * `position`   - Center of projection.
    /// * `forward`    - View direction; normalized here.
    /// * `up`         - Approximate up direction; re-orthogonalized here.
    /// * `resolution` - Image resolution in pixels.
    /// * `fov`        - Horizontal field of view in degrees.
    pub fn new(
        position: Point3f,
        forward: Vector3f,
        up: Vector3f,
        resolution: Vector2i,
        fov: Float,
    ) -> Self {
        let forward = forward.normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward);

        let tan_half = (0.5 * fov.to_radians()).tan();
        let aspect = resolution.y as Float / resolution.x as Float;

        Self {
            position,
            forward,
            right,
            up,
            half_extents: Vector2f::new(tan_half, tan_half * aspect),
            resolution,
        }
    }

    /// Returns the image resolution in pixels.
    pub fn resolution(&self) -> Vector2i {
        self.resolution
    }

    /// Generates the primary ray through a raster-space sample position.
    ///
    /// * `sample` - Position in `[0, res_x) × [0, res_y)`.
    pub fn generate_ray(&self, sample: &Vector2f) -> Ray {
        let ndc_x = 2.0 * sample.x / self.resolution.x as Float - 1.0;
        let ndc_y = 2.0 * sample.y / self.resolution.y as Float - 1.0;

        let dir = self.forward
            + self.right * (ndc_x * self.half_extents.x)
            - self.up * (ndc_y * self.half_extents.y);

        Ray::new(self.position, dir.normalize(), 0.0)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
