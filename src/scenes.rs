//! Built-in Cornell-box scene presets.

use crate::core::camera::Camera;
use crate::core::common::{Float, INV_FOUR_PI};
use crate::core::geometry::{Point3f, Vector2i, Vector3f};
use crate::core::light::ArcLight;
use crate::core::material::Material;
use crate::core::scene::Scene;
use crate::core::spectrum::Spectrum;
use crate::lights::{DiffuseAreaLight, InfiniteAreaLight, PointLight};
use crate::shapes::{ArcShape, Sphere, Triangle};
use bitflags::bitflags;
use std::sync::Arc;

bitflags! {
    /// Feature flags describing one scene variant: exactly one light setup
    /// plus the surface options.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SceneConfig: u32 {
        const LIGHT_POINT     = 1 << 0;
        const LIGHT_CEILING   = 1 << 1;
        const LIGHT_BOX       = 1 << 2;
        const LIGHT_ENV       = 1 << 3;
        const WALLS           = 1 << 4;
        const SPHERES         = 1 << 5;
        const WALLS_DIFFUSE   = 1 << 6;
        const SPHERES_DIFFUSE = 1 << 7;
        const WALLS_GLOSSY    = 1 << 8;
        const SPHERES_GLOSSY  = 1 << 9;
    }
}

/// Number of scene presets.
pub const N_PRESETS: u32 = 8;

/// Returns the configuration of one of the eight scene presets: the four
/// light setups crossed with diffuse-only and diffuse+glossy surfaces.
///
/// * `id` - Preset index in `0..N_PRESETS`.
pub fn preset(id: u32) -> SceneConfig {
    let base = SceneConfig::WALLS
        | SceneConfig::SPHERES
        | SceneConfig::WALLS_DIFFUSE
        | SceneConfig::SPHERES_DIFFUSE;
    let glossy = SceneConfig::WALLS_GLOSSY | SceneConfig::SPHERES_GLOSSY;

    match id {
        0 => SceneConfig::LIGHT_POINT | base,
        1 => SceneConfig::LIGHT_POINT | base | glossy,
        2 => SceneConfig::LIGHT_CEILING | base,
        3 => SceneConfig::LIGHT_CEILING | base | glossy,
        4 => SceneConfig::LIGHT_BOX | base,
        5 => SceneConfig::LIGHT_BOX | base | glossy,
        6 => SceneConfig::LIGHT_ENV | base,
        7 => SceneConfig::LIGHT_ENV | base | glossy,
        _ => panic!("Unknown scene preset {}", id),
    }
}

/// Half extent of the box.
const BOX: Float = 1.28;

/// Half extent of the hanging light box and of the emissive ceiling inset.
const LIGHT_BOX_HALF: Float = 0.25;

/// Bottom of the hanging light box.
const LIGHT_BOX_BOTTOM: Float = 1.26;

/// Builds the Cornell box described by a configuration. The box is open
/// toward the camera (no wall at `y = -BOX`); the left wall is red, the
/// right wall green, everything else white-ish.
///
/// * `resolution` - Image resolution in pixels.
/// * `config`     - The scene configuration.
pub fn cornell_box(resolution: Vector2i, config: SceneConfig) -> Scene {
    build_cornell_box(resolution, config, false)
}

/// Builds the same scene reflected about the room's `x = 0` plane, camera
/// included, so a render of it is the column-reversed render of the
/// unreflected scene up to sampling noise. Exposed for symmetry checks.
///
/// * `resolution` - Image resolution in pixels.
/// * `config`     - The scene configuration.
pub fn cornell_box_mirrored(resolution: Vector2i, config: SceneConfig) -> Scene {
    build_cornell_box(resolution, config, true)
}

/// Shared construction behind the two public builders.
///
/// * `resolution` - Image resolution in pixels.
/// * `config`     - The scene configuration.
/// * `mirrored`   - Reflect everything about the `x = 0` plane.
fn build_cornell_box(resolution: Vector2i, config: SceneConfig, mirrored: bool) -> Scene {
    let place = |p: Point3f| if mirrored { mirror_x(p) } else { p };
    let orient = |p: [Point3f; 4]| orient_quad(p, mirrored);

    // The field of view is wide enough that the top image corners clear the
    // box; those pixels see only the background.
    let camera = Camera::new(
        place(Point3f::new(-0.0439815, -4.12529, 0.222539)),
        place(Vector3f::new(0.00688625, 0.998505, -0.0542161)),
        place(Vector3f::new(3.73896e-4, 0.0542148, 0.998529)),
        resolution,
        50.0,
    );

    // Material table.
    let glossy_floor = config.contains(SceneConfig::WALLS_GLOSSY);
    let glossy_spheres = config.contains(SceneConfig::SPHERES_GLOSSY);

    let white = Spectrum::new(0.803922);
    let materials = vec![
        Material::diffuse(white),
        Material::diffuse(Spectrum::from_rgb(0.803922, 0.152941, 0.152941)),
        Material::diffuse(Spectrum::from_rgb(0.156863, 0.803922, 0.172549)),
        if glossy_floor {
            Material::glossy(Spectrum::new(0.1), Spectrum::new(0.7), 90.0)
        } else {
            Material::diffuse(white)
        },
        if glossy_spheres {
            Material::glossy(Spectrum::new(0.1), Spectrum::new(0.7), 90.0)
        } else {
            Material::diffuse(white)
        },
        // Emissive surfaces carry a black material; shading stops at them.
        Material::diffuse(Spectrum::ZERO),
    ];
    let (mat_white, mat_red, mat_green, mat_floor, mat_sphere, mat_black) = (0, 1, 2, 3, 4, 5);

    let mut geometry: Vec<ArcShape> = Vec::new();
    let mut lights: Vec<ArcLight> = Vec::new();
    let mut background: Option<ArcLight> = None;

    let s = BOX;
    if config.contains(SceneConfig::WALLS) {
        // Floor, back, left and right walls; normals face the interior.
        push_quad(
            &mut geometry,
            orient([
                Point3f::new(-s, -s, -s),
                Point3f::new(s, -s, -s),
                Point3f::new(s, s, -s),
                Point3f::new(-s, s, -s),
            ]),
            mat_floor,
        );
        push_quad(
            &mut geometry,
            orient([
                Point3f::new(-s, s, -s),
                Point3f::new(s, s, -s),
                Point3f::new(s, s, s),
                Point3f::new(-s, s, s),
            ]),
            mat_white,
        );
        push_quad(
            &mut geometry,
            orient([
                Point3f::new(-s, -s, -s),
                Point3f::new(-s, s, -s),
                Point3f::new(-s, s, s),
                Point3f::new(-s, -s, s),
            ]),
            mat_red,
        );
        push_quad(
            &mut geometry,
            orient([
                Point3f::new(s, -s, -s),
                Point3f::new(s, -s, s),
                Point3f::new(s, s, s),
                Point3f::new(s, s, -s),
            ]),
            mat_green,
        );

        let ceiling = orient([
            Point3f::new(-s, -s, s),
            Point3f::new(-s, s, s),
            Point3f::new(s, s, s),
            Point3f::new(s, -s, s),
        ]);
        if config.contains(SceneConfig::LIGHT_CEILING) {
            // The whole ceiling emits.
            push_emissive_quad(
                &mut geometry,
                &mut lights,
                ceiling,
                mat_black,
                Spectrum::new(0.95492965),
            );
        } else {
            push_quad(&mut geometry, ceiling, mat_white);
        }
    }

    if config.contains(SceneConfig::LIGHT_BOX) {
        push_light_box(&mut geometry, &mut lights, mat_white, mat_black, mirrored);
    }

    if config.contains(SceneConfig::SPHERES) {
        geometry.push(Arc::new(Sphere::new(
            place(Point3f::new(-0.45, 0.4, -0.48)),
            0.8,
            mat_sphere,
        )));
        geometry.push(Arc::new(Sphere::new(
            place(Point3f::new(0.7, -0.35, -0.78)),
            0.5,
            mat_sphere,
        )));
    }

    if config.contains(SceneConfig::LIGHT_POINT) {
        lights.push(Arc::new(PointLight::new(
            place(Point3f::new(0.0, -0.5, 1.0)),
            Spectrum::new(70.0 * INV_FOUR_PI),
        )));
    }

    if config.contains(SceneConfig::LIGHT_ENV) {
        let sky: ArcLight = Arc::new(InfiniteAreaLight::new(
            Spectrum::from_rgb(135.0, 206.0, 250.0) / 255.0,
        ));
        lights.push(sky.clone());
        background = Some(sky);
    }

    let (name, acronym) = describe(config);

    Scene {
        camera,
        geometry,
        materials,
        lights,
        background,
        name,
        acronym,
    }
}

/// Reflects a point about the `x = 0` plane.
///
/// * `p` - The point.
fn mirror_x(p: Point3f) -> Point3f {
    Point3f::new(-p.x, p.y, p.z)
}

/// Optionally reflects a quad about the `x = 0` plane. The corner order is
/// reversed along with the reflection so the face normal stays on the same
/// side of the surface.
///
/// * `p`        - The four corners.
/// * `mirrored` - Apply the reflection.
fn orient_quad(p: [Point3f; 4], mirrored: bool) -> [Point3f; 4] {
    if mirrored {
        [mirror_x(p[0]), mirror_x(p[3]), mirror_x(p[2]), mirror_x(p[1])]
    } else {
        p
    }
}

/// Adds a quad as two triangles with the winding `p0 p1 p2`, `p0 p2 p3`.
///
/// * `geometry` - Geometry list to extend.
/// * `p`        - The four corners.
/// * `mat_id`   - Material of both triangles.
fn push_quad(geometry: &mut Vec<ArcShape>, p: [Point3f; 4], mat_id: usize) {
    geometry.push(Arc::new(Triangle::new(p[0], p[1], p[2], mat_id)));
    geometry.push(Arc::new(Triangle::new(p[0], p[2], p[3], mat_id)));
}

/// Adds an emissive quad: two triangles, each backed by its own area light.
///
/// * `geometry` - Geometry list to extend.
/// * `lights`   - Light list to extend.
/// * `p`        - The four corners.
/// * `mat_id`   - Material of both triangles.
/// * `radiance` - Emitted radiance.
fn push_emissive_quad(
    geometry: &mut Vec<ArcShape>,
    lights: &mut Vec<ArcLight>,
    p: [Point3f; 4],
    mat_id: usize,
    radiance: Spectrum,
) {
    for (a, b, c) in [(p[0], p[1], p[2]), (p[0], p[2], p[3])] {
        let light_id = lights.len();
        lights.push(Arc::new(DiffuseAreaLight::new(a, b, c, radiance)));
        geometry.push(Arc::new(Triangle::emissive(a, b, c, mat_id, light_id)));
    }
}

/// Adds the small box hanging from the ceiling whose bottom face emits.
///
/// * `geometry`  - Geometry list to extend.
/// * `lights`    - Light list to extend.
/// * `mat_side`  - Material of the box sides.
/// * `mat_light` - Material of the emitting face.
/// * `mirrored`  - Reflect the box about the `x = 0` plane.
fn push_light_box(
    geometry: &mut Vec<ArcShape>,
    lights: &mut Vec<ArcLight>,
    mat_side: usize,
    mat_light: usize,
    mirrored: bool,
) {
    let a = LIGHT_BOX_HALF;
    let zb = LIGHT_BOX_BOTTOM;
    let zt = BOX;

    // Side faces, normals pointing away from the box.
    push_quad(
        geometry,
        orient_quad(
            [
                Point3f::new(-a, -a, zb),
                Point3f::new(a, -a, zb),
                Point3f::new(a, -a, zt),
                Point3f::new(-a, -a, zt),
            ],
            mirrored,
        ),
        mat_side,
    );
    push_quad(
        geometry,
        orient_quad(
            [
                Point3f::new(-a, a, zb),
                Point3f::new(-a, a, zt),
                Point3f::new(a, a, zt),
                Point3f::new(a, a, zb),
            ],
            mirrored,
        ),
        mat_side,
    );
    push_quad(
        geometry,
        orient_quad(
            [
                Point3f::new(-a, -a, zb),
                Point3f::new(-a, -a, zt),
                Point3f::new(-a, a, zt),
                Point3f::new(-a, a, zb),
            ],
            mirrored,
        ),
        mat_side,
    );
    push_quad(
        geometry,
        orient_quad(
            [
                Point3f::new(a, -a, zb),
                Point3f::new(a, a, zb),
                Point3f::new(a, a, zt),
                Point3f::new(a, -a, zt),
            ],
            mirrored,
        ),
        mat_side,
    );

    // The emitting bottom face looks down into the room.
    push_emissive_quad(
        geometry,
        lights,
        orient_quad(
            [
                Point3f::new(-a, -a, zb),
                Point3f::new(-a, a, zb),
                Point3f::new(a, a, zb),
                Point3f::new(a, -a, zb),
            ],
            mirrored,
        ),
        mat_light,
        Spectrum::new(25.03329895614464),
    );
}

/// Returns the human readable name and the filename tag of a configuration.
///
/// * `config` - The scene configuration.
fn describe(config: SceneConfig) -> (String, String) {
    let (light_name, light_tag) = if config.contains(SceneConfig::LIGHT_POINT) {
        ("point light", "pl")
    } else if config.contains(SceneConfig::LIGHT_CEILING) {
        ("ceiling area light", "cl")
    } else if config.contains(SceneConfig::LIGHT_BOX) {
        ("box area light", "bl")
    } else {
        ("environment light", "el")
    };

    let glossy = config.contains(SceneConfig::WALLS_GLOSSY)
        || config.contains(SceneConfig::SPHERES_GLOSSY);
    let (surface_name, surface_tag) = if glossy {
        ("glossy floor and spheres", "dg")
    } else {
        ("diffuse surfaces", "d")
    };

    (
        format!("{} + {}", light_name, surface_name),
        format!("{}{}", light_tag, surface_tag),
    )
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
