use std::sync::Arc;

use crate::{foundation::core::Vec3, mesh::model::Mesh};

/// Material model identifier handed to the engine unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brdf {
    /// Diffuse plus Phong lobe, see [`PhongParams`].
    Phong = 0,
    /// Ideal diffuse.
    #[default]
    Lambertian = 1,
    /// Blurred reflection.
    Glossy = 2,
    /// Mirror reflection.
    Specular = 3,
}

/// Pinhole camera looking at `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -180.0, 100.0),
            target: Vec3::zeros(),
            fov_deg: 60.0,
        }
    }
}

impl Camera {
    /// Move the eye; the target is unchanged.
    pub fn set_position(&mut self, p: Vec3) {
        self.position = p;
    }

    /// Aim the camera at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Unit viewing direction, `None` when position and target coincide.
    pub fn forward(&self) -> Option<Vec3> {
        (self.target - self.position).try_normalize(1e-12)
    }
}

/// Light model handed to the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Hard-edged shadows.
    Directional,
    /// Directional light with a finite angular size.
    #[default]
    SoftDirectional,
}

/// Distant light. `direction` is the unit vector from the scene towards the light.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    /// Light model.
    pub kind: LightKind,
    position: Vec3,
    direction: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        let mut light = Self {
            kind: LightKind::SoftDirectional,
            position: Vec3::new(0.0, -1.0, 1.0),
            direction: Vec3::z(),
        };
        light.look_at(Vec3::zeros());
        light
    }
}

impl Light {
    /// Default-placed light of the given kind.
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Move the light; call [`Light::look_at`] to update the direction.
    pub fn set_position(&mut self, p: Vec3) {
        self.position = p;
    }

    /// Aim the light from its position at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(d) = (self.position - target).try_normalize(1e-12) {
            self.direction = d;
        }
    }

    /// Set the towards-light direction; zero vectors are ignored.
    pub fn set_dir(&mut self, d: Vec3) {
        if let Some(d) = d.try_normalize(1e-12) {
            self.direction = d;
        }
    }

    /// Unit vector from the scene towards the light.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

/// A mesh placed in the scene. The geometry is shared, placement is per instance.
#[derive(Clone, Debug)]
pub struct MeshInstance {
    /// Shared geometry.
    pub mesh: Arc<Mesh>,
    /// Hidden instances are skipped by the renderer.
    pub visible: bool,
    /// Uniform scale about the origin.
    pub scale: f32,
    /// Offset along `z`, applied after scaling.
    pub shift_z: f32,
}

impl MeshInstance {
    /// Visible, unscaled, unshifted instance.
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            mesh,
            visible: true,
            scale: 1.0,
            shift_z: 0.0,
        }
    }

    /// World-space position of vertex `i`.
    pub fn world_vertex(&self, i: u32) -> Vec3 {
        self.mesh.vertex(i) * self.scale + Vec3::new(0.0, 0.0, self.shift_z)
    }
}

/// Ground plane at `z = 0`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaneParams {
    /// Plane material.
    pub material: Brdf,
    /// Alternate full and half albedo cells.
    pub checkerboard: bool,
    /// Checker cell size in world units.
    pub check_res: u32,
    /// Diffuse albedo.
    pub albedo: f32,
    /// Whether the plane is rendered at all.
    pub visible: bool,
    /// Transparent planes still receive shadows but leave alpha to the mesh.
    pub transparent: bool,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            material: Brdf::Lambertian,
            checkerboard: true,
            check_res: 10,
            albedo: 0.2,
            visible: true,
            transparent: false,
        }
    }
}

/// Mesh material parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhongParams {
    /// Diffuse weight of the Phong BRDF.
    pub kd: f32,
    /// Specular exponent.
    pub power: f32,
    /// Surface albedo.
    pub albedo: f32,
}

impl Default for PhongParams {
    fn default() -> Self {
        Self {
            kd: 0.05,
            power: 30.0,
            albedo: 0.7,
        }
    }
}

/// Everything the engine needs to know about what to draw.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Viewpoint.
    pub camera: Camera,
    /// The single distant light.
    pub light: Light,
    /// Placed meshes.
    pub meshes: Vec<MeshInstance>,
    /// Ground plane.
    pub plane: PlaneParams,
    /// Mesh material.
    pub phong: PhongParams,
}

impl Scene {
    /// Append a mesh instance.
    pub fn add_mesh(&mut self, mesh: MeshInstance) {
        self.meshes.push(mesh);
    }

    /// Copy of the scene with every mesh shown or hidden.
    pub fn with_meshes_visible(&self, visible: bool) -> Self {
        let mut out = self.clone();
        for m in &mut out.meshes {
            m.visible = visible;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scene.rs"]
mod tests;
