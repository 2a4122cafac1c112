use std::f32::consts::TAU;

use crate::{
    engine::{
        options::RenderOptions,
        scene::{MeshInstance, Scene},
        session::{AnimationSettings, Command, Engine, SessionOutcome},
        tone,
    },
    foundation::{
        core::Vec3,
        error::{RtnprError, RtnprResult},
    },
    render::frame::Frame,
};

const LIGHT_INTENSITY: f32 = 1.5;
const AMBIENT: f32 = 0.1;
const BACKGROUND: [f32; 3] = [1.0, 1.0, 1.0];
const NEAR: f32 = 1e-3;

/// Settings for [`HeadlessEngine`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessOpts {
    /// Command reported when the (non-interactive) session closes.
    pub command: Command,
    /// Animation settings reported with the command.
    pub animation: AnimationSettings,
}

/// Non-interactive engine: the session answers with a preset command and frames come from a
/// small deterministic z-buffer rasterizer.
///
/// Shading is Lambertian under a distant light with a checkerboard ground plane at `z = 0`
/// that receives a planar projected shadow. Sample counts do not change the output.
#[derive(Debug)]
pub struct HeadlessEngine {
    opts: HeadlessOpts,
    current: Command,
}

impl HeadlessEngine {
    /// Create an engine; its command stays `None` until `interact`.
    pub fn new(opts: HeadlessOpts) -> Self {
        Self {
            opts,
            current: Command::None,
        }
    }
}

impl Engine for HeadlessEngine {
    fn interact(
        &mut self,
        _scene: &mut Scene,
        _options: &mut RenderOptions,
    ) -> RtnprResult<SessionOutcome> {
        self.current = self.opts.command;
        tracing::info!(command = ?self.current, "headless session closed");
        Ok(SessionOutcome {
            command: self.current,
            animation: self.opts.animation,
        })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(w = options.width, h = options.height))]
    fn render(&mut self, scene: &Scene, options: &RenderOptions) -> RtnprResult<Frame> {
        options.validate()?;
        let view = View::new(scene, options)?;
        Ok(rasterize(scene, options, &view))
    }

    fn camera_positions(&mut self, scene: &Scene, out: &mut [Vec3]) -> RtnprResult<()> {
        let rel = scene.camera.position - scene.camera.target;
        let radius = rel.xy().norm();
        let phi0 = rel.y.atan2(rel.x);
        let n = out.len().max(1) as f32;
        for (i, p) in out.iter_mut().enumerate() {
            let phi = phi0 + TAU * i as f32 / n;
            *p = scene.camera.target + Vec3::new(radius * phi.cos(), radius * phi.sin(), rel.z);
        }
        Ok(())
    }

    fn command(&self) -> Command {
        self.current
    }
}

struct View {
    origin: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    tan_half: f32,
    aspect: f32,
    width: f32,
    height: f32,
}

impl View {
    fn new(scene: &Scene, options: &RenderOptions) -> RtnprResult<Self> {
        let cam = &scene.camera;
        let forward = cam
            .forward()
            .ok_or_else(|| RtnprError::engine("camera position coincides with its target"))?;
        let right = forward
            .cross(&Vec3::z())
            .try_normalize(1e-6)
            .unwrap_or_else(Vec3::x);
        let up = right.cross(&forward);
        Ok(Self {
            origin: cam.position,
            forward,
            right,
            up,
            tan_half: (cam.fov_deg.to_radians() * 0.5).tan(),
            aspect: options.width as f32 / options.height as f32,
            width: options.width as f32,
            height: options.height as f32,
        })
    }

    /// Unit ray through the centre of pixel `(x, y)`.
    fn ray(&self, x: u32, y: u32) -> Vec3 {
        let sx = ((x as f32 + 0.5) / self.width * 2.0 - 1.0) * self.aspect * self.tan_half;
        let sy = (1.0 - (y as f32 + 0.5) / self.height * 2.0) * self.tan_half;
        (self.forward + self.right * sx + self.up * sy).normalize()
    }

    /// Screen position (pixel units) and inverse view depth, `None` behind the camera.
    fn project(&self, p: Vec3) -> Option<(f32, f32, f32)> {
        let d = p - self.origin;
        let z = d.dot(&self.forward);
        if z <= NEAR {
            return None;
        }
        let sx = d.dot(&self.right) / (z * self.tan_half * self.aspect);
        let sy = d.dot(&self.up) / (z * self.tan_half);
        Some((
            (sx + 1.0) * 0.5 * self.width,
            (1.0 - sy) * 0.5 * self.height,
            1.0 / z,
        ))
    }
}

/// Visit every pixel whose centre falls inside the projected triangle.
fn for_each_covered(view: &View, tri: [Vec3; 3], mut visit: impl FnMut(usize, f32)) {
    let (Some(a), Some(b), Some(c)) = (
        view.project(tri[0]),
        view.project(tri[1]),
        view.project(tri[2]),
    ) else {
        return;
    };
    let area = edge(a, b, c.0, c.1);
    if area.abs() < 1e-12 {
        return;
    }
    let w = view.width as u32;
    let h = view.height as u32;
    let stride = w as usize;
    let x0 = a.0.min(b.0).min(c.0).floor().max(0.0) as u32;
    let y0 = a.1.min(b.1).min(c.1).floor().max(0.0) as u32;
    let x1 = (a.0.max(b.0).max(c.0).ceil().max(0.0) as u32).min(w);
    let y1 = (a.1.max(b.1).max(c.1).ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let wa = edge(b, c, px, py) / area;
            let wb = edge(c, a, px, py) / area;
            let wc = edge(a, b, px, py) / area;
            if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                continue;
            }
            let inv_z = wa * a.2 + wb * b.2 + wc * c.2;
            visit(y as usize * stride + x as usize, inv_z);
        }
    }
}

fn edge(a: (f32, f32, f32), b: (f32, f32, f32), px: f32, py: f32) -> f32 {
    (b.0 - a.0) * (py - a.1) - (b.1 - a.1) * (px - a.0)
}

fn triangles(inst: &MeshInstance) -> impl Iterator<Item = [Vec3; 3]> + '_ {
    inst.mesh
        .faces()
        .iter()
        .map(|f| f.map(|i| inst.world_vertex(i)))
}

fn rasterize(scene: &Scene, options: &RenderOptions, view: &View) -> Frame {
    let (w, h) = (options.width, options.height);
    let n = w as usize * h as usize;
    let light = scene.light.direction();

    let mut depth = vec![0.0f32; n];
    let mut radiance = vec![[0.0f32; 3]; n];
    let mut covered = vec![false; n];

    for inst in scene.meshes.iter().filter(|m| m.visible) {
        for tri in triangles(inst) {
            let face_normal = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
            let Some(mut normal) = face_normal.try_normalize(1e-12) else {
                continue;
            };
            if normal.dot(&(view.origin - tri[0])) < 0.0 {
                normal = -normal;
            }
            let shade =
                scene.phong.albedo * (LIGHT_INTENSITY * normal.dot(&light).max(0.0) + AMBIENT);
            for_each_covered(view, tri, |i, inv_z| {
                if inv_z > depth[i] {
                    depth[i] = inv_z;
                    radiance[i] = [shade; 3];
                    covered[i] = true;
                }
            });
        }
    }

    let mut shadow = vec![false; n];
    if light.z > 1e-4 {
        for inst in scene.meshes.iter().filter(|m| m.visible) {
            for tri in triangles(inst) {
                let flat = tri.map(|p| p - light * (p.z / light.z));
                for_each_covered(view, flat, |i, _| shadow[i] = true);
            }
        }
    }

    let mut data = Vec::with_capacity(n * 4);
    for y in 0..h {
        for x in 0..w {
            let i = y as usize * w as usize + x as usize;
            let dir = view.ray(x, y);
            let plane_hit = (scene.plane.visible && dir.z.abs() > 1e-9)
                .then(|| -view.origin.z / dir.z)
                .filter(|t| *t > 0.0);

            let plane_inv_z = plane_hit.map(|t| 1.0 / (t * dir.dot(&view.forward)));
            let mesh_in_front = covered[i] && plane_inv_z.is_none_or(|pz| depth[i] >= pz);

            let (rgb, alpha) = if mesh_in_front {
                (radiance[i], 1.0)
            } else if let Some(t) = plane_hit {
                let p = view.origin + dir * t;
                let lit = if shadow[i] { 0.0 } else { light.z.max(0.0) };
                let albedo = plane_albedo(scene, p);
                let alpha = if scene.plane.transparent { 0.0 } else { 1.0 };
                ([albedo * (LIGHT_INTENSITY * lit + AMBIENT); 3], alpha)
            } else {
                (BACKGROUND, 0.0)
            };

            let out = tone::map_rgb(rgb, options.tone_mode, options.theme_id);
            data.extend_from_slice(&[out[0], out[1], out[2], alpha]);
        }
    }

    Frame {
        width: w,
        height: h,
        data,
    }
}

fn plane_albedo(scene: &Scene, p: Vec3) -> f32 {
    let albedo = scene.plane.albedo;
    if !scene.plane.checkerboard || scene.plane.check_res == 0 {
        return albedo;
    }
    let cell = scene.plane.check_res as f32;
    let parity = (p.x / cell).floor() as i64 + (p.y / cell).floor() as i64;
    if parity.rem_euclid(2) == 0 {
        albedo
    } else {
        albedo * 0.5
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/headless.rs"]
mod tests;
