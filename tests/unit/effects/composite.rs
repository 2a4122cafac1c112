use super::*;
use crate::{
    engine::{
        scene::MeshInstance,
        session::{Command, SessionOutcome},
    },
    foundation::core::Vec3,
    mesh::model::Mesh,
};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct Call {
    mesh_visible: bool,
    plane_transparent: bool,
    plane_visible: bool,
    tone: ToneMode,
    spp: u32,
    spp_frame: u32,
}

#[derive(Default)]
struct RecordingEngine {
    calls: Vec<Call>,
}

impl Engine for RecordingEngine {
    fn interact(&mut self, _: &mut Scene, _: &mut RenderOptions) -> RtnprResult<SessionOutcome> {
        Ok(SessionOutcome::default())
    }

    fn render(&mut self, scene: &Scene, o: &RenderOptions) -> RtnprResult<Frame> {
        let mesh_visible = scene.meshes.iter().any(|m| m.visible);
        self.calls.push(Call {
            mesh_visible,
            plane_transparent: scene.plane.transparent,
            plane_visible: scene.plane.visible,
            tone: o.tone_mode,
            spp: o.spp,
            spp_frame: o.spp_frame,
        });
        let px = match (o.tone_mode, mesh_visible) {
            // Left pixel opaque mesh, right pixel transparent plane.
            (ToneMode::Reinhard, _) => vec![0.9, 0.8, 0.7, 1.0, 0.1, 0.2, 0.3, 0.0],
            (_, false) => vec![0.2, 0.2, 0.2, 1.0, 0.2, 0.2, 0.2, 1.0],
            (_, true) => vec![0.7, 0.7, 0.7, 1.0, 0.5, 0.6, 0.7, 1.0],
        };
        Frame::new(2, 1, px)
    }

    fn camera_positions(&mut self, _: &Scene, _: &mut [Vec3]) -> RtnprResult<()> {
        Ok(())
    }

    fn command(&self) -> Command {
        Command::None
    }
}

fn scene() -> Scene {
    let mesh = Mesh::new(vec![[0.0; 3]; 3], vec![[0, 1, 2]]).unwrap();
    let mut s = Scene::default();
    s.add_mesh(MeshInstance::new(Arc::new(mesh)));
    s
}

fn opts() -> RenderOptions {
    RenderOptions {
        width: 2,
        height: 1,
        spp: 128,
        spp_frame: 32,
        tone_mode: ToneMode::Linear,
        ..RenderOptions::default()
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn standard_mode_passes_render_through() {
    let mut engine = RecordingEngine::default();
    let out = FrameCompositor::default()
        .compose(&mut engine, &scene(), &opts())
        .unwrap();
    assert_eq!(engine.calls.len(), 1);
    assert_eq!(out.data, vec![0.7, 0.7, 0.7, 1.0, 0.5, 0.6, 0.7, 1.0]);
}

#[test]
fn difference_mode_runs_three_isolated_passes() {
    let mut engine = RecordingEngine::default();
    let base_scene = scene();
    let base_opts = opts();
    let compositor = FrameCompositor::new(CompositeMode::Difference(DiffOptions::default()));
    compositor
        .compose(&mut engine, &base_scene, &base_opts)
        .unwrap();

    let expect = |mesh_visible, plane_transparent, tone, spp, spp_frame| Call {
        mesh_visible,
        plane_transparent,
        plane_visible: true,
        tone,
        spp,
        spp_frame,
    };
    assert_eq!(
        engine.calls,
        vec![
            expect(true, true, ToneMode::Reinhard, 128, 32),
            expect(false, false, ToneMode::Raw, 64, 32),
            expect(true, false, ToneMode::Raw, 128, 32),
        ]
    );

    assert!(base_scene.meshes[0].visible);
    assert!(!base_scene.plane.transparent);
    assert_eq!(base_opts, opts());
}

#[test]
fn hidden_plane_variant_hides_instead_of_clearing() {
    let diff = DiffOptions {
        plane_mask: PlaneMask::Hidden,
        ..DiffOptions::default()
    };
    let passes = DiffPasses::derive(&scene(), &opts(), &diff);
    assert!(!passes.composite.0.plane.visible);
    assert!(!passes.composite.0.plane.transparent);
    assert!(passes.background.0.plane.visible);
}

#[test]
fn background_cap_never_raises_the_budget() {
    let low = RenderOptions {
        spp: 16,
        spp_frame: 32,
        ..opts()
    };
    let passes = DiffPasses::derive(&scene(), &low, &DiffOptions::default());
    assert_eq!(passes.background.1.spp, 16);
    assert_eq!(passes.background.1.spp_frame, 16);
}

#[test]
fn difference_overlay_mixes_by_composite_alpha() {
    let mut engine = RecordingEngine::default();
    let compositor = FrameCompositor::new(CompositeMode::Difference(DiffOptions::default()));
    let out = compositor.compose(&mut engine, &scene(), &opts()).unwrap();

    // Opaque mesh pixel keeps the composite colour.
    assert_eq!(out.pixel(0, 0), [0.9, 0.8, 0.7, 1.0]);
    // Transparent pixel shows viridis(0.6 - 0.2).
    let want = viridis(0.4);
    let got = out.pixel(1, 0);
    assert!(close(got[0], want[0]) && close(got[1], want[1]) && close(got[2], want[2]));
    assert_eq!(got[3], 1.0);
}

#[test]
fn opaque_composite_is_returned_exactly() {
    let comp = Frame::new(2, 1, vec![0.3, 0.6, 0.9, 1.0, 0.11, 0.22, 0.33, 1.0]).unwrap();
    let out = overlay_difference(&comp, &[0.5, 1.0]).unwrap();
    assert_eq!(out.data, comp.data);
}

#[test]
fn transparent_composite_is_pure_overlay() {
    let comp = Frame::new(2, 1, vec![0.3, 0.6, 0.9, 0.0, 0.11, 0.22, 0.33, 0.0]).unwrap();
    let out = overlay_difference(&comp, &[0.0, 1.0]).unwrap();
    let (a, b) = (viridis(0.0), viridis(1.0));
    assert_eq!(out.data, vec![a[0], a[1], a[2], 1.0, b[0], b[1], b[2], 1.0]);
}

#[test]
fn difference_scalar_clips_and_scales() {
    let fg = Frame::new(3, 1, vec![0.5; 12]).unwrap();
    let bg = Frame::new(3, 1, vec![0.6, 0.6, 0.6, 1.0, 0.4, 0.4, 0.4, 1.0, 0.0, 0.0, 0.0, 1.0])
        .unwrap();
    let s = difference_scalar(&fg, &bg, 4.0).unwrap();
    assert_eq!(s[0], 0.0);
    assert!(close(s[1], 0.4));
    assert_eq!(s[2], 1.0);
}

#[test]
fn mismatched_sizes_are_invalid_frames() {
    let a = Frame::filled(2, 1, [0.0; 4]);
    let b = Frame::filled(1, 2, [0.0; 4]);
    assert!(matches!(
        difference_scalar(&a, &b, 1.0),
        Err(RtnprError::InvalidFrame(_))
    ));
    assert!(overlay_difference(&a, &[0.0]).is_err());
}
