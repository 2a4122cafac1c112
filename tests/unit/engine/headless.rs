use super::*;
use crate::mesh::model::Mesh;
use std::sync::Arc;

fn tri_scene() -> Scene {
    let mesh = Mesh::new(
        vec![[-40.0, -40.0, 10.0], [40.0, -40.0, 10.0], [0.0, 40.0, 10.0]],
        vec![[0, 1, 2]],
    )
    .unwrap();
    let mut scene = Scene::default();
    scene.add_mesh(MeshInstance::new(Arc::new(mesh)));
    scene
}

fn small_opts() -> RenderOptions {
    RenderOptions {
        width: 15,
        height: 15,
        ..RenderOptions::default()
    }
}

#[test]
fn render_matches_requested_canvas() {
    let mut engine = HeadlessEngine::new(HeadlessOpts::default());
    let frame = engine.render(&tri_scene(), &small_opts()).unwrap();
    frame.check_canvas(small_opts().canvas()).unwrap();
    assert!(frame.data.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn center_pixel_sees_the_mesh() {
    let mut engine = HeadlessEngine::new(HeadlessOpts::default());
    let mut scene = tri_scene();
    scene.plane.transparent = true;
    let frame = engine.render(&scene, &small_opts()).unwrap();
    assert_eq!(frame.pixel(7, 7)[3], 1.0);
    assert_eq!(frame.pixel(0, 0)[3], 0.0);
}

#[test]
fn mesh_casts_a_shadow_on_the_plane() {
    let mut engine = HeadlessEngine::new(HeadlessOpts::default());
    let mut scene = tri_scene();
    scene.plane.transparent = true;
    scene.light.set_dir(Vec3::new(0.0, 1.0, 1.0));

    let opts = RenderOptions {
        width: 64,
        height: 64,
        tone_mode: crate::engine::options::ToneMode::Raw,
        ..RenderOptions::default()
    };
    let with_mesh = engine.render(&scene, &opts).unwrap();
    let without = engine
        .render(&scene.with_meshes_visible(false), &opts)
        .unwrap();

    let shadowed = with_mesh
        .pixels()
        .zip(without.pixels())
        .filter(|(a, b)| a[3] == 0.0 && b[3] == 0.0 && a[0] < b[0])
        .count();
    assert!(shadowed > 0);
}

#[test]
fn camera_orbit_keeps_radius_and_height() {
    let mut engine = HeadlessEngine::new(HeadlessOpts::default());
    let scene = tri_scene();
    let mut out = vec![Vec3::zeros(); 8];
    engine.camera_positions(&scene, &mut out).unwrap();

    assert!((out[0] - scene.camera.position).norm() < 1e-3);
    for p in &out {
        assert!((p.xy().norm() - 180.0).abs() < 1e-3);
        assert_eq!(p.z, 100.0);
    }
    assert!((out[4] - Vec3::new(0.0, 180.0, 100.0)).norm() < 1e-3);
}

#[test]
fn session_reports_configured_command() {
    let mut engine = HeadlessEngine::new(HeadlessOpts {
        command: Command::RenderAnimation,
        animation: AnimationSettings {
            frames: 3,
            light_animated: true,
            camera_animated: false,
        },
    });
    assert_eq!(engine.command(), Command::None);

    let mut scene = tri_scene();
    let mut opts = small_opts();
    let outcome = engine.interact(&mut scene, &mut opts).unwrap();
    assert_eq!(outcome.command, Command::RenderAnimation);
    assert_eq!(outcome.animation.frames, 3);
    assert_eq!(engine.command(), Command::RenderAnimation);
}

#[test]
fn non_square_canvas_indexes_row_major() {
    let mut engine = HeadlessEngine::new(HeadlessOpts::default());
    let mut scene = tri_scene();
    scene.plane.transparent = true;
    let opts = RenderOptions {
        width: 33,
        height: 9,
        ..RenderOptions::default()
    };
    let frame = engine.render(&scene, &opts).unwrap();
    frame.check_canvas(opts.canvas()).unwrap();
    assert_eq!(frame.pixel(16, 4)[3], 1.0);
    assert_eq!(frame.pixel(0, 0)[3], 0.0);
    assert_eq!(frame.pixel(32, 8)[3], 0.0);
}

#[test]
fn oversized_canvas_fails_before_rendering() {
    let mut engine = HeadlessEngine::new(HeadlessOpts::default());
    let opts = RenderOptions {
        width: 70_000,
        height: 70_000,
        ..RenderOptions::default()
    };
    assert!(matches!(
        engine.render(&tri_scene(), &opts),
        Err(RtnprError::Validation(_))
    ));
}
