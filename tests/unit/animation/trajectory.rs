use super::*;
use crate::{
    engine::{
        headless::{HeadlessEngine, HeadlessOpts},
        options::RenderOptions,
        session::{Command, SessionOutcome},
    },
    render::frame::Frame,
};

struct LineEngine {
    calls: usize,
}

impl Engine for LineEngine {
    fn interact(&mut self, _: &mut Scene, _: &mut RenderOptions) -> RtnprResult<SessionOutcome> {
        Ok(SessionOutcome::default())
    }

    fn render(&mut self, _: &Scene, o: &RenderOptions) -> RtnprResult<Frame> {
        Ok(Frame::filled(o.width, o.height, [0.0; 4]))
    }

    fn camera_positions(&mut self, _: &Scene, out: &mut [Vec3]) -> RtnprResult<()> {
        self.calls += 1;
        for (i, p) in out.iter_mut().enumerate() {
            *p = Vec3::new(i as f32, 0.0, 1.0);
        }
        Ok(())
    }

    fn command(&self) -> Command {
        Command::RenderAnimation
    }
}

fn settings(frames: u32, light: bool, camera: bool) -> AnimationSettings {
    AnimationSettings {
        frames,
        light_animated: light,
        camera_animated: camera,
    }
}

#[test]
fn only_requested_sequences_are_built() {
    let mut engine = LineEngine { calls: 0 };
    let scene = Scene::default();

    let t = Trajectory::plan(
        &mut engine,
        &scene,
        &settings(4, true, false),
        SweepPolicy::default(),
    )
    .unwrap();
    assert_eq!(t.len(), 4);
    assert_eq!(t.light_dirs().unwrap().len(), 4);
    assert!(t.camera_positions().is_none());
    assert_eq!(engine.calls, 0);

    let t = Trajectory::plan(
        &mut engine,
        &scene,
        &settings(4, false, true),
        SweepPolicy::default(),
    )
    .unwrap();
    assert!(t.light_dirs().is_none());
    assert_eq!(t.camera_positions().unwrap().len(), 4);
    assert_eq!(engine.calls, 1);
}

#[test]
fn frame_state_applies_to_scene() {
    let mut engine = LineEngine { calls: 0 };
    let t = Trajectory::plan(
        &mut engine,
        &Scene::default(),
        &settings(3, true, true),
        SweepPolicy::OpenInterval,
    )
    .unwrap();

    let mut scene = Scene::default();
    scene.camera.look_at(Vec3::new(5.0, 5.0, 5.0));
    let state = t.frame(FrameIndex(2));
    state.apply(&mut scene);

    assert_eq!(scene.camera.position, Vec3::new(2.0, 0.0, 1.0));
    assert_eq!(scene.camera.target, Vec3::zeros());
    assert!((scene.light.direction() - t.light_dirs().unwrap()[2]).norm() < 1e-6);
}

#[test]
fn out_of_range_frame_is_a_no_op() {
    let mut engine = LineEngine { calls: 0 };
    let t = Trajectory::plan(
        &mut engine,
        &Scene::default(),
        &settings(2, true, true),
        SweepPolicy::default(),
    )
    .unwrap();
    assert_eq!(t.frame(FrameIndex(9)), FrameState::default());
    assert_eq!(t.indices().collect::<Vec<_>>(), vec![FrameIndex(0), FrameIndex(1)]);
}

#[test]
fn headless_camera_path_has_one_entry_per_frame() {
    let mut engine = HeadlessEngine::new(HeadlessOpts::default());
    let t = Trajectory::plan(
        &mut engine,
        &Scene::default(),
        &settings(6, false, true),
        SweepPolicy::default(),
    )
    .unwrap();
    assert_eq!(t.camera_positions().unwrap().len(), 6);
}
