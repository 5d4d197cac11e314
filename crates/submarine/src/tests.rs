//! Scenario tests driving whole mode instances

use crate::assets::SeaAssets;
use crate::config::{EmitterAnchor, SeaModeConfig};
use crate::sea_mode::{ModeError, SeaMode};
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_engine::audio::{AudioBackendConfig, AudioSystem, ListenerFrame, ListenerLock, Sample};
use sea_engine::foundation::math::{Quat, UVec2, Vec3};
use sea_engine::input::{KeyCode, KeyboardState};
use sea_engine::mode::{AppEvent, FrameDriver, Mode};
use sea_engine::render::{ClearFlags, DepthFunc, MeshBuffer, RecordingBackend, RenderCommand};
use sea_engine::scene::{SceneDescription, SceneError};
use std::sync::{Arc, Mutex};

const MESHES: &str = r#"(
    vertex_count: 48,
    meshes: [
        (name: "Hull", primitive: Triangles, start: 0, count: 36),
        (name: "Propeller", primitive: Triangles, start: 36, count: 12),
    ],
)"#;

const SCENE: &str = r#"(
    nodes: [
        (name: "SubmarineSet", position: (0.0, 0.0, -4.0)),
        (name: "Hull", parent: Some(0), mesh: Some("Hull")),
        (name: "Propeller", parent: Some(1), position: (3.0, 0.0, 0.0), mesh: Some("Propeller")),
        (name: "Camera", parent: Some(0), position: (12.0, 0.0, 3.0), rotation: (0.5, 0.5, 0.5, 0.5),
         camera: Some((fovy: 0.9, near: 0.1, far: 500.0))),
    ],
)"#;

const FRAME: f32 = 1.0 / 60.0;

fn assets_from(scene: &str) -> SeaAssets {
    let mut backend = RecordingBackend::new();
    SeaAssets::from_parts(
        MeshBuffer::from_ron(MESHES).unwrap(),
        &SceneDescription::from_ron(scene).unwrap(),
        Sample::from_mono(vec![0.5; 480]),
        &mut backend,
    )
    .unwrap()
}

fn assets() -> SeaAssets {
    assets_from(SCENE)
}

fn mode_with(config: SeaModeConfig) -> (SeaMode, Arc<AudioSystem>) {
    let audio = Arc::new(AudioSystem::default());
    let mode = SeaMode::new(&assets(), Arc::clone(&audio), config).unwrap();
    (mode, audio)
}

fn mode() -> (SeaMode, Arc<AudioSystem>) {
    mode_with(SeaModeConfig::default())
}

fn keys(held: &[KeyCode]) -> KeyboardState {
    KeyboardState::from_pressed(held.iter().copied())
}

fn run(mode: &mut SeaMode, held: &[KeyCode], seconds: f32) {
    let keyboard = keys(held);
    let frames = (seconds / FRAME).round() as usize;
    for _ in 0..frames {
        mode.update(FRAME, &keyboard);
    }
}

fn camera_world(mode: &SeaMode) -> (Vec3, Vec3) {
    let world = mode.scene().make_local_to_world(mode.camera());
    (
        world.fixed_view::<3, 1>(0, 3).into_owned(),
        world.fixed_view::<3, 1>(0, 0).into_owned().normalize(),
    )
}

#[test]
fn test_one_second_of_forward_thrust() {
    let (mut mode, _audio) = mode();
    let start = mode.scene()[mode.vehicle()].position;

    run(&mut mode, &[KeyCode::W], 1.0);

    assert_relative_eq!(mode.motion().speed(), 2.719, epsilon = 2e-3);
    let end = mode.scene()[mode.vehicle()].position;
    assert!(end.x < start.x);
    assert_relative_eq!(end.y, start.y, epsilon = 1e-6);
    assert_relative_eq!(end.z, start.z, epsilon = 1e-6);
}

#[test]
fn test_single_frame_displacement_is_exact() {
    let (mut mode, _audio) = mode();
    let start = mode.scene()[mode.vehicle()].position;

    mode.update(0.1, &keys(&[KeyCode::W]));

    let speed = 15.0 * (1.0 - (-0.2f32 * 0.1).exp());
    assert_relative_eq!(mode.motion().speed(), speed, epsilon = 1e-6);
    let end = mode.scene()[mode.vehicle()].position;
    assert_relative_eq!(end, start + Vec3::new(-speed * 0.1, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_displacement_uses_rotation_after_yaw() {
    let (mut mode, _audio) = mode();
    let start = mode.scene()[mode.vehicle()].position;

    mode.update(0.1, &keys(&[KeyCode::W, KeyCode::A]));

    let rotation = mode.scene()[mode.vehicle()].rotation;
    assert_relative_eq!(rotation.scaled_axis(), Vec3::new(0.0, 0.0, 0.05), epsilon = 1e-6);
    let speed = mode.motion().speed();
    let expected = start + rotation * Vec3::new(-speed * 0.1, 0.0, 0.0);
    assert_relative_eq!(mode.scene()[mode.vehicle()].position, expected, epsilon = 1e-6);
}

#[test]
fn test_motion_stays_bounded_under_random_input() {
    let (mut mode, _audio) = mode();
    let controls = [KeyCode::A, KeyCode::D, KeyCode::W, KeyCode::S, KeyCode::Q, KeyCode::E];
    let mut rng = StdRng::seed_from_u64(0x5ea);

    for _ in 0..5000 {
        let held: Vec<KeyCode> = controls.iter().copied().filter(|_| rng.gen_bool(0.4)).collect();
        let elapsed = rng.gen_range(0.0..0.1);
        mode.update(elapsed, &keys(&held));

        let motion = mode.motion();
        assert!(motion.speed().abs() <= 15.0 + 1e-4);
        assert!(motion.vertical_rate().abs() <= 10.0 + 1e-4);
        assert!(motion.camera_yaw().abs() <= 0.05 + 1e-6);
        assert!(mode.scene()[mode.vehicle()].position.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_motion_decays_to_rest_when_released() {
    let (mut mode, _audio) = mode();
    run(&mut mode, &[KeyCode::W, KeyCode::Q], 2.0);
    assert!(mode.motion().speed() > 4.0);

    run(&mut mode, &[], 60.0);
    assert!(mode.motion().speed().abs() < 1e-3);
    assert!(mode.motion().vertical_rate().abs() < 1e-3);

    let parked = mode.scene()[mode.vehicle()].position;
    run(&mut mode, &[], 1.0);
    assert_relative_eq!(mode.scene()[mode.vehicle()].position, parked, epsilon = 1e-3);
}

#[test]
fn test_opposing_keys_behave_like_no_keys() {
    let (mut both, _a) = mode();
    let (mut neither, _b) = mode();
    let all = [KeyCode::A, KeyCode::D, KeyCode::W, KeyCode::S, KeyCode::Q, KeyCode::E];
    run(&mut both, &all, 2.0);
    run(&mut neither, &[], 2.0);

    for id in [both.vehicle(), both.camera(), both.propeller()] {
        assert_relative_eq!(both.scene()[id].position, neither.scene()[id].position, epsilon = 1e-6);
        assert_relative_eq!(both.scene()[id].rotation, neither.scene()[id].rotation, epsilon = 1e-6);
    }
}

#[test]
fn test_camera_returns_to_default_without_drift() {
    let (mut mode, _audio) = mode();
    let default = mode.camera_default_rotation();

    run(&mut mode, &[KeyCode::A], 5.0);
    let turned = mode.scene()[mode.camera()].rotation;
    let offset = mode.motion().camera_yaw();
    assert!(offset > 0.04);
    let expected = default * Quat::from_axis_angle(&Vec3::y_axis(), offset);
    assert_relative_eq!(turned, expected, epsilon = 1e-6);

    run(&mut mode, &[KeyCode::D], 5.0);
    run(&mut mode, &[], 30.0);
    assert!(mode.scene()[mode.camera()].rotation.angle_to(&default) < 1e-4);
}

#[test]
fn test_propeller_spins_only_under_thrust() {
    let (mut mode, _audio) = mode();
    let initial = mode.scene()[mode.propeller()].rotation;

    run(&mut mode, &[KeyCode::Q], 0.5);
    assert_relative_eq!(mode.scene()[mode.propeller()].rotation, initial, epsilon = 1e-6);

    mode.update(FRAME, &keys(&[KeyCode::W]));
    let spun = mode.scene()[mode.propeller()].rotation;
    assert_relative_eq!(spun.angle_to(&initial), 0.3, epsilon = 1e-5);
}

#[test]
fn test_listener_and_emitter_follow_camera() {
    let (mut mode, audio) = mode();
    run(&mut mode, &[KeyCode::W, KeyCode::A, KeyCode::E], 1.5);

    let (position, right) = camera_world(&mode);
    let frame = audio.listener().snapshot();
    assert_relative_eq!(frame.position, position, epsilon = 1e-5);
    assert_relative_eq!(frame.right, right, epsilon = 1e-5);
    assert_relative_eq!(mode.emitter().position(), position, epsilon = 1e-5);
}

#[test]
fn test_vehicle_anchor_tracks_vehicle_root() {
    let mut config = SeaModeConfig::default();
    config.audio.anchor = EmitterAnchor::Vehicle;
    let (mut mode, _audio) = mode_with(config);
    run(&mut mode, &[KeyCode::W], 1.0);

    let vehicle = mode.scene()[mode.vehicle()].position;
    assert_relative_eq!(mode.emitter().position(), vehicle, epsilon = 1e-5);
}

/// Listener double recording each locked write
#[derive(Default)]
struct RecordingListener {
    frame: Mutex<ListenerFrame>,
    writes: Mutex<Vec<ListenerFrame>>,
}

impl ListenerLock for RecordingListener {
    fn update(&self, update: &mut dyn FnMut(&mut ListenerFrame)) {
        let mut frame = self.frame.lock().unwrap();
        update(&mut frame);
        self.writes.lock().unwrap().push(*frame);
    }

    fn snapshot(&self) -> ListenerFrame {
        *self.frame.lock().unwrap()
    }
}

#[test]
fn test_listener_pose_published_in_one_locked_write_per_frame() {
    let listener = Arc::new(RecordingListener::default());
    let audio = Arc::new(AudioSystem::with_listener(
        AudioBackendConfig::default(),
        Arc::clone(&listener) as Arc<dyn ListenerLock>,
    ));
    let mut mode = SeaMode::new(&assets(), Arc::clone(&audio), SeaModeConfig::default()).unwrap();

    let keyboard = keys(&[KeyCode::W, KeyCode::D]);
    let mut expected = Vec::new();
    for _ in 0..30 {
        mode.update(FRAME, &keyboard);
        expected.push(camera_world(&mode));
    }

    let writes = listener.writes.lock().unwrap();
    assert_eq!(writes.len(), expected.len());
    for (write, (position, right)) in writes.iter().zip(&expected) {
        assert_relative_eq!(write.position, *position, epsilon = 1e-5);
        assert_relative_eq!(write.right, *right, epsilon = 1e-5);
    }
    let last = *writes.last().unwrap();
    drop(writes);
    assert_eq!(audio.listener().snapshot(), last);
}

const TWO_CAMERAS: &str = r#"(
    nodes: [
        (name: "SubmarineSet", position: (0.0, 0.0, -4.0)),
        (name: "Periscope", parent: Some(0), position: (1.0, 0.0, 6.0),
         camera: Some((fovy: 0.7, near: 0.1, far: 500.0))),
        (name: "Hull", parent: Some(0), mesh: Some("Hull")),
        (name: "Propeller", parent: Some(2), position: (3.0, 0.0, 0.0), mesh: Some("Propeller")),
        (name: "Camera", parent: Some(0), position: (12.0, 0.0, 3.0), rotation: (0.5, 0.5, 0.5, 0.5),
         camera: Some((fovy: 0.9, near: 0.1, far: 500.0))),
    ],
)"#;

#[test]
fn test_first_declared_camera_drives_listener_while_sway_targets_camera_node() {
    let audio = Arc::new(AudioSystem::default());
    let mut mode = SeaMode::new(&assets_from(TWO_CAMERAS), Arc::clone(&audio), SeaModeConfig::default()).unwrap();
    let periscope = mode.scene().require("Periscope").unwrap();
    assert_eq!(mode.scene().cameras[0].transform, periscope);
    assert_eq!(mode.scene().cameras.len(), 2);

    run(&mut mode, &[KeyCode::W, KeyCode::A], 1.0);

    let world = mode.scene().make_local_to_world(periscope);
    let frame = audio.listener().snapshot();
    assert_relative_eq!(frame.position, world.fixed_view::<3, 1>(0, 3).into_owned(), epsilon = 1e-5);
    assert_relative_eq!(
        frame.right,
        world.fixed_view::<3, 1>(0, 0).into_owned().normalize(),
        epsilon = 1e-5
    );
    assert_relative_eq!(mode.emitter().position(), frame.position, epsilon = 1e-5);
    assert!((camera_world(&mode).0 - frame.position).norm() > 1.0);

    assert_eq!(mode.scene()[periscope].rotation, Quat::identity());
    let swayed = mode.scene()[mode.camera()].rotation;
    assert!(swayed.angle_to(&mode.camera_default_rotation()) > 1e-3);
}

#[test]
fn test_scene_without_camera_is_rejected() {
    let assets = assets_from(
        r#"(nodes: [(name: "SubmarineSet"), (name: "Camera"), (name: "Propeller", mesh: Some("Propeller"))])"#,
    );
    let result = SeaMode::new(&assets, Arc::new(AudioSystem::default()), SeaModeConfig::default());
    assert!(matches!(result, Err(ModeError::NoCamera)));
}

#[test]
fn test_missing_node_is_named_in_error() {
    let assets = assets_from(
        r#"(nodes: [(name: "SubmarineSet"), (name: "Camera", camera: Some((fovy: 1.0, near: 0.1, far: 10.0)))])"#,
    );
    let audio = Arc::new(AudioSystem::default());
    let err = SeaMode::new(&assets, Arc::clone(&audio), SeaModeConfig::default())
        .err()
        .unwrap();
    assert!(matches!(&err, ModeError::Scene(SceneError::NodeNotFound(name)) if name == "Propeller"));
    assert_eq!(err.to_string(), "Required scene node not found: Propeller");
    assert_eq!(audio.active_voices(), 0);
}

#[test]
fn test_instances_do_not_share_scene_state() {
    let assets = assets();
    let audio = Arc::new(AudioSystem::default());
    let mut first = SeaMode::new(&assets, Arc::clone(&audio), SeaModeConfig::default()).unwrap();
    let second = SeaMode::new(&assets, Arc::clone(&audio), SeaModeConfig::default()).unwrap();

    run(&mut first, &[KeyCode::W], 1.0);

    let template = assets.scene()[first.vehicle()].position;
    assert_relative_eq!(second.scene()[second.vehicle()].position, template);
    assert!(first.scene()[first.vehicle()].position.x < template.x);
}

#[test]
fn test_drop_stops_emitter() {
    let (mode, audio) = mode();
    let emitter = Arc::clone(mode.emitter());
    assert_eq!(audio.active_voices(), 1);

    drop(mode);
    assert!(emitter.is_stopped());

    let mut out = vec![0.0; 64];
    audio.mix(&mut out);
    assert_eq!(audio.active_voices(), 0);
}

#[test]
fn test_draw_sets_state_then_draws_every_drawable() {
    let (mut mode, _audio) = mode();
    let mut backend = RecordingBackend::new();
    mode.draw(UVec2::new(1600, 900), &mut backend);

    let commands = backend.commands();
    assert_eq!(
        commands[0],
        RenderCommand::Clear {
            flags: ClearFlags::COLOR | ClearFlags::DEPTH,
            color: [0.0, 0.0, 0.1, 0.0],
        }
    );
    assert_eq!(commands[1], RenderCommand::Blend(false));
    assert_eq!(commands[2], RenderCommand::DepthTest(Some(DepthFunc::LessOrEqual)));
    assert_eq!(backend.draws().count(), mode.scene().drawables.len());
    assert_relative_eq!(mode.scene().cameras[0].aspect, 16.0 / 9.0, epsilon = 1e-6);
}

#[test]
fn test_frame_driver_reports_events_unhandled() {
    let (mode, _audio) = mode();
    let mut driver = FrameDriver::new(Box::new(mode));
    let mut backend = RecordingBackend::new();
    let events = [
        AppEvent::KeyInput {
            key: KeyCode::W,
            pressed: true,
        },
        AppEvent::WindowResized {
            width: 800,
            height: 600,
        },
    ];

    driver.frame(&events, &keys(&[KeyCode::W]), FRAME, UVec2::new(800, 600), &mut backend);

    assert_eq!(driver.unhandled_events(), 2);
    assert_eq!(backend.draws().count(), 2);
}
