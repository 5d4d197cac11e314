//! The submarine mode
//!
//! Each instance owns a private copy of the scene template. At construction
//! it resolves the nodes it drives into [`TransformId`] handles and starts the
//! ambient loop; after that the frame path only dereferences handles.
//!
//! Per frame, `update` integrates the held controls into vehicle, propeller
//! and camera transforms, then moves the emitter and publishes the camera
//! pose to the listener in one locked write.

use crate::assets::SeaAssets;
use crate::config::{EmitterAnchor, SeaModeConfig};
use crate::controls::ControlState;
use crate::vehicle::VehicleMotion;
use sea_engine::audio::{AudioSystem, ListenerLock, PlayingSample};
use sea_engine::foundation::math::{Mat4, Quat, UVec2, Vec3};
use sea_engine::input::KeyboardState;
use sea_engine::mode::{AppEvent, Mode};
use sea_engine::render::{ClearFlags, DepthFunc, RenderBackend};
use sea_engine::scene::{Scene, SceneError, TransformId};
use std::sync::Arc;
use thiserror::Error;

/// Mode construction errors
#[derive(Error, Debug)]
pub enum ModeError {
    /// The scene declares no camera to render from
    #[error("Scene has no cameras")]
    NoCamera,

    /// A required node is missing or the scene is malformed
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Player-driven submarine
pub struct SeaMode {
    scene: Scene,
    config: SeaModeConfig,
    vehicle: TransformId,
    camera: TransformId,
    propeller: TransformId,
    camera_default_rotation: Quat,
    active_camera: usize,
    motion: VehicleMotion,
    audio: Arc<AudioSystem>,
    listener: Arc<dyn ListenerLock>,
    emitter: Arc<PlayingSample>,
}

impl SeaMode {
    /// Start a mode on a copy of the asset scene
    ///
    /// The camera pose is published through `audio`'s listener handle, the
    /// same one its mixer spatializes against.
    pub fn new(assets: &SeaAssets, audio: Arc<AudioSystem>, config: SeaModeConfig) -> Result<Self, ModeError> {
        let scene = assets.scene().clone();
        if scene.cameras.is_empty() {
            return Err(ModeError::NoCamera);
        }

        for (_, transform) in scene.transforms() {
            log::debug!("Scene node: {}", transform.name());
        }
        let vehicle = scene.require(&config.nodes.vehicle)?;
        let camera = scene.require(&config.nodes.camera)?;
        let propeller = scene.require(&config.nodes.propeller)?;
        log::info!(
            "Bound vehicle '{}', camera '{}', propeller '{}'",
            config.nodes.vehicle,
            config.nodes.camera,
            config.nodes.propeller
        );

        let emitter = audio.loop_3d(
            assets.ambient(),
            config.audio.volume,
            Vec3::from(config.audio.origin),
            config.audio.half_volume_radius,
        );
        log::info!(
            "Started ambient loop ({:.1}s, half volume at {})",
            assets.ambient().duration_secs(),
            config.audio.half_volume_radius
        );

        Ok(Self {
            camera_default_rotation: scene[camera].rotation,
            scene,
            vehicle,
            camera,
            propeller,
            active_camera: 0,
            motion: VehicleMotion::new(config.vehicle.clone()),
            config,
            listener: audio.listener(),
            audio,
            emitter,
        })
    }

    /// This instance's scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Smoothed motion state
    pub fn motion(&self) -> &VehicleMotion {
        &self.motion
    }

    /// Mixer the ambient loop plays on
    pub fn audio(&self) -> &Arc<AudioSystem> {
        &self.audio
    }

    /// Ambient loop handle
    pub fn emitter(&self) -> &Arc<PlayingSample> {
        &self.emitter
    }

    /// Vehicle root handle
    pub fn vehicle(&self) -> TransformId {
        self.vehicle
    }

    /// Camera node handle
    pub fn camera(&self) -> TransformId {
        self.camera
    }

    /// Propeller handle
    pub fn propeller(&self) -> TransformId {
        self.propeller
    }

    /// Camera rotation recorded at construction
    pub fn camera_default_rotation(&self) -> Quat {
        self.camera_default_rotation
    }

    fn integrate(&mut self, controls: &ControlState, elapsed: f32) {
        let step = self.motion.step(controls, elapsed);

        let vehicle = &mut self.scene[self.vehicle];
        vehicle.rotation *= step.yaw;
        vehicle.rotation.renormalize_fast();
        vehicle.position += vehicle.rotation * step.displacement;

        let propeller = &mut self.scene[self.propeller];
        propeller.rotation *= step.propeller;
        propeller.rotation.renormalize_fast();

        self.scene[self.camera].rotation = self.camera_default_rotation * step.camera_offset;

        log::trace!(
            "speed {:.3} vertical {:.3} camera yaw {:.4}",
            self.motion.speed(),
            self.motion.vertical_rate(),
            self.motion.camera_yaw()
        );
    }

    fn sync_audio(&self) {
        let view = self.scene.make_local_to_world(self.scene.cameras[self.active_camera].transform);
        let position = column(&view, 3);
        let right = column(&view, 0);

        match self.config.audio.anchor {
            EmitterAnchor::Camera => self.emitter.set_position(position),
            EmitterAnchor::Vehicle => {
                let vehicle = self.scene.make_local_to_world(self.vehicle);
                self.emitter.set_position(column(&vehicle, 3));
            }
            EmitterAnchor::Fixed => {}
        }

        self.listener.update(&mut |frame| {
            frame.set_position(position);
            frame.set_right(right);
        });
    }
}

fn column(matrix: &Mat4, index: usize) -> Vec3 {
    matrix.fixed_view::<3, 1>(0, index).into_owned()
}

impl Mode for SeaMode {
    fn handle_event(&mut self, _event: &AppEvent, _window_size: UVec2) -> bool {
        false
    }

    fn update(&mut self, elapsed: f32, keyboard: &KeyboardState) {
        let controls = ControlState::sample(keyboard, &self.config.controls);
        self.integrate(&controls, elapsed);
        self.sync_audio();
    }

    fn draw(&mut self, drawable_size: UVec2, backend: &mut dyn RenderBackend) {
        let camera = &mut self.scene.cameras[self.active_camera];
        camera.set_aspect_from(drawable_size);

        backend.clear(ClearFlags::COLOR | ClearFlags::DEPTH, self.config.render.clear_color);
        backend.set_blend(false);
        backend.set_depth_test(Some(DepthFunc::LessOrEqual));

        self.scene.draw(&self.scene.cameras[self.active_camera], backend);
    }
}

impl Drop for SeaMode {
    fn drop(&mut self) {
        self.emitter.stop();
        log::debug!("Stopped ambient loop");
    }
}
