//! A live scene: game state, tuning, controller and controls
//!
//! One frame is `frame` (controller, then simulation) followed by `plan`
//! (composition). Both read the same state, so the avatar and pickups drawn
//! are the ones the resolver just saw.

use crate::error::Result;
use crate::input::{CameraController, ControllerInput, FlyController};
use crate::renderer::{FramePlan, SurfaceSize, compose_frame, minimap_rect};
use crate::settings::Settings;
use crate::sim::{FrameInput, FrameReport, GameResult, GameState, Level, tick};
use crate::ui::{Controls, NoControls};

pub struct Session {
    state: GameState,
    settings: Settings,
    controller: Box<dyn CameraController>,
    controls: Box<dyn Controls>,
    started: bool,
}

impl Session {
    /// New session driven by a `FlyController` with no widgets
    pub fn new(level: Level, settings: Settings, aspect_ratio: f32) -> Result<Self> {
        let fly = FlyController::from_settings(&settings.player);
        Self::with_collaborators(level, settings, aspect_ratio, Box::new(fly), Box::new(NoControls))
    }

    pub fn with_collaborators(
        level: Level,
        settings: Settings,
        aspect_ratio: f32,
        controller: Box<dyn CameraController>,
        controls: Box<dyn Controls>,
    ) -> Result<Self> {
        settings.validate()?;
        let state = GameState::new(level, &settings, aspect_ratio);
        Ok(Self {
            state,
            settings,
            controller,
            controls,
            started: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn result(&self) -> GameResult {
        self.state.result()
    }

    /// Show parameter widgets; idempotent
    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            self.controls.render_controls();
            log::info!(
                "Session started: {} coins, {} health, {} beasts",
                self.state.level.coins().len(),
                self.state.level.health_pickups().len(),
                self.state.level.beasts().len()
            );
        }
    }

    /// Move the camera, then resolve the frame
    pub fn frame(&mut self, input: &FrameInput, controller_input: &ControllerInput) -> FrameReport {
        if !self.state.outcome.is_terminal() {
            self.controller
                .update(&mut self.state.player, controller_input, input.dt_ms);
        }
        tick(&mut self.state, input, &self.settings)
    }

    /// Match camera aspect ratios to the surface and minimap viewport
    pub fn resize(&mut self, surface: SurfaceSize) {
        self.state.player.aspect_ratio = surface.aspect_ratio();
        let minimap = minimap_rect(surface, self.settings.minimap.size, self.settings.minimap.anchor);
        self.state.minimap.aspect_ratio = minimap.aspect_ratio();
    }

    pub fn plan(&self, surface: SurfaceSize) -> FramePlan {
        compose_frame(&self.state, &self.settings, surface)
    }

    /// Tear down widgets; idempotent
    pub fn end(&mut self) {
        if self.started {
            self.started = false;
            self.controls.clear_controls();
            log::info!(
                "Session ended after {} frames: {:?}, score {}, health {}",
                self.state.frame,
                self.state.result(),
                self.state.counters.score,
                self.state.counters.health
            );
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.end();
    }
}
