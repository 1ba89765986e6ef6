//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here and is owned exclusively by it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Cell;
use super::level::{EntityKind, Level};
use crate::camera::{OrthographicCamera, PerspectiveCamera};
use crate::settings::Settings;

/// Outcome of the run, recomputed each frame until it turns terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    Ongoing,
    LostHealthDepleted,
    Won,
    LostTimeout,
}

impl GameResult {
    pub fn is_terminal(&self) -> bool {
        *self != GameResult::Ongoing
    }

    /// Pure outcome for one frame; earlier checks win when several hold
    pub fn evaluate(health: u32, probe_cell: Cell, goal: Cell, timer_finished: bool) -> Self {
        if health == 0 {
            GameResult::LostHealthDepleted
        } else if probe_cell == goal {
            GameResult::Won
        } else if timer_finished {
            GameResult::LostTimeout
        } else {
            GameResult::Ongoing
        }
    }
}

/// One-shot user-facing report of a terminal outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub result: GameResult,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self.result {
            GameResult::LostHealthDepleted => "Game over",
            GameResult::LostTimeout => "Time is up",
            GameResult::Won => "You win",
            GameResult::Ongoing => "",
        }
    }
}

/// Latches the first terminal outcome and reports it exactly once
#[derive(Debug, Clone, Copy, Default)]
pub struct Outcome {
    result: GameResult,
    notified: bool,
}

impl Outcome {
    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    /// Fold this frame's evaluation in; returns a notification on the
    /// transition frame only. Terminal results never change.
    pub fn update(&mut self, frame_result: GameResult) -> Option<Notification> {
        if self.result.is_terminal() {
            return None;
        }
        self.result = frame_result;
        if frame_result.is_terminal() && !self.notified {
            self.notified = true;
            return Some(Notification { result: frame_result });
        }
        None
    }
}

/// Score and health counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub health: u32,
    pub score: u32,
}

impl Counters {
    pub fn new(start_health: u32) -> Self {
        Self {
            health: start_health,
            score: 0,
        }
    }

    pub fn add_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn heal(&mut self) {
        self.health = self.health.saturating_add(1);
    }

    /// Health never drops below zero
    pub fn damage(&mut self) {
        self.health = self.health.saturating_sub(1);
    }
}

/// Per-frame gameplay event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Collected { kind: EntityKind, pos: Vec3 },
    BeastContact { index: usize, cell: Cell },
}

/// Complete scene state
#[derive(Debug, Clone)]
pub struct GameState {
    pub level: Level,
    pub counters: Counters,
    /// Player-controlled camera
    pub player: PerspectiveCamera,
    /// Fixed minimap camera
    pub minimap: OrthographicCamera,
    /// Avatar position from the last resolver pass
    pub probe: Vec3,
    pub outcome: Outcome,
    /// Accumulated time in milliseconds
    pub time_ms: f64,
    /// Frames simulated
    pub frame: u64,
    /// Beasts overlapping the probe last frame (for `ContactDamage::OncePerEntry`)
    pub(crate) beast_overlap: Vec<bool>,
}

impl GameState {
    pub fn new(level: Level, settings: &Settings, aspect_ratio: f32) -> Self {
        let player = PerspectiveCamera::from_settings(settings, aspect_ratio);
        let probe = super::collision::probe(&player, &settings.maze);
        let beast_overlap = vec![false; level.len(EntityKind::Beast)];
        Self {
            level,
            counters: Counters::new(settings.player.start_health),
            player,
            minimap: OrthographicCamera::from_settings(settings),
            probe,
            outcome: Outcome::default(),
            time_ms: 0.0,
            frame: 0,
            beast_overlap,
        }
    }

    pub fn result(&self) -> GameResult {
        self.outcome.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL: Cell = Cell::new(30, 31);

    #[test]
    fn test_evaluate_order() {
        // Health depletion beats goal and timeout
        assert_eq!(
            GameResult::evaluate(0, GOAL, GOAL, true),
            GameResult::LostHealthDepleted
        );
        // Goal beats timeout
        assert_eq!(GameResult::evaluate(3, GOAL, GOAL, true), GameResult::Won);
        assert_eq!(
            GameResult::evaluate(3, Cell::new(0, 0), GOAL, true),
            GameResult::LostTimeout
        );
        assert_eq!(
            GameResult::evaluate(3, Cell::new(0, 0), GOAL, false),
            GameResult::Ongoing
        );
    }

    #[test]
    fn test_outcome_notifies_once() {
        let mut outcome = Outcome::default();
        assert_eq!(outcome.update(GameResult::Ongoing), None);
        let n = outcome.update(GameResult::Won).unwrap();
        assert_eq!(n.result, GameResult::Won);
        assert_eq!(n.message(), "You win");
        assert_eq!(outcome.update(GameResult::Won), None);
        // Terminal results stick even if the frame evaluates differently
        assert_eq!(outcome.update(GameResult::Ongoing), None);
        assert_eq!(outcome.update(GameResult::LostTimeout), None);
        assert_eq!(outcome.result(), GameResult::Won);
    }

    #[test]
    fn test_counters_clamp_health() {
        let mut c = Counters::new(1);
        c.damage();
        c.damage();
        assert_eq!(c.health, 0);
        c.heal();
        assert_eq!(c.health, 1);
        c.add_score();
        assert_eq!(c.score, 1);
    }
}
