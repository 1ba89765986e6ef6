//! Per-frame simulation step
//!
//! Runs after the controller has moved the player camera and before the frame
//! is composed: pin eye height, clamp to the maze, resolve pickups and
//! hazards, then fold the frame's outcome into the latch.

use glam::Vec3;

use super::collision::{Cell, clamp_to_maze, probe};
use super::level::{EntityKind, Level};
use super::oscillator::beast_offset;
use super::state::{Counters, GameEvent, GameResult, GameState, Notification};
use crate::settings::{ContactDamage, Settings};

/// Inputs for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Elapsed time since the previous frame (milliseconds)
    pub dt_ms: f64,
    /// The externally owned level timer has finished
    pub timer_finished: bool,
}

/// What changed this frame, for the presentation layer to apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub score_delta: i32,
    pub health_delta: i32,
    /// Counter values after the frame
    pub score: u32,
    pub health: u32,
    pub events: Vec<GameEvent>,
    /// Terminal outcome, reported on the transition frame only
    pub notifications: Vec<Notification>,
    pub result: GameResult,
}

/// Advance the scene by one frame
pub fn tick(state: &mut GameState, input: &FrameInput, settings: &Settings) -> FrameReport {
    state.time_ms += input.dt_ms;
    state.frame += 1;

    let before = state.counters;
    let mut report = FrameReport::default();

    // Terminal scenes keep animating but stop resolving
    if !state.outcome.is_terminal() {
        resolve(state, input, settings, &mut report);
    }

    report.score = state.counters.score;
    report.health = state.counters.health;
    report.score_delta = state.counters.score as i32 - before.score as i32;
    report.health_delta = state.counters.health as i32 - before.health as i32;
    report.result = state.outcome.result();
    report
}

fn resolve(state: &mut GameState, input: &FrameInput, settings: &Settings, report: &mut FrameReport) {
    let maze = &settings.maze;

    state.player.position.y = maze.eye_height;
    clamp_to_maze(&mut state.player, maze.half_extent);
    state.probe = probe(&state.player, maze);
    let probe_cell = Cell::of(state.probe);

    for pos in collect_in_cell(&mut state.level, EntityKind::Coin, probe_cell) {
        state.counters.add_score();
        log::debug!("Coin collected at {pos}, score {}", state.counters.score);
        report.events.push(GameEvent::Collected {
            kind: EntityKind::Coin,
            pos,
        });
    }

    for pos in collect_in_cell(&mut state.level, EntityKind::Health, probe_cell) {
        state.counters.heal();
        log::debug!("Health collected at {pos}, health {}", state.counters.health);
        report.events.push(GameEvent::Collected {
            kind: EntityKind::Health,
            pos,
        });
    }

    resolve_beasts(state, probe_cell, settings, report);

    let frame_result = GameResult::evaluate(
        state.counters.health,
        probe_cell,
        Cell::from(maze.goal_cell),
        input.timer_finished,
    );
    if let Some(notification) = state.outcome.update(frame_result) {
        log::info!(
            "Game finished: {:?} (score {}, health {}, frame {})",
            notification.result,
            state.counters.score,
            state.counters.health,
            state.frame
        );
        report.notifications.push(notification);
    }
}

/// Remove every entry of `kind` in `cell`, returning them in list order
fn collect_in_cell(level: &mut Level, kind: EntityKind, cell: Cell) -> Vec<Vec3> {
    let hits: Vec<usize> = level
        .list(kind)
        .iter()
        .enumerate()
        .filter(|(_, pos)| Cell::of(**pos) == cell)
        .map(|(i, _)| i)
        .collect();

    let mut taken = Vec::with_capacity(hits.len());
    // Back to front so earlier indices stay valid
    for &i in hits.iter().rev() {
        match level.remove_at(kind, i) {
            Ok(pos) => taken.push(pos),
            Err(e) => log::error!("{e}"),
        }
    }
    taken.reverse();
    taken
}

fn resolve_beasts(state: &mut GameState, probe_cell: Cell, settings: &Settings, report: &mut FrameReport) {
    let beast = &settings.beast;
    let offset = beast_offset(state.time_ms, beast.amplitude, beast.period_ms);
    let count = state.level.len(EntityKind::Beast);
    state.beast_overlap.resize(count, false);

    for (index, pos) in state.level.beasts().iter().enumerate() {
        let cell = Cell::of_beast(*pos, offset);
        let overlapping = cell == probe_cell;
        let was_overlapping = state.beast_overlap[index];
        state.beast_overlap[index] = overlapping;

        if !overlapping {
            continue;
        }
        let damages = match beast.contact {
            ContactDamage::EveryFrame => true,
            ContactDamage::OncePerEntry => !was_overlapping,
        };
        if damages {
            damage(&mut state.counters, index);
            report.events.push(GameEvent::BeastContact { index, cell });
        }
    }
}

fn damage(counters: &mut Counters, index: usize) {
    counters.damage();
    log::debug!("Beast {index} hit the player, health {}", counters.health);
}
