//! End-to-end scenarios against the public API

use glam::Vec3;
use proptest::prelude::*;

use maze_runner::input::{Autopilot, ControllerInput, FlyController, ScriptedController};
use maze_runner::renderer::{MeshKind, SurfaceSize};
use maze_runner::sim::{
    EntityKind, FrameInput, FrameReport, GameResult, GameState, Level, LevelSet, tick,
};
use maze_runner::ui::NoControls;
use maze_runner::{SceneError, Session, Settings};

const LEVELS_JSON: &str = include_str!("../data/levels.json");

const FRAME: FrameInput = FrameInput {
    dt_ms: 16.0,
    timer_finished: false,
};

/// Stand two units behind `target` facing +X so the probe lands on it
fn aim_at(state: &mut GameState, target: Vec3) {
    state.player.direction = Vec3::X;
    state.player.position = Vec3::new(target.x - 2.0, 1.0, target.z);
}

#[test]
fn coin_under_probe_is_collected() {
    let settings = Settings::default();
    let level = Level::from_positions(vec![Vec3::new(5.0, 0.0, 5.0)], vec![], vec![]);
    let mut state = GameState::new(level, &settings, 1.0);
    aim_at(&mut state, Vec3::new(5.0, 0.0, 5.0));

    let report = tick(&mut state, &FRAME, &settings);
    assert_eq!(state.probe, Vec3::new(5.0, -1.0, 5.0));
    assert_eq!(report.score, 1);
    assert!(state.level.coins().is_empty());
}

#[test]
fn standing_on_a_beast_drains_one_health_per_frame() {
    let mut settings = Settings::default();
    // Hold the beast still so its cell stays under the probe
    settings.beast.amplitude = 0.0;
    let level = Level::from_positions(vec![], vec![], vec![Vec3::new(5.0, -1.0, 5.0)]);
    let mut state = GameState::new(level, &settings, 1.0);
    aim_at(&mut state, Vec3::new(5.0, 0.0, 5.0));

    for _ in 0..3 {
        tick(&mut state, &FRAME, &settings);
    }
    assert_eq!(state.counters.health, 7);
    assert_eq!(state.level.beasts().len(), 1);

    let mut notifications = 0;
    for _ in 0..20 {
        notifications += tick(&mut state, &FRAME, &settings).notifications.len();
    }
    assert_eq!(state.counters.health, 0);
    assert_eq!(state.result(), GameResult::LostHealthDepleted);
    assert_eq!(notifications, 1);
}

#[test]
fn reaching_the_goal_wins_and_stays_won() {
    let settings = Settings::default();
    let mut state = GameState::new(Level::default(), &settings, 1.0);
    aim_at(&mut state, Vec3::new(29.5, 0.0, 30.5));

    let report = tick(&mut state, &FRAME, &settings);
    assert_eq!(report.result, GameResult::Won);
    assert_eq!(report.notifications.len(), 1);
    assert_eq!(report.notifications[0].message(), "You win");

    // Walk away; the latch holds and stays quiet
    state.player.position = Vec3::new(0.0, 1.0, 0.0);
    for _ in 0..5 {
        let report = tick(&mut state, &FRAME, &settings);
        assert_eq!(report.result, GameResult::Won);
        assert!(report.notifications.is_empty());
    }
}

#[test]
fn timer_finishing_loses_the_round() {
    let settings = Settings::default();
    let mut state = GameState::new(Level::default(), &settings, 1.0);
    let report = tick(
        &mut state,
        &FrameInput {
            dt_ms: 16.0,
            timer_finished: true,
        },
        &settings,
    );
    assert_eq!(report.result, GameResult::LostTimeout);
    assert_eq!(report.notifications[0].message(), "Time is up");
}

#[test]
fn player_is_clamped_to_the_maze() {
    let settings = Settings::default();
    let mut state = GameState::new(Level::default(), &settings, 1.0);
    state.player.position = Vec3::new(50.0, 4.0, -50.0);
    tick(&mut state, &FRAME, &settings);
    assert_eq!(state.player.position, Vec3::new(31.0, 1.0, -31.0));
}

#[test]
fn bundled_levels_load() {
    let set = LevelSet::from_json(LEVELS_JSON).unwrap();
    let names: Vec<&str> = set.names().collect();
    assert_eq!(names, vec!["Level1", "Level2"]);
    let level = set.level("Level1").unwrap();
    assert_eq!(level.len(EntityKind::Coin), 8);
    assert!(matches!(set.level("Level9"), Err(SceneError::UnknownLevel(_))));
}

#[test]
fn level_missing_a_list_is_rejected() {
    let err = Level::from_json(r#"{ "coin": [], "health": [] }"#).unwrap_err();
    assert!(matches!(err, SceneError::MalformedLevelData(_)));
    let err = Level::from_json(r#"{ "coin": [[1, 2]], "health": [], "beast": [] }"#).unwrap_err();
    assert!(matches!(err, SceneError::MalformedLevelData(_)));
}

#[test]
fn collected_coins_are_no_longer_drawn() {
    let settings = Settings::default();
    let level = Level::from_positions(
        vec![Vec3::new(5.0, 0.0, 5.0), Vec3::new(-8.0, 0.0, 3.0)],
        vec![],
        vec![],
    );
    let session = Session::new(level, settings, 1.0).unwrap();
    let surface = SurfaceSize::new(640, 480);
    let coin_draws = |session: &Session| {
        session
            .plan(surface)
            .passes
            .iter()
            .map(|p| p.draws.iter().filter(|d| d.mesh == MeshKind::Coin).count())
            .collect::<Vec<_>>()
    };
    assert_eq!(coin_draws(&session), vec![2, 2]);

    let mut state = session.state().clone();
    aim_at(&mut state, Vec3::new(5.0, 0.0, 5.0));
    tick(&mut state, &FRAME, session.settings());
    let plan = maze_runner::renderer::compose_frame(&state, session.settings(), surface);
    for pass in &plan.passes {
        assert_eq!(pass.draws.iter().filter(|d| d.mesh == MeshKind::Coin).count(), 1);
    }
}

fn autopilot_run(seed: u64, frames: usize) -> Vec<FrameReport> {
    let settings = Settings::default();
    let level = LevelSet::from_json(LEVELS_JSON)
        .and_then(|set| set.level("Level1"))
        .unwrap();
    let pilot = Autopilot::new(seed, FlyController::from_settings(&settings.player));
    let mut session =
        Session::with_collaborators(level, settings, 16.0 / 9.0, Box::new(pilot), Box::new(NoControls))
            .unwrap();
    session.start();
    (0..frames)
        .map(|_| session.frame(&FRAME, &ControllerInput::default()))
        .collect()
}

#[test]
fn sessions_are_deterministic() {
    let a = autopilot_run(42, 2000);
    let b = autopilot_run(42, 2000);
    assert_eq!(a, b);
}

fn controller_input() -> impl Strategy<Value = ControllerInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), -40.0f32..40.0, -10.0f32..10.0).prop_map(
        |(forward, back, left, right, look_dx, look_dy)| ControllerInput {
            forward,
            back,
            left,
            right,
            look_dx,
            look_dy,
        },
    )
}

fn grid_positions(max: usize) -> impl Strategy<Value = Vec<Vec3>> {
    prop::collection::vec((-30i32..=30, -30i32..=30), 0..max)
        .prop_map(|cells| cells.into_iter().map(|(x, z)| Vec3::new(x as f32, 0.0, z as f32)).collect())
}

proptest! {
    #[test]
    fn score_plus_remaining_coins_is_conserved(
        coins in grid_positions(40),
        health in grid_positions(20),
        inputs in prop::collection::vec(controller_input(), 1..200),
    ) {
        let settings = Settings::default();
        let initial_coins = coins.len();
        let mut remaining_health = health.len();
        let level = Level::from_positions(coins, health, vec![]);
        let script = ScriptedController::new(inputs.clone(), FlyController::new(0.05, 0.01));
        let mut session = Session::with_collaborators(
            level,
            settings,
            1.0,
            Box::new(script),
            Box::new(NoControls),
        )
        .unwrap();

        for _ in 0..inputs.len() {
            let report = session.frame(&FRAME, &ControllerInput::default());
            let state = session.state();
            prop_assert_eq!(report.score as usize + state.level.coins().len(), initial_coins);
            prop_assert!(state.level.health_pickups().len() <= remaining_health);
            remaining_health = state.level.health_pickups().len();
            prop_assert!(state.player.position.x.abs() <= 31.0);
            prop_assert!(state.player.position.z.abs() <= 31.0);
        }
    }
}
