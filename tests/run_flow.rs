//! Full runs driven through the public simulation API

use proptest::prelude::*;

use tower_stack::Tuning;
use tower_stack::sim::{
    Block, Debris, Direction, GameEvent, GamePhase, PlacementOutcome, ScriptedSpawns, Simulation,
    TickInput, resolve,
};

fn start() -> TickInput {
    TickInput {
        start: true,
        ..Default::default()
    }
}

fn place() -> TickInput {
    TickInput {
        place: true,
        ..Default::default()
    }
}

fn new_sim(direction: Direction) -> Simulation<ScriptedSpawns> {
    Simulation::with_source(
        Tuning::default(),
        800.0,
        600.0,
        ScriptedSpawns::constant(direction),
    )
}

/// Put the moving block at `top.x + offset`, then press on the next tick
fn drop_at_offset(sim: &mut Simulation<ScriptedSpawns>, offset: f32) {
    let top_x = sim.state().stack.top().unwrap().pos.x;
    sim.state_mut().current.as_mut().unwrap().pos.x = top_x + offset;
    sim.step(&place());
}

#[test]
fn placement_example_right_overhang() {
    let top = Block::stationary(glam::Vec2::new(100.0, 400.0), 200.0, 30.0, 0);
    let current = Block::moving(
        glam::Vec2::new(250.0, 370.0),
        200.0,
        30.0,
        3.0,
        Direction::Right,
        0,
    );
    let p = resolve(&current, &top, 10.0);
    assert_eq!(p.outcome, PlacementOutcome::Hit);
    assert_eq!(p.overlap, 50.0);
    let placed = p.placed.unwrap();
    assert_eq!((placed.pos.x, placed.width), (250.0, 50.0));
    let sliced = p.sliced.unwrap();
    assert_eq!((sliced.x, sliced.width), (300.0, 150.0));
}

#[test]
fn placement_example_miss_ends_run() {
    let mut sim = new_sim(Direction::Right);
    sim.step(&start());
    // Base sits at x=300 with width 200; 210 to the right leaves overlap -10
    drop_at_offset(&mut sim, 210.0);

    let state = sim.state();
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.debris.len(), 1);
    assert_eq!(state.debris[0].width, 200.0);
    assert!(state.current.is_none());
}

#[test]
fn score_and_speed_track_placements() {
    let mut sim = new_sim(Direction::Right);
    sim.step(&start());

    for n in 1..=20u32 {
        drop_at_offset(&mut sim, 0.0);
        let state = sim.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, n);
        let expected = 3.0 + 0.1 * n as f32;
        assert!((state.speed - expected).abs() < 1e-4, "n={} speed={}", n, state.speed);
        assert_eq!(state.stack.len(), n as usize + 1);
    }

    // A new run resets both
    sim.step(&start());
    assert_eq!(sim.state().score, 0);
    assert_eq!(sim.state().speed, 3.0);
}

#[test]
fn widths_never_grow_up_the_tower() {
    let mut sim = new_sim(Direction::Left);
    sim.step(&start());

    let offsets = [7.0, -12.0, 3.0, -1.0, 20.0, -9.0];
    for offset in offsets {
        drop_at_offset(&mut sim, offset);
    }
    let widths: Vec<f32> = sim.state().stack.iter().map(|b| b.width).collect();
    assert!(widths.windows(2).all(|w| w[1] <= w[0]), "{:?}", widths);
    assert_eq!(sim.state().phase, GamePhase::Playing);
}

#[test]
fn narrow_placement_stacks_then_ends() {
    let mut sim = new_sim(Direction::Right);
    sim.step(&start());
    sim.drain_events();
    drop_at_offset(&mut sim, 192.0);

    let state = sim.state();
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.stack.len(), 2);
    assert_eq!(state.stack.top().unwrap().width, 8.0);

    let events = sim.drain_events();
    assert!(matches!(events[0], GameEvent::Placed { score: 1, .. }));
    assert_eq!(events[1], GameEvent::GameOver { score: 1 });

    // Placement input is ignored until restart
    sim.step(&place());
    assert!(sim.drain_events().is_empty());
}

#[test]
fn tall_tower_stays_on_screen() {
    let mut sim = new_sim(Direction::Right);
    sim.step(&start());

    for _ in 0..40 {
        drop_at_offset(&mut sim, 0.0);
        for _ in 0..30 {
            sim.step(&TickInput::default());
        }
    }
    let state = sim.state();
    assert_eq!(state.phase, GamePhase::Playing);
    let top_y = state.stack.top().unwrap().pos.y;
    assert!(top_y > 0.0 && top_y < 600.0, "top_y = {}", top_y);
}

#[test]
fn placement_ignored_in_menu() {
    let mut sim = new_sim(Direction::Right);
    sim.step(&place());
    assert_eq!(sim.state().phase, GamePhase::Menu);
    assert!(sim.drain_events().is_empty());
}

proptest! {
    #[test]
    fn scroll_moves_every_entity_equally(
        placements in 7usize..12,
        debris_y in proptest::collection::vec(0.0f32..500.0, 0..5),
    ) {
        let mut sim = new_sim(Direction::Right);
        sim.step(&start());
        for _ in 0..placements {
            drop_at_offset(&mut sim, 0.0);
        }
        prop_assert!(sim.state().scroll.debt() > 0.0);

        for y in &debris_y {
            // Zero gravity and fade so only scroll moves them
            sim.state_mut().debris.push(Debris::new(glam::Vec2::new(0.0, *y), 5.0, 5.0, 0));
        }
        sim.state_mut().tuning.debris_gravity = 0.0;
        sim.state_mut().tuning.debris_fade = 0.0;

        let before: Vec<f32> = collect_ys(sim.state());
        sim.step(&TickInput::default());
        let after: Vec<f32> = collect_ys(sim.state());

        prop_assert_eq!(before.len(), after.len());
        let delta = after[0] - before[0];
        prop_assert!(delta > 0.0);
        for (b, a) in before.iter().zip(&after) {
            prop_assert!(((a - b) - delta).abs() < 1e-3);
        }
    }
}

fn collect_ys(state: &tower_stack::sim::GameState) -> Vec<f32> {
    let mut ys: Vec<f32> = state.stack.iter().map(|b| b.pos.y).collect();
    ys.extend(state.debris.iter().map(|d| d.pos.y));
    if let Some(current) = &state.current {
        ys.push(current.pos.y);
    }
    ys
}
