//! Per-frame simulation tick
//!
//! Speeds are in pixels per tick; one tick runs per rendered frame.

use super::debris::update_debris;
use super::placement::{PlacementOutcome, resolve};
use super::rng::SpawnSource;
use super::state::{GameEvent, GamePhase, GameState};

/// Input latched by the host since the previous tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Stop the moving block (click/tap)
    pub place: bool,
    /// Start or restart a run (start/restart button)
    pub start: bool,
    /// New viewport size in pixels
    pub resize: Option<(f32, f32)>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl SpawnSource) {
    // The tick that ends a run is not counted towards the overlay delay
    let was_over = state.phase == GamePhase::GameOver;

    if let Some((width, height)) = input.resize {
        resize(state, width, height);
    }

    if input.start {
        start_run(state, rng);
    }

    if input.place {
        place_block(state, rng);
    }

    match state.phase {
        GamePhase::Playing => {
            let boundary = state.viewport.x;
            if let Some(current) = &mut state.current {
                current.advance(boundary);
            }
        }
        GamePhase::GameOver if was_over => {
            state.game_over_ticks = state.game_over_ticks.saturating_add(1);
        }
        GamePhase::GameOver => {}
        GamePhase::Menu => {}
    }

    update_debris(
        &mut state.debris,
        state.tuning.debris_gravity,
        state.tuning.debris_fade,
        state.viewport.y,
    );

    let delta = state.scroll.step(state.tuning.scroll_ease);
    state.apply_scroll(delta);
}

/// Reset everything and put the first block in flight
pub fn start_run(state: &mut GameState, rng: &mut impl SpawnSource) {
    state.reset_run();
    state.phase = GamePhase::Playing;
    state.spawn_block(rng.next_direction());
    state.events.push(GameEvent::Started);
    log::info!("Run started ({}x{})", state.viewport.x, state.viewport.y);
}

/// Drop the moving block onto the tower
pub fn place_block(state: &mut GameState, rng: &mut impl SpawnSource) {
    if state.phase != GamePhase::Playing {
        log::trace!("Ignoring placement in {:?}", state.phase);
        return;
    }
    let Some(mut current) = state.current.take() else {
        log::trace!("Ignoring placement with no block in flight");
        return;
    };
    let Some(top) = state.stack.top() else {
        log::warn!("Placement with an empty stack");
        state.current = Some(current);
        return;
    };

    let was_moving = current.stop();
    debug_assert!(was_moving, "block in flight was already stopped");
    let placement = resolve(&current, top, state.tuning.min_block_width);

    if let Some(slice) = placement.sliced {
        state.debris.push(slice.into_debris());
    }

    let Some(placed) = placement.placed else {
        log::debug!("Missed by {:.1}px", -placement.overlap);
        state.events.push(GameEvent::Missed);
        end_run(state);
        return;
    };

    state.score += 1;
    state.speed += state.tuning.speed_increment;
    let placed_y = placed.pos.y;
    state.events.push(GameEvent::Placed {
        score: state.score,
        width: placed.width,
        sliced: placement.sliced.map(|s| s.width).unwrap_or(0.0),
    });
    log::debug!(
        "Placed #{} width {:.1} speed {:.1}",
        state.score,
        placed.width,
        state.speed
    );
    state.stack.push(placed);

    if placement.outcome == PlacementOutcome::GameOver {
        end_run(state);
        return;
    }

    state.scroll.note_placement(placed_y, state.viewport.y, state.tuning.block_depth);
    state.spawn_block(rng.next_direction());
}

/// Update the viewport; the menu re-centres its base block
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    if !(width > 0.0 && height > 0.0) {
        log::warn!("Ignoring invalid viewport {}x{}", width, height);
        return;
    }
    state.viewport.x = width;
    state.viewport.y = height;
    if state.phase == GamePhase::Menu {
        state.reset_run();
    }
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.current = None;
    state.game_over_ticks = 0;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {} (tower height {})",
        state.score,
        state.tower_height()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::block::Direction;
    use crate::sim::rng::ScriptedSpawns;
    use crate::tuning::Tuning;

    fn playing(direction: Direction) -> (GameState, ScriptedSpawns) {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        let mut rng = ScriptedSpawns::constant(direction);
        start_run(&mut state, &mut rng);
        (state, rng)
    }

    fn place() -> TickInput {
        TickInput {
            place: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        let mut rng = ScriptedSpawns::constant(Direction::Right);

        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.current.is_none());

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        // Spawned at -200 and advanced once
        assert_eq!(state.current.as_ref().unwrap().pos.x, -197.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_place_ignored_in_menu() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        let mut rng = ScriptedSpawns::constant(Direction::Right);
        tick(&mut state, &place(), &mut rng);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_hit_scores_and_speeds_up() {
        let (mut state, mut rng) = playing(Direction::Left);
        // Line the block up exactly over the base
        state.current.as_mut().unwrap().pos.x = 300.0;

        place_block(&mut state, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 1);
        assert!((state.speed - 3.1).abs() < 1e-6);
        assert_eq!(state.stack.len(), 2);
        assert!(state.debris.is_empty());

        let next = state.current.as_ref().unwrap();
        assert_eq!(next.width, 200.0);
        assert_eq!(next.pos.x, 800.0);
        assert_eq!(next.pos.y, 440.0);
        assert!((next.speed - 3.1).abs() < 1e-6);
    }

    #[test]
    fn test_trim_shrinks_next_block() {
        let (mut state, mut rng) = playing(Direction::Right);
        state.current.as_mut().unwrap().pos.x = 350.0;

        place_block(&mut state, &mut rng);
        assert_eq!(state.stack.top().unwrap().width, 150.0);
        assert_eq!(state.stack.top().unwrap().pos.x, 350.0);
        assert!(!state.stack.top().unwrap().moving);
        assert_eq!(state.debris.len(), 1);
        assert_eq!(state.debris[0].pos.x, 500.0);
        assert_eq!(state.debris[0].width, 50.0);

        let next = state.current.as_ref().unwrap();
        assert_eq!(next.width, 150.0);
        assert_eq!(next.pos.x, -150.0);
    }

    #[test]
    fn test_miss_ends_run() {
        let (mut state, mut rng) = playing(Direction::Right);
        state.current.as_mut().unwrap().pos.x = 510.0;
        state.drain_events();

        tick(&mut state, &place(), &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.stack.len(), 1);
        assert!(state.current.is_none());
        assert_eq!(state.debris.len(), 1);
        assert_eq!(state.debris[0].width, 200.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Missed, GameEvent::GameOver { score: 0 }]
        );

        // Further input is ignored
        tick(&mut state, &place(), &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_narrow_hit_pushes_then_ends() {
        let (mut state, mut rng) = playing(Direction::Right);
        state.current.as_mut().unwrap().pos.x = 495.0;

        place_block(&mut state, &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.stack.len(), 2);
        assert_eq!(state.stack.top().unwrap().width, 5.0);
        assert_eq!(state.score, 1);
        assert!(state.current.is_none());
        let events = state.drain_events();
        assert!(matches!(events[1], GameEvent::Placed { score: 1, .. }));
        assert_eq!(events[2], GameEvent::GameOver { score: 1 });
    }

    #[test]
    fn test_restart_from_game_over() {
        let (mut state, mut rng) = playing(Direction::Right);
        state.current.as_mut().unwrap().pos.x = 300.0;
        place_block(&mut state, &mut rng);
        state.current.as_mut().unwrap().pos.x = 900.0;
        place_block(&mut state, &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 3.0);
        assert_eq!(state.stack.len(), 1);
        assert!(state.debris.is_empty());
        assert_eq!(state.scroll.debt(), 0.0);
    }

    #[test]
    fn test_game_over_freezes_but_debris_falls() {
        let (mut state, mut rng) = playing(Direction::Right);
        state.current.as_mut().unwrap().pos.x = 600.0;
        place_block(&mut state, &mut rng);
        let y0 = state.debris[0].pos.y;

        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(state.debris[0].pos.y > y0);
        assert_eq!(state.game_over_ticks, 1);
    }

    #[test]
    fn test_overlay_delay_counts_ticks() {
        let (mut state, mut rng) = playing(Direction::Right);
        state.current.as_mut().unwrap().pos.x = 600.0;
        place_block(&mut state, &mut rng);

        let delay = state.tuning.game_over_overlay_delay_ticks;
        for _ in 0..delay - 1 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert!(!state.game_over_overlay_visible());
        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(state.game_over_overlay_visible());
    }

    #[test]
    fn test_overlay_delay_starts_after_ending_tick() {
        let (mut state, mut rng) = playing(Direction::Right);
        state.current.as_mut().unwrap().pos.x = 600.0;

        tick(&mut state, &place(), &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_ticks, 0);

        let delay = state.tuning.game_over_overlay_delay_ticks;
        for _ in 0..delay - 1 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert_eq!(state.game_over_ticks, delay - 1);
        assert!(!state.game_over_overlay_visible());
        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(state.game_over_overlay_visible());
    }

    #[test]
    fn test_scroll_starts_above_midline() {
        let (mut state, mut rng) = playing(Direction::Right);
        // Base at y=500; layers at 470, 440, ... ; 290 is the first above 300
        for _ in 0..7 {
            let top_x = state.stack.top().unwrap().pos.x;
            state.current.as_mut().unwrap().pos.x = top_x;
            place_block(&mut state, &mut rng);
        }
        assert_eq!(state.stack.top().unwrap().pos.y, 290.0);
        assert_eq!(state.scroll.debt(), 30.0);

        let before = state.stack.top().unwrap().pos.y;
        tick(&mut state, &TickInput::default(), &mut rng);
        let after = state.stack.top().unwrap().pos.y;
        assert!((after - before - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_recentres_menu_only() {
        let mut state = GameState::new(Tuning::default(), 800.0, 600.0);
        resize(&mut state, 1000.0, 700.0);
        assert_eq!(state.stack.top().unwrap().pos.x, 400.0);
        assert_eq!(state.stack.top().unwrap().pos.y, 600.0);

        let mut rng = ScriptedSpawns::constant(Direction::Right);
        start_run(&mut state, &mut rng);
        resize(&mut state, 500.0, 400.0);
        assert_eq!(state.viewport.x, 500.0);
        assert_eq!(state.stack.top().unwrap().pos.x, 400.0);

        resize(&mut state, 0.0, 400.0);
        assert_eq!(state.viewport.x, 500.0);
    }
}
