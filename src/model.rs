//! Game state for Money Map.
//! One owned value holds the player, the money on the map, the score and the input;
//! the UI drives it through [`GameAction`]s.

use rand::Rng;
use std::rc::Rc;
use yew::Reducible;

use crate::config::GameConfig;
use crate::game_loop;
use crate::geo::{self, Position};
use crate::state::{Direction, InputSource, InputState, PressKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collectible {
    pub position: Position,
    /// Picked up; never flips back.
    pub collected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swing {
    pub direction: Direction,
    pub started_at_ms: f64,
}

impl Swing {
    /// Animation progress in `[0, 1)`, or `None` once the swing is over.
    pub fn progress(&self, now_ms: f64, duration_ms: f64) -> Option<f64> {
        let elapsed = now_ms - self.started_at_ms;
        if elapsed < 0.0 || elapsed >= duration_ms {
            return None;
        }
        Some(elapsed / duration_ms)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Position,
    /// Insertion order is pickup evaluation order.
    pub collectibles: Vec<Collectible>,
    pub score: u32,
    pub input: InputState,
    /// Latest weapon swing, kept after it ends so the view can tell it is over.
    pub swing: Option<Swing>,
    pub swings: u32,
    /// Bumped on every change the view should see.
    pub version: u64,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let positions = (0..config.collectible_count)
            .map(|_| geo::random_nearby(config.start, config.spawn_radius_meters, rng))
            .collect();
        Self::with_collectibles(config, positions)
    }

    pub fn with_collectibles(config: GameConfig, positions: Vec<Position>) -> Self {
        Self {
            player: config.start,
            collectibles: positions
                .into_iter()
                .map(|position| Collectible {
                    position,
                    collected: false,
                })
                .collect(),
            score: 0,
            input: InputState::new(config.double_tap_ms),
            swing: None,
            swings: 0,
            version: 0,
            config,
        }
    }

    /// Moves the player `dx` meters east and `dy` meters north, then picks up what is in reach.
    pub fn move_player(&mut self, dx: f64, dy: f64) -> usize {
        self.player = geo::offset_position(self.player, dx, dy);
        self.check_pickups()
    }

    /// Collects every uncollected item closer than the pickup radius. Returns how many.
    pub fn check_pickups(&mut self) -> usize {
        let radius = self.config.pickup_radius_meters;
        let player = self.player;
        let mut picked = 0;
        for (i, c) in self.collectibles.iter_mut().enumerate() {
            if c.collected {
                continue;
            }
            if geo::distance(player, c.position) < radius {
                c.collected = true;
                picked += 1;
                self.score = self.score.saturating_add(1);
                log::info!("picked up money #{i}, score {}", self.score);
            }
        }
        picked
    }

    pub fn remaining(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.collected).count()
    }

    pub fn nearest_remaining_meters(&self) -> Option<f64> {
        self.collectibles
            .iter()
            .filter(|c| !c.collected)
            .map(|c| geo::distance(self.player, c.position))
            .min_by(f64::total_cmp)
    }

    pub fn score_text(&self) -> String {
        format!("Money: {}", self.score)
    }

    /// Records a press; a double tap starts a swing instead of a hold.
    pub fn press(&mut self, direction: Direction, source: InputSource, now_ms: f64) -> PressKind {
        let kind = self.input.press(direction, source, now_ms);
        self.after_press(direction, source, kind, now_ms);
        kind
    }

    /// Keyboard press; `None` for an auto-repeat keydown, which changes nothing.
    pub fn key_down(&mut self, direction: Direction, repeat: bool, now_ms: f64) -> Option<PressKind> {
        let kind = self.input.key_down(direction, repeat, now_ms)?;
        self.after_press(direction, InputSource::Keyboard, kind, now_ms);
        Some(kind)
    }

    fn after_press(&mut self, direction: Direction, source: InputSource, kind: PressKind, now_ms: f64) {
        if kind == PressKind::Gesture {
            self.swing = Some(Swing {
                direction,
                started_at_ms: now_ms,
            });
            self.swings = self.swings.saturating_add(1);
            log::debug!("swing {:?} via {:?}", direction, source);
        }
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GameAction {
    Press {
        direction: Direction,
        source: InputSource,
        now_ms: f64,
    },
    KeyDown {
        direction: Direction,
        /// `KeyboardEvent.repeat`
        repeat: bool,
        now_ms: f64,
    },
    Release {
        direction: Direction,
        source: InputSource,
    },
    PointerLeave {
        direction: Direction,
    },
    /// One animation frame.
    Tick,
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        if matches!(action, Tick) && !self.input.any_held() {
            return self;
        }
        let mut new = (*self).clone();
        match action {
            Press {
                direction,
                source,
                now_ms,
            } => {
                new.press(direction, source, now_ms);
            }
            KeyDown {
                direction,
                repeat,
                now_ms,
            } => {
                if new.key_down(direction, repeat, now_ms).is_none() {
                    return self;
                }
            }
            Release { direction, source } => {
                if !new.input.is_held(direction, source) {
                    return self;
                }
                new.input.release(direction, source);
            }
            PointerLeave { direction } => {
                if !new.input.is_held(direction, InputSource::Pointer) {
                    return self;
                }
                new.input.pointer_leave(direction);
            }
            Tick => {
                let outcome = game_loop::tick(&mut new);
                if !outcome.moved {
                    // opposite holds cancelled out; skip the re-render
                    return self;
                }
                if outcome.picked_up > 0 && new.remaining() == 0 {
                    log::info!("all money collected, score {}", new.score);
                }
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn origin_config() -> GameConfig {
        GameConfig {
            start: Position::new(0.0, 0.0),
            ..GameConfig::default()
        }
    }

    fn ring(center: Position, radius: f64, count: usize) -> Vec<Position> {
        (0..count)
            .map(|i| {
                let a = i as f64 / count as f64 * std::f64::consts::TAU;
                geo::offset_position(center, radius * a.cos(), radius * a.sin())
            })
            .collect()
    }

    #[test]
    fn new_scatters_money_around_the_start() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let state = GameState::new(config, &mut rng);
        assert_eq!(state.collectibles.len(), 10);
        assert_eq!(state.player, config.start);
        assert_eq!(state.score, 0);
        assert_eq!(state.score_text(), "Money: 0");
        for c in &state.collectibles {
            assert!(!c.collected);
            let (dx, dy) = geo::local_offset(config.start, c.position);
            assert!(dx.abs() <= 200.0 + 1e-6 && dy.abs() <= 200.0 + 1e-6);
        }
    }

    #[test]
    fn moving_across_the_threshold_collects_exactly_that_item() {
        let config = origin_config();
        let mut state = GameState::with_collectibles(config, ring(config.start, 15.0, 10));
        assert_eq!(state.check_pickups(), 0);

        // item 0 sits 15 m east; step 6 m toward it
        let picked = state.move_player(6.0, 0.0);
        assert_eq!(picked, 1);
        assert_eq!(state.score, 1);
        assert!(state.collectibles[0].collected);
        assert_eq!(state.remaining(), 9);
        assert_eq!(state.score_text(), "Money: 1");
        let nearest = state.nearest_remaining_meters().unwrap();
        assert!(nearest > 10.0 && nearest < 11.0, "nearest {nearest}");
    }

    #[test]
    fn nothing_left_means_no_nearest() {
        let config = origin_config();
        let mut state = GameState::with_collectibles(config, ring(config.start, 2.0, 3));
        state.check_pickups();
        assert_eq!(state.nearest_remaining_meters(), None);
    }

    #[test]
    fn items_within_reach_are_all_collected_at_once() {
        let config = origin_config();
        let mut positions = ring(config.start, 5.0, 10);
        positions.push(geo::offset_position(config.start, 0.0, 50.0));
        let mut state = GameState::with_collectibles(config, positions);
        assert_eq!(state.check_pickups(), 10);
        assert_eq!(state.score, 10);
        assert!(!state.collectibles[10].collected);
    }

    #[test]
    fn collected_items_are_not_counted_twice() {
        let config = origin_config();
        let mut state =
            GameState::with_collectibles(config, vec![geo::offset_position(config.start, 3.0, 0.0)]);
        assert_eq!(state.check_pickups(), 1);
        assert_eq!(state.move_player(0.1, 0.0), 0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn walking_into_reach_collects() {
        let config = origin_config();
        let far = geo::offset_position(config.start, 0.0, 10.5);
        let mut state = GameState::with_collectibles(config, vec![far]);
        assert_eq!(state.check_pickups(), 0);
        state.move_player(0.0, 1.0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn pickup_radius_is_exclusive() {
        let start = Position::new(0.0, 0.0);
        let coin = geo::offset_position(start, 3.0, 9.0);
        let d = geo::distance(start, coin);

        let at_radius = GameConfig {
            start,
            pickup_radius_meters: d,
            ..GameConfig::default()
        };
        let mut state = GameState::with_collectibles(at_radius, vec![coin]);
        assert_eq!(state.check_pickups(), 0);

        let just_above = GameConfig {
            pickup_radius_meters: d + 1e-6,
            ..at_radius
        };
        let mut state = GameState::with_collectibles(just_above, vec![coin]);
        assert_eq!(state.check_pickups(), 1);

        let just_below = GameConfig {
            pickup_radius_meters: d - 1e-6,
            ..at_radius
        };
        let mut state = GameState::with_collectibles(just_below, vec![coin]);
        assert_eq!(state.check_pickups(), 0);
    }

    #[test]
    fn double_tap_starts_a_swing() {
        let mut state = GameState::with_collectibles(origin_config(), Vec::new());
        assert_eq!(state.press(Direction::Up, InputSource::Keyboard, 1_000.0), PressKind::HoldStart);
        state.input.release(Direction::Up, InputSource::Keyboard);
        assert_eq!(state.press(Direction::Up, InputSource::Keyboard, 1_200.0), PressKind::Gesture);
        let swing = state.swing.expect("swing recorded");
        assert_eq!(swing.direction, Direction::Up);
        assert_eq!(state.swings, 1);
        assert_eq!(swing.progress(1_350.0, 300.0), Some(0.5));
        assert_eq!(swing.progress(1_500.0, 300.0), None);
    }

    #[test]
    fn reducer_skips_unchanged_ticks_and_releases() {
        let state = Rc::new(GameState::with_collectibles(origin_config(), Vec::new()));
        let same = state.clone().reduce(GameAction::Tick);
        assert!(Rc::ptr_eq(&state, &same));
        let same = state.clone().reduce(GameAction::Release {
            direction: Direction::Left,
            source: InputSource::Pointer,
        });
        assert!(Rc::ptr_eq(&state, &same));
    }

    #[test]
    fn reducer_ignores_key_repeat() {
        let mut state = Rc::new(GameState::with_collectibles(origin_config(), Vec::new()));
        state = state.reduce(GameAction::KeyDown {
            direction: Direction::Right,
            repeat: false,
            now_ms: 2_000.0,
        });
        assert!(state.input.is_held(Direction::Right, InputSource::Keyboard));
        let repeated = state.clone().reduce(GameAction::KeyDown {
            direction: Direction::Right,
            repeat: true,
            now_ms: 2_030.0,
        });
        assert!(Rc::ptr_eq(&state, &repeated));
        assert_eq!(repeated.swings, 0);
        assert!(repeated.swing.is_none());
    }

    #[test]
    fn reducer_moves_while_held_and_stops_after_release() {
        let mut state = Rc::new(GameState::with_collectibles(origin_config(), Vec::new()));
        state = state.reduce(GameAction::Press {
            direction: Direction::Up,
            source: InputSource::Pointer,
            now_ms: 10_000.0,
        });
        let v0 = state.version;
        state = state.reduce(GameAction::Tick);
        assert!(state.player.lat > 0.0);
        assert!(state.version > v0);

        state = state.reduce(GameAction::PointerLeave {
            direction: Direction::Up,
        });
        let parked = state.player;
        state = state.reduce(GameAction::Tick);
        assert_eq!(state.player, parked);
    }
}
