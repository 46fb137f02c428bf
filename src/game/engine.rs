use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    catalog::{Category, ItemCatalog, ItemDefinition},
    config::{GameConfig, validate_grid},
    error::GameError,
    state::{
        CollectedItem, CollisionType, Food, GameState, MIN_SNAKE_LENGTH, Phase, Position, Snake,
    },
};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The snake moved one cell
    Moved {
        score: i32,
        length: usize,
        ate_food: bool,
    },
    /// The snake crashed and the game ended
    Collision { kind: CollisionType },
    /// The game is not running; nothing changed
    Idle,
}

/// Signal returned by `restart`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restarted {
    /// The previous session had ended, so any game-over display should be dismissed
    pub cleared_game_over: bool,
}

/// The game engine that handles all game logic
///
/// The engine owns configuration, the item catalog and the random source. All
/// mutable session data lives in a [`GameState`] that callers pass in by
/// exclusive reference, one call at a time.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    catalog: ItemCatalog,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration and the built-in catalog
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_catalog(config, ItemCatalog::default())
    }

    pub fn with_catalog(config: GameConfig, catalog: ItemCatalog) -> Result<Self, GameError> {
        Self::with_rng(config, catalog, StdRng::from_entropy())
    }

    /// Engine with a reproducible random sequence
    pub fn seeded(config: GameConfig, catalog: ItemCatalog, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, catalog, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, catalog: ItemCatalog, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Swap the item catalog; takes effect from the next spawned food
    pub fn set_catalog(&mut self, catalog: ItemCatalog) {
        self.catalog = catalog;
    }

    /// Reset the game to initial state using the configured grid size
    pub fn reset(&mut self) -> Result<GameState, GameError> {
        self.initialize(self.config.grid_width, self.config.grid_height)
    }

    /// Build a fresh Ready state on a `width` x `height` grid and place the first food
    pub fn initialize(&mut self, width: usize, height: usize) -> Result<GameState, GameError> {
        validate_grid(width, height)?;

        let snake = Snake::new(start_head(width, height), Direction::Right, MIN_SNAKE_LENGTH);
        let mut state = GameState::new(snake, width, height);
        self.generate_food(&mut state)?;

        debug!(width, height, "game initialized");
        Ok(state)
    }

    /// Ready or Ended -> Running. An ended board is re-initialized first.
    pub fn start(&mut self, state: &mut GameState) -> Result<Phase, GameError> {
        match state.phase {
            Phase::Ready => {}
            Phase::Ended => *state = self.initialize(state.grid_width, state.grid_height)?,
            Phase::Running | Phase::Paused => return Ok(state.phase),
        }

        state.phase = Phase::Running;
        info!("game started");
        Ok(state.phase)
    }

    /// Throw away the current session and return to Ready on the same grid
    pub fn restart(&mut self, state: &mut GameState) -> Result<Restarted, GameError> {
        let cleared_game_over = state.is_over();
        *state = self.initialize(state.grid_width, state.grid_height)?;

        info!(cleared_game_over, "game restarted");
        Ok(Restarted { cleared_game_over })
    }

    /// Execute one tick of the game
    ///
    /// Self-collision is tested against the whole body as it was before the
    /// move, tail included, so chasing your own tail into the cell it is about
    /// to leave still ends the game.
    ///
    /// Returns `Err(GameError::BoardFull)` if the snake ate and no free cell is
    /// left for the next item; the game is then over.
    pub fn advance(&mut self, state: &mut GameState) -> Result<TickResult, GameError> {
        if !state.is_running() {
            return Ok(TickResult::Idle);
        }

        state.snake.direction = state.pending_direction;

        // Calculate new head position
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(kind) = check_collision(state, new_head) {
            self.end_game(state, kind);
            return Ok(TickResult::Collision { kind });
        }

        state.snake.push_head(new_head);
        state.steps += 1;

        let eaten = if state
            .food
            .as_ref()
            .is_some_and(|food| food.position == new_head)
        {
            state.food.take()
        } else {
            None
        };

        let ate_food = match eaten {
            Some(food) => {
                apply_item(state, &food.item);
                if let Err(err) = self.generate_food(state) {
                    warn!(score = state.score, "{err}");
                    state.phase = Phase::Ended;
                    return Err(err);
                }
                true
            }
            None => {
                state.snake.pop_tail();
                false
            }
        };

        Ok(TickResult::Moved {
            score: state.score,
            length: state.snake.len(),
            ate_food,
        })
    }

    /// Choose a new item and drop it on a free cell
    ///
    /// The item's category is a weighted coin flip using
    /// `positive_probability`, then the item is picked uniformly within it.
    /// Placement draws random cells until a free one turns up; after
    /// `max_spawn_attempts` misses it picks uniformly among the remaining free
    /// cells instead, so it only fails when the snake covers the whole board.
    pub fn generate_food(&mut self, state: &mut GameState) -> Result<(), GameError> {
        let item = self.pick_item()?;

        match self.pick_free_cell(state) {
            Some(position) => {
                debug!(kind = %item.kind, x = position.x, y = position.y, "food spawned");
                state.food = Some(Food { position, item });
                Ok(())
            }
            None => {
                state.food = None;
                Err(GameError::BoardFull)
            }
        }
    }

    fn pick_item(&mut self) -> Result<ItemDefinition, GameError> {
        let category = if self.rng.gen_bool(self.config.positive_probability) {
            Category::Positive
        } else {
            Category::Negative
        };

        self.catalog
            .by_category(category)
            .choose(&mut self.rng)
            .cloned()
            .ok_or(GameError::EmptyCatalog(category))
    }

    fn pick_free_cell(&mut self, state: &GameState) -> Option<Position> {
        for _ in 0..self.config.max_spawn_attempts {
            let x = self.rng.gen_range(0..state.grid_width) as i32;
            let y = self.rng.gen_range(0..state.grid_height) as i32;
            let pos = Position::new(x, y);

            if !state.is_occupied_by_snake(pos) {
                return Some(pos);
            }
        }

        state.free_cells().choose(&mut self.rng)
    }

    fn end_game(&self, state: &mut GameState, kind: CollisionType) {
        state.phase = Phase::Ended;
        info!(
            ?kind,
            score = state.score,
            length = state.snake.len(),
            "game over"
        );
    }
}

/// Head cell of the starting snake: column 5, pulled towards the middle on
/// narrow grids, middle row. The body extends to the left.
pub fn start_head(width: usize, height: usize) -> Position {
    let x = (width / 2).max(MIN_SNAKE_LENGTH - 1).min(5);
    Position::new(x as i32, (height / 2) as i32)
}

/// Check if the new head position causes a collision
fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
    if !state.is_in_bounds(pos) {
        return Some(CollisionType::Wall);
    }

    if state.is_occupied_by_snake(pos) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// Apply a collected item. The head has already been pushed and the tail not
/// yet popped, so the snake is one longer than before the tick.
///
/// Positive items keep the unpopped tail and add `points - 1` copies of it.
/// Negative items also keep the tail, then shed up to `|points|` segments
/// while the snake is longer than the minimum, a net change of
/// `1 - |points|` floored at the minimum length.
fn apply_item(state: &mut GameState, item: &ItemDefinition) {
    state.score = state.score.saturating_add(item.points);

    if item.is_positive() {
        state.snake.grow(item.points.unsigned_abs() as usize - 1);
    } else {
        state.snake.shrink(item.points.unsigned_abs() as usize);
    }

    debug!(
        kind = %item.kind,
        points = item.points,
        score = state.score,
        length = state.snake.len(),
        "item collected"
    );
    state.last_collected = Some(CollectedItem::from(item));
}
