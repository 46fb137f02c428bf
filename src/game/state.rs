use super::action::Direction;
use super::catalog::ItemDefinition;

/// The snake never gets shorter than this
pub const MIN_SNAKE_LENGTH: usize = 3;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction of the last committed move
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if position is covered by any segment, head and tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    pub fn pop_tail(&mut self) {
        self.body.pop();
    }

    /// Append `count` copies of the tail; they unfold as the snake moves
    pub fn grow(&mut self, count: usize) {
        let tail = self.tail();
        self.body.extend(std::iter::repeat(tail).take(count));
    }

    /// Drop up to `count` tail segments without going below the minimum length.
    /// Returns how many were removed.
    pub fn shrink(&mut self, count: usize) -> usize {
        let removable = self.body.len().saturating_sub(MIN_SNAKE_LENGTH).min(count);
        self.body.truncate(self.body.len() - removable);
        removable
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initialized, waiting for `start`
    Ready,
    Running,
    Paused,
    /// Collision or full board; only `start`/`restart` leave this
    Ended,
}

/// Outcome of a pause toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseState {
    /// Was Running, now Paused: stop ticking
    Paused,
    /// Was Paused, now Running: resume ticking
    Resumed,
    /// Neither Running nor Paused; nothing changed
    Inactive,
}

/// Food on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub position: Position,
    pub item: ItemDefinition,
}

/// What the player most recently picked up, for transient display
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedItem {
    pub symbol: String,
    pub message: String,
    pub points: i32,
    pub is_positive: bool,
}

impl From<&ItemDefinition> for CollectedItem {
    fn from(item: &ItemDefinition) -> Self {
        Self {
            symbol: item.symbol.clone(),
            message: item.message.clone(),
            points: item.points,
            is_positive: item.is_positive(),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction to commit on the next tick
    pub pending_direction: Direction,
    /// `None` only after the board filled up
    pub food: Option<Food>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: i32,
    pub steps: u32,
    pub phase: Phase,
    pub last_collected: Option<CollectedItem>,
}

impl GameState {
    /// Create a new game state in the Ready phase
    pub fn new(snake: Snake, grid_width: usize, grid_height: usize) -> Self {
        Self {
            pending_direction: snake.direction,
            snake,
            food: None,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            phase: Phase::Ready,
            last_collected: None,
        }
    }

    /// Direction of the last committed move
    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Queue a turn for the next tick.
    ///
    /// Reversing onto the current direction is ignored and returns `false`.
    /// Later calls before the next tick overwrite earlier ones.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.snake.direction.is_opposite(requested) {
            return false;
        }
        self.pending_direction = requested;
        true
    }

    pub fn toggle_pause(&mut self) -> PauseState {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                PauseState::Paused
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                PauseState::Resumed
            }
            Phase::Ready | Phase::Ended => PauseState::Inactive,
        }
    }

    pub fn last_collected(&self) -> Option<&CollectedItem> {
        self.last_collected.as_ref()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.grid_width
            && pos.y >= 0
            && (pos.y as usize) < self.grid_height
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Cells not covered by the snake, row by row
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.grid_height as i32)
            .flat_map(move |y| (0..self.grid_width as i32).map(move |x| Position::new(x, y)))
            .filter(move |pos| !self.is_occupied_by_snake(*pos))
    }
}
