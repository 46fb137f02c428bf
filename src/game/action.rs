use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction of a drag gesture, or `None` if neither axis exceeds `threshold`.
    ///
    /// The dominant axis wins; ties go to the vertical axis.
    pub fn from_swipe(dx: i32, dy: i32, threshold: i32) -> Option<Direction> {
        if dx.abs() <= threshold && dy.abs() <= threshold {
            return None;
        }

        if dx.abs() > dy.abs() {
            Some(if dx > 0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }
}

/// Control command the presentation layer forwards to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request a direction change for the next tick
    Turn(Direction),
    /// Leave Ready (or Ended) and begin ticking
    Start,
    /// Flip between Running and Paused
    TogglePause,
    /// Re-initialize the board
    Restart,
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Turn(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Right.is_opposite(Direction::Right));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_swipe_below_threshold() {
        assert_eq!(Direction::from_swipe(0, 0, 2), None);
        assert_eq!(Direction::from_swipe(2, -2, 2), None);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        assert_eq!(Direction::from_swipe(5, 1, 2), Some(Direction::Right));
        assert_eq!(Direction::from_swipe(-5, 3, 2), Some(Direction::Left));
        assert_eq!(Direction::from_swipe(1, 4, 2), Some(Direction::Down));
        assert_eq!(Direction::from_swipe(-2, -6, 2), Some(Direction::Up));
    }

    #[test]
    fn test_command_from_direction() {
        assert_eq!(Command::from(Direction::Up), Command::Turn(Direction::Up));
    }
}
