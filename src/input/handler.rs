use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::{Command, Direction};

/// Minimum drag distance, in terminal cells, before a swipe counts
pub const SWIPE_THRESHOLD: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Quit,
    None,
}

pub struct InputHandler {
    drag_origin: Option<(u16, u16)>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self { drag_origin: None }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => turn(Direction::Up),
            KeyCode::Down => turn(Direction::Down),
            KeyCode::Left => turn(Direction::Left),
            KeyCode::Right => turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => turn(Direction::Right),

            // Controls
            KeyCode::Enter => KeyAction::Game(Command::Start),
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::Game(Command::TogglePause)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Track a left-button drag and turn it into a direction on release
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> KeyAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some((mouse.column, mouse.row));
                KeyAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some((start_col, start_row)) = self.drag_origin.take() else {
                    return KeyAction::None;
                };
                let dx = i32::from(mouse.column) - i32::from(start_col);
                let dy = i32::from(mouse.row) - i32::from(start_row);

                Direction::from_swipe(dx, dy, SWIPE_THRESHOLD)
                    .map(turn)
                    .unwrap_or(KeyAction::None)
            }
            _ => KeyAction::None,
        }
    }
}

fn turn(direction: Direction) -> KeyAction {
    KeyAction::Game(Command::Turn(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(up), turn(Direction::Up));

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(down), turn(Direction::Down));

        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(left), turn(Direction::Left));

        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(right), turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(w), turn(Direction::Up));

        let a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(a), turn(Direction::Left));

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(s), turn(Direction::Down));

        let d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(d), turn(Direction::Right));
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(enter),
            KeyAction::Game(Command::Start)
        );

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(space),
            KeyAction::Game(Command::TogglePause)
        );

        let p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(p),
            KeyAction::Game(Command::TogglePause)
        );

        let r = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(r),
            KeyAction::Game(Command::Restart)
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(q), KeyAction::Quit);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(x), KeyAction::None);
    }

    #[test]
    fn test_horizontal_swipe() {
        let mut handler = InputHandler::new();

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 10, 5);
        assert_eq!(handler.handle_mouse_event(down), KeyAction::None);

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 4, 6);
        assert_eq!(handler.handle_mouse_event(up), turn(Direction::Left));
    }

    #[test]
    fn test_vertical_swipe() {
        let mut handler = InputHandler::new();

        handler.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 2));
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 11, 8);
        assert_eq!(handler.handle_mouse_event(up), turn(Direction::Down));
    }

    #[test]
    fn test_short_drag_ignored() {
        let mut handler = InputHandler::new();

        handler.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 11, 6);
        assert_eq!(handler.handle_mouse_event(up), KeyAction::None);
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut handler = InputHandler::new();

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 30, 5);
        assert_eq!(handler.handle_mouse_event(up), KeyAction::None);
    }
}
