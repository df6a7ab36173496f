use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::event::Event;
use super::focus::FocusMove;
use super::hit_map::HitMap;
use super::selection::Gesture;

/// What a terminal event asks the application to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A gesture that does not depend on what is drawn.
    Gesture(Gesture),
    /// A click on a region of the last drawn frame.
    Click(Gesture),
    MoveFocus(FocusMove),
    /// Click whatever the focus cursor is on.
    ActivateFocus,
    Refresh,
    Quit,
}

/// Maps raw terminal events onto [`InputEvent`]s using the last frame's hit map.
pub struct InputHandler;

impl InputHandler {
    pub fn translate(event: Event, hits: &HitMap) -> Option<InputEvent> {
        match event {
            Event::Key(key) => Self::key(key),
            Event::Mouse(mouse) => Self::mouse(mouse, hits),
            Event::Resize(..) => None,
        }
    }

    fn key(key: KeyEvent) -> Option<InputEvent> {
        let input = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Quit,
            KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,
            KeyCode::Char('e') => InputEvent::Gesture(Gesture::EndTurn),
            KeyCode::Char('r') => InputEvent::Refresh,
            KeyCode::Enter | KeyCode::Char(' ') => InputEvent::ActivateFocus,
            KeyCode::Up | KeyCode::Char('k') => InputEvent::MoveFocus(FocusMove::Up),
            KeyCode::Down | KeyCode::Char('j') => InputEvent::MoveFocus(FocusMove::Down),
            KeyCode::Left | KeyCode::Char('h') => InputEvent::MoveFocus(FocusMove::Left),
            KeyCode::Right | KeyCode::Char('l') => InputEvent::MoveFocus(FocusMove::Right),
            _ => return None,
        };
        Some(input)
    }

    fn mouse(mouse: MouseEvent, hits: &HitMap) -> Option<InputEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                hits.at(mouse.column, mouse.row).map(InputEvent::Click)
            }
            _ => None,
        }
    }
}
