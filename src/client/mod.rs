//! Terminal client: interaction state machine, session controller and UI.

mod action;
mod app;
mod event;
mod focus;
mod game_log;
mod hit_map;
mod input_handler;
mod selection;
mod server_listener;
mod session;
mod tui;
mod ui;

pub use action::{ActionRequest, GameAction};
pub use app::App;
pub use game_log::GameLog;
pub use selection::{
    insert_position, Gesture, InteractionMachine, SelectionState, ATTACK_CANCELLED, ATTACK_PROMPT,
    PLACE_MINION_PROMPT,
};
pub use session::{Session, ACTION_SUCCEEDED, CONNECTION_ERROR};
