//! The controller that owns every piece of client-side game state.
//!
//! All mutation funnels through [`Session`]: gestures from the UI, snapshots
//! from the server and action outcomes. The server is the only source of
//! truth; local selection never survives a round trip.

use log::{debug, error, info, warn};

use super::action::GameAction;
use super::game_log::GameLog;
use super::selection::{Gesture, InteractionMachine, SelectionState};
use crate::net::{ApiError, RequestId, ServerReply};
use crate::snapshot::{GameSnapshot, SnapshotStore};

pub const CONNECTION_ERROR: &str = "Error: Could not connect to the game server.";
pub const ACTION_SUCCEEDED: &str = "Action performed successfully.";

#[derive(Debug, Default)]
pub struct Session {
    store: SnapshotStore,
    machine: InteractionMachine,
    log: GameLog,
    /// The dispatched action whose response has not arrived yet.
    in_flight: Option<GameAction>,
    /// Bumped on every snapshot replacement. Indices drawn on screen are only
    /// valid for the generation they were drawn with.
    generation: u64,
    /// Request that produced the current snapshot.
    applied_request: RequestId,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.store.current()
    }

    pub fn selection(&self) -> SelectionState {
        self.machine.selection()
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn in_flight(&self) -> Option<GameAction> {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Gestures are only meaningful with a snapshot and nothing in flight.
    pub fn is_interactive(&self) -> bool {
        self.store.current().is_some() && self.in_flight.is_none()
    }

    /// Feeds one gesture through the state machine.
    ///
    /// Returns the action the caller must dispatch. The session records it as
    /// in flight; [`Session::action_completed`] must follow.
    pub fn handle(&mut self, gesture: Gesture) -> Option<GameAction> {
        if let Some(pending) = self.in_flight {
            debug!("Ignoring {gesture:?}: waiting for the server to answer '{pending}'");
            return None;
        }
        let Some(snapshot) = self.store.current() else {
            debug!("Ignoring {gesture:?}: no snapshot yet");
            return None;
        };

        let action = self.machine.handle(gesture, snapshot, &mut self.log)?;
        info!("Dispatching action: {action}");
        self.in_flight = Some(action);
        Some(action)
    }

    /// Like [`Session::handle`] for a gesture aimed at a drawn frame. The
    /// gesture is dropped when the snapshot changed after that frame.
    pub fn handle_in_frame(&mut self, gesture: Gesture, frame_generation: u64) -> Option<GameAction> {
        if frame_generation != self.generation {
            debug!(
                "Ignoring {gesture:?}: aimed at generation {frame_generation}, now at {}",
                self.generation
            );
            return None;
        }
        self.handle(gesture)
    }

    /// Routes one server reply to the matching handler.
    pub fn apply(&mut self, reply: ServerReply) {
        match reply {
            ServerReply::Snapshot(request, Ok(snapshot)) => self.snapshot_received(request, snapshot),
            ServerReply::Snapshot(_, Err(err)) => self.snapshot_failed(&err),
            ServerReply::Action(request, action, result) => {
                self.action_completed(request, action, result)
            }
        }
    }

    /// Applies a snapshot from a plain `GET /api/game`.
    pub fn snapshot_received(&mut self, request: RequestId, snapshot: GameSnapshot) {
        if let Some(pending) = self.in_flight {
            // the action response carries the newer state
            debug!("Discarding fetched snapshot while '{pending}' is in flight");
            return;
        }
        if request < self.applied_request {
            debug!(
                "Discarding snapshot of request #{request}: #{} is already applied",
                self.applied_request
            );
            return;
        }
        self.replace_snapshot(request, snapshot);
    }

    pub fn snapshot_failed(&mut self, err: &ApiError) {
        error!("Failed to fetch game state: {err}");
        self.log.push(CONNECTION_ERROR);
    }

    /// Applies the server's answer to the action in flight.
    pub fn action_completed(
        &mut self,
        request: RequestId,
        action: GameAction,
        result: Result<GameSnapshot, ApiError>,
    ) {
        if self.in_flight != Some(action) {
            warn!("Response for '{action}' does not match the action in flight {:?}", self.in_flight);
        }
        self.in_flight = None;
        // the gesture is spent whether or not the server accepted it
        self.machine.reset();

        match result {
            Ok(snapshot) => {
                self.replace_snapshot(request, snapshot);
                self.log.push(ACTION_SUCCEEDED);
            }
            Err(err) => {
                error!("Action '{action}' failed: {err}");
                self.log.push(format!("Action failed: {}", err.reason()));
            }
        }
    }

    fn replace_snapshot(&mut self, request: RequestId, snapshot: GameSnapshot) {
        self.store.replace(snapshot);
        self.machine.reset();
        self.applied_request = self.applied_request.max(request);
        self.generation += 1;
    }
}
