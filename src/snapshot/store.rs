use log::debug;

use super::GameSnapshot;

/// Holds the most recent authoritative snapshot.
///
/// There is no partial update path: the whole game world is swapped as one
/// unit. Selection reset on replacement is the job of the owning session.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Option<GameSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, snapshot: GameSnapshot) {
        debug!(
            "Replacing snapshot: turn {}, phase '{}', acting seat {}",
            snapshot.current_turn, snapshot.phase, snapshot.current_player_index
        );
        self.current = Some(snapshot);
    }

    /// `None` until the first successful fetch.
    pub fn current(&self) -> Option<&GameSnapshot> {
        self.current.as_ref()
    }
}
