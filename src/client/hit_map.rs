use ratatui::layout::Rect;

use super::selection::Gesture;

/// Screen regions drawn in the last frame and the gesture a click on each
/// one stands for. Rebuilt every frame.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Gesture)>,
    /// Snapshot generation the regions were laid out for.
    generation: u64,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all regions ahead of drawing a frame of `generation`.
    pub fn reset(&mut self, generation: u64) {
        self.regions.clear();
        self.generation = generation;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn register(&mut self, area: Rect, gesture: Gesture) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, gesture));
        }
    }

    /// The gesture under a terminal cell. Later registrations win.
    pub fn at(&self, column: u16, row: u16) -> Option<Gesture> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| contains(*area, column, row))
            .map(|&(_, gesture)| gesture)
    }

    #[cfg(test)]
    pub(crate) fn area_of(&self, gesture: Gesture) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, registered)| *registered == gesture)
            .map(|&(area, _)| area)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}
