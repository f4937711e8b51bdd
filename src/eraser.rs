use egui::Pos2;
use log::trace;

use crate::command::Command;
use crate::layer::LayerBuffer;
use crate::line::{LineStore, RemovedLine};

/// Outcome of a single erase pass.
#[derive(Debug, Default)]
pub struct ErasePass {
    pub removed: Vec<RemovedLine>,
    pub pixels_cleared: bool,
}

/// Removes every line within `radius` of `point` and clears a transparent disc of the same
/// radius in the paint layer.
pub fn erase_at(point: Pos2, radius: f32, lines: &mut LineStore, paint: &mut LayerBuffer) -> ErasePass {
    let removed = lines.remove_within(point, radius);
    let pixels_cleared = paint.clear_circle(point, radius);
    trace!(
        "Erase at ({}, {}) r={}: {} line(s), pixels cleared: {}",
        point.x,
        point.y,
        radius,
        removed.len(),
        pixels_cleared
    );
    ErasePass {
        removed,
        pixels_cleared,
    }
}

/// One press-to-release eraser drag. Accumulates removals so the whole drag becomes a
/// single undoable command.
#[derive(Debug)]
pub struct EraseSession {
    removed: Vec<RemovedLine>,
    paint_before: LayerBuffer,
    paint_touched: bool,
}

impl EraseSession {
    /// Opens a session, snapshotting the paint layer as it is before any erasing.
    pub fn begin(paint: &LayerBuffer) -> Self {
        Self {
            removed: Vec::new(),
            paint_before: paint.clone(),
            paint_touched: false,
        }
    }

    pub fn erase_at(&mut self, point: Pos2, radius: f32, lines: &mut LineStore, paint: &mut LayerBuffer) {
        let pass = erase_at(point, radius, lines, paint);
        self.removed.extend(pass.removed);
        self.paint_touched |= pass.pixels_cleared;
    }

    /// Lines removed so far, in removal order
    pub fn removed(&self) -> &[RemovedLine] {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && !self.paint_touched
    }

    /// Closes the session. Yields a command only if a line was removed or paint was cleared.
    pub fn finish(self, paint_after: &LayerBuffer) -> Option<Command> {
        if self.is_empty() {
            return None;
        }
        Some(Command::EraseMixed {
            removed: self.removed,
            paint_before: self.paint_before,
            paint_after: paint_after.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;
    use egui::{Color32, pos2};

    #[test]
    fn untouched_session_yields_nothing() {
        let mut lines = LineStore::new();
        let mut paint = LayerBuffer::new(30, 30);
        let mut session = EraseSession::begin(&paint);
        session.erase_at(pos2(15.0, 15.0), 5.0, &mut lines, &mut paint);
        assert!(session.finish(&paint).is_none());
    }

    #[test]
    fn session_accumulates_in_order() {
        let mut lines = LineStore::new();
        let first = Line::new(pos2(0.0, 0.0), pos2(4.0, 0.0), Color32::BLACK, 1.0);
        let second = Line::new(pos2(20.0, 0.0), pos2(24.0, 0.0), Color32::BLACK, 1.0);
        lines.extend(&[first, second]);
        let mut paint = LayerBuffer::new(30, 30);

        let mut session = EraseSession::begin(&paint);
        session.erase_at(pos2(22.0, 0.0), 3.0, &mut lines, &mut paint);
        session.erase_at(pos2(2.0, 0.0), 3.0, &mut lines, &mut paint);
        let removed: Vec<Line> = session.removed().iter().map(|r| r.line).collect();
        assert_eq!(removed, vec![second, first]);
        assert!(lines.is_empty());

        match session.finish(&paint) {
            Some(Command::EraseMixed { removed, .. }) => assert_eq!(removed.len(), 2),
            other => panic!("expected an erase command, got {other:?}"),
        }
    }
}
