use egui::{Color32, Pos2};
use uuid::Uuid;

use crate::geometry::distance_to_line_segment;

/// A single immutable vector segment of a freehand stroke.
///
/// Every line carries its own identity. Two lines with identical endpoints, color and width are
/// still distinct entities; clones share the identity of the original.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    id: Uuid,
    start: Pos2,
    end: Pos2,
    color: Color32,
    width: f32,
}

impl Line {
    pub fn new(start: Pos2, end: Pos2, color: Color32, width: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color,
            width,
        }
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Minimum distance from `point` to the finite segment
    pub fn distance_to(&self, point: Pos2) -> f32 {
        distance_to_line_segment(point, self.start, self.end)
    }
}

/// A line removed from the store together with the index it occupied at removal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovedLine {
    pub index: usize,
    pub line: Line,
}

/// Ordered collection of vector segments (the legacy freehand path).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, lines: &[Line]) {
        self.lines.extend_from_slice(lines);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines added after the given watermark, in insertion order.
    pub fn since(&self, watermark: usize) -> &[Line] {
        self.lines.get(watermark..).unwrap_or(&[])
    }

    pub fn contains(&self, line: &Line) -> bool {
        self.lines.iter().any(|l| l.id == line.id)
    }

    /// Removes the first entry sharing each given line's identity.
    pub fn remove_by_identity(&mut self, lines: &[Line]) {
        for line in lines {
            if let Some(index) = self.lines.iter().position(|l| l.id == line.id) {
                self.lines.remove(index);
            }
        }
    }

    /// Removes every line within `radius` of `point`, returning them with their indices in
    /// removal order.
    pub fn remove_within(&mut self, point: Pos2, radius: f32) -> Vec<RemovedLine> {
        let mut removed = Vec::new();
        let mut index = 0;
        while index < self.lines.len() {
            if self.lines[index].distance_to(point) <= radius {
                let line = self.lines.remove(index);
                removed.push(RemovedLine { index, line });
            } else {
                index += 1;
            }
        }
        removed
    }

    /// Puts removed lines back where they were. `removed` must be in removal order.
    pub fn restore(&mut self, removed: &[RemovedLine]) {
        for entry in removed.iter().rev() {
            let index = entry.index.min(self.lines.len());
            self.lines.insert(index, entry.line);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
