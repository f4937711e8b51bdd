#![warn(clippy::all, rust_2018_idioms)]

pub mod brush;
pub mod command;
pub mod document;
pub mod eraser;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod line;
pub mod raster;
pub mod shape;
pub mod state;
pub mod surface;
pub mod tool;

pub use brush::{BrushKind, BrushStyle};
pub use command::{Command, CommandHistory};
pub use document::Document;
pub use eraser::EraseSession;
pub use error::{CanvasError, CanvasResult};
pub use layer::LayerBuffer;
pub use line::{Line, LineStore};
pub use shape::{ShapeGeometry, ShapeKind};
pub use state::GestureState;
pub use surface::CanvasSurface;
pub use tool::ToolState;
