pub mod graph;
pub mod kbreak;
pub mod vertex;

pub use graph::{BGEdge, BreakpointGraph, EdgeId};
pub use kbreak::KBreak;
pub use vertex::{RepeatEnd, RepeatTag, Vertex};
