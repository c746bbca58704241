//! Lane layout for commit graphs.
//!
//! Given commits ordered children first and a lane budget, [`LaneLayout`]
//! assigns every edge alive at each row to a column, so a renderer can draw
//! nodes and connecting lines row by row.

pub mod core;
pub mod error;
pub mod git_backend;
pub mod layout;
pub mod render;

pub use crate::core::{Commit, Edge, EdgeKey, EdgeState, HistoryIndex, HistoryStats, RowIdx};
pub use error::{LayoutError, Result};
pub use git_backend::GitWalker;
pub use layout::{compute_lanes, LaneIdx, LaneLayout, LaneRows, Row, RowEntry};
pub use render::{Charset, TextRenderer};
