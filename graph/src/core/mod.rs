pub mod commit;
pub mod edge;
pub mod history;

pub use commit::Commit;
pub use edge::{Edge, EdgeKey, EdgeState, RowIdx};
pub use history::{HistoryIndex, HistoryStats};
