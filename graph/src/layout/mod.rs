pub mod lane_builder;
pub mod row;

pub use lane_builder::{compute_lanes, LaneLayout, LaneRows};
pub use row::{LaneIdx, Row, RowEntry};
