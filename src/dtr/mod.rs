//! Daily time record classification: time parsing, worked-duration
//! arithmetic, the per-record status decision tree, and aggregation.

pub mod classify;
pub mod duration;
pub mod stats;
pub mod time;
