//! Result panels drawn inside the main layout

pub mod chart;
pub mod comments;
pub mod summary;
