//! Admin analytics dashboard rendered as text cards and bar charts.

pub mod charts;
pub mod handlers;
