//! Heatmap geometry and coloring: pure functions of the calendar and metric values.

pub mod calendar;
pub mod color;
pub mod value_objects;

pub use calendar::{CalendarDate, CalendarLayout};
pub use color::{ColorRamp, map_color};
pub use value_objects::*;
