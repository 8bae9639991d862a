pub mod _structs;
pub mod orientation;
pub mod render;
pub mod state;

pub use _structs::*;
pub use orientation::oriented_leg_geometry;
pub use render::{leg_labels, summarize, LegLabel, OptionSummary};
pub use state::{PlanTicket, TripPlanner};
