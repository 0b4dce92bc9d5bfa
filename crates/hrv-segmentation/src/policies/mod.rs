//! Segmentation policies

mod events;
mod existing;
mod length;
mod time;

pub use events::FromEventsSegments;
pub use existing::ExistingSegments;
pub use length::LengthSegments;
pub use time::TimeSegments;
