pub use utilities;

pub mod group;

#[cfg(feature = "tracing")]
pub mod tracing;

pub use group::{group_by, GroupOptions, Grouped, Identity, KeyFn, Shape, TryKeyFn};
