pub mod iterable;

pub use iterable::{concat_runs, Runs};
