//! Range math and segment planning.
//!
//! Splits the target resource into N contiguous byte ranges (one ranged GET
//! each) and renders their byte-range specs.

mod range;

pub use range::{plan_segments, Segment};
