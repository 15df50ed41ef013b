pub mod builder;
pub mod engine;

pub use builder::{StaticTextBuilder, StyledTextBuilder};
pub use engine::{CaretHit, FixedMetricsEngine, TextLayoutEngine};
