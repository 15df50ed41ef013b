pub mod bitmap;
pub mod color;
pub mod container;
pub mod geometry;
pub mod scale;
pub mod text;

pub use bitmap::Bitmap;
pub use color::Color;
pub use container::LayoutContainer;
pub use geometry::{EdgeInsets, Point, Size};
pub use scale::TextScaleCategory;
pub use text::{StyledSpan, StyledTextRun, TextAttributes};
