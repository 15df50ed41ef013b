use crate::geometry::Size;

/// The mutable region text is laid out against.
///
/// Owned exclusively by one renderer and guarded by that renderer's lock.
/// `size` always reflects the last-requested measurement, including size-cache
/// hits, because rasterization reads the container's current size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutContainer {
    pub size: Size,
    /// Maximum number of lines; `0` means unlimited.
    pub max_lines: usize,
}

impl LayoutContainer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            size: Size::zero(),
            max_lines,
        }
    }

    pub fn is_line_limited(&self) -> bool {
        self.max_lines > 0
    }
}
