// Scroll state shared by the content and history viewports
//
// Each viewport owns one ScrollState. The offset is the index of the first
// visible line and always stays within [0, max(0, total - viewport)], no
// matter in which order content, size and scroll changes arrive.

/// Scroll state for a single panel
///
/// Owns all state needed for scrolling: position, content size, viewport size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Current scroll offset (line index at top of viewport)
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// New content: record its size and go back to the top
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.offset = 0;
    }

    /// New viewport height; content is kept and the offset reclamped
    pub fn resize(&mut self, viewport: usize) {
        self.viewport = viewport;
        self.clamp();
    }

    /// Move by `delta` lines (negative is up), clamped to the valid range
    pub fn scroll_by(&mut self, delta: isize) {
        let target = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.offset = target.min(self.max_offset());
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.scroll_by(-(page as isize));
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.scroll_by(page as isize);
    }

    /// Jump to bottom
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Get current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    /// Get total content size
    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get viewport size
    #[cfg(test)]
    pub fn viewport(&self) -> usize {
        self.viewport
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}
