//! Keeps the selected entry in view.
//!
//! Pointer interaction suppresses auto-scroll so the list does not jump
//! under the cursor; the next keyboard-driven selection change re-enables it.
//! When enabled, the selection is centred in the viewport, positioned
//! instantly.

/// Viewport offset plus the auto-scroll suppression flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollSync {
    offset: usize,
    suppressed: bool,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first visible entry.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Any pointer interaction with the list.
    pub fn on_pointer(&mut self) {
        self.suppressed = true;
    }

    /// A keyboard-driven selection change.
    pub fn on_keyboard(&mut self) {
        self.suppressed = false;
    }

    /// Centres `selected` in a viewport of `height` rows, unless suppressed.
    ///
    /// Even when suppressed the offset is clamped so it never points past
    /// the end of a shrunken list.
    pub fn follow(&mut self, selected: usize, len: usize, height: usize) {
        if !self.suppressed {
            self.offset = centered_offset(selected, len, height);
        }
        self.offset = self.offset.min(max_offset(len, height));
    }

    /// Scrolls the viewport by `delta` rows (mouse wheel).
    pub fn scroll_by(&mut self, delta: isize, len: usize, height: usize) {
        self.suppressed = true;
        let target = self.offset.saturating_add_signed(delta);
        self.offset = target.min(max_offset(len, height));
    }

    /// Resets to the top, e.g. after a new listing.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

fn max_offset(len: usize, height: usize) -> usize {
    len.saturating_sub(height.max(1))
}

fn centered_offset(selected: usize, len: usize, height: usize) -> usize {
    if height == 0 {
        return selected.min(len.saturating_sub(1));
    }
    selected
        .saturating_sub(height / 2)
        .min(max_offset(len, height))
}
