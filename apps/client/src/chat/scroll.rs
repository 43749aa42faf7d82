//! Transcript viewport and the auto-follow rule.

/// Distance from the bottom (in rows) within which the view keeps following.
pub const FOLLOW_THRESHOLD: usize = 100;

/// Lists this short always follow.
pub const ALWAYS_FOLLOW_UP_TO: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub content_height: usize,
    pub viewport_height: usize,
    /// First visible row.
    pub offset: usize,
}

impl Viewport {
    pub fn new(viewport_height: usize) -> Self {
        Self {
            content_height: 0,
            viewport_height: viewport_height.max(1),
            offset: 0,
        }
    }

    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn distance_from_bottom(&self) -> usize {
        self.content_height
            .saturating_sub(self.offset + self.viewport_height)
    }

    pub fn is_near_bottom(&self) -> bool {
        self.distance_from_bottom() < FOLLOW_THRESHOLD
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Applies a message-list mutation. Returns whether the view followed to
    /// the bottom; otherwise the reading position is kept.
    pub fn on_mutation(&mut self, content_height: usize, message_count: usize) -> bool {
        let follow = self.is_near_bottom() || message_count <= ALWAYS_FOLLOW_UP_TO;
        self.content_height = content_height;
        if follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
        follow
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.offset = (self.offset + rows).min(self.max_offset());
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn resize(&mut self, viewport_height: usize) {
        self.viewport_height = viewport_height.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    /// Row range currently visible.
    pub fn visible(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.viewport_height).min(self.content_height);
        self.offset.min(end)..end
    }
}
