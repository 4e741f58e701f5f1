use crate::models::{RowControl, User};

/// Cursor, viewport and inner-control focus of the users table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowCursor {
    pub selected: usize,
    pub offset: usize,
    pub control: RowControl,
}

impl RowCursor {
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.control = RowControl::Row;
        }
    }

    pub fn down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
            self.control = RowControl::Row;
        }
    }

    pub fn select(&mut self, index: usize, len: usize) {
        if index < len {
            self.selected = index;
        }
    }

    pub fn next_control(&mut self) {
        self.control = self.control.next();
    }

    pub fn prev_control(&mut self) {
        self.control = self.control.prev();
    }

    /// Shifts viewport and cursor together by `delta` rows.
    pub fn scroll(&mut self, delta: isize, len: usize) {
        let max = len.saturating_sub(1);
        self.offset = self.offset.saturating_add_signed(delta).min(max);
        self.selected = self.selected.saturating_add_signed(delta).min(max);
    }

    /// Keeps the cursor inside `0..len` after the collection shrinks.
    pub fn clamp(&mut self, len: usize) {
        let max = len.saturating_sub(1);
        self.selected = self.selected.min(max);
        self.offset = self.offset.min(max);
    }

    /// Adjusts the offset so that the cursor row lies within `visible_rows`.
    pub fn ensure_visible(&mut self, visible_rows: usize) {
        let visible = visible_rows.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible {
            self.offset = self.selected + 1 - visible;
        }
    }
}

pub fn activation_label(user: &User) -> String {
    format!("View details for {}", user.name)
}

pub fn delete_label(user: &User) -> String {
    format!("Delete {}", user.name)
}
