//! Type definitions for list selection state.

/// Direction to cycle through choices in a selection list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the list viewport.
///
/// Tracks the visible portion of the list when there are more choices than
/// fit on screen.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: usize,
}

/// Complete UI state for one selection list.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UiState {
    /// Position of the highlighted choice among the filtered choices
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering/searching
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
}

impl UiState {
    #[must_use]
    pub fn new(selected_index: usize, viewport_height: usize) -> Self {
        let viewport_height = viewport_height.max(1);
        let mut state = Self {
            selected_index,
            viewport: ViewportState {
                offset: 0,
                height: viewport_height,
            },
            is_filtering: false,
            filter_text: String::new(),
        };
        state.scroll_to_selection();
        state
    }

    /// Moves the highlight one step, wrapping at both ends, and keeps it
    /// inside the viewport.
    #[must_use]
    pub fn moved(&self, direction: CycleDirection, choice_count: usize) -> Self {
        let mut state = self.clone();
        if choice_count == 0 {
            return state;
        }

        state.selected_index = match direction {
            CycleDirection::Up if self.selected_index == 0 => choice_count - 1,
            CycleDirection::Up => self.selected_index - 1,
            CycleDirection::Down => (self.selected_index + 1) % choice_count,
        };
        state.scroll_to_selection();
        state
    }

    /// Updates the filter text, resetting the highlight to the first match.
    #[must_use]
    pub fn with_filter(&self, filter_text: String) -> Self {
        let mut state = self.clone();
        state.filter_text = filter_text;
        state.selected_index = 0;
        state.viewport.offset = 0;
        state
    }

    #[must_use]
    pub fn resized(&self, viewport_height: usize) -> Self {
        let mut state = self.clone();
        state.viewport.height = viewport_height.max(1);
        state.scroll_to_selection();
        state
    }

    fn scroll_to_selection(&mut self) {
        if self.selected_index < self.viewport.offset {
            self.viewport.offset = self.selected_index;
        } else if self.selected_index >= self.viewport.offset + self.viewport.height {
            self.viewport.offset = self.selected_index + 1 - self.viewport.height;
        }
    }
}
