//! Search bar state

/// Search state
pub struct SearchState {
    /// Text in the search field
    pub query: String,
    /// Submit on the next frame
    pub submit_requested: bool,
    /// First frame flag (for auto-focus)
    pub first_frame: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            submit_requested: false,
            first_frame: true,
        }
    }
}

impl SearchState {
    /// Consume a pending submit request
    pub fn take_submit(&mut self) -> bool {
        std::mem::take(&mut self.submit_requested)
    }
}
