pub mod account_page;
pub mod app;
pub mod list;
pub mod message_overlay;
pub mod settings;
pub mod theme;
pub mod top_bar;

pub use app::BunpoApp;

use list::FilterMode;

/// State changes requested while drawing. Rendering never mutates the app;
/// it queues actions that run after the frame is laid out.
pub enum UiAction {
    ToggleLearned(u32),
    ToggleExpanded(u32),
    SetSearch(String),
    SetFilter(FilterMode),
    OpenCheckout(String),
    OpenBillingPortal,
    SendFeedback(String),
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
