use crate::Presenter;

pub const EMPTY_INPUT_PROMPT: &str = "Please enter a tweet!";
pub const LOADING_MESSAGE: &str = "Classifying...";
pub const LOADING_ICON: &str = "🤖";
pub const FAILURE_ICON: &str = "❌";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// What the user currently sees: the input field plus the result area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub input: String,
    pub message: String,
    pub icon: String,
    pub visible: bool,
}

impl Presenter for DisplayState {
    fn set_message(&mut self, text: &str) {
        self.message = text.to_owned();
    }

    fn set_icon(&mut self, icon: &str) {
        self.icon = icon.to_owned();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }
}
