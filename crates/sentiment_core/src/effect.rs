use crate::RequestId;

/// A single mutation of the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCommand {
    SetMessage(String),
    SetIcon(String),
    SetVisible(bool),
    ClearInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Display(DisplayCommand),
    /// Send one classification request carrying the already-trimmed text.
    Classify { request_id: RequestId, tweet: String },
}

impl From<DisplayCommand> for Effect {
    fn from(command: DisplayCommand) -> Self {
        Effect::Display(command)
    }
}
