//! Sentiment core: pure submission state machine and display model.
mod effect;
mod msg;
mod presenter;
mod state;
mod update;
mod view_model;

pub use effect::{DisplayCommand, Effect};
pub use msg::{ClassifyOutcome, Msg};
pub use presenter::Presenter;
pub use state::{AppState, RequestId};
pub use update::update;
pub use view_model::{
    DisplayState, EMPTY_INPUT_PROMPT, FAILURE_ICON, LOADING_ICON, LOADING_MESSAGE,
    NETWORK_ERROR_MESSAGE,
};
