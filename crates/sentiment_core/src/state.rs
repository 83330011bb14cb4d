use crate::{DisplayCommand, DisplayState, Presenter};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    display: DisplayState,
    pending: Option<RequestId>,
    next_request_id: RequestId,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> DisplayState {
        self.display.clone()
    }

    pub fn input(&self) -> &str {
        &self.display.input
    }

    /// The request currently awaiting a response, if any.
    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.display.input = text;
    }

    /// Applies a display command to the in-memory model. Every command the
    /// update function emits goes through here so `view()` mirrors the surface.
    pub(crate) fn apply(&mut self, command: &DisplayCommand) {
        self.display.apply(command);
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending = Some(request_id);
        request_id
    }

    /// Clears the pending slot if `request_id` owns it.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.pending == Some(request_id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
