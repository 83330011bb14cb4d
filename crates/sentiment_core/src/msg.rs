#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the tweet input.
    InputChanged(String),
    /// User triggered classification of the current input.
    SubmitClicked,
    /// The collaborator answered (or failed to answer) a classify request.
    ClassifyCompleted {
        request_id: crate::RequestId,
        outcome: ClassifyOutcome,
    },
}

/// What came back from the classification collaborator, reduced to the three
/// cases the display distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyOutcome {
    /// Success status with a well-formed body.
    Classified { sentiment: String, emoji: String },
    /// Non-success status with a well-formed `{"error": ...}` body.
    Rejected { error: String },
    /// No well-formed response could be obtained.
    TransportFailed,
}
