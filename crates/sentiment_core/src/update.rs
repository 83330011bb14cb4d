use engine_logging::{engine_debug, engine_info};

use crate::view_model::{
    EMPTY_INPUT_PROMPT, FAILURE_ICON, LOADING_ICON, LOADING_MESSAGE, NETWORK_ERROR_MESSAGE,
};
use crate::{AppState, ClassifyOutcome, DisplayCommand, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Display effects are already reflected in `state.view()` when this returns;
/// the front end replays them onto its own presenter in order.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::InputChanged(text) => state.set_input(text),
        Msg::SubmitClicked => submit(&mut state, &mut effects),
        Msg::ClassifyCompleted {
            request_id,
            outcome,
        } => {
            if !state.finish_request(request_id) {
                engine_debug!("Dropping stale completion for request {}", request_id);
                return (state, effects);
            }
            let (message, icon) = match outcome {
                ClassifyOutcome::Classified { sentiment, emoji } => {
                    (format!("Sentiment: {sentiment}"), emoji)
                }
                ClassifyOutcome::Rejected { error } => {
                    (format!("Error: {error}"), FAILURE_ICON.to_owned())
                }
                ClassifyOutcome::TransportFailed => (
                    NETWORK_ERROR_MESSAGE.to_owned(),
                    FAILURE_ICON.to_owned(),
                ),
            };
            show(&mut state, &mut effects, DisplayCommand::SetMessage(message));
            show(&mut state, &mut effects, DisplayCommand::SetIcon(icon));
            show(&mut state, &mut effects, DisplayCommand::SetVisible(true));
            show(&mut state, &mut effects, DisplayCommand::ClearInput);
        }
    }

    (state, effects)
}

fn submit(state: &mut AppState, effects: &mut Vec<Effect>) {
    // Single flight: a submission while a request is outstanding is ignored.
    if let Some(pending) = state.pending() {
        engine_info!("Submission ignored; request {} still pending", pending);
        return;
    }

    show(state, effects, DisplayCommand::SetMessage(String::new()));
    show(state, effects, DisplayCommand::SetIcon(String::new()));

    let tweet = state.input().trim().to_owned();
    if tweet.is_empty() {
        show(
            state,
            effects,
            DisplayCommand::SetMessage(EMPTY_INPUT_PROMPT.to_owned()),
        );
        show(state, effects, DisplayCommand::SetVisible(true));
        return;
    }

    show(
        state,
        effects,
        DisplayCommand::SetMessage(LOADING_MESSAGE.to_owned()),
    );
    show(state, effects, DisplayCommand::SetIcon(LOADING_ICON.to_owned()));
    show(state, effects, DisplayCommand::SetVisible(true));

    let request_id = state.begin_request();
    engine_debug!(
        "Classify request {} tweet_len={}",
        request_id,
        tweet.chars().count()
    );
    effects.push(Effect::Classify { request_id, tweet });
}

fn show(state: &mut AppState, effects: &mut Vec<Effect>, command: DisplayCommand) {
    state.apply(&command);
    effects.push(command.into());
}
