//! States of one interactive session and the transitions between them

use crate::models::price::PriceSeries;
use crate::models::query::Query;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    CollectingInput,
    Fetching(Query),
    Rendering(Query, PriceSeries),
    AskingRepeat,
    Finished,
}

/// What the work done in a state produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// All fields valid
    Collected(Query),
    Fetched(PriceSeries),
    Rendered,
    /// Fetch, extract or render error. The iteration restarts.
    Failed,
    Repeat(bool),
    /// stdin reached end of input
    InputClosed,
}

impl SessionState {
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::Finished)
    }

    /// Next state for `outcome`. Pure; the session driver performs the work.
    pub fn advance(self, outcome: Outcome) -> SessionState {
        use SessionState::*;

        match (self, outcome) {
            (_, Outcome::InputClosed) => Finished,
            (_, Outcome::Failed) => CollectingInput,
            (CollectingInput, Outcome::Collected(query)) => Fetching(query),
            (Fetching(query), Outcome::Fetched(series)) => Rendering(query, series),
            (Rendering(..), Outcome::Rendered) => AskingRepeat,
            (AskingRepeat, Outcome::Repeat(true)) => CollectingInput,
            (AskingRepeat, Outcome::Repeat(false)) => Finished,
            (state, outcome) => {
                tracing::error!("No transition from {:?} on {:?}; ending session", state, outcome);
                Finished
            }
        }
    }
}
