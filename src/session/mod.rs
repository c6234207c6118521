//! Interactive loop: prompt, fetch, render, ask to repeat

pub mod prompt;
pub mod state;

use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::api::AlphaVantageClient;
use crate::services::chart_service::ChartRenderer;
use crate::services::series_service;
use crate::utils::errors::{extract_clean_error, AppError};
pub use prompt::Prompter;
pub use state::{Outcome, SessionState};

pub struct Session<'a, R, W> {
    prompter: Prompter<R, W>,
    client: &'a AlphaVantageClient,
    renderer: &'a dyn ChartRenderer,
    charts_rendered: usize,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        prompter: Prompter<R, W>,
        client: &'a AlphaVantageClient,
        renderer: &'a dyn ChartRenderer,
    ) -> Self {
        Self {
            prompter,
            client,
            renderer,
            charts_rendered: 0,
        }
    }

    /// Drive the state machine until the user stops or input closes.
    /// Returns how many charts were rendered.
    ///
    /// Only terminal I/O failures end the session early.
    pub async fn run(&mut self) -> io::Result<usize> {
        let mut state = SessionState::CollectingInput;
        while !state.is_finished() {
            let outcome = self.step(&state).await?;
            state = state.advance(outcome);
        }
        info!("Session finished after {} chart(s)", self.charts_rendered);
        Ok(self.charts_rendered)
    }

    async fn step(&mut self, state: &SessionState) -> io::Result<Outcome> {
        match state {
            SessionState::CollectingInput => Ok(match self.prompter.collect_query()? {
                Some(query) => Outcome::Collected(query),
                None => Outcome::InputClosed,
            }),
            SessionState::Fetching(query) => {
                info!(
                    "Fetching {} {} from {} to {}",
                    query.symbol, query.series_kind, query.start_date, query.end_date
                );
                match series_service::fetch_series(self.client, query).await {
                    Ok(series) => Ok(Outcome::Fetched(series)),
                    Err(e) => self.report(e),
                }
            }
            SessionState::Rendering(query, series) => match self.renderer.render(series, query) {
                Ok(path) => {
                    self.charts_rendered += 1;
                    self.prompter.say(&format!("Chart saved to {}", path.display()))?;
                    Ok(Outcome::Rendered)
                }
                Err(e) => self.report(e.into()),
            },
            SessionState::AskingRepeat => Ok(match self.prompter.ask_repeat()? {
                Some(again) => Outcome::Repeat(again),
                None => Outcome::InputClosed,
            }),
            SessionState::Finished => Ok(Outcome::InputClosed),
        }
    }

    fn report(&mut self, error: AppError) -> io::Result<Outcome> {
        let message = extract_clean_error(&error.to_string());
        warn!("Iteration aborted: {}", message);
        self.prompter.say(&format!("Error: {}", message))?;
        self.prompter.say("Please try again\n")?;
        Ok(Outcome::Failed)
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }
}
