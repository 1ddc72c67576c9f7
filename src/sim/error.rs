//! Errors raised by the transition model.

use thiserror::Error;

/// Errors that can occur while computing or sampling a transition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransitionError {
    #[error("Got {actions} actions for {players} players")]
    ActionCountMismatch { actions: usize, players: usize },

    #[error("Distribution for {context} sums to {total}, expected 1")]
    MalformedDistribution { context: &'static str, total: f64 },
}
