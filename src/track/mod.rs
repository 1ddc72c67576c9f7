//! Track description: grid, vehicles, distractors, opponent policy and the
//! per-track hazard matrix.
//!
//! Loading these from files is left to the caller; everything here is
//! constructed in code through validating constructors.

pub mod distractor;
pub mod error;
pub mod hazard;
pub mod layout;
pub mod policy;
pub mod vehicle;

pub use distractor::Distractor;
pub use error::TrackError;
pub use hazard::HazardMatrix;
pub use layout::{CellType, Track, TrackBuilder};
pub use policy::MovementPolicy;
pub use vehicle::{Speed, Vehicle};

/// Reject probabilities that are not finite values in `[0, 1]`.
pub(crate) fn validate_probability(what: &str, probability: f64) -> Result<(), TrackError> {
    if probability.is_finite() && (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(TrackError::InvalidProbability {
            what: what.to_string(),
            probability,
        })
    }
}
