//! Vehicle actions.
//!
//! Three forward actions of increasing distance, two diagonal actions that
//! are subject to steering error, and staying in place. Whether a vehicle
//! can actually perform a forward action depends on its speed tier; see
//! `Vehicle::supported_action`.

use serde::{Deserialize, Serialize};

use super::grid::Direction;

/// A single-turn action for a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move one cell east.
    ForwardSlow,
    /// Move up to two cells east.
    ForwardMedium,
    /// Move up to three cells east.
    ForwardFast,
    /// Steer north-east (stochastic).
    NorthEast,
    /// Steer south-east (stochastic).
    SouthEast,
    /// Stay in the current cell.
    Stay,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 6] = [
        Action::ForwardSlow,
        Action::ForwardMedium,
        Action::ForwardFast,
        Action::NorthEast,
        Action::SouthEast,
        Action::Stay,
    ];

    /// The forward action covering `distance` cells (0 = stay, capped at 3).
    #[must_use]
    pub const fn forward(distance: usize) -> Self {
        match distance {
            0 => Action::Stay,
            1 => Action::ForwardSlow,
            2 => Action::ForwardMedium,
            _ => Action::ForwardFast,
        }
    }

    /// Maximum number of cells this action travels east in a straight line.
    ///
    /// Zero for diagonal actions and `Stay`.
    #[must_use]
    pub const fn forward_distance(self) -> usize {
        match self {
            Action::ForwardSlow => 1,
            Action::ForwardMedium => 2,
            Action::ForwardFast => 3,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn is_forward(self) -> bool {
        self.forward_distance() > 0
    }

    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Action::NorthEast | Action::SouthEast)
    }

    /// Intended direction of a diagonal action.
    #[must_use]
    pub const fn diagonal(self) -> Option<Direction> {
        match self {
            Action::NorthEast => Some(Direction::NE),
            Action::SouthEast => Some(Direction::SE),
            _ => None,
        }
    }

    /// Sideways direction a diagonal action slips into on a steering error.
    #[must_use]
    pub const fn cardinal(self) -> Option<Direction> {
        match self {
            Action::NorthEast => Some(Direction::N),
            Action::SouthEast => Some(Direction::S),
            _ => None,
        }
    }

    /// Short code used in logs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Action::ForwardSlow => "FS",
            Action::ForwardMedium => "FM",
            Action::ForwardFast => "FF",
            Action::NorthEast => "NE",
            Action::SouthEast => "SE",
            Action::Stay => "ST",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_distance() {
        assert_eq!(Action::ForwardSlow.forward_distance(), 1);
        assert_eq!(Action::ForwardMedium.forward_distance(), 2);
        assert_eq!(Action::ForwardFast.forward_distance(), 3);
        assert_eq!(Action::NorthEast.forward_distance(), 0);
        assert_eq!(Action::Stay.forward_distance(), 0);
    }

    #[test]
    fn test_forward_constructor_round_trips_distance() {
        for distance in 0..=3 {
            assert_eq!(Action::forward(distance).forward_distance(), distance);
        }
        assert_eq!(Action::forward(9), Action::ForwardFast);
    }

    #[test]
    fn test_diagonal_directions() {
        assert_eq!(Action::NorthEast.diagonal(), Some(Direction::NE));
        assert_eq!(Action::NorthEast.cardinal(), Some(Direction::N));
        assert_eq!(Action::SouthEast.diagonal(), Some(Direction::SE));
        assert_eq!(Action::SouthEast.cardinal(), Some(Direction::S));
        assert_eq!(Action::ForwardFast.diagonal(), None);
        assert!(Action::SouthEast.is_diagonal());
        assert!(!Action::Stay.is_diagonal());
    }

    #[test]
    fn test_display() {
        let codes: Vec<String> = Action::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(codes, vec!["FS", "FM", "FF", "NE", "SE", "ST"]);
    }
}
