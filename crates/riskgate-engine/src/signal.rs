//! Analyzer signal outcomes
//!
//! Each analyzer returns an explicit `(score delta, markers)` pair;
//! the decision policy performs the single auditable summation. No
//! analyzer mutates shared score state.

/// Contribution of one analyzer to the final decision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalOutcome {
    /// Score to add to the running total
    pub score_delta: u32,

    /// Markers naming which heuristics fired (reported alongside
    /// triggered rule names)
    pub markers: Vec<String>,
}

impl SignalOutcome {
    /// A zero contribution
    pub fn none() -> Self {
        Self::default()
    }

    /// Add one fired heuristic
    pub fn add(&mut self, delta: u32, marker: impl Into<String>) {
        self.score_delta += delta;
        self.markers.push(marker.into());
    }
}
