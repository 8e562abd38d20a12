//! Energy slider against the fixed collapse threshold.

pub const ENERGY_RANGE: (f64, f64) = (10.0, 100.0);
/// Inclusive: an energy of exactly 40 is over the threshold.
pub const THRESHOLD: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollapseState {
    Stable,
    Imminent,
}

impl CollapseState {
    pub fn label(self) -> &'static str {
        match self {
            CollapseState::Stable => "STATE_STABLE",
            CollapseState::Imminent => "COLLAPSE_IMMINENT",
        }
    }
}

/// Reduction timescale for a given energy. Defined for any positive energy.
pub fn tau_or(energy: f64) -> f64 {
    (30.0 / energy) * 100.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdState {
    energy: f64,
}

impl ThresholdState {
    pub fn new(energy: f64) -> Self {
        let mut state = Self {
            energy: ENERGY_RANGE.0,
        };
        state.set_energy(energy);
        state
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn set_energy(&mut self, value: f64) {
        if !value.is_nan() {
            self.energy = value.clamp(ENERGY_RANGE.0, ENERGY_RANGE.1);
        }
    }

    pub fn threshold_met(&self) -> bool {
        self.energy >= THRESHOLD
    }

    pub fn state(&self) -> CollapseState {
        if self.threshold_met() {
            CollapseState::Imminent
        } else {
            CollapseState::Stable
        }
    }

    pub fn tau_or(&self) -> f64 {
        tau_or(self.energy)
    }

    pub fn tau_label(&self) -> String {
        format!("{:.1}", self.tau_or())
    }

    /// Position of the energy inside its range, 0.0 at the bottom.
    pub fn fill_fraction(&self) -> f64 {
        (self.energy - ENERGY_RANGE.0) / (ENERGY_RANGE.1 - ENERGY_RANGE.0)
    }
}
