//! Bar chart of a discrete sum that keeps doubling its partition count.

use std::f64::consts::TAU;

pub const PARTITIONS: [u32; 5] = [4, 8, 16, 32, 64];
pub const TICK_MS: u32 = 1500;

const MIN_N: u32 = PARTITIONS[0];
const MAX_N: u32 = PARTITIONS[PARTITIONS.len() - 1];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionCycle {
    n: u32,
}

impl Default for PartitionCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl PartitionCycle {
    pub fn new() -> Self {
        Self { n: MIN_N }
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    /// Advance one timer tick: double, or wrap back to 4 past 64.
    pub fn tick(&mut self) -> u32 {
        let next = self.n * 2;
        self.n = if next > MAX_N { MIN_N } else { next };
        self.n
    }

    pub fn bars(&self) -> Vec<f64> {
        bars(self.n)
    }
}

/// Height of bar `i` of `n` as a fraction of the chart height, in [0.2, 0.8].
pub fn bar_height(i: u32, n: u32) -> f64 {
    let x = f64::from(i) / f64::from(n);
    0.2 + ((TAU * x).sin() * 0.6 * (-2.0 * x).exp()).abs()
}

pub fn bars(n: u32) -> Vec<f64> {
    (0..n).map(|i| bar_height(i, n)).collect()
}

/// Mean bar height; the value the chart's sum label shows.
pub fn riemann_sum(n: u32) -> f64 {
    if n == 0 {
        return 0.0;
    }
    bars(n).iter().sum::<f64>() / f64::from(n)
}
