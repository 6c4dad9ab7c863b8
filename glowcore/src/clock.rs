//! clock — named phase accumulators advanced once per tick
//!
//! Every widget animates from a handful of scalars (`angle`, `pulse`,
//! `scan_line`, ...) that grow by a constant step each timer tick and wrap
//! into a fixed period. Time is virtual: speed depends on the tick count,
//! never on wall-clock time, so a given number of advances always yields
//! the same state.

use std::f32::consts::TAU;

/// One named accumulator.
#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    name: &'static str,
    value: f64,
    increment: f64,
    /// `None` for unbounded accumulators only ever read through sin/cos.
    period: Option<f64>,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> f32 {
        let value = self.value as f32;
        match self.period {
            // narrowing can round up onto the period itself
            Some(period) if value >= period as f32 => 0.0,
            _ => value,
        }
    }

    pub fn period(&self) -> Option<f32> {
        self.period.map(|p| p as f32)
    }

    fn step(&mut self) {
        let next = self.value + self.increment;
        self.value = match self.period {
            Some(period) => wrap(next, period),
            None => next,
        };
    }
}

/// Euclidean wrap into `[0, period)`. `rem_euclid` can round up to exactly
/// `period` for tiny negative inputs, so that case folds back to zero.
fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// A fixed set of phases plus a tick counter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clock {
    phases: Vec<Phase>,
    ticks: u64,
}

impl Clock {
    /// Period used by phases fed straight into trigonometry.
    pub const TAU: f32 = TAU;

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phase that wraps into `[0, period)`. A non-positive or
    /// non-finite period makes the phase unbounded.
    pub fn with_phase(mut self, name: &'static str, increment: f32, period: f32) -> Self {
        let period = (period.is_finite() && period > 0.0).then_some(period as f64);
        self.push(name, increment, period);
        self
    }

    /// Add an unbounded accumulator (`time += 0.1` style).
    pub fn with_accumulator(mut self, name: &'static str, increment: f32) -> Self {
        self.push(name, increment, None);
        self
    }

    /// Set the starting value of an existing phase (wrapped into its period).
    pub fn starting_at(mut self, name: &str, value: f32) -> Self {
        if let Some(phase) = self.phases.iter_mut().find(|p| p.name == name) {
            let value = crate::safety::finite_or(value, 0.0) as f64;
            phase.value = match phase.period {
                Some(period) => wrap(value, period),
                None => value,
            };
        }
        self
    }

    fn push(&mut self, name: &'static str, increment: f32, period: Option<f64>) {
        let increment = crate::safety::finite_or(increment, 0.0) as f64;
        match self.phases.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                existing.increment = increment;
                existing.period = period;
            }
            None => self.phases.push(Phase {
                name,
                value: 0.0,
                increment,
                period,
            }),
        }
    }

    /// Advance every phase by its increment. Called once per timer tick.
    pub fn advance(&mut self) {
        for phase in &mut self.phases {
            phase.step();
        }
        self.ticks += 1;
    }

    pub fn advance_by(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.advance();
        }
    }

    /// Current value of `name`, or `0.0` for an unknown phase.
    pub fn get(&self, name: &str) -> f32 {
        self.try_get(name).unwrap_or(0.0)
    }

    pub fn try_get(&self, name: &str) -> Option<f32> {
        self.phases.iter().find(|p| p.name == name).map(Phase::value)
    }

    /// Number of advances since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }
}
