#![allow(dead_code)]

use anyhow::Result;
use cpu_scheduling_sim::{BurstSource, Outcome, Policy, ProcessParams, RandomNumbers, Simulation};

/// Always hands out the same burst; the engine clamps it to the remaining
/// demand.
pub struct FixedBurst(pub u32);

impl BurstSource for FixedBurst {
    fn next_burst(&mut self, _range: u32) -> Result<u32> {
        Ok(self.0)
    }
}

/// Deterministic pseudo-random values from a 31-bit linear congruential
/// generator.
pub fn seed_values(len: usize, seed: u32) -> Vec<u32> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345) & 0x7fff_ffff;
            state
        })
        .collect()
}

pub fn seed_stream(len: usize, seed: u32) -> RandomNumbers {
    RandomNumbers::new(seed_values(len, seed))
}

pub fn params(specs: &[(u32, u32, u32, u32)]) -> Vec<ProcessParams> {
    specs
        .iter()
        .map(|&(a, b, c, m)| ProcessParams::new(a, b, c, m))
        .collect()
}

/// A mixed workload with staggered and simultaneous arrivals, sorted by
/// arrival.
pub fn mixed_workload() -> Vec<ProcessParams> {
    params(&[
        (0, 3, 12, 2),
        (0, 5, 7, 1),
        (1, 1, 4, 3),
        (4, 4, 9, 0),
        (4, 2, 15, 1),
        (10, 6, 3, 4),
        (25, 3, 6, 2),
    ])
}

pub fn run(params: &[ProcessParams], policy: Policy, source: &mut dyn BurstSource) -> Outcome {
    let mut simulation = Simulation::new(params.iter().copied(), policy);
    simulation.run(source).expect("simulation failed");
    simulation.finish()
}

/// `(finishing, turnaround, io, waiting)` for every process.
pub fn summary(outcome: &Outcome) -> Vec<(u32, u32, u32, u32)> {
    outcome
        .processes
        .iter()
        .map(|process| {
            let d = process.details();
            (d.finishing, d.turnaround, d.io, d.waiting)
        })
        .collect()
}
