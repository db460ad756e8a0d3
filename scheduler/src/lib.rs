//! Discrete-time CPU scheduling simulator.
//!
//! Synthetic processes, each described by an `(A, B, C, M)` tuple, are
//! advanced one cycle at a time through the unstarted, ready, running,
//! blocked and terminated states under one of four policies: first come
//! first served, shortest job first, uniprocessing and round robin. CPU
//! bursts are drawn from a pre-loaded stream of random numbers, so a run is
//! fully reproducible.
//!
//! ```no_run
//! use cpu_scheduling_sim::{Policy, ProcessParams, RandomNumbers, Simulation};
//!
//! let mut source = RandomNumbers::from_file("random-numbers")?;
//! let mut simulation = Simulation::new([ProcessParams::new(0, 1, 5, 1)], Policy::Fcfs);
//! simulation.run(&mut source)?;
//! let outcome = simulation.finish();
//! println!("finished at {}", outcome.counters.finishing_time());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod input;
pub mod report;
mod scheduler;

pub use scheduler::{
    BlockedQueue, BurstSource, Counters, Details, DisplayTerminal, OrderKey, Outcome, Policy,
    Process, ProcessParams, RandomNumbers, ReadyQueue, RunnerEvent, SimulationRunner,
    Simulation, State, DEFAULT_TICK_RATE,
};
