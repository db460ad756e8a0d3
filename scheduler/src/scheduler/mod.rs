mod display;
mod policy;
mod process;
mod queues;
mod random;
mod runner;
mod simulation;

use std::time::Duration;

pub use display::DisplayTerminal;
pub use policy::{OrderKey, Policy};
pub use process::{Details, Process, ProcessParams, State};
pub use queues::{BlockedQueue, ReadyQueue};
pub use random::{BurstSource, RandomNumbers};
pub use runner::{RunnerEvent, SimulationRunner};
pub use simulation::{Counters, Outcome, Simulation};

pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(200);
