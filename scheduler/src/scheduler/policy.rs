use super::Process;
use std::{fmt, str::FromStr};

/// Sort key used to order the ready set. Smallest key runs first; the last
/// component is the process's position in the input list so keys never tie.
pub type OrderKey = (u32, u32, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First come, first served.
    Fcfs,
    /// Shortest remaining total CPU demand first, non-preemptive.
    Sjf,
    /// One process holds the CPU from dispatch until it terminates.
    Uniprocessor,
    /// FCFS order with a fixed quantum of `Process::QUANTUM` cycles.
    RoundRobin,
}

impl Policy {
    /// Every policy, in the order the runs are reported.
    pub const ALL: [Policy; 4] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Uniprocessor,
        Policy::RoundRobin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Policy::Fcfs => "First Come First Served",
            Policy::Sjf => "Shortest Job First",
            Policy::Uniprocessor => "Uniprocessing",
            Policy::RoundRobin => "Round Robin",
        }
    }

    pub fn order_key(self, process: &Process, position: usize) -> OrderKey {
        match self {
            Policy::Fcfs | Policy::RoundRobin => {
                (process.ready_cycle(), process.arrival(), position)
            }
            Policy::Sjf => (process.cpu_remaining(), process.arrival(), position),
            Policy::Uniprocessor => (process.arrival(), 0, position),
        }
    }

    /// Whether a running process is kicked back to the ready set when its
    /// quantum runs out.
    pub fn preempts(self) -> bool {
        matches!(self, Policy::RoundRobin)
    }

    /// Whether dispatch is held back while a live process owns the CPU and
    /// is not the head of the ready set.
    pub fn monopolizes(self) -> bool {
        matches!(self, Policy::Uniprocessor)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "uni" | "uniprocessor" => Ok(Policy::Uniprocessor),
            "rr" | "round-robin" => Ok(Policy::RoundRobin),
            other => Err(format!(
                "unknown policy \"{}\", expected one of fcfs, sjf, uni, rr",
                other
            )),
        }
    }
}
