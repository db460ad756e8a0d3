use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unstarted,
    Ready,
    Running,
    Blocked,
    Terminated,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::Unstarted => "unstarted",
            State::Ready => "ready",
            State::Running => "running",
            State::Blocked => "blocked",
            State::Terminated => "terminated",
        })
    }
}

/// The `(A, B, C, M)` tuple describing a process. Never changes during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessParams {
    /// Cycle at which the process arrives (`A`).
    pub arrival: u32,
    /// Upper bound for randomly drawn CPU bursts (`B`).
    pub burst_range: u32,
    /// Total CPU time the process needs (`C`).
    pub cpu_time: u32,
    /// I/O burst multiplier (`M`).
    pub io_multiplier: u32,
}

impl ProcessParams {
    pub fn new(arrival: u32, burst_range: u32, cpu_time: u32, io_multiplier: u32) -> Self {
        Self {
            arrival,
            burst_range,
            cpu_time,
            io_multiplier,
        }
    }
}

impl fmt::Display for ProcessParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {} {} {})",
            self.arrival, self.burst_range, self.cpu_time, self.io_multiplier
        )
    }
}

/// Final statistics of a process for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Details {
    pub finishing: u32,
    pub turnaround: u32,
    pub io: u32,
    pub waiting: u32,
}

/// Mutable per-run state. Always built from `ProcessParams`, so a reset
/// cannot leave a stale field behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RunState {
    pub(super) state: State,
    pub(super) cpu_remaining: u32,
    pub(super) cpu_burst: u32,
    pub(super) cpu_burst_remaining: u32,
    pub(super) io_burst_remaining: u32,
    pub(super) quantum_remaining: u32,
    pub(super) ready_cycle: u32,
    pub(super) details: Details,
}

impl RunState {
    fn fresh(params: &ProcessParams) -> Self {
        Self {
            state: State::Unstarted,
            cpu_remaining: params.cpu_time,
            cpu_burst: 0,
            cpu_burst_remaining: 0,
            io_burst_remaining: 0,
            quantum_remaining: Process::QUANTUM,
            ready_cycle: 0,
            details: Details::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    params: ProcessParams,
    pub(super) run: RunState,
}

impl Process {
    /// Round-robin time slice, in cycles.
    pub const QUANTUM: u32 = 2;

    pub fn new(params: ProcessParams) -> Self {
        Self {
            params,
            run: RunState::fresh(&params),
        }
    }

    pub fn reset(&mut self) {
        self.run = RunState::fresh(&self.params);
    }

    pub fn params(&self) -> ProcessParams {
        self.params
    }

    pub fn arrival(&self) -> u32 {
        self.params.arrival
    }

    pub fn state(&self) -> State {
        self.run.state
    }

    pub fn details(&self) -> Details {
        self.run.details
    }

    pub fn cpu_remaining(&self) -> u32 {
        self.run.cpu_remaining
    }

    pub fn cpu_burst_remaining(&self) -> u32 {
        self.run.cpu_burst_remaining
    }

    pub fn io_burst_remaining(&self) -> u32 {
        self.run.io_burst_remaining
    }

    pub fn quantum_remaining(&self) -> u32 {
        self.run.quantum_remaining
    }

    pub fn ready_cycle(&self) -> u32 {
        self.run.ready_cycle
    }

    /// The burst shown in traces: CPU burst left while running, I/O left
    /// while blocked, otherwise 0.
    pub fn current_burst(&self) -> u32 {
        match self.run.state {
            State::Running => self.run.cpu_burst_remaining,
            State::Blocked => self.run.io_burst_remaining,
            _ => 0,
        }
    }
}

impl From<ProcessParams> for Process {
    fn from(params: ProcessParams) -> Self {
        Process::new(params)
    }
}
