use super::{BlockedQueue, BurstSource, Policy, Process, ReadyQueue, State};
use anyhow::{anyhow, Result};
use log::{debug, info, trace};
use std::collections::VecDeque;

/// Run-level counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// The next cycle to simulate.
    pub cycle: u32,
    /// Cycles in which a process executed.
    pub cpu_utilization: u32,
    /// Cycles in which at least one process was blocked.
    pub io_utilization: u32,
}

impl Counters {
    /// The last cycle in which work was done.
    pub fn finishing_time(&self) -> u32 {
        self.cycle.saturating_sub(1)
    }
}

/// The result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub policy: Policy,
    pub processes: Vec<Process>,
    pub counters: Counters,
}

impl Outcome {
    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }
}

/// Cycle-by-cycle driver for one policy over one process set.
pub struct Simulation {
    policy: Policy,
    processes: Vec<Process>,
    arrivals: VecDeque<usize>,
    ready: ReadyQueue,
    blocked: BlockedQueue,
    running: Option<usize>,
    counters: Counters,
}

impl Simulation {
    /// Takes ownership of `processes` and resets them. Processes are admitted
    /// in arrival order; equal arrivals keep their position in the list.
    pub fn new<I>(processes: I, policy: Policy) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Process>,
    {
        let mut processes: Vec<Process> = processes.into_iter().map(Into::into).collect();
        processes.iter_mut().for_each(Process::reset);

        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&index| processes[index].arrival());

        Self {
            policy,
            processes,
            arrivals: arrivals.into(),
            ready: ReadyQueue::new(policy),
            blocked: BlockedQueue::new(),
            running: None,
            counters: Counters::default(),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn cycle(&self) -> u32 {
        self.counters.cycle
    }

    /// Index of the process that last held the CPU. It may since have
    /// blocked or terminated.
    pub fn running(&self) -> Option<usize> {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.arrivals.is_empty()
            && self.ready.is_empty()
            && self.blocked.is_empty()
            && self
                .running
                .map_or(true, |index| self.processes[index].state() == State::Terminated)
    }

    pub fn run(&mut self, source: &mut dyn BurstSource) -> Result<()> {
        self.run_observed(source, |_| {})
    }

    /// Runs to completion, calling `observe` before every cycle.
    pub fn run_observed<F>(&mut self, source: &mut dyn BurstSource, mut observe: F) -> Result<()>
    where
        F: FnMut(&Simulation),
    {
        info!(
            "Simulating {} processes with {}",
            self.processes.len(),
            self.policy
        );
        while !self.is_finished() {
            observe(self);
            self.step(source)?;
        }
        info!(
            "{} finished at cycle {} (cpu {}, io {})",
            self.policy,
            self.counters.finishing_time(),
            self.counters.cpu_utilization,
            self.counters.io_utilization
        );
        Ok(())
    }

    pub fn finish(self) -> Outcome {
        Outcome {
            policy: self.policy,
            processes: self.processes,
            counters: self.counters,
        }
    }

    /// Simulates a single cycle.
    pub fn step(&mut self, source: &mut dyn BurstSource) -> Result<()> {
        let cycle = self.counters.cycle;
        trace!("cycle {}", cycle);

        for index in self.ready.iter() {
            self.processes[index].run.details.waiting += 1;
        }

        self.admit_arrivals();
        self.advance_io();
        self.advance_running()?;
        self.dispatch(source)?;

        self.counters.cycle += 1;
        Ok(())
    }

    fn make_ready(&mut self, index: usize) {
        let run = &mut self.processes[index].run;
        run.state = State::Ready;
        run.ready_cycle = self.counters.cycle;
        self.ready.push(index);
    }

    fn admit_arrivals(&mut self) {
        while let Some(&index) = self.arrivals.front() {
            if self.processes[index].arrival() > self.counters.cycle {
                break;
            }
            self.arrivals.pop_front();
            debug!("cycle {}: process {} arrives", self.counters.cycle, index);
            self.make_ready(index);
        }
    }

    fn advance_io(&mut self) {
        if self.blocked.is_empty() {
            return;
        }
        self.counters.io_utilization += 1;
        for index in self.blocked.iter() {
            let run = &mut self.processes[index].run;
            run.io_burst_remaining -= 1;
            run.details.io += 1;
        }
        while let Some(index) = self.blocked.pop_completed(&self.processes) {
            debug!("cycle {}: process {} finishes I/O", self.counters.cycle, index);
            self.make_ready(index);
        }
    }

    fn advance_running(&mut self) -> Result<()> {
        let Some(index) = self.running else {
            return Ok(());
        };
        let cycle = self.counters.cycle;
        let process = &mut self.processes[index];
        if process.run.cpu_burst_remaining == 0 {
            return Ok(());
        }
        let params = process.params();

        self.counters.cpu_utilization += 1;
        let run = &mut process.run;
        run.cpu_burst_remaining -= 1;
        run.cpu_remaining -= 1;
        run.quantum_remaining = run.quantum_remaining.saturating_sub(1);

        if run.cpu_burst_remaining == 0 {
            if run.cpu_remaining == 0 {
                run.state = State::Terminated;
                run.details.finishing = cycle;
                run.details.turnaround = cycle - params.arrival;
                debug!("cycle {}: process {} terminates", cycle, index);
            } else {
                let io_burst = run
                    .cpu_burst
                    .checked_mul(params.io_multiplier)
                    .ok_or_else(|| {
                        anyhow!(
                            "Process {} I/O burst of {} * {} cycles overflows",
                            index,
                            run.cpu_burst,
                            params.io_multiplier
                        )
                    })?;
                if io_burst == 0 {
                    // Nothing to wait for with M = 0.
                    self.make_ready(index);
                } else {
                    run.io_burst_remaining = io_burst;
                    run.state = State::Blocked;
                    debug!("cycle {}: process {} blocks for {} cycles", cycle, index, io_burst);
                    self.blocked.push(index);
                }
            }
        } else if self.policy.preempts() && run.quantum_remaining == 0 {
            debug!(
                "cycle {}: process {} preempted with {} left in burst",
                cycle, index, run.cpu_burst_remaining
            );
            self.make_ready(index);
        }
        Ok(())
    }

    fn needs_dispatch(&self) -> bool {
        match self.running {
            None => true,
            Some(index) => {
                let run = &self.processes[index].run;
                run.cpu_burst_remaining == 0
                    || (self.policy.preempts() && run.quantum_remaining == 0)
            }
        }
    }

    fn dispatch(&mut self, source: &mut dyn BurstSource) -> Result<()> {
        if !self.needs_dispatch() || self.ready.is_empty() {
            return Ok(());
        }

        if self.policy.monopolizes() {
            if let Some(current) = self.running {
                if self.processes[current].state() != State::Terminated
                    && self.ready.peek(&self.processes) != Some(current)
                {
                    debug!(
                        "cycle {}: process {} still owns the CPU",
                        self.counters.cycle, current
                    );
                    return Ok(());
                }
            }
        }

        let Some(index) = self.ready.pop(&self.processes) else {
            return Ok(());
        };
        let burst_range = self.processes[index].params().burst_range;
        let run = &mut self.processes[index].run;
        run.state = State::Running;
        run.quantum_remaining = Process::QUANTUM;
        if run.cpu_burst_remaining == 0 {
            let burst = source.next_burst(burst_range)?;
            run.cpu_burst = burst.min(run.cpu_remaining);
            run.cpu_burst_remaining = run.cpu_burst;
        }
        debug!(
            "cycle {}: dispatch process {} ({} left in burst)",
            self.counters.cycle, index, run.cpu_burst_remaining
        );
        self.running = Some(index);
        Ok(())
    }
}
