//! Text output for finished runs.

use crate::scheduler::{Outcome, Process, ProcessParams, Simulation};
use std::fmt::{self, Write};

/// Aggregate figures derived from a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub finishing_time: u32,
    pub cpu_utilization: f32,
    pub io_utilization: f32,
    /// Processes finished per hundred cycles.
    pub throughput: f64,
    pub average_turnaround: f32,
    pub average_waiting: f32,
}

impl Summary {
    pub fn new(outcome: &Outcome) -> Self {
        let finishing_time = outcome.counters.finishing_time();
        let count = outcome.processes.len();
        let ratio = |value: u32| {
            if finishing_time == 0 {
                0.0
            } else {
                value as f32 / finishing_time as f32
            }
        };
        let average = |total: u64| {
            if count == 0 {
                0.0
            } else {
                total as f32 / count as f32
            }
        };

        let details = outcome.processes.iter().map(Process::details);
        let turnaround: u64 = details.clone().map(|d| u64::from(d.turnaround)).sum();
        let waiting: u64 = details.map(|d| u64::from(d.waiting)).sum();

        Self {
            finishing_time,
            cpu_utilization: ratio(outcome.counters.cpu_utilization),
            io_utilization: ratio(outcome.counters.io_utilization),
            throughput: if finishing_time == 0 {
                0.0
            } else {
                count as f64 * 100.0 / finishing_time as f64
            },
            average_turnaround: average(turnaround),
            average_waiting: average(waiting),
        }
    }
}

impl fmt::Display for Summary {
    // Ratios keep a decimal point even when whole, e.g. `1.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary data:")?;
        writeln!(f, "Finishing time: {}", self.finishing_time)?;
        writeln!(f, "CPU Utilization: {:?}", self.cpu_utilization)?;
        writeln!(f, "I/O Utilization: {:?}", self.io_utilization)?;
        writeln!(
            f,
            "Throughput: {:?} processes per hundred cycles",
            self.throughput
        )?;
        writeln!(f, "Average turnaround time: {:?}", self.average_turnaround)?;
        writeln!(f, "Average waiting time: {:?}", self.average_waiting)
    }
}

/// `<label>: N (A B C M) ...`
pub fn input_line(label: &str, processes: &[ProcessParams]) -> String {
    let mut line = format!("{}: {}", label, processes.len());
    for params in processes {
        let _ = write!(line, " {}", params);
    }
    line
}

/// The original and sorted input lines, then a blank line.
pub fn inputs(original: &[ProcessParams], sorted: &[ProcessParams]) -> String {
    format!(
        "{}\n{}\n\n",
        input_line("The original input was", original),
        input_line("The (sorted) input is", sorted)
    )
}

/// One line of the detailed trace, showing every process before the next
/// cycle runs.
pub fn cycle_line(simulation: &Simulation) -> String {
    let mut line = format!("Before cycle\t{}:", simulation.cycle());
    for process in simulation.processes() {
        let _ = write!(line, "\t{} {}", process.state(), process.current_burst());
    }
    line
}

/// Full report for one run: the inputs, the policy, every process, and the
/// summary. Clear `with_inputs` when the input lines were already printed
/// ahead of a detailed trace.
pub struct Report<'a> {
    pub original: &'a [ProcessParams],
    pub outcome: &'a Outcome,
    pub with_inputs: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.with_inputs {
            let sorted: Vec<ProcessParams> =
                self.outcome.processes.iter().map(Process::params).collect();
            write!(f, "{}", inputs(self.original, &sorted))?;
        }
        writeln!(
            f,
            "The scheduling algorithm used was {}",
            self.outcome.policy.name()
        )?;
        writeln!(f)?;

        for (index, process) in self.outcome.processes.iter().enumerate() {
            let params = process.params();
            let details = process.details();
            writeln!(f, "Process {}:", index)?;
            writeln!(
                f,
                "(A,B,C,M) = ({},{},{},{})",
                params.arrival, params.burst_range, params.cpu_time, params.io_multiplier
            )?;
            writeln!(f, "Finishing time: {}", details.finishing)?;
            writeln!(f, "Turnaround time: {}", details.turnaround)?;
            writeln!(f, "I/O time: {}", details.io)?;
            writeln!(f, "Waiting time: {}", details.waiting)?;
            writeln!(f)?;
        }

        write!(f, "{}", Summary::new(self.outcome))
    }
}
