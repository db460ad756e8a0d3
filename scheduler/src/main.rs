use anyhow::{Context, Result};
use clap::Parser;
use cpu_scheduling_sim::{
    input,
    report::{self, Report},
    DisplayTerminal, Outcome, Policy, Process, ProcessParams, RandomNumbers, Simulation,
    SimulationRunner, DEFAULT_TICK_RATE,
};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use log::{info, warn};
use std::{io, mem, path::PathBuf, time::Duration};

/// Simulates CPU scheduling of synthetic processes cycle by cycle and reports
/// finishing, turnaround, I/O and waiting times for each policy.
///
/// Processes are read from INPUT as a count followed by `(A B C M)` groups:
/// arrival cycle, burst range, total CPU time and I/O multiplier.
#[derive(Debug, Parser)]
struct Opts {
    /// Process-description file.
    input: PathBuf,

    /// File of whitespace separated random numbers used to draw CPU bursts.
    #[clap(short = 'r', long, default_value = "random-numbers")]
    random_file: PathBuf,

    /// Policies to simulate, in order. One of fcfs, sjf, uni, rr. Defaults to
    /// all four.
    #[clap(short = 'p', long, value_delimiter = ',')]
    policy: Vec<Policy>,

    /// Print the state and remaining burst of every process before each
    /// cycle.
    #[clap(short = 'd', long, action = clap::ArgAction::SetTrue)]
    detailed: bool,

    /// Start every run after the first from the beginning of the random
    /// number stream instead of continuing where the previous run stopped.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    rewind_random: bool,

    /// Step through each run in an interactive terminal view.
    /// Keys: q quit, p pause, r resume, s step while paused.
    #[clap(long, action = clap::ArgAction::SetTrue, conflicts_with = "detailed")]
    tui: bool,

    /// Cycle period of the interactive view, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_TICK_RATE.as_millis() as u64)]
    tick_ms: u64,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run_batch(
    original: &[ProcessParams],
    processes: Vec<Process>,
    policy: Policy,
    randoms: &mut RandomNumbers,
    detailed: bool,
) -> Result<Outcome> {
    let mut simulation = Simulation::new(processes, policy);
    if detailed {
        let sorted: Vec<ProcessParams> =
            simulation.processes().iter().map(Process::params).collect();
        print!("{}", report::inputs(original, &sorted));
        println!("This detailed printout gives the state and remaining burst for each process");
        println!();
        simulation.run_observed(randoms, |sim| println!("{}", report::cycle_line(sim)))?;
    } else {
        simulation.run(randoms)?;
    }
    Ok(simulation.finish())
}

fn run_interactive(
    terminal: &mut DisplayTerminal,
    processes: Vec<Process>,
    policy: Policy,
    randoms: &mut RandomNumbers,
) -> Result<Option<Outcome>> {
    let simulation = Simulation::new(processes, policy);
    let mut runner = SimulationRunner::new(terminal, simulation, randoms);
    while runner.run()? {}

    let simulation = runner.into_simulation();
    if simulation.is_finished() {
        Ok(Some(simulation.finish()))
    } else {
        warn!("{} stopped at cycle {}", policy, simulation.cycle());
        Ok(None)
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let original = input::load(&opts.input)?;
    let sorted = input::sort_by_arrival(&original);
    let mut randoms = RandomNumbers::from_file(&opts.random_file)?;
    info!(
        "Loaded {} processes and {} random numbers",
        sorted.len(),
        randoms.len()
    );

    let policies = if opts.policy.is_empty() {
        Policy::ALL.to_vec()
    } else {
        opts.policy.clone()
    };

    let mut terminal = if opts.tui {
        execute!(io::stdout(), Clear(ClearType::All))?;
        Some(
            DisplayTerminal::new(Duration::from_millis(opts.tick_ms))
                .context("Failed to set up the terminal")?,
        )
    } else {
        None
    };

    let mut processes: Vec<Process> = sorted.into_iter().map(Process::new).collect();
    let mut reports = Vec::new();
    for (n, &policy) in policies.iter().enumerate() {
        if n > 0 && opts.rewind_random {
            randoms.rewind();
        }

        if n > 0 && terminal.is_none() {
            println!();
        }
        let outcome = match terminal.as_mut() {
            Some(terminal) => {
                match run_interactive(terminal, mem::take(&mut processes), policy, &mut randoms)? {
                    Some(outcome) => outcome,
                    None => break,
                }
            }
            None => run_batch(
                &original,
                mem::take(&mut processes),
                policy,
                &mut randoms,
                opts.detailed,
            )?,
        };

        let text = Report {
            original: &original,
            outcome: &outcome,
            with_inputs: !opts.detailed,
        }
        .to_string();
        if terminal.is_some() {
            reports.push(text);
        } else {
            print!("{}", text);
        }
        processes = outcome.into_processes();
    }

    if terminal.take().is_some() {
        execute!(io::stdout(), Clear(ClearType::All))?;
        println!("{}", reports.join("\n"));
    }
    Ok(())
}
