//! Invariants that hold for every policy on generated workloads.

use cpu_scheduling_sim::{Policy, ProcessParams, RandomNumbers, Simulation, State};

mod common;
use common::{mixed_workload, run, seed_stream, seed_values, summary};

fn workloads() -> Vec<Vec<ProcessParams>> {
    vec![
        mixed_workload(),
        common::params(&[(0, 1, 5, 1), (0, 1, 5, 1), (3, 1, 5, 1), (3, 1, 5, 1), (3, 1, 5, 1)]),
        common::params(&[(0, 10, 30, 3), (5, 1, 2, 5), (5, 7, 11, 1)]),
    ]
}

#[test]
fn turnaround_decomposes_into_arrival_waiting_io_and_service() {
    for (w, workload) in workloads().iter().enumerate() {
        for policy in Policy::ALL {
            let mut source = seed_stream(1024, 41 + w as u32);
            let outcome = run(workload, policy, &mut source);

            for (index, process) in outcome.processes.iter().enumerate() {
                let params = process.params();
                let details = process.details();
                assert_eq!(process.state(), State::Terminated);
                assert_eq!(process.cpu_remaining(), 0);
                assert_eq!(
                    details.finishing,
                    params.arrival + details.waiting + details.io + params.cpu_time,
                    "workload {} process {} under {}",
                    w,
                    index,
                    policy
                );
                assert_eq!(details.turnaround, details.finishing - params.arrival);
            }
        }
    }
}

#[test]
fn utilization_is_bounded_by_elapsed_cycles() {
    for workload in workloads() {
        for policy in Policy::ALL {
            let mut source = seed_stream(1024, 3);
            let outcome = run(&workload, policy, &mut source);
            let counters = outcome.counters;
            let demand: u32 = workload.iter().map(|params| params.cpu_time).sum();
            let last_finish = outcome
                .processes
                .iter()
                .map(|process| process.details().finishing)
                .max()
                .unwrap();
            let max_io = outcome
                .processes
                .iter()
                .map(|process| process.details().io)
                .max()
                .unwrap();
            let total_io: u32 = outcome
                .processes
                .iter()
                .map(|process| process.details().io)
                .sum();

            assert_eq!(counters.cpu_utilization, demand, "{}", policy);
            assert_eq!(counters.finishing_time(), last_finish, "{}", policy);
            assert!(counters.cpu_utilization <= counters.finishing_time());
            assert!(counters.io_utilization <= counters.finishing_time());
            assert!(counters.io_utilization >= max_io);
            assert!(counters.io_utilization <= total_io);
        }
    }
}

#[test]
fn at_most_one_process_runs_at_a_time() {
    for workload in workloads() {
        for policy in Policy::ALL {
            let mut simulation = Simulation::new(workload.clone(), policy);
            let mut source = seed_stream(1024, 5);
            simulation
                .run_observed(&mut source, |sim| {
                    let running = sim
                        .processes()
                        .iter()
                        .filter(|process| process.state() == State::Running)
                        .count();
                    assert!(running <= 1, "{} at cycle {}", policy, sim.cycle());
                })
                .unwrap();
        }
    }
}

#[test]
fn round_robin_never_runs_past_its_quantum() {
    for workload in workloads() {
        let mut simulation = Simulation::new(workload, Policy::RoundRobin);
        let mut source = seed_stream(1024, 11);
        simulation
            .run_observed(&mut source, |sim| {
                for process in sim.processes() {
                    if process.state() == State::Running {
                        let quantum = process.quantum_remaining();
                        assert!(
                            (1..=2).contains(&quantum),
                            "quantum {} at cycle {}",
                            quantum,
                            sim.cycle()
                        );
                    }
                }
            })
            .unwrap();
    }
}

#[test]
fn uniprocessor_runs_each_process_to_termination_before_the_next() {
    for workload in workloads() {
        let mut simulation = Simulation::new(workload, Policy::Uniprocessor);
        let mut source = seed_stream(1024, 13);
        let mut owner: Option<usize> = None;
        let mut order = Vec::new();
        simulation
            .run_observed(&mut source, |sim| {
                let running = sim
                    .processes()
                    .iter()
                    .position(|process| process.state() == State::Running);
                if let Some(current) = running {
                    if let Some(previous) = owner.filter(|&previous| previous != current) {
                        assert_eq!(
                            sim.processes()[previous].state(),
                            State::Terminated,
                            "process {} started at cycle {} while {} was unfinished",
                            current,
                            sim.cycle(),
                            previous
                        );
                    }
                    if owner != Some(current) {
                        order.push(current);
                    }
                    owner = Some(current);
                }
            })
            .unwrap();
        let expected: Vec<usize> = (0..simulation.processes().len()).collect();
        assert_eq!(order, expected);
    }
}

#[test]
fn rerun_with_rewound_stream_is_identical() {
    let workload = mixed_workload();
    for policy in Policy::ALL {
        let mut source = seed_stream(1024, 17);
        let first = run(&workload, policy, &mut source);

        source.rewind();
        let mut simulation = Simulation::new(first.clone().into_processes(), policy);
        simulation.run(&mut source).unwrap();
        let second = simulation.finish();

        assert_eq!(summary(&first), summary(&second), "{}", policy);
        assert_eq!(first.counters, second.counters);
    }
}

#[test]
fn consecutive_runs_share_one_stream() {
    let values = seed_values(1024, 23);
    let workload = mixed_workload();
    let mut shared = RandomNumbers::new(values.clone());

    let mut previous = 0;
    for policy in Policy::ALL {
        let start = shared.position();
        assert_eq!(start, previous);
        let outcome = run(&workload, policy, &mut shared);
        assert!(shared.position() > start);
        previous = shared.position();

        // The same run on a stream that starts where the cursor was.
        let mut fresh = RandomNumbers::new(values[start..].to_vec());
        let replay = run(&workload, policy, &mut fresh);
        assert_eq!(summary(&outcome), summary(&replay), "{}", policy);
        assert_eq!(fresh.position(), shared.position() - start);
    }
}

#[test]
fn empty_process_set_completes_immediately() {
    for policy in Policy::ALL {
        let mut source = RandomNumbers::default();
        let outcome = run(&[], policy, &mut source);
        assert!(outcome.processes.is_empty());
        assert_eq!(outcome.counters.cycle, 0);
        assert_eq!(source.position(), 0);
    }
}
