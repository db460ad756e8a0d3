//! Process-description files.
//!
//! A file holds a process count followed by one `(A B C M)` group per
//! process, for example `2 (0 1 5 1) (3 2 4 2)`. Line breaks are free.

use crate::scheduler::ProcessParams;
use anyhow::{bail, Context, Result};
use std::{fs, path::Path};

pub fn parse(text: &str) -> Result<Vec<ProcessParams>> {
    let mut numbers = text
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token
                .parse::<u32>()
                .with_context(|| format!("Token #{} is not a non-negative integer: {:?}", index, token))
        });

    let count = match numbers.next() {
        Some(count) => count? as usize,
        None => bail!("Missing process count"),
    };

    let mut processes = Vec::new();
    for index in 0..count {
        let mut field = || -> Result<u32> {
            match numbers.next() {
                Some(value) => value,
                None => bail!("Process {} is incomplete, expected (A B C M)", index),
            }
        };
        let params = ProcessParams::new(field()?, field()?, field()?, field()?);
        validate(index, &params)?;
        processes.push(params);
    }

    if numbers.next().is_some() {
        bail!("Found more values than the {} declared processes", count);
    }
    Ok(processes)
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<ProcessParams>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read processes from {}", path.display()))?;
    parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn validate(index: usize, params: &ProcessParams) -> Result<()> {
    if params.burst_range == 0 {
        bail!("Process {} has B = 0, bursts need a range of at least 1", index);
    }
    if params.cpu_time == 0 {
        bail!("Process {} has C = 0, it would never terminate", index);
    }
    Ok(())
}

/// Stable sort by arrival time, equal arrivals keep their input order.
pub fn sort_by_arrival(processes: &[ProcessParams]) -> Vec<ProcessParams> {
    let mut sorted = processes.to_vec();
    sorted.sort_by_key(|params| params.arrival);
    sorted
}
