use anyhow::{anyhow, bail, Context, Result};
use std::{fs, path::Path};

/// Supplies CPU burst lengths to the simulation.
pub trait BurstSource {
    /// Returns the next burst length for a process whose burst range is
    /// `range`.
    fn next_burst(&mut self, range: u32) -> Result<u32>;
}

/// A pre-loaded stream of non-negative integers consumed front to back.
///
/// The cursor survives across runs unless `rewind` is called, so several
/// policies simulated one after another see one continuous stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomNumbers {
    values: Vec<u32>,
    cursor: usize,
}

impl RandomNumbers {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let values = text
            .split_whitespace()
            .enumerate()
            .map(|(index, token)| {
                token
                    .parse::<u32>()
                    .with_context(|| format!("Invalid random number #{}: {:?}", index, token))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(values))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read random numbers from {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl BurstSource for RandomNumbers {
    fn next_burst(&mut self, range: u32) -> Result<u32> {
        if range == 0 {
            bail!("Burst range must be at least 1");
        }
        let value = self.values.get(self.cursor).copied().ok_or_else(|| {
            anyhow!(
                "Random number stream exhausted after {} values",
                self.values.len()
            )
        })?;
        self.cursor += 1;
        Ok(1 + value % range)
    }
}
