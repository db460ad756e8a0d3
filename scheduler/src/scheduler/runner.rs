use super::{display::DisplayTerminal, BurstSource, Simulation};
use anyhow::Result;

pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    Tick,
    None,
}

/// Steps a simulation once per display tick, under keyboard control.
pub struct SimulationRunner<'a> {
    terminal: &'a mut DisplayTerminal,
    simulation: Simulation,
    source: &'a mut dyn BurstSource,
    paused: bool,
}

impl<'a> SimulationRunner<'a> {
    pub fn new(
        terminal: &'a mut DisplayTerminal,
        simulation: Simulation,
        source: &'a mut dyn BurstSource,
    ) -> Self {
        Self {
            terminal,
            simulation,
            source,
            paused: false,
        }
    }

    fn step(&mut self) -> Result<()> {
        if !self.simulation.is_finished() {
            self.simulation.step(&mut *self.source)?;
        }
        Ok(())
    }

    // Returns false if the runner should stop
    pub fn run(&mut self) -> Result<bool> {
        self.terminal.draw(&self.simulation, self.paused)?;

        match self.terminal.get_input()? {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => self.step()?,
            RunnerEvent::Tick if !self.paused => self.step()?,
            _ => {}
        }
        Ok(true)
    }

    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }
}
