use super::{runner::RunnerEvent, Simulation, State};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver, RecvError},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new(tick_rate: Duration) -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(&mut self, simulation: &Simulation, paused: bool) -> Result<(), io::Error> {
        let processes = simulation.processes();
        let status = if simulation.is_finished() {
            "finished, press q to continue"
        } else if paused {
            "paused"
        } else {
            "running"
        };
        let current = simulation
            .running()
            .filter(|&index| processes[index].state() == State::Running);

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([Constraint::Length(3), Constraint::Min(5)])
                .split(f.size());

            let counters = simulation.counters();
            let header = Paragraph::new(format!(
                "Cycle {} | {} | CPU busy {} | I/O busy {} | {}",
                counters.cycle,
                match current {
                    Some(index) => format!("Process {} running", index),
                    None => "CPU idle".to_owned(),
                },
                counters.cpu_utilization,
                counters.io_utilization,
                status,
            ))
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Simulation")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(header, chunks[0]);

            let items = processes.iter().enumerate().map(|(index, process)| {
                let details = process.details();
                let style = match process.state() {
                    State::Running => Style::default().fg(Color::Yellow),
                    State::Blocked => Style::default().fg(Color::LightRed),
                    State::Terminated => Style::default().fg(Color::DarkGray),
                    _ => Style::default(),
                };
                Row::new(vec![
                    Cell::from(index.to_string())
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(process.params().to_string()),
                    Cell::from(process.state().to_string()),
                    Cell::from(process.current_burst().to_string()),
                    Cell::from(process.cpu_remaining().to_string()),
                    Cell::from(details.waiting.to_string()),
                    Cell::from(details.io.to_string()),
                ])
                .style(style)
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec!["#", "(A B C M)", "State", "Burst", "CPU left", "Wait", "I/O"])
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(3),
                    Constraint::Length(16),
                    Constraint::Length(10),
                    Constraint::Length(5),
                    Constraint::Length(8),
                    Constraint::Length(5),
                    Constraint::Length(5),
                ])
                .block(
                    Block::default()
                        .title(simulation.policy().name())
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> Result<RunnerEvent, RecvError> {
        // Get the user's input and return a matching event
        match self.input_rx.recv()? {
            DisplayEvent::Input(key) => {
                if key.modifiers.is_empty() {
                    match key.code {
                        KeyCode::Char('q') => return Ok(RunnerEvent::Quit),
                        KeyCode::Char('p') => return Ok(RunnerEvent::Pause),
                        KeyCode::Char('r') => return Ok(RunnerEvent::Resume),
                        KeyCode::Char('s') => return Ok(RunnerEvent::Step),
                        _ => {}
                    };
                }
            }
            DisplayEvent::Tick => return Ok(RunnerEvent::Tick),
        }
        Ok(RunnerEvent::None)
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = self.terminal.clear();
        let _ = crossterm::terminal::disable_raw_mode();
    }
}
