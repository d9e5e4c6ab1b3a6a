use std::time::Duration;

use crate::{assembler::Assembler, error::AsmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    NoSource,
    Reset,
    Paused,
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Slower,
    Slow,
    #[default]
    Normal,
    Fast,
    Faster,
}

static NORMAL_INTERVAL_MS: f64 = 1000.0;

impl Speed {
    /// Delay between two [`Controller::tick`] calls while running.
    pub fn interval(self) -> Duration {
        let multiplier = match self {
            Speed::Slower => 2.0,
            Speed::Slow => 1.5,
            Speed::Normal => 1.0,
            Speed::Fast => 0.5,
            Speed::Faster => 0.25,
        };
        Duration::from_millis((NORMAL_INTERVAL_MS * multiplier).round() as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    StateChanged(State),
    CurrentLineChanged(usize),
}

/// Steps through the binary output of an assembled program one line at a
/// time, for front ends that animate the translation.
///
/// The controller owns no timer. While [`state`](Self::state) is
/// [`State::Running`] the front end calls [`tick`](Self::tick) every
/// [`Speed::interval`].
#[derive(Debug)]
pub struct Controller {
    assembler: Assembler,
    state: State,
    speed: Speed,
    current_line: Option<usize>,
    events: Vec<Event>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            assembler: Assembler::new(),
            state: State::NoSource,
            speed: Speed::default(),
            current_line: None,
            events: Vec::new(),
        }
    }

    /// Load and fully assemble a new program.
    pub fn set_source(&mut self, text: &str) {
        self.assembler.set_source(text);
        self.set_state(if text.trim().is_empty() {
            State::NoSource
        } else {
            State::Reset
        });
        self.assembler.assemble();
    }

    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }

    pub fn binary_code(&self) -> &[String] {
        self.assembler.binary_code()
    }

    pub fn errors(&self) -> &[AsmError] {
        self.assembler.errors()
    }

    pub fn line_has_error(&self, source_line: usize) -> bool {
        self.assembler.errors_on_line(source_line).next().is_some()
    }

    pub fn source_line_for_binary_line(&self, binary_line: usize) -> Option<usize> {
        self.assembler.source_line_for_binary_line(binary_line)
    }

    pub fn binary_line_for_source_line(&self, source_line: usize) -> Option<usize> {
        self.assembler.binary_line_for_source_line(source_line)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Binary line highlighted by the playback, if any.
    pub fn current_line(&self) -> Option<usize> {
        self.current_line
    }

    /// Source line that produced [`current_line`](Self::current_line).
    pub fn current_source_line(&self) -> Option<usize> {
        self.current_line
            .and_then(|line| self.assembler.source_line_for_binary_line(line))
    }

    /// Everything that changed since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn set_state(&mut self, state: State) {
        if self.state == state {
            return;
        }
        log::debug!("controller state {:?} -> {:?}", self.state, state);
        self.state = state;

        if matches!(state, State::NoSource | State::Finished | State::Reset) {
            self.current_line = None;
        }

        self.events.push(Event::StateChanged(state));
    }

    pub fn run(&mut self) {
        if self.state == State::Finished {
            self.reset();
        }
        self.set_state(State::Running);
    }

    pub fn pause(&mut self) {
        self.set_state(State::Paused);
    }

    pub fn step(&mut self) {
        match self.state {
            State::Running | State::Reset => self.pause(),
            State::Finished => self.reset(),
            State::NoSource | State::Paused => {}
        }
        self.translate_next_line();
    }

    pub fn reset(&mut self) {
        self.set_state(State::Reset);
    }

    /// Jump straight to the end of the playback.
    pub fn translate_all(&mut self) {
        self.set_state(State::Reset);
        self.set_state(State::Finished);
    }

    /// Timer callback: advance one line while running.
    pub fn tick(&mut self) {
        if self.state == State::Running {
            self.translate_next_line();
        }
    }

    fn translate_next_line(&mut self) {
        let last_line = self.assembler.len().checked_sub(1);
        if self.current_line == last_line {
            self.set_state(State::Finished);
        } else {
            let line = self.current_line.map_or(0, |line| line + 1);
            self.current_line = Some(line);
            self.events.push(Event::CurrentLineChanged(line));
        }
    }
}
