use crate::{
    constants::{
        computation_regex, constant_regex, symbol_regex, ADDRESS_MARKER, COMMENT_MARKER,
        LABEL_CLOSE, LABEL_OPEN, MAX_ADDRESS, VALID_DESTINATIONS, VALID_JUMPS,
    },
    error::SyntaxError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `@value`
    Address,
    /// `dest=comp;jump`
    Compute,
    /// `(LABEL)`
    Label,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compute {
    pub dest: String,
    pub comp: String,
    pub jump: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Address(String),
    Compute(Compute),
    Label(String),
}

/// One classified source line.
///
/// A line that failed validation keeps its kind but none of its fields: the
/// symbol of an address or label is empty and all compute fields are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub line_no: usize,
    pub command: Command,
    pub error: Option<SyntaxError>,
}

impl ParsedLine {
    pub fn kind(&self) -> CommandKind {
        match self.command {
            Command::Address(_) => CommandKind::Address,
            Command::Compute(_) => CommandKind::Compute,
            Command::Label(_) => CommandKind::Label,
        }
    }

    /// Symbol or constant of an address, or the name of a label.
    pub fn symbol(&self) -> &str {
        match &self.command {
            Command::Address(symbol) | Command::Label(symbol) => symbol,
            Command::Compute(_) => "",
        }
    }

    pub fn compute(&self) -> Option<&Compute> {
        match &self.command {
            Command::Compute(compute) => Some(compute),
            _ => None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the line occupies an instruction address.
    pub fn is_instruction(&self) -> bool {
        matches!(self.kind(), CommandKind::Address | CommandKind::Compute)
    }
}

fn remove_comment(line: &str) -> &str {
    line.split_once(COMMENT_MARKER)
        .map(|(code, _)| code)
        .unwrap_or(line)
        .trim()
}

pub fn is_valid_symbol(symbol: &str) -> bool {
    symbol_regex().is_match(symbol)
}

pub fn is_valid_constant(constant: &str) -> bool {
    constant_regex().is_match(constant)
}

fn parse_address(payload: &str) -> (Command, Option<SyntaxError>) {
    let error = if is_valid_symbol(payload) {
        None
    } else if is_valid_constant(payload) {
        match payload.parse::<u32>() {
            Ok(value) if value <= MAX_ADDRESS => None,
            _ => Some(SyntaxError::ConstantOutOfRange(payload.to_owned())),
        }
    } else {
        Some(SyntaxError::InvalidAddress(payload.to_owned()))
    };

    match error {
        None => (Command::Address(payload.to_owned()), None),
        Some(error) => (Command::Address(String::new()), Some(error)),
    }
}

fn parse_label(payload: &str) -> (Command, Option<SyntaxError>) {
    if is_valid_symbol(payload) {
        (Command::Label(payload.to_owned()), None)
    } else {
        (
            Command::Label(String::new()),
            Some(SyntaxError::InvalidLabel(payload.to_owned())),
        )
    }
}

/// Validates `dest=comp;jump` one field at a time: destination, then jump,
/// then computation. The first failure wins and discards whatever was already
/// accepted, so later fields of a bad line are never reported.
fn parse_compute(line: &str) -> Result<Compute, SyntaxError> {
    let mut compute = Compute::default();

    let rest = match line.split('=').collect::<Vec<_>>()[..] {
        [dest, rest] => {
            if !VALID_DESTINATIONS.contains(&dest) {
                return Err(SyntaxError::InvalidDestination(dest.to_owned()));
            }
            compute.dest = dest.to_owned();
            rest
        }
        _ => line,
    };

    let comp = match rest.split(';').collect::<Vec<_>>()[..] {
        [comp, jump] => {
            if !VALID_JUMPS.contains(&jump) {
                return Err(SyntaxError::InvalidJump(jump.to_owned()));
            }
            compute.jump = jump.to_owned();
            comp
        }
        _ => rest,
    };

    if !computation_regex().is_match(comp) {
        return Err(SyntaxError::InvalidComputation(comp.to_owned()));
    }
    compute.comp = comp.to_owned();

    Ok(compute)
}

/// Classify a single source line. Blank and comment-only lines give `None`.
pub fn parse_line(line: &str, line_no: usize) -> Option<ParsedLine> {
    let line = remove_comment(line);
    if line.is_empty() {
        return None;
    }

    let (command, error) = if let Some(payload) = line.strip_prefix(ADDRESS_MARKER) {
        parse_address(payload)
    } else if let Some(payload) = line
        .strip_prefix(LABEL_OPEN)
        .and_then(|rest| rest.strip_suffix(LABEL_CLOSE))
    {
        parse_label(payload)
    } else {
        match parse_compute(line) {
            Ok(compute) => (Command::Compute(compute), None),
            Err(error) => (Command::Compute(Compute::default()), Some(error)),
        }
    };

    if let Some(error) = error.as_ref() {
        log::debug!("line {}: {}", line_no, error);
    }

    Some(ParsedLine {
        line_no,
        command,
        error,
    })
}

/// A traversal over a program's lines, yielding only lines that hold a
/// command.
///
/// Each assembler pass creates its own `Parser`, so passes never share a
/// cursor.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: &'a [String],
    next_line: usize,
}

impl<'a> Parser<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self::starting_at(lines, 0)
    }

    pub fn starting_at(lines: &'a [String], line_no: usize) -> Self {
        Self {
            lines,
            next_line: line_no,
        }
    }

    pub fn reset(&mut self) {
        self.next_line = 0;
    }

    /// Index of the next line that will be examined.
    pub fn position(&self) -> usize {
        self.next_line
    }

    pub fn has_more_lines(&self) -> bool {
        self.next_line < self.lines.len()
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = ParsedLine;

    fn next(&mut self) -> Option<Self::Item> {
        while self.has_more_lines() {
            let line_no = self.next_line;
            self.next_line += 1;
            if let Some(parsed) = parse_line(&self.lines[line_no], line_no) {
                return Some(parsed);
            }
        }
        None
    }
}
