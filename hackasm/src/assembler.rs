use hackdbg::Hdb;

use crate::{
    code,
    constants::MAX_ADDRESS,
    error::AsmError,
    line_map::LineMap,
    parser::{Command, ParsedLine, Parser},
    symbols::SymbolTable,
};

/// Split source text on any of `\n`, `\r\n` or `\r`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split("\r\n")
        .flat_map(|line| line.split(['\r', '\n']))
        .map(str::to_owned)
        .collect()
}

/// Two-pass assembler over an in-memory program.
///
/// [`parse`](Self::parse) binds every label and collects syntax errors,
/// [`translate`](Self::translate) then emits one binary line per instruction.
/// Translation relies on the labels bound by the last parse.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    source: Vec<String>,
    symbols: SymbolTable,
    binary_code: Vec<String>,
    line_map: LineMap,
    errors: Vec<AsmError>,
    translate_cursor: usize,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_source(text: &str) -> Self {
        let mut assembler = Self::new();
        assembler.set_source(text);
        assembler
    }

    pub fn set_source(&mut self, text: &str) {
        self.set_source_lines(split_lines(text));
    }

    pub fn set_source_lines(&mut self, lines: Vec<String>) {
        self.source = lines;
        self.symbols.initialize();
        self.binary_code.clear();
        self.line_map.clear();
        self.errors.clear();
        self.translate_cursor = 0;
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source
    }

    pub fn binary_code(&self) -> &[String] {
        &self.binary_code
    }

    pub fn binary_line(&self, binary_line: usize) -> Option<&str> {
        self.binary_code.get(binary_line).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.binary_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binary_code.is_empty()
    }

    pub fn errors(&self) -> &[AsmError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors_on_line(&self, source_line: usize) -> impl Iterator<Item = &AsmError> {
        self.errors.iter().filter(move |e| e.line == source_line)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    pub fn source_line_for_binary_line(&self, binary_line: usize) -> Option<usize> {
        self.line_map.source_line_for_binary_line(binary_line)
    }

    pub fn binary_line_for_source_line(&self, source_line: usize) -> Option<usize> {
        self.line_map.binary_line_for_source_line(source_line)
    }

    /// Run both passes.
    pub fn assemble(&mut self) {
        self.parse();
        self.translate();
    }

    /// First pass: bind labels to instruction addresses and collect errors.
    pub fn parse(&mut self) {
        self.symbols.initialize();
        self.line_map.clear();
        self.errors.clear();

        let mut address: u32 = 0;

        for line in Parser::new(&self.source) {
            match &line.command {
                Command::Address(_) | Command::Compute(_) => address += 1,
                Command::Label(label) if label.is_empty() => {}
                Command::Label(label) if SymbolTable::is_predefined(label) => {
                    log::warn!(
                        "line {}: label {} shadows a predefined symbol, ignoring it",
                        line.line_no,
                        label
                    );
                }
                Command::Label(label) => {
                    if self.symbols.contains(label) {
                        log::debug!("line {}: label {} redefined", line.line_no, label);
                    }
                    self.symbols.define(label, address);
                }
            }

            if let Some(error) = line.error {
                self.errors.push(AsmError {
                    line: line.line_no,
                    error,
                });
            }
        }

        log::debug!(
            "parsed {} lines: {} instructions, {} errors",
            self.source.len(),
            address,
            self.errors.len()
        );
    }

    /// Second pass: emit every instruction.
    pub fn translate(&mut self) {
        self.begin_translate();
        while self.translate_next().is_some() {}
        log::debug!("translated {} instructions", self.binary_code.len());
    }

    /// Rewind for [`translate_next`](Self::translate_next), dropping previous
    /// output. The symbol table keeps its labels.
    pub fn begin_translate(&mut self) {
        self.binary_code.clear();
        self.line_map.clear();
        self.translate_cursor = 0;
    }

    /// Translate source lines until one binary line has been emitted, and
    /// return its index. `None` once the program is exhausted.
    pub fn translate_next(&mut self) -> Option<usize> {
        loop {
            let (line, position) = {
                let mut parser = Parser::starting_at(&self.source, self.translate_cursor);
                let line = parser.next();
                (line, parser.position())
            };
            self.translate_cursor = position;

            if let Some(binary_line) = self.emit(&line?) {
                return Some(binary_line);
            }
        }
    }

    /// Whether [`translate_next`](Self::translate_next) has reached the end
    /// of the program.
    pub fn translation_finished(&self) -> bool {
        !Parser::starting_at(&self.source, self.translate_cursor).has_more_lines()
    }

    fn emit(&mut self, line: &ParsedLine) -> Option<usize> {
        if line.has_error() {
            return None;
        }

        let instruction = match &line.command {
            Command::Compute(compute) => format!(
                "111{}{}{}",
                code::comp(&compute.comp),
                code::dest(&compute.dest),
                code::jump(&compute.jump)
            ),
            Command::Address(symbol) => {
                let address = match symbol.parse::<u32>() {
                    Ok(constant) => constant,
                    Err(_) => self.symbols.resolve_or_allocate(symbol),
                };
                format!("{:016b}", self.fit_address(address, line))
            }
            Command::Label(_) => return None,
        };

        let binary_line = self.binary_code.len();
        self.binary_code.push(instruction);
        self.line_map.insert(line.line_no, binary_line);

        Some(binary_line)
    }

    fn fit_address(&self, address: u32, line: &ParsedLine) -> u32 {
        if address > MAX_ADDRESS {
            log::warn!(
                "line {}: address {} of {} does not fit in 15 bits, wrapping",
                line.line_no,
                address,
                line.symbol()
            );
        }
        address & MAX_ADDRESS
    }

    /// Debug map for the last translation.
    pub fn debug_info(&self, name: &str) -> Hdb {
        let mut hdb = Hdb::new(name);
        for (source_line, binary_line) in self.line_map.pairs() {
            let text = self
                .source
                .get(source_line)
                .map(|line| line.trim().to_owned())
                .unwrap_or_default();
            hdb.add_line(binary_line, source_line, text);
        }
        for (symbol, address) in self.symbols.iter() {
            hdb.add_symbol(symbol.to_owned(), address);
        }
        hdb
    }
}
