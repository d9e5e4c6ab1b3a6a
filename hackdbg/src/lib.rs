use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
pub use serde_json::Error;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HdbLine {
    pub binary_line: usize,
    pub source_line: usize,
    pub text: String,
}

/// Debug information for one assembled program: which source line produced
/// each binary line, and the final symbol table in definition order.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Hdb {
    pub name: String,
    pub lines: Vec<HdbLine>,
    pub source_map: BTreeMap<usize, usize>,
    pub symbols: IndexMap<String, u32>,
}

impl Hdb {
    pub fn new(name: &str) -> Self {
        Hdb {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_string(dbg: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(dbg)
    }

    pub fn add_symbol(&mut self, symbol: String, address: u32) {
        self.symbols.insert(symbol, address);
    }

    pub fn add_line(&mut self, binary_line: usize, source_line: usize, text: String) {
        self.lines.push(HdbLine {
            binary_line,
            source_line,
            text,
        });
        self.source_map.insert(source_line, self.lines.len() - 1);
    }

    /// The entry for a source line, if that line emitted code.
    pub fn line_for_source(&self, source_line: usize) -> Option<&HdbLine> {
        self.source_map
            .get(&source_line)
            .and_then(|idx| self.lines.get(*idx))
    }
}
