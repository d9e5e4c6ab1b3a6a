use indexmap::IndexMap;

use crate::constants::FIRST_VARIABLE_ADDRESS;

static PREDEFINED: [(&str, u32); 7] = [
    ("SP", 0x0000),
    ("LCL", 0x0001),
    ("ARG", 0x0002),
    ("THIS", 0x0003),
    ("THAT", 0x0004),
    ("SCREEN", 0x4000),
    ("KBD", 0x6000),
];

static REGISTER_COUNT: u32 = 16;

/// Symbol name to RAM or ROM address, in definition order.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: IndexMap<String, u32>,
    next_variable: u32,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            symbols: IndexMap::new(),
            next_variable: FIRST_VARIABLE_ADDRESS,
        };
        table.initialize();
        table
    }

    /// Forget every user symbol and restore the predefined ones.
    pub fn initialize(&mut self) {
        self.symbols.clear();
        for (symbol, address) in PREDEFINED {
            self.symbols.insert(symbol.to_owned(), address);
        }
        for register in 0..REGISTER_COUNT {
            self.symbols.insert(format!("R{}", register), register);
        }
        self.next_variable = FIRST_VARIABLE_ADDRESS;
    }

    pub fn define(&mut self, symbol: &str, address: u32) {
        self.symbols.insert(symbol.to_owned(), address);
    }

    /// Bind `symbol` to the next free variable address.
    pub fn allocate_next(&mut self, symbol: &str) -> u32 {
        let address = self.next_variable;
        self.define(symbol, address);
        self.next_variable += 1;
        address
    }

    /// Whether `symbol` is one of the architecture's reserved names.
    pub fn is_predefined(symbol: &str) -> bool {
        PREDEFINED.iter().any(|(name, _)| *name == symbol)
            || (0..REGISTER_COUNT).any(|register| format!("R{}", register) == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    pub fn lookup(&self, symbol: &str) -> Option<u32> {
        self.symbols.get(symbol).copied()
    }

    /// Look `symbol` up, declaring it as a variable on first use.
    pub fn resolve_or_allocate(&mut self, symbol: &str) -> u32 {
        match self.lookup(symbol) {
            Some(address) => address,
            None => self.allocate_next(symbol),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_symbols() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup("SP"), Some(0));
        assert_eq!(table.lookup("LCL"), Some(1));
        assert_eq!(table.lookup("ARG"), Some(2));
        assert_eq!(table.lookup("THIS"), Some(3));
        assert_eq!(table.lookup("THAT"), Some(4));
        assert_eq!(table.lookup("SCREEN"), Some(16384));
        assert_eq!(table.lookup("KBD"), Some(24576));
        for register in 0..16 {
            assert_eq!(table.lookup(&format!("R{register}")), Some(register));
        }
        assert_eq!(table.len(), 23);
        assert_eq!(table.lookup("R16"), None);
        assert_eq!(table.lookup("sp"), None);
    }

    #[test]
    fn variables_are_allocated_in_order() {
        let mut table = SymbolTable::new();
        assert_eq!(table.resolve_or_allocate("i"), 16);
        assert_eq!(table.resolve_or_allocate("sum"), 17);
        assert_eq!(table.resolve_or_allocate("i"), 16);
        assert_eq!(table.resolve_or_allocate("R2"), 2);
        assert_eq!(table.allocate_next("j"), 18);
    }

    #[test]
    fn reserved_names() {
        assert!(SymbolTable::is_predefined("SCREEN"));
        assert!(SymbolTable::is_predefined("R0"));
        assert!(SymbolTable::is_predefined("R15"));
        assert!(!SymbolTable::is_predefined("R16"));
        assert!(!SymbolTable::is_predefined("R01"));
        assert!(!SymbolTable::is_predefined("LOOP"));
    }

    #[test]
    fn lookup_does_not_allocate() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup("missing"), None);
        assert!(!table.contains("missing"));
    }

    #[test]
    fn define_overwrites_and_initialize_resets() {
        let mut table = SymbolTable::new();
        table.define("LOOP", 4);
        table.define("LOOP", 9);
        assert_eq!(table.lookup("LOOP"), Some(9));
        table.allocate_next("x");

        table.initialize();
        assert!(!table.contains("LOOP"));
        assert_eq!(table.resolve_or_allocate("y"), 16);
    }
}
