use once_cell::sync::OnceCell;
use regex::Regex;

pub static SYMBOL_REGEX: OnceCell<Regex> = OnceCell::new();
pub static CONSTANT_REGEX: OnceCell<Regex> = OnceCell::new();
pub static COMPUTATION_REGEX: OnceCell<Regex> = OnceCell::new();

// Letters, digits, '_', '.', '$' and ':', not starting with a digit.
static SYMBOL_REGEX_PATTERN: &str = r"^[A-Za-z_.$:][0-9A-Za-z_.$:]*$";
static CONSTANT_REGEX_PATTERN: &str = r"^[0-9]+$";
static COMPUTATION_REGEX_PATTERN: &str = r"(?i)^(0|-?1|[-!]?[DAM]|[DAM][+-]1|D[-+&|][AM]|[AM]-D)$";

pub static COMMENT_MARKER: &str = "//";
pub static ADDRESS_MARKER: char = '@';
pub static LABEL_OPEN: char = '(';
pub static LABEL_CLOSE: char = ')';

pub static VALID_DESTINATIONS: [&str; 7] = ["M", "D", "MD", "A", "AM", "AD", "AMD"];
pub static VALID_JUMPS: [&str; 7] = ["JGT", "JEQ", "JGE", "JLT", "JNE", "JLE", "JMP"];

/// Largest value an address instruction can load.
pub static MAX_ADDRESS: u32 = 0x7F_FF;
/// First RAM address handed out to variables.
pub static FIRST_VARIABLE_ADDRESS: u32 = 16;

pub fn symbol_regex() -> &'static Regex {
    SYMBOL_REGEX.get_or_init(|| Regex::new(SYMBOL_REGEX_PATTERN).expect("Invalid symbol regex"))
}

pub fn constant_regex() -> &'static Regex {
    CONSTANT_REGEX
        .get_or_init(|| Regex::new(CONSTANT_REGEX_PATTERN).expect("Invalid constant regex"))
}

pub fn computation_regex() -> &'static Regex {
    COMPUTATION_REGEX.get_or_init(|| {
        Regex::new(COMPUTATION_REGEX_PATTERN).expect("Invalid computation regex")
    })
}
