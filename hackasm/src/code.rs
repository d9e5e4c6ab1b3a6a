//! Bit-field encodings for the fields of a compute instruction.
//!
//! ```text
//!               +--------comp-------+ +-dest--+ +-jump-+
//! Binary: 1 1 1 a  c1 c2 c3 c4  c5 c6 d1 d2  d3 j1 j2 j3
//! ```
//!
//! None of these functions validate their input. The parser only hands over
//! mnemonics it has already accepted.

/// Destination bits `d1 d2 d3`, one per register in the order A, D, M.
///
/// Each bit is the number of times its letter occurs in the mnemonic, so `""`
/// is `000` and `AMD` is `111`.
pub fn dest(mnemonic: &str) -> String {
    let mnemonic = mnemonic.to_ascii_uppercase();
    ['A', 'D', 'M']
        .iter()
        .map(|reg| mnemonic.matches(*reg).count().to_string())
        .collect()
}

/// Jump bits `j1 j2 j3`. Anything that isn't a jump condition never jumps.
pub fn jump(mnemonic: &str) -> &'static str {
    match &*mnemonic.to_ascii_uppercase() {
        "JGT" => "001",
        "JEQ" => "010",
        "JGE" => "011",
        "JLT" => "100",
        "JNE" => "101",
        "JLE" => "110",
        "JMP" => "111",
        _ => "000",
    }
}

/// Computation bits `a c1 c2 c3 c4 c5 c6`.
///
/// M forms share their A form's `c` bits; `a` is set whenever the mnemonic
/// mentions M.
pub fn comp(mnemonic: &str) -> String {
    let mnemonic = mnemonic.to_ascii_uppercase();
    let code = match &*mnemonic {
        "0" => "0101010",
        "1" => "0111111",
        "-1" => "0111010",
        "D" => "0001100",
        "A" | "M" => "0110000",
        "!D" => "0001101",
        "!A" | "!M" => "0110001",
        "-D" => "0001111",
        "-A" | "-M" => "0110011",
        "D+1" => "0011111",
        "A+1" | "M+1" => "0110111",
        "D-1" => "0001110",
        "A-1" | "M-1" => "0110010",
        "D+A" | "D+M" => "0000010",
        "D-A" | "D-M" => "0010011",
        "A-D" | "M-D" => "0000111",
        "D&A" | "D&M" => "0000000",
        "D|A" | "D|M" => "0010101",
        _ => "0000000",
    };

    if mnemonic.contains('M') {
        format!("1{}", &code[1..])
    } else {
        code.to_owned()
    }
}
