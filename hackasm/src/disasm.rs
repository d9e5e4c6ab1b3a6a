//! Turns binary lines back into assembly text.

use bimap::BiMap;
use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisasmError {
    #[error("Expected 16 binary digits, found '{0}'")]
    Malformed(String),
    #[error("Unknown opcode in '{0}'")]
    UnknownOpcode(String),
    #[error("Unknown computation bits '{0}'")]
    UnknownComputation(String),
}

/// A-register computations and their `c1..c6` bits.
static COMPUTATIONS: Lazy<BiMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = BiMap::new();
    map.insert("0", "101010");
    map.insert("1", "111111");
    map.insert("-1", "111010");
    map.insert("D", "001100");
    map.insert("A", "110000");
    map.insert("!D", "001101");
    map.insert("!A", "110001");
    map.insert("-D", "001111");
    map.insert("-A", "110011");
    map.insert("D+1", "011111");
    map.insert("A+1", "110111");
    map.insert("D-1", "001110");
    map.insert("A-1", "110010");
    map.insert("D+A", "000010");
    map.insert("D-A", "010011");
    map.insert("A-D", "000111");
    map.insert("D&A", "000000");
    map.insert("D|A", "010101");
    map
});

/// Destination mnemonic for `d1 d2 d3` (A, D, M), written in the order the
/// parser accepts: `AMD`, `AM`, `AD`, `MD`.
pub fn dest(bits: &str) -> String {
    let bits = bits.as_bytes();
    [(0, 'A'), (2, 'M'), (1, 'D')]
        .iter()
        .filter(|(idx, _)| bits.get(*idx) == Some(&b'1'))
        .map(|(_, reg)| *reg)
        .collect()
}

pub fn jump(bits: &str) -> &'static str {
    match bits {
        "001" => "JGT",
        "010" => "JEQ",
        "011" => "JGE",
        "100" => "JLT",
        "101" => "JNE",
        "110" => "JLE",
        "111" => "JMP",
        _ => "",
    }
}

/// Computation mnemonic for `a c1..c6`.
pub fn comp(bits: &str) -> Option<String> {
    let (a, c) = (bits.get(..1)?, bits.get(1..)?);
    let mnemonic = COMPUTATIONS.get_by_right(c)?;
    match a {
        "0" => Some(mnemonic.to_string()),
        "1" if mnemonic.contains('A') => Some(mnemonic.replace('A', "M")),
        _ => None,
    }
}

/// Render one 16-bit binary line as an instruction.
pub fn instruction(line: &str) -> Result<String, DisasmError> {
    let line = line.trim();
    if line.len() != 16 || !line.chars().all(|c| c == '0' || c == '1') {
        return Err(DisasmError::Malformed(line.to_owned()));
    }

    if line.starts_with('0') {
        let value = u16::from_str_radix(line, 2)
            .map_err(|_| DisasmError::Malformed(line.to_owned()))?;
        return Ok(format!("@{}", value));
    }

    if !line.starts_with("111") {
        return Err(DisasmError::UnknownOpcode(line.to_owned()));
    }

    let comp = comp(&line[3..10])
        .ok_or_else(|| DisasmError::UnknownComputation(line[3..10].to_owned()))?;
    let dest = dest(&line[10..13]);
    let jump = jump(&line[13..16]);

    let mut text = String::new();
    if !dest.is_empty() {
        text.push_str(&dest);
        text.push('=');
    }
    text.push_str(&comp);
    if !jump.is_empty() {
        text.push(';');
        text.push_str(jump);
    }
    Ok(text)
}

pub fn disassemble<S: AsRef<str>>(binary: &[S]) -> Result<Vec<String>, DisasmError> {
    binary.iter().map(|line| instruction(line.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code;

    #[test]
    fn dest_bits() {
        assert_eq!(dest("000"), "");
        assert_eq!(dest("001"), "M");
        assert_eq!(dest("011"), "MD");
        assert_eq!(dest("101"), "AM");
        assert_eq!(dest("110"), "AD");
        assert_eq!(dest("111"), "AMD");
    }

    #[test]
    fn comp_inverts_the_encoder() {
        for mnemonic in [
            "0", "1", "-1", "D", "A", "M", "!D", "!A", "!M", "-D", "-A", "-M", "D+1", "A+1",
            "M+1", "D-1", "A-1", "M-1", "D+A", "D+M", "D-A", "D-M", "A-D", "M-D", "D&A", "D&M",
            "D|A", "D|M",
        ] {
            assert_eq!(comp(&code::comp(mnemonic)).as_deref(), Some(mnemonic));
        }
        assert_eq!(comp("1101010"), None);
        assert_eq!(comp("0111100"), None);
    }

    #[test]
    fn instructions() {
        assert_eq!(instruction("0000000000010000").unwrap(), "@16");
        assert_eq!(instruction("0111111111111111").unwrap(), "@32767");
        assert_eq!(instruction("1110110000010000").unwrap(), "D=A");
        assert_eq!(instruction("1110101010000111").unwrap(), "0;JMP");
        assert_eq!(instruction("1111110111011000").unwrap(), "MD=M+1");
        assert_eq!(instruction("1110001100000001").unwrap(), "D;JGT");
    }

    #[test]
    fn rejects_bad_lines() {
        assert_eq!(
            instruction("0101"),
            Err(DisasmError::Malformed("0101".into()))
        );
        assert!(matches!(
            instruction("000000000000000x"),
            Err(DisasmError::Malformed(_))
        ));
        assert!(matches!(
            instruction("1010000000000000"),
            Err(DisasmError::UnknownOpcode(_))
        ));
        assert!(matches!(
            instruction("1111111100000000"),
            Err(DisasmError::UnknownComputation(_))
        ));
    }
}
