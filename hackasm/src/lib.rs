use anyhow::Result;
use std::fmt::Write;

pub use assembler::Assembler;
pub use error::{AsmError, SyntaxError};

pub mod assembler;
pub mod code;
pub mod config;
mod constants;
pub mod controller;
pub mod disasm;
pub mod error;
pub mod line_map;
pub mod parser;
pub mod symbols;

/// Assemble a Hack program from text.
///
/// # Errors
///
/// If any line of the program has a syntax error
pub fn assemble_program(program_text: &str) -> Result<String> {
    Ok(assemble_with_debug(program_text, "")?.0)
}

/// Assemble a program and also return its debug map as JSON.
pub fn assemble_with_debug(program_text: &str, name: &str) -> Result<(String, String)> {
    let mut assembler = Assembler::from_source(program_text);
    assembler.assemble();

    if assembler.has_errors() {
        return Err(errors_to_anyhow(assembler.errors()));
    }

    Ok((
        render_binary(assembler.binary_code())?,
        assembler.debug_info(name).to_string()?,
    ))
}

/// One binary line per row, newline terminated.
pub fn render_binary(binary_code: &[String]) -> Result<String> {
    let mut assembled = String::new();

    for line in binary_code {
        writeln!(&mut assembled, "{}", line)?;
    }

    Ok(assembled)
}

pub fn errors_to_anyhow(errors: &[AsmError]) -> anyhow::Error {
    let listing = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    anyhow::Error::msg(format!("{} syntax error(s)\n{}", errors.len(), listing))
}
