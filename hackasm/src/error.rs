use thiserror::Error;

/// Everything the parser can reject on a single line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Invalid symbol or constant: '{0}'")]
    InvalidAddress(String),
    #[error("Constant out of range: '{0}'")]
    ConstantOutOfRange(String),
    #[error("Invalid label: '{0}'")]
    InvalidLabel(String),
    #[error("Invalid destination: '{0}'")]
    InvalidDestination(String),
    #[error("Invalid jump: '{0}'")]
    InvalidJump(String),
    #[error("Invalid computation: '{0}'")]
    InvalidComputation(String),
}

/// A syntax error tagged with the source line it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {error}")]
pub struct AsmError {
    pub line: usize,
    pub error: SyntaxError,
}

impl AsmError {
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}
