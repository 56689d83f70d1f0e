//! Errors returned by the assembler, disassembler and binary parser, and the diagnostics they
//! carry.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/**
  A location in either assembly text or a binary word stream. For text, `line` and `column` are
  zero based and `index` is the byte offset into the source. For binaries, only `index` is
  meaningful and holds the word index.
*/
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Position {
  pub line   : usize,
  pub column : usize,
  pub index  : usize,
}

impl Position {
  pub fn new(line: usize, column: usize, index: usize) -> Position {
    Position { line, column, index }
  }

  pub fn word(index: usize) -> Position {
    Position { line: 0, column: 0, index }
  }
}

/// A human readable message anchored at the place the problem was found.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
  pub message        : String,
  pub position       : Position,
  pub is_text_source : bool,
}

impl Diagnostic {
  pub fn text(position: Position, message: impl Into<String>) -> Diagnostic {
    Diagnostic {
      message: message.into(),
      position,
      is_text_source: true,
    }
  }

  pub fn binary(word_index: usize, message: impl Into<String>) -> Diagnostic {
    Diagnostic {
      message: message.into(),
      position: Position::word(word_index),
      is_text_source: false,
    }
  }
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.is_text_source {
      true  => write!(f, "{}:{}: {}", self.position.line, self.position.column, self.message),
      false => write!(f, "word {}: {}", self.position.index, self.message),
    }
  }
}

#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
  /// Malformed assembly text.
  #[error("invalid assembly: {0}")]
  InvalidText(Diagnostic),

  /// A truncated, inconsistent or otherwise malformed binary module.
  #[error("invalid binary: {0}")]
  InvalidBinary(Diagnostic),

  /// A literal string too large to be encoded in a single instruction. This is a resource limit,
  /// not a syntax error.
  #[error("{line}:{column}: literal string exceeds {limit} bytes")]
  LiteralTooLong {
    line   : usize,
    column : usize,
    limit  : usize,
  },

  /// A byte buffer whose length is not a whole number of words.
  #[error("binary of {0} bytes is not a whole number of 32 bit words")]
  InvalidLength(usize),
}

impl Error {
  pub(crate) fn text(position: Position, message: impl Into<String>) -> Error {
    Error::InvalidText(Diagnostic::text(position, message))
  }

  pub(crate) fn binary(word_index: usize, message: impl Into<String>) -> Error {
    Error::InvalidBinary(Diagnostic::binary(word_index, message))
  }

  /// The diagnostic attached to this error, if any.
  pub fn diagnostic(&self) -> Option<&Diagnostic> {
    match self {
      Error::InvalidText(diagnostic) | Error::InvalidBinary(diagnostic) => Some(diagnostic),
      _ => None,
    }
  }

  /// Whether this error reports exhausting a resource limit rather than bad input.
  pub fn is_resource_error(&self) -> bool {
    matches!(self, Error::LiteralTooLong { .. })
  }
}
