/*!
  A cursor over assembly text. Assembly is a sequence of whitespace separated words, where `;`
  starts a comment running to the end of the line. The cursor tracks the line, column and byte
  offset of its position for diagnostics, and is cheap to copy, so lookahead is done by copying
  the cursor and reading ahead on the copy.
*/

use crate::error::Position;

#[derive(Clone, Copy, Debug)]
pub struct TextCursor<'t> {
  text     : &'t str,
  position : Position,
}

impl<'t> TextCursor<'t> {
  pub fn new(text: &'t str) -> Self {
    TextCursor {
      text,
      position: Position::default(),
    }
  }

  pub fn position(&self) -> Position {
    self.position
  }

  pub fn set_position(&mut self, position: Position) {
    self.position = position;
  }

  /// The unread part of the text.
  pub fn rest(&self) -> &'t str {
    self.text.get(self.position.index..).unwrap_or("")
  }

  /// Returns the next character without consuming it.
  pub fn peek(&self) -> Option<char> {
    self.rest().chars().next()
  }

  pub fn is_at_end(&self) -> bool {
    self.peek().is_none()
  }

  fn bump(&mut self, c: char) {
    self.position.index += c.len_utf8();
    match c {
      '\n' => {
        self.position.line += 1;
        self.position.column = 0;
      }
      _ => self.position.column += 1,
    }
  }

  /// Skips whitespace and comments. Returns false if the end of the text was reached.
  pub fn advance(&mut self) -> bool {
    loop {
      match self.peek() {
        None => return false,
        Some(';') => {
          while let Some(c) = self.peek() {
            if c == '\n' {
              break;
            }
            self.bump(c);
          }
        }
        Some(c @ (' ' | '\t' | '\r' | '\n')) => self.bump(c),
        Some(_) => return true,
      }
    }
  }

  /**
    Reads one word and moves past it. A word ends at whitespace, at `;`, or at the end of the
    text, except inside double quotes or directly after a backslash. Quotes and backslashes are
    part of the word; unescaping is left to the literal parser. A newline inside quotes is part of
    the word but does not start a new line.
  */
  pub fn word(&mut self) -> &'t str {
    let text = self.rest();
    let mut quoting = false;
    let mut escaping = false;
    let mut end = 0;

    for c in text.chars() {
      if escaping {
        escaping = false;
      } else {
        match c {
          '\\' => escaping = true,
          '"'  => quoting = !quoting,
          ' ' | '\t' | '\r' | ';' if !quoting => break,
          '\n' if !quoting => break,
          _ => {}
        }
      }
      end += c.len_utf8();
      self.position.index += c.len_utf8();
      self.position.column += 1;
    }

    &text[..end]
  }

  /// The word at the cursor, without moving past it.
  pub fn peek_word(&self) -> &'t str {
    let mut lookahead = *self;
    lookahead.word()
  }

  /// Whether the text at the cursor looks like an opcode: `Op` followed by an uppercase letter.
  pub fn starts_with_op(&self) -> bool {
    let bytes = self.rest().as_bytes();
    bytes.len() >= 3 && bytes.starts_with(b"Op") && bytes[2].is_ascii_uppercase()
  }

  /// Whether the text at the cursor starts an instruction, either `OpName ...` or
  /// `%result = OpName ...`. Leaves the cursor where it is.
  pub fn is_start_of_new_instruction(&self) -> bool {
    if self.starts_with_op() {
      return true;
    }
    if self.peek() != Some('%') {
      return false;
    }

    let mut lookahead = *self;
    lookahead.word();
    if !lookahead.advance() || lookahead.word() != "=" {
      return false;
    }
    lookahead.advance() && lookahead.starts_with_op()
  }
}
