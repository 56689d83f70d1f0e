use std::collections::HashSet;

use bimap::BiMap;
use string_cache::DefaultAtom;
use thiserror::Error;

use crate::bytecode::Word;

/**
  The mapping between the `%name`s written in assembly text and the numeric ids they stand for. A
  symbol table is a convenience wrapper around a `BiMap` of interned names, together with the
  module's id bound: one more than the largest id handed out so far.

  Names are numbered densely in order of first appearance, starting at 1. When numeric ids are
  preserved, a name made only of digits keeps its value as its id, and the values so claimed are
  skipped when numbering symbolic names.
*/
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SymbolError {
  #[error("Invalid ID {0}")]
  InvalidName(String),
  /// Two spellings of one number, such as `%7` and `%007`, when numeric ids are preserved.
  #[error("ID %{name} has the same value as ID %{existing}.")]
  Collision { name: String, existing: String },
}

#[derive(Clone, Debug)]
pub struct SymbolTable {
  table     : BiMap<DefaultAtom, Word>,
  bound     : Word,
  next_id   : Word,
  preserved : HashSet<Word>,
}

impl Default for SymbolTable {
  fn default() -> Self {
    SymbolTable::new()
  }
}

impl SymbolTable {
  pub fn new() -> SymbolTable {
    SymbolTable {
      table     : BiMap::new(),
      bound     : 1,
      next_id   : 1,
      preserved : HashSet::new(),
    }
  }

  /// Claims `id` for the numeric name `%id`, so that no symbolic name is given it.
  pub fn preserve(&mut self, id: Word) {
    if id != 0 {
      self.preserved.insert(id);
    }
  }

  /// Gives the id of `name`, assigning the next free id if the name is new. A name is never
  /// rebound: a new name whose preserved numeric value is already taken is an error.
  pub fn assign_or_get(&mut self, name: &str) -> Result<Word, SymbolError> {
    if !is_valid_id_name(name) {
      return Err(SymbolError::InvalidName(name.to_string()));
    }
    let atom = DefaultAtom::from(name);
    if let Some(id) = self.table.get_by_left(&atom) {
      return Ok(*id);
    }

    let id = match name.parse::<Word>() {
      Ok(value) if self.preserved.contains(&value) => value,
      _ => {
        let mut candidate = self.next_id;
        while self.preserved.contains(&candidate) || self.table.contains_right(&candidate) {
          candidate += 1;
        }
        self.next_id = candidate + 1;
        candidate
      }
    };

    if let Err((_, id)) = self.table.insert_no_overwrite(atom, id) {
      return Err(SymbolError::Collision {
        name     : name.to_string(),
        existing : self.get_name(id).unwrap_or_default().to_string(),
      });
    }
    self.bound = self.bound.max(id.saturating_add(1));
    Ok(id)
  }

  pub fn get_id(&self, name: &str) -> Option<Word> {
    self.table.get_by_left(&DefaultAtom::from(name)).copied()
  }

  pub fn get_name(&self, id: Word) -> Option<&str> {
    self.table.get_by_right(&id).map(|atom| &**atom)
  }

  /// One more than the largest id assigned so far.
  pub fn bound(&self) -> Word {
    self.bound
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }

  /// The names and their ids, in no particular order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, Word)> {
    self.table.iter().map(|(name, id)| (&**name, *id))
  }
}

/// An id name is a nonempty run of ASCII letters, digits and underscores.
pub fn is_valid_id_name(name: &str) -> bool {
  !name.is_empty() && name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
}
