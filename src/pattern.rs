/*!
  Operand patterns. While an instruction is assembled or decoded, the operand types still expected
  are kept in a deque, the front being the next one. Matching an operand may grow the pattern: an
  enumerant can pull in operands of its own, and a variable type expands into one more element
  followed by itself.
*/

use std::collections::VecDeque;

use crate::grammar::{operand_table, OperandType};

pub type OperandPattern = VecDeque<OperandType>;

/// Pushes `types` onto the front of `pattern`, keeping their order.
pub fn prepend_operand_types(types: &[OperandType], pattern: &mut OperandPattern) {
  for kind in types.iter().rev() {
    pattern.push_front(*kind);
  }
}

/**
  Prepends the operand types that each set bit of `mask` requires, in increasing bit order. Bits
  with no entry in `kind`'s table are skipped, as is the entry for a zero mask.
*/
pub fn prepend_operand_types_for_mask(kind: OperandType, mask: u32, pattern: &mut OperandPattern) {
  let table = match operand_table(kind) {
    Some(table) => table,
    None        => return,
  };
  // Scanning from the high bit down and prepending leaves the low bit's operands in front.
  let mut bit = 1u32 << 31;
  while bit != 0 {
    if mask & bit != 0 {
      if let Some(entry) = table.iter().find(|entry| entry.value == bit) {
        prepend_operand_types(entry.operands, pattern);
      }
    }
    bit >>= 1;
  }
}

/**
  If `kind` is a variable type, prepends one repetition of its element (or tuple) followed by
  `kind` itself and returns true. Otherwise leaves `pattern` alone and returns false.
*/
pub fn expand_operand_sequence_once(kind: OperandType, pattern: &mut OperandPattern) -> bool {
  use OperandType::*;
  let expansion: &[OperandType] = match kind {
    VariableId               => &[OptionalId, VariableId],
    VariableLiteralInteger   => &[OptionalLiteralInteger, VariableLiteralInteger],
    VariableLiteralId        => &[OptionalTypedLiteralNumber, IdInOptionalTuple, VariableLiteralId],
    VariableIdLiteralInteger => &[OptionalId, LiteralIntegerInOptionalTuple, VariableIdLiteralInteger],
    _                        => return false,
  };
  prepend_operand_types(expansion, pattern);
  true
}

/// Pops types off the front of `pattern`, expanding variable types, until a type that matches
/// exactly one operand turns up. Returns `OperandType::None` if the pattern runs out first.
pub fn take_first_matchable_operand(pattern: &mut OperandPattern) -> OperandType {
  while let Some(kind) = pattern.pop_front() {
    if !expand_operand_sequence_once(kind, pattern) {
      return kind;
    }
  }
  OperandType::None
}

/**
  The pattern to use once a raw `!<integer>` word has been written in place of an operand. The
  grammar no longer says what follows, so everything becomes an optional context-independent
  value. The one exception is the result id: it is kept in position so an assignment prefix can
  still bind it. Without a result id the pattern is a single `OptionalCiv`, which re-arms itself
  for as long as operands keep coming.
*/
pub fn alternate_pattern_following_immediate(pattern: &OperandPattern) -> OperandPattern {
  let mut alternate = OperandPattern::new();
  match pattern.iter().position(|kind| *kind == OperandType::ResultId) {
    Some(result_position) => {
      alternate.extend(std::iter::repeat(OperandType::OptionalCiv).take(result_position));
      alternate.push_back(OperandType::ResultId);
      alternate.push_back(OperandType::OptionalCiv);
    }
    None => alternate.push_back(OperandType::OptionalCiv),
  }
  alternate
}

#[cfg(test)]
mod tests {
  use super::*;
  use OperandType::*;

  fn pattern(types: &[OperandType]) -> OperandPattern {
    types.iter().copied().collect()
  }

  #[test]
  fn prepend_keeps_order() {
    let mut p = pattern(&[Id]);
    prepend_operand_types(&[TypeId, ResultId], &mut p);
    assert_eq!(p, pattern(&[TypeId, ResultId, Id]));
  }

  #[test]
  fn variable_types_expand_by_one() {
    let mut p = OperandPattern::new();
    assert!(expand_operand_sequence_once(VariableLiteralId, &mut p));
    assert_eq!(p, pattern(&[OptionalTypedLiteralNumber, IdInOptionalTuple, VariableLiteralId]));
    assert!(!expand_operand_sequence_once(Id, &mut p));
    assert_eq!(p.len(), 3);
  }

  #[test]
  fn take_first_matchable_expands_variables() {
    let mut p = pattern(&[VariableId]);
    assert_eq!(take_first_matchable_operand(&mut p), OptionalId);
    assert_eq!(p, pattern(&[VariableId]));

    let mut empty = OperandPattern::new();
    assert_eq!(take_first_matchable_operand(&mut empty), None);
  }

  #[test]
  fn mask_operands_in_bit_order() {
    // Lod (0x2) takes one id, Grad (0x4) takes two.
    let mut p = pattern(&[LiteralInteger]);
    prepend_operand_types_for_mask(ImageOperands, 0x6, &mut p);
    assert_eq!(p, pattern(&[Id, Id, Id, LiteralInteger]));

    let mut p = OperandPattern::new();
    prepend_operand_types_for_mask(MemoryAccess, 0x2, &mut p);
    assert_eq!(p, pattern(&[LiteralInteger]));

    let mut p = OperandPattern::new();
    prepend_operand_types_for_mask(ImageOperands, 0, &mut p);
    assert!(p.is_empty());
  }

  #[test]
  fn immediate_keeps_result_id() {
    let p = pattern(&[TypeId, ResultId, Id, Id]);
    assert_eq!(
      alternate_pattern_following_immediate(&p),
      pattern(&[OptionalCiv, ResultId, OptionalCiv])
    );
    let p = pattern(&[Id, LiteralInteger]);
    assert_eq!(alternate_pattern_following_immediate(&p), pattern(&[OptionalCiv]));
    assert_eq!(
      alternate_pattern_following_immediate(&OperandPattern::new()),
      pattern(&[OptionalCiv])
    );
  }
}
