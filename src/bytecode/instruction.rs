use std::fmt::{Display, Formatter};

use crate::bytecode::Word;
use crate::grammar::{ExtInstType, Op, OperandType};

/// How the words of a numeric literal operand are to be read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum NumberKind {
  /// Not a number.
  #[default]
  None,
  UnsignedInt,
  SignedInt,
  Float,
}

/// The location and kind of one operand within a decoded instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ParsedOperand {
  /// Index of the operand's first word within the instruction. The opcode word is index 0.
  pub offset           : u16,
  pub num_words        : u16,
  /// The concrete operand type. Optional and tuple types are reported as their base type.
  pub kind             : OperandType,
  pub number_kind      : NumberKind,
  /// For numeric literals, the width of the number in bits.
  pub number_bit_width : u32,
}

impl ParsedOperand {
  pub fn range(&self) -> std::ops::Range<usize> {
    let start = self.offset as usize;
    start..start + self.num_words as usize
  }
}

/**
  One decoded instruction, as handed to a `ParseHandler`. It borrows both its words and its
  operand records from the parser, so it only lives for the duration of the callback. Use
  `to_instruction` to keep a copy.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParsedInstruction<'a> {
  /// All words of the instruction, opcode word included, in host byte order.
  pub words         : &'a [Word],
  pub opcode        : Op,
  /// The instruction set of an `OpExtInst`. `ExtInstType::None` for every other opcode.
  pub ext_inst_type : ExtInstType,
  /// The result type id, or 0 if the instruction has none.
  pub type_id       : Word,
  /// The result id, or 0 if the instruction has none.
  pub result_id     : Word,
  pub operands      : &'a [ParsedOperand],
}

impl<'a> ParsedInstruction<'a> {
  pub fn word_count(&self) -> usize {
    self.words.len()
  }

  /// The words of the operand at `index`.
  pub fn operand_words(&self, index: usize) -> &'a [Word] {
    match self.operands.get(index) {
      Some(operand) => self.words.get(operand.range()).unwrap_or(&[]),
      None          => &[],
    }
  }

  /// The single word of the operand at `index`, for ids, enumerants and 32 bit literals.
  pub fn operand_word(&self, index: usize) -> Option<Word> {
    self.operand_words(index).first().copied()
  }

  pub fn to_instruction(&self) -> Instruction {
    Instruction {
      opcode        : self.opcode,
      ext_inst_type : self.ext_inst_type,
      type_id       : self.type_id,
      result_id     : self.result_id,
      words         : self.words.to_vec(),
      operands      : self.operands.to_vec(),
    }
  }
}

/// An owned copy of a `ParsedInstruction`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub opcode        : Op,
  pub ext_inst_type : ExtInstType,
  pub type_id       : Word,
  pub result_id     : Word,
  pub words         : Vec<Word>,
  pub operands      : Vec<ParsedOperand>,
}

impl Instruction {
  pub fn as_parsed(&self) -> ParsedInstruction<'_> {
    ParsedInstruction {
      words         : &self.words,
      opcode        : self.opcode,
      ext_inst_type : self.ext_inst_type,
      type_id       : self.type_id,
      result_id     : self.result_id,
      operands      : &self.operands,
    }
  }

  pub fn operand_words(&self, index: usize) -> &[Word] {
    self.as_parsed().operand_words(index)
  }

  pub fn operand_word(&self, index: usize) -> Option<Word> {
    self.as_parsed().operand_word(index)
  }

  pub fn has_result(&self) -> bool {
    self.result_id != 0
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.result_id != 0 {
      write!(f, "%{} = ", self.result_id)?;
    }
    write!(f, "{}", self.opcode)?;
    for (index, operand) in self.operands.iter().enumerate() {
      if operand.kind == OperandType::ResultId {
        continue;
      }
      match operand.kind.is_id() {
        true  => write!(f, " %{}", self.operand_word(index).unwrap_or(0))?,
        false => {
          for word in self.operand_words(index) {
            write!(f, " {:#x}", word)?;
          }
        }
      }
    }
    Ok(())
  }
}
