/*!
  Decoding of binary modules.

  `parse` walks a module one instruction at a time. For each instruction it splits the opcode
  word, seeds an operand pattern from the opcode's grammar and consumes operands until the
  instruction's stated word count is used up, recording where each operand lies and, for numeric
  literals, how to read it. The result is handed to a `ParseHandler`.

  A malformed module is reported as an `Error::InvalidBinary` carrying the index of the offending
  word. A handler may also stop the parse early by returning `ControlFlow::Break`; that is not an
  error, and its value is handed back as `ParseStatus::Terminated`.

  Along the way the parser performs the consistency checks that come for free: ids are nonzero
  and defined at most once, `OpExtInst` names an imported set, and typed literals have a numeric
  type to be read by.
*/

use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::ControlFlow;

use tracing::debug;
#[cfg(feature = "trace_instructions")]
use tracing::trace;

use super::{
  split_opcode_word,
  unpack_string,
  Endianness,
  Header,
  NumberKind,
  ParsedInstruction,
  ParsedOperand,
  Word,
  HEADER_WORD_COUNT,
};
use crate::classify::generates_type;
use crate::error::Error;
use crate::grammar::{
  ext_inst_import_type,
  lookup_ext_inst_by_value,
  lookup_opcode_by_value,
  lookup_operand_by_value,
  ExtInstType,
  Op,
  OpcodeDesc,
  OperandType,
};
use crate::pattern::{
  prepend_operand_types,
  take_first_matchable_operand,
  OperandPattern,
};

/// Receives the parts of a module as they are decoded. Both methods default to continuing.
pub trait ParseHandler {
  /// The value a handler stops the parse with.
  type Break;

  fn handle_header(&mut self, _header: &Header) -> ControlFlow<Self::Break> {
    ControlFlow::Continue(())
  }

  fn handle_instruction(&mut self, _instruction: &ParsedInstruction<'_>) -> ControlFlow<Self::Break> {
    ControlFlow::Continue(())
  }
}

/// How a parse that met no malformed input ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ParseStatus<B> {
  /// Every instruction was visited.
  Completed,
  /// The handler stopped the parse with this value.
  Terminated(B),
}

/// The numeric interpretation of a type id, for reading typed literals.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct NumberType {
  kind      : NumberKind,
  bit_width : u32,
}

/// Parses a module held in words, in either byte order.
pub fn parse<H: ParseHandler>(words: &[Word], handler: &mut H) -> Result<ParseStatus<H::Break>, Error> {
  Parser::new(words, handler)?.run()
}

/// Parses a module held in bytes. The length must be a multiple of four.
pub fn parse_bytes<H: ParseHandler>(bytes: &[u8], handler: &mut H)
  -> Result<ParseStatus<H::Break>, Error>
{
  if bytes.len() % 4 != 0 {
    return Err(Error::InvalidLength(bytes.len()));
  }
  let words: Vec<Word> = bytes
    .chunks_exact(4)
    .map(|chunk| Word::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    .collect();
  parse(&words, handler)
}

struct Parser<'w, 'h, H: ParseHandler> {
  words         : Cow<'w, [Word]>,
  handler       : &'h mut H,
  endianness    : Endianness,
  word_index    : usize,
  operands      : Vec<ParsedOperand>,
  /// The type of each id defined so far. Types map to themselves, untyped results to 0.
  id_types      : HashMap<Word, Word>,
  number_types  : HashMap<Word, NumberType>,
  imports       : HashMap<Word, ExtInstType>,
}

/// The state of the instruction being decoded.
struct InstructionState {
  start         : usize,
  word_count    : usize,
  desc          : &'static OpcodeDesc,
  ext_inst_type : ExtInstType,
  type_id       : Word,
  result_id     : Word,
}

impl<'w, 'h, H: ParseHandler> Parser<'w, 'h, H> {
  fn new(words: &'w [Word], handler: &'h mut H) -> Result<Self, Error> {
    if words.len() < HEADER_WORD_COUNT {
      return Err(Error::binary(
        0,
        format!(
          "Module has incomplete header: only {} words instead of {}",
          words.len(),
          HEADER_WORD_COUNT
        ),
      ));
    }

    let endianness = Endianness::of_magic(words[0])
      .ok_or_else(|| Error::binary(0, "Invalid SPIR-V magic number."))?;
    let words = match endianness == Endianness::host() {
      true  => Cow::Borrowed(words),
      false => Cow::Owned(words.iter().map(|word| word.swap_bytes()).collect()),
    };

    Ok(Parser {
      words,
      handler,
      endianness,
      word_index   : HEADER_WORD_COUNT,
      operands     : Vec::new(),
      id_types     : HashMap::new(),
      number_types : HashMap::new(),
      imports      : HashMap::new(),
    })
  }

  fn run(mut self) -> Result<ParseStatus<H::Break>, Error> {
    let header = Header {
      endianness : self.endianness,
      magic      : self.words[0],
      version    : self.words[1],
      generator  : self.words[2],
      bound      : self.words[3],
      schema     : self.words[4],
    };
    debug!(
      words = self.words.len(),
      bound = header.bound,
      endianness = ?header.endianness,
      "parsing module"
    );

    if let ControlFlow::Break(value) = self.handler.handle_header(&header) {
      return Ok(ParseStatus::Terminated(value));
    }

    let mut instruction_count = 0usize;
    while self.word_index < self.words.len() {
      let state = self.parse_instruction()?;
      instruction_count += 1;
      if let ControlFlow::Break(value) = self.emit(&state) {
        return Ok(ParseStatus::Terminated(value));
      }
    }

    debug!(instructions = instruction_count, "parsed module");
    Ok(ParseStatus::Completed)
  }

  fn emit(&mut self, state: &InstructionState) -> ControlFlow<H::Break> {
    let words = &self.words[state.start..state.start + state.word_count];
    let instruction = ParsedInstruction {
      words,
      opcode        : state.desc.opcode,
      ext_inst_type : state.ext_inst_type,
      type_id       : state.type_id,
      result_id     : state.result_id,
      operands      : &self.operands,
    };
    #[cfg(feature = "trace_instructions")]
    trace!(word = state.start, instruction = %instruction.to_instruction(), "decoded");
    self.handler.handle_instruction(&instruction)
  }

  fn parse_instruction(&mut self) -> Result<InstructionState, Error> {
    let start = self.word_index;
    let (word_count, opcode) = split_opcode_word(self.words[start]);
    let word_count = word_count as usize;

    if word_count == 0 {
      return Err(Error::binary(start, "Invalid instruction word count: 0"));
    }
    let desc = lookup_opcode_by_value(opcode)
      .map_err(|_| Error::binary(start, format!("Invalid opcode: {}", opcode)))?;

    let mut state = InstructionState {
      start,
      word_count,
      desc,
      ext_inst_type : ExtInstType::None,
      type_id       : 0,
      result_id     : 0,
    };
    self.operands.clear();
    let mut pattern: OperandPattern = desc.operands.iter().copied().collect();
    self.word_index += 1;

    while self.word_index < start + word_count {
      if pattern.is_empty() {
        return Err(Error::binary(
          start,
          format!(
            "Invalid instruction {} starting at word {}: expected no more operands after {} words, \
             but stated word count is {}.",
            desc.opcode,
            start,
            self.word_index - start,
            word_count
          ),
        ));
      }
      let kind = take_first_matchable_operand(&mut pattern);
      self.parse_operand(&mut state, kind, &mut pattern)?;
    }

    if let Some(next) = pattern.front() {
      if !next.is_optional() {
        return Err(Error::binary(
          start,
          format!(
            "End of input reached while decoding {} starting at word {}: expected more operands \
             after {} words.",
            desc.opcode, start, word_count
          ),
        ));
      }
    }

    let found = self.word_index - start;
    if found != word_count {
      return Err(Error::binary(
        start,
        format!(
          "Invalid word count: {} starting at word {} says it has {} words, but found {} words \
           instead.",
          desc.opcode, start, word_count, found
        ),
      ));
    }

    self.record_number_type(&state);
    Ok(state)
  }

  fn exhausted(&self, state: &InstructionState, kind: OperandType, what: &str) -> Error {
    Error::binary(
      self.word_index,
      format!(
        "End of input reached while decoding {} starting at word {}: {} {} operand at word \
         offset {}.",
        state.desc.opcode,
        state.start,
        what,
        kind,
        self.word_index - state.start
      ),
    )
  }

  fn parse_operand(
    &mut self,
    state   : &mut InstructionState,
    kind    : OperandType,
    pattern : &mut OperandPattern,
  ) -> Result<(), Error>
  {
    use OperandType::*;

    if self.word_index >= self.words.len() {
      return Err(self.exhausted(state, kind, "missing"));
    }
    let word = self.words[self.word_index];
    let offset = self.word_index - state.start;
    let mut operand = ParsedOperand {
      offset           : offset as u16,
      num_words        : 1,
      kind             : kind.base(),
      number_kind      : NumberKind::None,
      number_bit_width : 0,
    };
    let mut consumed = 1;

    match kind {
      TypeId => {
        if word == 0 {
          return Err(Error::binary(self.word_index, "Error: Type Id is 0"));
        }
        state.type_id = word;
      }

      ResultId => {
        if word == 0 {
          return Err(Error::binary(self.word_index, "Error: Result Id is 0"));
        }
        if self.id_types.contains_key(&word) {
          return Err(Error::binary(
            self.word_index,
            format!("Id {} is defined more than once", word),
          ));
        }
        state.result_id = word;
        let recorded_type = match generates_type(state.desc.opcode) {
          true  => word,
          false => state.type_id,
        };
        self.id_types.insert(word, recorded_type);
      }

      Id | OptionalId | IdInOptionalTuple => {
        if word == 0 {
          return Err(Error::binary(self.word_index, "Id is 0"));
        }
        // The set id of an OpExtInst is the operand after its result id.
        if state.desc.opcode == Op::ExtInst && offset == 3 {
          state.ext_inst_type = self.imports.get(&word).copied().ok_or_else(|| {
            Error::binary(
              self.word_index,
              format!(
                "OpExtInst set Id {} does not reference an OpExtInstImport result Id",
                word
              ),
            )
          })?;
        }
      }

      ScopeId | MemorySemanticsId => {
        if word == 0 {
          return Err(Error::binary(self.word_index, format!("{} is 0", kind)));
        }
      }

      ExtensionInstructionNumber => {
        let entry = lookup_ext_inst_by_value(state.ext_inst_type, word).map_err(|_| {
          Error::binary(
            self.word_index,
            format!("Invalid extended instruction number: {}", word),
          )
        })?;
        prepend_operand_types(entry.operands, pattern);
      }

      SpecConstantOpNumber => {
        let entry = u16::try_from(word)
          .ok()
          .and_then(|value| lookup_opcode_by_value(value).ok())
          .ok_or_else(|| {
            Error::binary(self.word_index, format!("Invalid OpSpecConstantOp opcode: {}", word))
          })?;
        prepend_operand_types(spec_constant_op_operands(entry), pattern);
      }

      LiteralInteger | OptionalLiteralInteger | LiteralIntegerInOptionalTuple | OptionalCiv => {
        operand.kind = LiteralInteger;
        operand.number_kind = NumberKind::UnsignedInt;
        operand.number_bit_width = 32;
      }

      TypedLiteralNumber | OptionalTypedLiteralNumber => {
        let number_type = self.typed_literal_type(state)?;
        let num_words = ((number_type.bit_width + 31) / 32) as usize;
        operand.number_kind = number_type.kind;
        operand.number_bit_width = number_type.bit_width;
        operand.num_words = num_words as u16;
        consumed = num_words;
        if self.word_index + num_words > self.words.len() {
          return Err(self.exhausted(state, kind.base(), "truncated"));
        }
      }

      LiteralString | OptionalLiteralString => {
        // A terminator past the stated end shows up as a word count mismatch.
        let (bytes, num_words) = unpack_string(&self.words[self.word_index..])
          .ok_or_else(|| self.exhausted(state, kind.base(), "truncated"))?;
        operand.num_words = u16::try_from(num_words).unwrap_or(u16::MAX);
        consumed = num_words;

        if state.desc.opcode == Op::ExtInstImport {
          let name = String::from_utf8_lossy(&bytes);
          let set = ext_inst_import_type(&name);
          if set == ExtInstType::None {
            return Err(Error::binary(
              self.word_index,
              format!("Invalid extended instruction import '{}'", name),
            ));
          }
          self.imports.insert(state.result_id, set);
        }
      }

      kind if kind.is_mask() => {
        self.parse_mask(kind, word, pattern)?;
      }

      kind if kind.is_enum() => {
        let entry = lookup_operand_by_value(kind, word).map_err(|_| {
          Error::binary(
            self.word_index,
            format!("Invalid {} operand: {}", kind.base(), word),
          )
        })?;
        prepend_operand_types(entry.operands, pattern);
      }

      // Variable types are expanded before they get here.
      _ => {
        return Err(Error::binary(
          self.word_index,
          format!("Unexpected {} operand in {}", kind, state.desc.opcode),
        ));
      }
    }

    self.operands.push(operand);
    self.word_index += consumed;
    Ok(())
  }

  /// Checks each set bit of a mask, high bit first, and prepends the operands each requires.
  fn parse_mask(&self, kind: OperandType, word: Word, pattern: &mut OperandPattern) -> Result<(), Error> {
    let kind = kind.base();
    let mut remaining = word;
    let mut bit = 1u32 << 31;
    while remaining != 0 {
      if remaining & bit != 0 {
        let entry = lookup_operand_by_value(kind, bit).map_err(|_| {
          Error::binary(
            self.word_index,
            format!("Invalid {} operand: {} has invalid mask component {}", kind, word, bit),
          )
        })?;
        remaining ^= bit;
        prepend_operand_types(entry.operands, pattern);
      }
      bit >>= 1;
    }
    if word == 0 {
      if let Ok(entry) = lookup_operand_by_value(kind, 0) {
        prepend_operand_types(entry.operands, pattern);
      }
    }
    Ok(())
  }

  /// The numeric type a typed literal of the current instruction is read by: the selector's type
  /// for `OpSwitch`, the result type otherwise.
  fn typed_literal_type(&self, state: &InstructionState) -> Result<NumberType, Error> {
    let type_id = match state.desc.opcode {
      Op::Switch => {
        let selector = self.words[state.start + 1];
        let switch_error = |problem: &str| {
          Error::binary(
            self.word_index,
            format!("Invalid OpSwitch: selector id {} {}", selector, problem),
          )
        };
        let type_id = match self.id_types.get(&selector) {
          Some(type_id) if *type_id != 0 => *type_id,
          _ => return Err(switch_error("has no type")),
        };
        if type_id == selector {
          return Err(switch_error("is a type, not a value"));
        }
        let number_type = self.number_type_of(type_id)?;
        if !matches!(number_type.kind, NumberKind::UnsignedInt | NumberKind::SignedInt) {
          return Err(switch_error("is not a scalar integer"));
        }
        return Ok(number_type);
      }
      _ => state.type_id,
    };
    self.number_type_of(type_id)
  }

  fn number_type_of(&self, type_id: Word) -> Result<NumberType, Error> {
    let number_type = self.number_types.get(&type_id).copied().ok_or_else(|| {
      Error::binary(self.word_index, format!("Type Id {} is not a type", type_id))
    })?;
    if number_type.kind == NumberKind::None {
      return Err(Error::binary(
        self.word_index,
        format!("Type Id {} is not a scalar numeric type", type_id),
      ));
    }
    if number_type.bit_width == 0 || number_type.bit_width > 64 {
      return Err(Error::binary(
        self.word_index,
        format!(
          "Type Id {} has unsupported bit width {} for a literal number",
          type_id, number_type.bit_width
        ),
      ));
    }
    Ok(number_type)
  }

  /// Remembers the numeric interpretation of each type a module declares.
  fn record_number_type(&mut self, state: &InstructionState) {
    if !generates_type(state.desc.opcode) || state.result_id == 0 {
      return;
    }
    let words = &self.words[state.start..state.start + state.word_count];
    let number_type = match (state.desc.opcode, words.get(2), words.get(3)) {
      (Op::TypeInt, Some(width), Some(signedness)) => NumberType {
        kind: match *signedness {
          0 => NumberKind::UnsignedInt,
          _ => NumberKind::SignedInt,
        },
        bit_width: *width,
      },
      (Op::TypeFloat, Some(width), _) => NumberType { kind: NumberKind::Float, bit_width: *width },
      _ => NumberType::default(),
    };
    self.number_types.insert(state.result_id, number_type);
  }
}

/// The operands an `OpSpecConstantOp` takes after naming `entry`'s opcode: the opcode's own
/// operands without its result type and result id.
pub(crate) fn spec_constant_op_operands(entry: &OpcodeDesc) -> &'static [OperandType] {
  let skip = entry
    .operands
    .iter()
    .take_while(|kind| matches!(kind, OperandType::TypeId | OperandType::ResultId))
    .count();
  &entry.operands[skip..]
}
