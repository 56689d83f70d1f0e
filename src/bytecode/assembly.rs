/*!
  The human readable textual form of a module is called assembly. This module translates assembly
  to binary.

  An instruction is written either in assignment form, `%result = OpName operands...`, or in
  canonical form, `OpName operands...`, where the result id, if any, is an ordinary operand. Which
  form is accepted is chosen by `AssemblySyntax`. Ids are written `%name`, and names are numbered
  densely in order of first appearance. Enumerants are written by name and masks as `|`-separated
  names. A word of the form `!<integer>` may stand in for any operand and is emitted as a raw word,
  after which the rest of the instruction is read without the help of the grammar. An instruction
  may even start with one, in which case every word up to the next instruction is raw.

  Assembly stops at the first error, and no words are returned for a module that has one.
*/

use std::collections::HashMap;

use tracing::debug;
#[cfg(feature = "trace_instructions")]
use tracing::trace;

use super::binary::spec_constant_op_operands;
use super::{
  make_opcode_word,
  pack_string,
  Header,
  NumberKind,
  Word,
  GENERATOR_WORD,
  MAX_INSTRUCTION_WORDS,
};
use crate::error::{Error, Position};
use crate::grammar::{
  ext_inst_import_type,
  lookup_ext_inst_by_name,
  lookup_opcode_by_name,
  lookup_operand_by_name,
  parse_mask_operand,
  ExtInstType,
  Op,
  OpcodeDesc,
  OperandType,
};
use crate::literal::{
  parse_immediate,
  parse_literal,
  parse_typed_float,
  parse_typed_integer,
  Literal,
  LiteralError,
  MAX_LITERAL_STRING_BYTES,
};
use crate::pattern::{
  alternate_pattern_following_immediate,
  prepend_operand_types,
  prepend_operand_types_for_mask,
  take_first_matchable_operand,
  OperandPattern,
};
use crate::symboltable::SymbolTable;
use crate::text::TextCursor;

/// Where the result id of an instruction is written.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum AssemblySyntax {
  /// `%result = OpName operands...`. Instructions with a result must use this form.
  #[default]
  Assignment,
  /// `OpName %result operands...`, the result id written where it appears in the binary.
  Canonical,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AssemblerOptions {
  pub syntax               : AssemblySyntax,
  /// The generator word written to the header.
  pub generator            : Word,
  /// Whether `%<digits>` names keep their value as their id.
  pub preserve_numeric_ids : bool,
}

impl Default for AssemblerOptions {
  fn default() -> Self {
    AssemblerOptions {
      syntax               : AssemblySyntax::Assignment,
      generator            : GENERATOR_WORD,
      preserve_numeric_ids : false,
    }
  }
}

/// An assembled module, with the names its ids were given.
#[derive(Clone, Debug)]
pub struct Assembly {
  pub words   : Vec<Word>,
  pub bound   : Word,
  pub symbols : SymbolTable,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Assembler {
  options: AssemblerOptions,
}

/// Assembles `text`, written in assignment form, to the words of a module.
pub fn assemble(text: &str) -> Result<Vec<Word>, Error> {
  Assembler::default().assemble(text).map(|assembly| assembly.words)
}

impl Assembler {
  pub fn new(options: AssemblerOptions) -> Assembler {
    Assembler { options }
  }

  pub fn options(&self) -> &AssemblerOptions {
    &self.options
  }

  pub fn assemble(&self, text: &str) -> Result<Assembly, Error> {
    let mut encoder = Encoder::new(text, self.options.syntax);
    if self.options.preserve_numeric_ids {
      encoder.preserve_numeric_ids();
    }

    let mut body = Vec::new();
    let mut instruction_count = 0usize;
    while encoder.cursor.advance() {
      let start = encoder.cursor.position();
      let instruction = encoder.encode_instruction()?;
      if instruction.len() > MAX_INSTRUCTION_WORDS {
        return Err(Error::text(
          start,
          format!(
            "Instruction too long: {} words, but the limit is {}.",
            instruction.len(),
            MAX_INSTRUCTION_WORDS
          ),
        ));
      }
      #[cfg(feature = "trace_instructions")]
      trace!(line = start.line, words = ?instruction, "encoded");
      instruction_count += 1;
      body.extend(instruction);
    }

    // Text without instructions, empty or all comments, still makes a valid header-only module.
    let bound = encoder.symbols.bound();
    let mut words = Header::new(bound, self.options.generator).to_words().to_vec();
    words.extend(body);
    debug!(instructions = instruction_count, words = words.len(), bound, "assembled module");

    Ok(Assembly {
      words,
      bound,
      symbols: encoder.symbols,
    })
  }
}

/// Why an operand was not encoded.
enum OperandError {
  /// The word is not an operand of the expected type. An optional operand ends the instruction
  /// instead.
  Mismatch(Error),
  Fatal(Error),
}

impl OperandError {
  fn into_error(self) -> Error {
    match self {
      OperandError::Mismatch(error) | OperandError::Fatal(error) => error,
    }
  }
}

impl From<Error> for OperandError {
  fn from(error: Error) -> Self {
    OperandError::Fatal(error)
  }
}

type OperandResult = Result<(), OperandError>;

fn mismatch(position: Position, message: String) -> OperandError {
  OperandError::Mismatch(Error::text(position, message))
}

fn fatal(position: Position, message: String) -> OperandError {
  OperandError::Fatal(Error::text(position, message))
}

fn too_long(position: Position) -> OperandError {
  OperandError::Fatal(Error::LiteralTooLong {
    line   : position.line,
    column : position.column,
    limit  : MAX_LITERAL_STRING_BYTES,
  })
}

/// Pushes a number of `width` bits, low word first.
fn push_wide(bits: u64, width: u32, words: &mut Vec<Word>) {
  words.push(bits as Word);
  if width > 32 {
    words.push((bits >> 32) as Word);
  }
}

fn push_literal(literal: &Literal, words: &mut Vec<Word>) {
  match *literal {
    Literal::I32(value)        => words.push(value as Word),
    Literal::U32(value)        => words.push(value),
    Literal::F32(value)        => words.push(value.to_bits()),
    Literal::I64(value)        => push_wide(value as u64, 64, words),
    Literal::U64(value)        => push_wide(value, 64, words),
    Literal::F64(value)        => push_wide(value.to_bits(), 64, words),
    Literal::String(ref value) => words.extend(pack_string(value)),
  }
}

/// The state of one assembly call.
struct Encoder<'t> {
  cursor       : TextCursor<'t>,
  syntax       : AssemblySyntax,
  symbols      : SymbolTable,
  /// The set each `OpExtInstImport` result imports.
  imports      : HashMap<Word, ExtInstType>,
  /// The result type of each typed result.
  id_types     : HashMap<Word, Word>,
  /// The numeric types declared so far, for reading typed literals.
  number_types : HashMap<Word, (NumberKind, u32)>,
}

impl<'t> Encoder<'t> {
  fn new(text: &'t str, syntax: AssemblySyntax) -> Self {
    Encoder {
      cursor       : TextCursor::new(text),
      syntax,
      symbols      : SymbolTable::new(),
      imports      : HashMap::new(),
      id_types     : HashMap::new(),
      number_types : HashMap::new(),
    }
  }

  /// Reserves the value of every `%<digits>` word in the text as the id of that name.
  fn preserve_numeric_ids(&mut self) {
    let mut scan = self.cursor;
    while scan.advance() {
      let digits = match scan.word().strip_prefix('%') {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => digits,
        _ => continue,
      };
      if let Ok(id) = digits.parse::<Word>() {
        self.symbols.preserve(id);
      }
    }
  }

  /// Encodes the instruction at the cursor, which is at a word, and leaves the cursor after it.
  fn encode_instruction(&mut self) -> Result<Vec<Word>, Error> {
    if self.cursor.peek() == Some('!') {
      return self.encode_raw_instruction();
    }

    let first_position = self.cursor.position();
    let starts_with_op = self.cursor.starts_with_op();
    let first_word = self.cursor.word();

    let mut result_id: Option<(&'t str, Position)> = None;
    let (opcode_name, opcode_position) = match starts_with_op {
      true => (first_word, first_position),

      false => {
        if self.syntax != AssemblySyntax::Assignment {
          return Err(Error::text(
            first_position,
            format!("Expected <opcode> at the beginning of an instruction, found '{}'.", first_word),
          ));
        }
        if !first_word.starts_with('%') {
          return Err(Error::text(
            first_position,
            format!(
              "Expected <opcode> or <result-id> at the beginning of an instruction, found '{}'.",
              first_word
            ),
          ));
        }
        result_id = Some((first_word, first_position));

        if !self.cursor.advance() {
          return Err(Error::text(self.cursor.position(), "Expected '=', found end of stream."));
        }
        let equals_position = self.cursor.position();
        if self.cursor.word() != "=" {
          return Err(Error::text(equals_position, "'=' expected after result id."));
        }

        if !self.cursor.advance() {
          return Err(Error::text(self.cursor.position(), "Expected opcode, found end of stream."));
        }
        let position = self.cursor.position();
        let starts_with_op = self.cursor.starts_with_op();
        let name = self.cursor.word();
        if !starts_with_op {
          return Err(Error::text(position, format!("Invalid Opcode prefix '{}'.", name)));
        }
        (name, position)
      }
    };

    let desc = opcode_name
      .strip_prefix("Op")
      .and_then(|name| lookup_opcode_by_name(name).ok())
      .ok_or_else(|| Error::text(opcode_position, format!("Invalid Opcode name '{}'", opcode_name)))?;

    if self.syntax == AssemblySyntax::Assignment && desc.has_result && result_id.is_none() {
      return Err(Error::text(
        first_position,
        format!("Expected <result-id> at the beginning of an instruction, found '{}'.", first_word),
      ));
    }

    // The opcode word is filled in once the length is known.
    let mut words: Vec<Word> = vec![0];
    let mut pattern: OperandPattern = desc.operands.iter().copied().collect();

    while !pattern.is_empty() {
      let kind = take_first_matchable_operand(&mut pattern);

      if kind == OperandType::ResultId {
        if let Some((name, position)) = result_id {
          self
            .encode_id(kind, name, position, &mut words)
            .map_err(OperandError::into_error)?;
          continue;
        }
      }

      if !self.cursor.advance() {
        match kind.is_optional() {
          true  => break,
          false => {
            return Err(Error::text(self.cursor.position(), "Expected operand, found end of stream."));
          }
        }
      }
      if self.cursor.is_start_of_new_instruction() {
        match kind.is_optional() {
          true  => break,
          false => {
            return Err(Error::text(
              self.cursor.position(),
              "Expected operand, found next instruction instead.",
            ));
          }
        }
      }

      let position = self.cursor.position();
      let mut lookahead = self.cursor;
      let value = lookahead.word();

      match self.encode_operand(desc, kind, value, position, &mut words, &mut pattern) {
        Ok(())                                                    => self.cursor = lookahead,
        Err(OperandError::Mismatch(_)) if kind.is_optional()      => break,
        Err(error)                                                => return Err(error.into_error()),
      }

      // A context independent value keeps matching for as long as words keep coming.
      if kind == OperandType::OptionalCiv && pattern.is_empty() {
        pattern.push_back(OperandType::OptionalCiv);
      }
    }

    if words.len() <= MAX_INSTRUCTION_WORDS {
      words[0] = make_opcode_word(words.len() as u16, desc.opcode.value());
    }
    self.record_types(desc.opcode, &words);
    Ok(words)
  }

  /// Encodes an instruction that starts with `!<integer>`: the integer, then every word up to the
  /// next instruction as a context independent value.
  fn encode_raw_instruction(&mut self) -> Result<Vec<Word>, Error> {
    let position = self.cursor.position();
    let first_word = self.cursor.word();
    let first = first_word
      .strip_prefix('!')
      .and_then(|digits| parse_immediate(digits).ok())
      .ok_or_else(|| Error::text(position, format!("Invalid immediate integer '{}'.", first_word)))?;
    let mut words = vec![first];

    while self.cursor.advance() {
      if self.cursor.is_start_of_new_instruction() {
        break;
      }
      let position = self.cursor.position();
      let mut lookahead = self.cursor;
      let value = lookahead.word();

      if value == "=" {
        return Err(Error::text(position, format!("{} not allowed before =.", first_word)));
      }
      let encoded = match value.starts_with('!') {
        true  => self.encode_immediate(value, position, &mut words),
        false => self.encode_context_independent(value, position, &mut words),
      };
      match encoded {
        Ok(()) => self.cursor = lookahead,
        Err(OperandError::Mismatch(_)) => {
          return Err(Error::text(
            position,
            format!("Invalid word following {}: {}", first_word, value),
          ));
        }
        Err(OperandError::Fatal(error)) => return Err(error),
      }
    }

    Ok(words)
  }

  fn encode_operand(
    &mut self,
    desc     : &'static OpcodeDesc,
    kind     : OperandType,
    value    : &str,
    position : Position,
    words    : &mut Vec<Word>,
    pattern  : &mut OperandPattern,
  ) -> OperandResult
  {
    use OperandType::*;

    if value.starts_with('!') {
      self.encode_immediate(value, position, words)?;
      *pattern = alternate_pattern_following_immediate(pattern);
      return Ok(());
    }

    match kind {
      Id | TypeId | ResultId | ScopeId | MemorySemanticsId | OptionalId | IdInOptionalTuple => {
        self.encode_id(kind, value, position, words)
      }

      LiteralInteger | OptionalLiteralInteger | LiteralIntegerInOptionalTuple => {
        self.encode_literal_number(value, position, words)
      }

      TypedLiteralNumber | OptionalTypedLiteralNumber => {
        self.encode_typed_literal(desc.opcode, value, position, words)
      }

      LiteralString | OptionalLiteralString => {
        self.encode_literal_string(desc.opcode, value, position, words)
      }

      OptionalCiv => self.encode_context_independent(value, position, words),

      ExtensionInstructionNumber => {
        // The set id is the operand after the result id.
        let set = words
          .get(3)
          .and_then(|id| self.imports.get(id))
          .copied()
          .unwrap_or_default();
        let entry = lookup_ext_inst_by_name(set, value).map_err(|_| {
          fatal(position, format!("Invalid extended instruction name '{}'.", value))
        })?;
        words.push(entry.value);
        prepend_operand_types(entry.operands, pattern);
        Ok(())
      }

      SpecConstantOpNumber => {
        let entry = lookup_opcode_by_name(value).map_err(|_| {
          fatal(position, format!("Invalid OpSpecConstantOp opcode '{}'.", value))
        })?;
        words.push(entry.opcode.value() as Word);
        prepend_operand_types(spec_constant_op_operands(entry), pattern);
        Ok(())
      }

      kind if kind.is_mask() => {
        let mask = parse_mask_operand(kind, value)
          .map_err(|_| fatal(position, format!("Invalid {} '{}'.", kind.base(), value)))?;
        words.push(mask);
        prepend_operand_types_for_mask(kind, mask, pattern);
        Ok(())
      }

      kind if kind.is_enum() => {
        let entry = lookup_operand_by_name(kind, value)
          .map_err(|_| fatal(position, format!("Invalid {} '{}'.", kind.base(), value)))?;
        words.push(entry.value);
        prepend_operand_types(entry.operands, pattern);
        Ok(())
      }

      // Variable types are expanded before they get here.
      _ => Err(fatal(position, format!("Unexpected {} operand '{}'.", kind, value))),
    }
  }

  fn encode_immediate(&mut self, value: &str, position: Position, words: &mut Vec<Word>) -> OperandResult {
    let word = value
      .strip_prefix('!')
      .and_then(|digits| parse_immediate(digits).ok())
      .ok_or_else(|| fatal(position, format!("Invalid immediate integer '{}'.", value)))?;
    words.push(word);
    Ok(())
  }

  fn encode_id(&mut self, kind: OperandType, value: &str, position: Position, words: &mut Vec<Word>)
    -> OperandResult
  {
    let name = match value.strip_prefix('%') {
      Some(name) => name,
      None => {
        let error = Error::text(position, "Expected id to start with %.");
        return Err(match kind {
          OperandType::OptionalId => OperandError::Mismatch(error),
          _                       => OperandError::Fatal(error),
        });
      }
    };
    let id = self
      .symbols
      .assign_or_get(name)
      .map_err(|error| fatal(position, error.to_string()))?;
    words.push(id);
    Ok(())
  }

  /// A number whose representation is sniffed from its spelling.
  fn encode_literal_number(&mut self, value: &str, position: Position, words: &mut Vec<Word>) -> OperandResult {
    match parse_literal(value) {
      Ok(Literal::String(_)) => Err(mismatch(
        position,
        format!("Expected literal number, found literal string '{}'.", value),
      )),
      Ok(literal) => {
        push_literal(&literal, words);
        Ok(())
      }
      Err(LiteralError::TooLong) => Err(too_long(position)),
      Err(_) => Err(mismatch(position, format!("Invalid literal number '{}'.", value))),
    }
  }

  /// A number for a constant or a switch case, read as the numeric type it belongs to when that
  /// type was declared earlier in the text.
  fn encode_typed_literal(&mut self, opcode: Op, value: &str, position: Position, words: &mut Vec<Word>)
    -> OperandResult
  {
    if value.starts_with('"') {
      return self.encode_literal_number(value, position, words);
    }

    match self.literal_type(opcode, words) {
      Some((kind @ (NumberKind::SignedInt | NumberKind::UnsignedInt), width)) if (1..=64).contains(&width) => {
        let signed = kind == NumberKind::SignedInt;
        let bits = parse_typed_integer(value, width, signed).map_err(|error| match error {
          LiteralError::OutOfRange => fatal(
            position,
            format!(
              "Integer {} does not fit in a {}-bit {} integer type.",
              value,
              width,
              if signed { "signed" } else { "unsigned" }
            ),
          ),
          _ => mismatch(position, format!("Invalid literal number '{}'.", value)),
        })?;
        push_wide(bits, width, words);
        Ok(())
      }

      Some((NumberKind::Float, width @ (32 | 64))) => {
        let bits = parse_typed_float(value, width)
          .map_err(|_| mismatch(position, format!("Invalid literal number '{}'.", value)))?;
        push_wide(bits, width, words);
        Ok(())
      }

      _ => self.encode_literal_number(value, position, words),
    }
  }

  fn literal_type(&self, opcode: Op, words: &[Word]) -> Option<(NumberKind, u32)> {
    let type_id = match opcode {
      Op::Switch => words.get(1).and_then(|selector| self.id_types.get(selector)).copied()?,
      _          => words.get(1).copied()?,
    };
    self.number_types.get(&type_id).copied()
  }

  fn encode_literal_string(&mut self, opcode: Op, value: &str, position: Position, words: &mut Vec<Word>)
    -> OperandResult
  {
    match parse_literal(value) {
      Ok(Literal::String(string)) => {
        if opcode == Op::ExtInstImport {
          if let Some(result_id) = words.get(1) {
            self.imports.insert(*result_id, ext_inst_import_type(&string));
          }
        }
        words.extend(pack_string(&string));
        Ok(())
      }
      Ok(_) => Err(mismatch(
        position,
        format!("Expected literal string, found literal number '{}'.", value),
      )),
      Err(LiteralError::TooLong) => Err(too_long(position)),
      Err(_) => Err(mismatch(position, format!("Invalid literal string '{}'.", value))),
    }
  }

  /// A literal number, else a literal string, else an id.
  fn encode_context_independent(&mut self, value: &str, position: Position, words: &mut Vec<Word>)
    -> OperandResult
  {
    match parse_literal(value) {
      Ok(literal)                => {
        push_literal(&literal, words);
        Ok(())
      }
      Err(LiteralError::TooLong) => Err(too_long(position)),
      Err(_)                     => self.encode_id(OperandType::OptionalId, value, position, words),
    }
  }

  /// Remembers what typed literals later in the text need to know about this instruction.
  fn record_types(&mut self, opcode: Op, words: &[Word]) {
    match (opcode, words) {
      (Op::TypeInt, [_, result, width, signedness, ..]) => {
        let kind = match *signedness {
          0 => NumberKind::UnsignedInt,
          _ => NumberKind::SignedInt,
        };
        self.number_types.insert(*result, (kind, *width));
      }
      (Op::TypeFloat, [_, result, width, ..]) => {
        self.number_types.insert(*result, (NumberKind::Float, *width));
      }
      _ => {}
    }

    let desc = crate::grammar::opcode_desc(opcode);
    if let (true, true, [_, type_id, result, ..]) = (desc.has_type, desc.has_result, words) {
      self.id_types.insert(*result, *type_id);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::{HEADER_WORD_COUNT, MAGIC_NUMBER};

  fn body(text: &str) -> Vec<Word> {
    let words = assemble(text).unwrap();
    words[HEADER_WORD_COUNT..].to_vec()
  }

  fn error_message(text: &str) -> String {
    match assemble(text) {
      Err(error) => error.diagnostic().map(|d| d.message.clone()).unwrap_or_default(),
      Ok(words)  => panic!("expected an error, got {:?}", words),
    }
  }

  #[test]
  fn empty_text_is_a_bare_header() {
    for text in ["", "   \n", "; nothing here\n"] {
      let words = assemble(text).unwrap();
      assert_eq!(words, vec![MAGIC_NUMBER, 0x0001_0000, GENERATOR_WORD, 1, 0]);
    }
  }

  #[test]
  fn result_ids_are_numbered_in_order() {
    let text = "%void = OpTypeVoid\n%fn = OpTypeFunction %void";
    assert_eq!(body(text), vec![0x0002_0013, 1, 0x0003_0021, 2, 1]);
    assert_eq!(assemble(text).unwrap()[3], 3);
  }

  #[test]
  fn ext_inst_result_is_bound_after_type() {
    let text = "%glsl = OpExtInstImport \"GLSL.std.450\"\n%r = OpExtInst %t %glsl Sqrt %x";
    let words = body(text);
    // %glsl = 1, %t = 2, %r = 3, %x = 4. Sqrt is 31.
    assert_eq!(&words[words.len() - 6..], &[0x0006_000C, 2, 3, 1, 31, 4]);
  }

  #[test]
  fn constants_use_their_declared_type() {
    let text = "%i64 = OpTypeInt 64 1\n%c = OpConstant %i64 -2\n%u16 = OpTypeInt 16 0\n\
                %d = OpConstant %u16 65535";
    let words = body(text);
    assert_eq!(&words[4..9], &[0x0005_002B, 1, 2, 0xFFFF_FFFE, 0xFFFF_FFFF]);
    assert_eq!(&words[13..], &[0x0004_002B, 3, 4, 0xFFFF]);

    assert_eq!(
      error_message("%u16 = OpTypeInt 16 0\n%c = OpConstant %u16 65536"),
      "Integer 65536 does not fit in a 16-bit unsigned integer type."
    );
  }

  #[test]
  fn constants_of_unknown_type_are_sniffed() {
    assert_eq!(body("%c = OpConstant %t 1.5"), vec![0x0004_002B, 1, 2, 1.5f32.to_bits()]);
  }

  #[test]
  fn optional_operands_may_be_omitted() {
    assert_eq!(body("%r = OpLoad %t %p"), vec![0x0004_003D, 1, 2, 3]);
    assert_eq!(body("%r = OpLoad %t %p Aligned 4"), vec![0x0006_003D, 1, 2, 3, 2, 4]);
  }

  #[test]
  fn raw_words_replace_the_grammar() {
    assert_eq!(body("OpDecorate %1 FPFastMathMode !63"), vec![0x0004_0047, 1, 40, 63]);
    assert_eq!(body("!0x00020013 %x"), vec![0x0002_0013, 1]);
    assert_eq!(error_message("!2 = OpNop"), "!2 not allowed before =.");
    assert_eq!(error_message("!2 a-b"), "Invalid word following !2: a-b");
    assert_eq!(error_message("OpNop !x"), "Invalid immediate integer '!x'.");
  }

  #[test]
  fn canonical_syntax_writes_result_ids_inline() {
    let assembler = Assembler::new(AssemblerOptions {
      syntax: AssemblySyntax::Canonical,
      ..AssemblerOptions::default()
    });
    let assembly = assembler.assemble("OpTypeVoid %void").unwrap();
    assert_eq!(&assembly.words[HEADER_WORD_COUNT..], &[0x0002_0013, 1]);
    assert_eq!(assembly.symbols.get_id("void"), Some(1));

    let error = assembler.assemble("%void = OpTypeVoid").unwrap_err();
    assert_eq!(
      error.diagnostic().unwrap().message,
      "Expected <opcode> at the beginning of an instruction, found '%void'."
    );
  }

  #[test]
  fn numeric_ids_can_be_preserved() {
    let assembler = Assembler::new(AssemblerOptions {
      preserve_numeric_ids: true,
      ..AssemblerOptions::default()
    });
    let assembly = assembler.assemble("%5 = OpTypeVoid\n%f = OpTypeFunction %5").unwrap();
    assert_eq!(&assembly.words[HEADER_WORD_COUNT..], &[0x0002_0013, 5, 0x0003_0021, 1, 5]);
    assert_eq!(assembly.bound, 6);
  }

  #[test]
  fn prefix_diagnostics() {
    assert_eq!(error_message("%x"), "Expected '=', found end of stream.");
    assert_eq!(error_message("%x OpNop"), "'=' expected after result id.");
    assert_eq!(error_message("%x ="), "Expected opcode, found end of stream.");
    assert_eq!(error_message("%x = Nop"), "Invalid Opcode prefix 'Nop'.");
    assert_eq!(error_message("OpFoo"), "Invalid Opcode name 'OpFoo'");
    assert_eq!(error_message("OpTypeVoid %x"), "Expected <result-id> at the beginning of an instruction, found 'OpTypeVoid'.");
    assert_eq!(error_message("42"), "Expected <opcode> or <result-id> at the beginning of an instruction, found '42'.");
  }

  #[test]
  fn operand_diagnostics() {
    assert_eq!(error_message("OpName x \"a\""), "Expected id to start with %.");
    assert_eq!(error_message("OpName %a-b \"a\""), "Invalid ID a-b");
    assert_eq!(error_message("OpMemoryModel Logical Bogus"), "Invalid memory model 'Bogus'.");
    assert_eq!(error_message("OpName %a 1"), "Expected literal string, found literal number '1'.");
    assert_eq!(error_message("OpLine %f \"x\" 1"), "Expected literal number, found literal string '\"x\"'.");
    assert_eq!(error_message("OpMemoryBarrier %1\nOpNop"), "Expected operand, found next instruction instead.");
    assert_eq!(error_message("OpDecorate %1 Alignment !x1"), "Invalid immediate integer '!x1'.");
  }

  #[test]
  fn long_strings_are_resource_errors() {
    let text = format!("OpSourceExtension \"{}\"", "x".repeat(MAX_LITERAL_STRING_BYTES + 1));
    let error = assemble(&text).unwrap_err();
    assert!(error.is_resource_error());
  }
}
