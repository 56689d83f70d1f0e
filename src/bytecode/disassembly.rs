/*!
  Translation of binary modules back to assembly.

  Output is one instruction per line in the form the assembler reads back. Ids are printed by
  number, enumerants by the first name their value has, and masks as the names of their bits,
  lowest bit first. Typed literals are printed according to the numeric type the decoder resolved
  for them; a float that is infinite or NaN has no decimal spelling and is printed as raw `!0x...`
  words instead.
*/

use std::convert::Infallible;
use std::ops::ControlFlow;

use tracing::debug;

use super::{
  parse,
  AssemblySyntax,
  Header,
  NumberKind,
  ParseHandler,
  ParseStatus,
  ParsedInstruction,
  ParsedOperand,
  Word,
};
use crate::error::Error;
use crate::grammar::{
  generator_name,
  lookup_ext_inst_by_value,
  lookup_opcode_by_value,
  lookup_operand_by_value,
  operand_table,
  OperandType,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct DisassemblyOptions {
  /// Whether to start with a block of comments describing the header.
  pub print_header : bool,
  pub syntax       : AssemblySyntax,
}

/// Disassembles a module. Fails only if the module cannot be decoded.
pub fn disassemble(words: &[Word], options: DisassemblyOptions) -> Result<String, Error> {
  let mut disassembler = Disassembler {
    options,
    text: String::new(),
    instruction_count: 0,
  };
  match parse(words, &mut disassembler)? {
    ParseStatus::Completed         => {}
    ParseStatus::Terminated(never) => match never {},
  }
  debug!(instructions = disassembler.instruction_count, "disassembled module");
  Ok(disassembler.text)
}

struct Disassembler {
  options           : DisassemblyOptions,
  text              : String,
  instruction_count : usize,
}

impl ParseHandler for Disassembler {
  type Break = Infallible;

  fn handle_header(&mut self, header: &Header) -> ControlFlow<Infallible> {
    if self.options.print_header {
      let (tool, tool_version) = header.generator_parts();
      self.text.push_str("; SPIR-V\n");
      self.text.push_str(&format!(
        "; Version: {}.{}\n",
        header.major_version(),
        header.minor_version()
      ));
      self.text.push_str(&format!(
        "; Generator: {}; {}\n",
        generator_name(tool as u32),
        tool_version
      ));
      self.text.push_str(&format!("; Bound: {}\n", header.bound));
      self.text.push_str(&format!("; Schema: {}\n", header.schema));
    }
    ControlFlow::Continue(())
  }

  fn handle_instruction(&mut self, instruction: &ParsedInstruction<'_>) -> ControlFlow<Infallible> {
    let line = format_instruction(instruction, self.options.syntax);
    self.text.push_str(&line);
    self.text.push('\n');
    self.instruction_count += 1;
    ControlFlow::Continue(())
  }
}

/// Formats one instruction as a line of assembly, without the line break.
pub fn format_instruction(instruction: &ParsedInstruction<'_>, syntax: AssemblySyntax) -> String {
  let assignment = syntax == AssemblySyntax::Assignment && instruction.result_id != 0;
  let mut line = match assignment {
    true  => format!("%{} = {}", instruction.result_id, instruction.opcode),
    false => instruction.opcode.to_string(),
  };

  for (index, operand) in instruction.operands.iter().enumerate() {
    if assignment && operand.kind == OperandType::ResultId {
      continue;
    }
    line.push(' ');
    line.push_str(&format_operand(instruction, operand, instruction.operand_words(index)));
  }
  line
}

fn format_operand(instruction: &ParsedInstruction<'_>, operand: &ParsedOperand, words: &[Word]) -> String {
  let first = words.first().copied().unwrap_or(0);

  match operand.kind {
    kind if kind.is_id() => format!("%{}", first),

    OperandType::LiteralString => format_string(words),

    OperandType::TypedLiteralNumber => format_number(operand, words),

    OperandType::ExtensionInstructionNumber => {
      match lookup_ext_inst_by_value(instruction.ext_inst_type, first) {
        Ok(entry) => entry.name.to_string(),
        Err(_)    => first.to_string(),
      }
    }

    OperandType::SpecConstantOpNumber => {
      match u16::try_from(first).ok().and_then(|value| lookup_opcode_by_value(value).ok()) {
        Some(entry) => entry.name.to_string(),
        None        => first.to_string(),
      }
    }

    kind if kind.is_mask() => format_mask(kind, first),

    kind if kind.is_enum() => match lookup_operand_by_value(kind, first) {
      Ok(entry) => entry.name.to_string(),
      Err(_)    => first.to_string(),
    },

    _ => first.to_string(),
  }
}

/// Quotes a string, escaping quotes and backslashes.
fn format_string(words: &[Word]) -> String {
  let bytes: Vec<u8> = words
    .iter()
    .flat_map(|word| word.to_le_bytes())
    .take_while(|byte| *byte != 0)
    .collect();
  let mut quoted = String::with_capacity(bytes.len() + 2);
  quoted.push('"');
  for c in String::from_utf8_lossy(&bytes).chars() {
    if matches!(c, '"' | '\\' | '\n') {
      quoted.push('\\');
    }
    quoted.push(c);
  }
  quoted.push('"');
  quoted
}

fn format_number(operand: &ParsedOperand, words: &[Word]) -> String {
  let width = operand.number_bit_width;
  let bits = words
    .iter()
    .take(2)
    .enumerate()
    .fold(0u64, |bits, (index, word)| bits | ((*word as u64) << (32 * index)));

  match operand.number_kind {
    NumberKind::SignedInt if (1..=64).contains(&width) => {
      let shift = 64 - width;
      (((bits << shift) as i64) >> shift).to_string()
    }
    NumberKind::Float if width == 32 => {
      let value = f32::from_bits(bits as u32);
      match value.is_finite() {
        true  => value.to_string(),
        false => format_raw(words),
      }
    }
    NumberKind::Float if width == 64 => {
      let value = f64::from_bits(bits);
      match value.is_finite() {
        true  => value.to_string(),
        false => format_raw(words),
      }
    }
    _ => bits.to_string(),
  }
}

fn format_raw(words: &[Word]) -> String {
  words
    .iter()
    .map(|word| format!("!{:#010x}", word))
    .collect::<Vec<String>>()
    .join(" ")
}

/// The names of the bits of a mask, lowest first, joined with `|`. A mask with a bit that has no
/// name is printed as a number.
fn format_mask(kind: OperandType, mask: Word) -> String {
  if mask == 0 {
    return match lookup_operand_by_value(kind, 0) {
      Ok(entry) => entry.name.to_string(),
      Err(_)    => "0".to_string(),
    };
  }

  let table = match operand_table(kind) {
    Some(table) => table,
    None        => return mask.to_string(),
  };
  let mut names = Vec::new();
  for bit in (0..32).map(|shift| 1u32 << shift).filter(|bit| mask & bit != 0) {
    match table.iter().find(|entry| entry.value == bit) {
      Some(entry) => names.push(entry.name),
      None        => return mask.to_string(),
    }
  }
  names.join("|")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::assemble;

  fn round_trip(text: &str) -> String {
    disassemble(&assemble(text).unwrap(), DisassemblyOptions::default()).unwrap()
  }

  #[test]
  fn header_comments() {
    let words = assemble("").unwrap();
    let options = DisassemblyOptions {
      print_header: true,
      ..DisassemblyOptions::default()
    };
    assert_eq!(
      disassemble(&words, options).unwrap(),
      "; SPIR-V\n; Version: 1.0\n; Generator: Khronos SPIR-V Tools Assembler; 0\n; Bound: 1\n\
       ; Schema: 0\n"
    );
  }

  #[test]
  fn canonical_text_survives_a_round_trip() {
    let text = "OpCapability Shader\n\
                OpMemoryModel Logical GLSL450\n\
                %1 = OpExtInstImport \"GLSL.std.450\"\n\
                OpName %2 \"a \\\"quoted\\\" \\\\name\"\n\
                %3 = OpTypeFloat 32\n\
                %2 = OpConstant %3 -1.5\n\
                %4 = OpTypeInt 32 1\n\
                %5 = OpConstant %4 -7\n\
                %6 = OpExtInst %3 %1 Sqrt %2\n\
                %7 = OpSpecConstantOp %4 IAdd %5 %5\n\
                OpLoopMerge %8 %9 Unroll|DontUnroll\n\
                OpMemoryBarrier %10 %11\n";
    assert_eq!(round_trip(text), text);
  }

  #[test]
  fn masks_and_synonyms() {
    assert_eq!(round_trip("OpSelectionMerge %1 None\n"), "OpSelectionMerge %1 None\n");
    let words = assemble("%1 = OpLoad %2 %3 Volatile|Aligned 4").unwrap();
    assert_eq!(
      disassemble(&words, DisassemblyOptions::default()).unwrap(),
      "%2 = OpLoad %1 %3 Volatile|Aligned 4\n"
    );
  }

  #[test]
  fn non_finite_floats_are_raw_words() {
    let text = "%1 = OpTypeFloat 32\n%2 = OpConstant %1 !0x7f800000\n";
    assert_eq!(round_trip(text), "%1 = OpTypeFloat 32\n%2 = OpConstant %1 !0x7f800000\n");
  }

  #[test]
  fn canonical_syntax_keeps_result_ids_in_place() {
    let words = assemble("%1 = OpTypeInt 32 0\n%2 = OpConstant %1 7").unwrap();
    let options = DisassemblyOptions {
      syntax: AssemblySyntax::Canonical,
      ..DisassemblyOptions::default()
    };
    assert_eq!(
      disassemble(&words, options).unwrap(),
      "OpTypeInt %1 32 0\nOpConstant %1 %2 7\n"
    );
  }

  #[test]
  fn strings_with_newlines_and_quotes_reassemble() {
    let words = assemble("OpSourceExtension \"say \\\"hi\\\"\\\nthen\\\\go\"").unwrap();
    let text = disassemble(&words, DisassemblyOptions::default()).unwrap();
    assert_eq!(text, "OpSourceExtension \"say \\\"hi\\\"\\\nthen\\\\go\"\n");
    assert_eq!(assemble(&text).unwrap(), words);
    assert_eq!(format_string(&crate::bytecode::pack_string("a\nb")), "\"a\\\nb\"");
  }
}
