use std::ops::ControlFlow;

use spirv_asm::bytecode::{
  make_opcode_word,
  pack_string,
  Instruction,
  GENERATOR_WORD,
  MAGIC_NUMBER,
  VERSION_1_0,
};
use spirv_asm::grammar::{Op, OperandType};
use spirv_asm::{
  assemble,
  parse,
  parse_bytes,
  Error,
  Header,
  ParseHandler,
  ParseStatus,
  ParsedInstruction,
  Word,
};

#[derive(Default)]
struct Collector {
  header       : Option<Header>,
  instructions : Vec<Instruction>,
}

impl ParseHandler for Collector {
  type Break = ();

  fn handle_header(&mut self, header: &Header) -> ControlFlow<()> {
    self.header = Some(*header);
    ControlFlow::Continue(())
  }

  fn handle_instruction(&mut self, instruction: &ParsedInstruction<'_>) -> ControlFlow<()> {
    self.instructions.push(instruction.to_instruction());
    ControlFlow::Continue(())
  }
}

/// Stops at the first instruction with a result and hands back its id.
#[derive(Default)]
struct FirstResult {
  visited: usize,
}

impl ParseHandler for FirstResult {
  type Break = Word;

  fn handle_instruction(&mut self, instruction: &ParsedInstruction<'_>) -> ControlFlow<Word> {
    self.visited += 1;
    match instruction.result_id {
      0  => ControlFlow::Continue(()),
      id => ControlFlow::Break(id),
    }
  }
}

fn module(body: &[Word]) -> Vec<Word> {
  let mut words = vec![MAGIC_NUMBER, VERSION_1_0, GENERATOR_WORD, 100, 0];
  words.extend_from_slice(body);
  words
}

fn op(word_count: u16, opcode: u16) -> Word {
  make_opcode_word(word_count, opcode)
}

fn failure(words: &[Word]) -> (usize, String) {
  match parse(words, &mut Collector::default()) {
    Err(Error::InvalidBinary(diagnostic)) => (diagnostic.position.index, diagnostic.message),
    other => panic!("expected a binary diagnostic, got {:?}", other),
  }
}

fn message(words: &[Word]) -> String {
  failure(words).1
}

#[test]
fn memory_barrier_operands_are_ids() {
  let words = assemble("OpMemoryBarrier %1 %2").unwrap();
  let mut collector = Collector::default();
  assert_eq!(parse(&words, &mut collector), Ok(ParseStatus::Completed));

  let barrier = &collector.instructions[0];
  assert_eq!(barrier.opcode, Op::MemoryBarrier);
  let kinds: Vec<OperandType> = barrier.operands.iter().map(|operand| operand.kind).collect();
  assert_eq!(kinds, vec![OperandType::ScopeId, OperandType::MemorySemanticsId]);
  assert!(kinds.iter().all(|kind| kind.is_id()));
  assert_eq!(barrier.operand_word(0), Some(1));
  assert_eq!(barrier.operand_word(1), Some(2));
}

#[test]
fn header_problems() {
  assert_eq!(
    message(&[MAGIC_NUMBER, VERSION_1_0]),
    "Module has incomplete header: only 2 words instead of 5"
  );
  assert_eq!(message(&[0, VERSION_1_0, GENERATOR_WORD, 1, 0]), "Invalid SPIR-V magic number.");
}

#[test]
fn header_only_module() {
  let mut collector = Collector::default();
  assert_eq!(parse(&module(&[]), &mut collector), Ok(ParseStatus::Completed));
  let header = collector.header.unwrap();
  assert_eq!(header.version, VERSION_1_0);
  assert_eq!(header.bound, 100);
  assert!(collector.instructions.is_empty());
}

#[test]
fn opcode_word_problems() {
  assert_eq!(failure(&module(&[0])), (5, "Invalid instruction word count: 0".to_string()));
  assert_eq!(message(&module(&[op(1, 9)])), "Invalid opcode: 9");
  assert_eq!(failure(&module(&[op(1, 0xFFFF)])), (5, "Invalid opcode: 65535".to_string()));
}

#[test]
fn word_count_problems() {
  assert_eq!(
    failure(&module(&[op(3, 19), 1, 2])),
    (
      5,
      "Invalid instruction OpTypeVoid starting at word 5: expected no more operands after 2 \
       words, but stated word count is 3."
        .to_string()
    )
  );
  assert_eq!(
    message(&module(&[op(2, 21), 1])),
    "End of input reached while decoding OpTypeInt starting at word 5: expected more operands \
     after 2 words."
  );
  assert_eq!(
    failure(&module(&[op(4, 21), 1])),
    (
      7,
      "End of input reached while decoding OpTypeInt starting at word 5: missing literal number \
       operand at word offset 2."
        .to_string()
    )
  );
  assert_eq!(
    message(&module(&[op(3, 5), 1, 0x6161_6161])),
    "End of input reached while decoding OpName starting at word 5: truncated literal string \
     operand at word offset 2."
  );
  // A 64 bit constant squeezed into four words.
  assert_eq!(
    message(&module(&[op(4, 21), 1, 64, 0, op(4, 43), 1, 2, 0, 0])),
    "Invalid word count: OpConstant starting at word 9 says it has 4 words, but found 5 words \
     instead."
  );
  assert_eq!(
    failure(&module(&[op(2, 0), 1])),
    (
      5,
      "Invalid instruction OpNop starting at word 5: expected no more operands after 1 words, \
       but stated word count is 2."
        .to_string()
    )
  );
}

#[test]
fn string_terminator_past_the_stated_end() {
  // The NUL sits in the word after the instruction's last one.
  assert_eq!(
    failure(&module(&[op(3, 7), 1, 0x4141_4141, 0])),
    (
      5,
      "Invalid word count: OpString starting at word 5 says it has 3 words, but found 4 words \
       instead."
        .to_string()
    )
  );
  assert_eq!(
    failure(&module(&[op(5, 3), 2, 450, 1, 0x4141_4141])),
    (
      9,
      "End of input reached while decoding OpSource starting at word 5: truncated literal string \
       operand at word offset 4."
        .to_string()
    )
  );
}

#[test]
fn typed_literals_at_the_end_of_input() {
  assert_eq!(
    failure(&module(&[op(4, 21), 1, 32, 0, op(4, 43), 1, 2])),
    (
      12,
      "End of input reached while decoding OpConstant starting at word 9: missing possibly \
       multi-word literal number operand at word offset 3."
        .to_string()
    )
  );
  assert_eq!(
    failure(&module(&[op(4, 21), 1, 64, 0, op(5, 43), 1, 2, 7])),
    (
      12,
      "End of input reached while decoding OpConstant starting at word 9: truncated possibly \
       multi-word literal number operand at word offset 3."
        .to_string()
    )
  );
}

#[test]
fn zero_ids() {
  assert_eq!(message(&module(&[op(3, 1), 0, 1])), "Error: Type Id is 0");
  assert_eq!(message(&module(&[op(3, 5), 0, 0])), "Id is 0");
  assert_eq!(message(&module(&[op(3, 225), 0, 1])), "scope ID is 0");
  assert_eq!(message(&module(&[op(3, 225), 1, 0])), "memory semantics ID is 0");
}

#[test]
fn extended_instruction_problems() {
  assert_eq!(
    message(&module(&[op(5, 12), 1, 2, 3, 31])),
    "OpExtInst set Id 3 does not reference an OpExtInstImport result Id"
  );
  assert_eq!(
    message(&module(&[op(3, 11), 1, 0x006f_6f66])),
    "Invalid extended instruction import 'foo'"
  );
  // The assembler takes any import name; the decoder only knows the sets it has tables for.
  let words = assemble("%set = OpExtInstImport \"s\"").unwrap();
  assert_eq!(failure(&words), (7, "Invalid extended instruction import 's'".to_string()));

  let mut body = vec![op(6, 11), 1];
  body.extend(pack_string("GLSL.std.450"));
  body.extend([op(6, 12), 2, 3, 1, 999, 4]);
  assert_eq!(message(&module(&body)), "Invalid extended instruction number: 999");
}

#[test]
fn spec_constant_op_opcode_must_exist() {
  assert_eq!(message(&module(&[op(4, 52), 1, 2, 9])), "Invalid OpSpecConstantOp opcode: 9");
}

#[test]
fn switch_selector_problems() {
  assert_eq!(
    message(&module(&[op(5, 251), 5, 6, 1, 7])),
    "Invalid OpSwitch: selector id 5 has no type"
  );
  assert_eq!(
    message(&module(&[op(4, 21), 1, 32, 0, op(5, 251), 1, 6, 1, 7])),
    "Invalid OpSwitch: selector id 1 is a type, not a value"
  );
  assert_eq!(
    message(&module(&[op(3, 22), 1, 32, op(4, 43), 1, 2, 0x3f80_0000, op(5, 251), 2, 6, 1, 7])),
    "Invalid OpSwitch: selector id 2 is not a scalar integer"
  );
}

#[test]
fn typed_literal_problems() {
  assert_eq!(message(&module(&[op(4, 43), 7, 2, 1])), "Type Id 7 is not a type");
  assert_eq!(
    message(&module(&[op(2, 20), 1, op(4, 43), 1, 2, 5])),
    "Type Id 1 is not a scalar numeric type"
  );
  assert_eq!(
    message(&module(&[op(4, 21), 1, 128, 0, op(4, 43), 1, 2, 0])),
    "Type Id 1 has unsupported bit width 128 for a literal number"
  );
}

#[test]
fn enumerant_and_mask_problems() {
  assert_eq!(message(&module(&[op(3, 14), 9, 1])), "Invalid addressing model operand: 9");
  assert_eq!(
    message(&module(&[op(4, 71), 1, 40, 63])),
    "Invalid floating-point fast math mode operand: 63 has invalid mask component 32"
  );
}

#[test]
fn handler_can_stop_the_parse() {
  let words = assemble("OpCapability Shader\nOpMemoryModel Logical GLSL450\n%void = OpTypeVoid\nOpNop")
    .unwrap();
  let mut handler = FirstResult::default();
  assert_eq!(parse(&words, &mut handler), Ok(ParseStatus::Terminated(1)));
  assert_eq!(handler.visited, 3);
}

#[test]
fn handler_can_stop_at_the_header() {
  struct Refuse;

  impl ParseHandler for Refuse {
    type Break = &'static str;

    fn handle_header(&mut self, _header: &Header) -> ControlFlow<&'static str> {
      ControlFlow::Break("no thanks")
    }
  }

  // The instructions are never looked at, so the bad word count goes unnoticed.
  let words = module(&[0]);
  assert_eq!(parse(&words, &mut Refuse), Ok(ParseStatus::Terminated("no thanks")));
}

#[test]
fn bytes_in_either_order() {
  let words = assemble("%1 = OpTypeVoid").unwrap();

  let native: Vec<u8> = words.iter().flat_map(|word| word.to_ne_bytes()).collect();
  let mut collector = Collector::default();
  assert_eq!(parse_bytes(&native, &mut collector), Ok(ParseStatus::Completed));
  assert_eq!(collector.instructions[0].words, vec![op(2, 19), 1]);

  let swapped: Vec<u8> = words.iter().flat_map(|word| word.swap_bytes().to_ne_bytes()).collect();
  let mut collector = Collector::default();
  assert_eq!(parse_bytes(&swapped, &mut collector), Ok(ParseStatus::Completed));
  assert_eq!(collector.instructions[0].words, vec![op(2, 19), 1]);
  assert_eq!(collector.header.unwrap().magic, MAGIC_NUMBER);

  assert_eq!(
    parse_bytes(&native[..native.len() - 1], &mut Collector::default()),
    Err(Error::InvalidLength(native.len() - 1))
  );
}

#[test]
fn operand_records_locate_every_word() {
  let text = "%int = OpTypeInt 32 1\n\
              %c = OpConstant %int -3\n\
              OpName %c \"negative three\"\n\
              OpDecorate %c SpecId 4";
  let words = assemble(text).unwrap();
  let mut collector = Collector::default();
  parse(&words, &mut collector).unwrap();

  for instruction in &collector.instructions {
    let covered: usize = instruction.operands.iter().map(|operand| operand.num_words as usize).sum();
    assert_eq!(covered + 1, instruction.words.len(), "{}", instruction.opcode);
  }

  let name = &collector.instructions[2];
  assert_eq!(name.operands[1].kind, OperandType::LiteralString);
  assert_eq!(name.operands[1].num_words, 4);

  let decorate = &collector.instructions[3];
  let kinds: Vec<OperandType> = decorate.operands.iter().map(|operand| operand.kind).collect();
  assert_eq!(kinds, vec![OperandType::Id, OperandType::Decoration, OperandType::LiteralInteger]);
}
