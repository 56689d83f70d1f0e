use spirv_asm::bytecode::{pack_string, HEADER_WORD_COUNT, MAGIC_NUMBER};
use spirv_asm::{assemble, Assembler, AssemblerOptions, AssemblySyntax, Error, Word};

fn body(text: &str) -> Vec<Word> {
  match assemble(text) {
    Ok(words) => words[HEADER_WORD_COUNT..].to_vec(),
    Err(error) => panic!("{}: {}", text, error),
  }
}

fn error_at(text: &str) -> (usize, usize, String) {
  match assemble(text) {
    Err(Error::InvalidText(diagnostic)) => {
      (diagnostic.position.line, diagnostic.position.column, diagnostic.message)
    }
    other => panic!("expected a text diagnostic for {:?}, got {:?}", text, other),
  }
}

#[test]
fn single_type_declaration() {
  let words = assemble("%1 = OpTypeVoid").unwrap();
  assert_eq!(words.len(), HEADER_WORD_COUNT + 2);
  assert_eq!(words[0], MAGIC_NUMBER);
  assert_eq!(words[3], 2);
  assert_eq!(&words[HEADER_WORD_COUNT..], &[0x0002_0013, 1]);
}

#[test]
fn missing_operand_at_end_of_text() {
  let (line, column, message) = error_at("OpMemoryBarrier");
  assert_eq!(message, "Expected operand, found end of stream.");
  assert_eq!((line, column), (0, 15));
}

#[test]
fn diagnostics_point_at_the_offending_word() {
  let (line, column, message) = error_at("OpCapability Shader\n  OpMemoryModel Logical Bogus");
  assert_eq!(message, "Invalid memory model 'Bogus'.");
  assert_eq!((line, column), (1, 24));
}

#[test]
fn comments_and_whitespace_are_ignored() {
  let text = "; leading comment\n\
              \t%void = OpTypeVoid ; trailing comment\r\n\
              \n\
              %fn = OpTypeFunction\t%void\n";
  assert_eq!(body(text), vec![0x0002_0013, 1, 0x0003_0021, 2, 1]);
}

#[test]
fn names_are_shared_between_uses_and_definitions() {
  let text = "OpName %main \"main\"\n%main = OpFunction %void None %fn";
  assert_eq!(
    body(text),
    vec![0x0004_0005, 1, u32::from_le_bytes(*b"main"), 0, 0x0005_0036, 2, 1, 0, 3]
  );
  assert_eq!(assemble(text).unwrap()[3], 4);
}

#[test]
fn debug_instructions() {
  assert_eq!(body("OpSource GLSL 450"), vec![0x0003_0003, 2, 450]);

  let mut expected = vec![0x0008_0003, 2, 450, 1];
  expected.extend(pack_string("void main(){}"));
  assert_eq!(body("OpSource GLSL 450 %file \"void main(){}\""), expected);

  assert_eq!(body("OpSourceExtension \"ext\""), vec![0x0002_0004, 0x0074_7865]);
  assert_eq!(body("OpName %x \"x\""), vec![0x0003_0005, 1, 0x78]);
  assert_eq!(body("OpMemberName %s 0 \"m\""), vec![0x0004_0006, 1, 0, 0x6d]);
  assert_eq!(body("%s = OpString \"\""), vec![0x0003_0007, 1, 0]);
  assert_eq!(body("OpLine %f 7 3"), vec![0x0004_0008, 1, 7, 3]);
}

#[test]
fn escaped_strings() {
  assert_eq!(body(r#"OpName %x "a\"b""#), vec![0x0003_0005, 1, u32::from_le_bytes(*b"a\"b\0")]);
  assert_eq!(body(r#"OpName %x "\\""#), vec![0x0003_0005, 1, 0x5c]);
  // Quotes glue words together, so the space is part of the string.
  assert_eq!(body("OpName %x \"a b\""), vec![0x0003_0005, 1, u32::from_le_bytes(*b"a b\0")]);
}

#[test]
fn barrier_instructions() {
  assert_eq!(body("OpControlBarrier %1 %2 %3"), vec![0x0004_00E0, 1, 2, 3]);
  assert_eq!(body("OpMemoryBarrier %1 %2"), vec![0x0003_00E1, 1, 2]);
}

#[test]
fn control_flow_instructions() {
  assert_eq!(body("OpSelectionMerge %1 Flatten|DontFlatten"), vec![0x0003_00F7, 1, 3]);
  assert_eq!(body("OpLoopMerge %1 %2 DontUnroll"), vec![0x0004_00F6, 1, 2, 2]);
  assert_eq!(body("OpBranch %l"), vec![0x0002_00F9, 1]);
  assert_eq!(body("OpBranchConditional %c %t %f"), vec![0x0004_00FA, 1, 2, 3]);
  assert_eq!(body("OpBranchConditional %c %t %f 1 2"), vec![0x0006_00FA, 1, 2, 3, 1, 2]);
  assert_eq!(body("OpReturn"), vec![0x0001_00FD]);
  assert_eq!(body("OpKill"), vec![0x0001_00FC]);
  assert_eq!(body("%f = OpFunction %v Inline|Pure %ft"), vec![0x0005_0036, 1, 2, 5, 3]);
}

#[test]
fn switch_cases_follow_the_selector_type() {
  let text = "%u64 = OpTypeInt 64 0\n\
              %s = OpConstant %u64 1\n\
              OpSwitch %s %d 0x100000000 %a 7 %b";
  assert_eq!(
    body(text),
    vec![
      0x0004_0015, 1, 64, 0,
      0x0005_002B, 1, 2, 1, 0,
      0x0009_00FB, 2, 3, 0, 1, 4, 7, 0, 5,
    ]
  );

  let text = "%i8 = OpTypeInt 8 1\n%s = OpConstant %i8 -1\nOpSwitch %s %d -128 %a";
  assert_eq!(
    &body(text)[4..],
    &[0x0004_002B, 1, 2, 0xFFFF_FFFF, 0x0005_00FB, 2, 3, 0xFFFF_FF80, 4]
  );
}

#[test]
fn switch_without_cases() {
  assert_eq!(body("OpSwitch %s %d"), vec![0x0003_00FB, 1, 2]);
}

#[test]
fn wide_float_constants() {
  let text = "%f64 = OpTypeFloat 64\n%c = OpConstant %f64 0.1";
  let bits = 0.1f64.to_bits();
  assert_eq!(&body(text)[3..], &[0x0005_002B, 1, 2, bits as u32, (bits >> 32) as u32]);
}

#[test]
fn spec_constant_op_reads_the_operands_of_its_opcode() {
  assert_eq!(body("%r = OpSpecConstantOp %t IAdd %a %b"), vec![0x0006_0034, 1, 2, 128, 3, 4]);
  let (_, _, message) = error_at("%r = OpSpecConstantOp %t Bogus %a");
  assert_eq!(message, "Invalid OpSpecConstantOp opcode 'Bogus'.");
}

#[test]
fn enumerants_bring_their_own_operands() {
  // Decoration SpecId takes one literal number.
  assert_eq!(body("OpDecorate %x SpecId 3"), vec![0x0004_0047, 1, 1, 3]);
  // ExecutionMode LocalSize takes three.
  assert_eq!(body("OpExecutionMode %m LocalSize 8 4 1"), vec![0x0006_0010, 1, 17, 8, 4, 1]);
  let (_, _, message) = error_at("OpExecutionMode %m LocalSize 8 4");
  assert_eq!(message, "Expected operand, found end of stream.");
}

#[test]
fn extended_instructions_need_a_known_import() {
  let (_, _, message) = error_at("%r = OpExtInst %t %set Sqrt %x");
  assert_eq!(message, "Invalid extended instruction name 'Sqrt'.");

  let text = "%cl = OpExtInstImport \"OpenCL.std\"\n%r = OpExtInst %t %cl sqrt %x";
  assert_eq!(&body(text)[5..], &[0x0006_000C, 2, 3, 1, 61, 4]);
}

#[test]
fn canonical_and_assignment_forms_agree() {
  let canonical = Assembler::new(AssemblerOptions {
    syntax: AssemblySyntax::Canonical,
    ..AssemblerOptions::default()
  });
  let from_canonical = canonical
    .assemble("OpTypeInt %int 32 1\nOpConstant %int %c 5")
    .unwrap();
  let from_assignment = assemble("%int = OpTypeInt 32 1\n%c = OpConstant %int 5").unwrap();
  assert_eq!(from_canonical.words, from_assignment);
}

#[test]
fn generator_word_is_configurable() {
  let assembler = Assembler::new(AssemblerOptions {
    generator: 0x0001_0002,
    ..AssemblerOptions::default()
  });
  let assembly = assembler.assemble("OpNop").unwrap();
  assert_eq!(assembly.words[2], 0x0001_0002);
  assert_eq!(assembly.bound, 1);
}

#[test]
fn oversized_literal_strings_are_resource_errors() {
  let text = format!("OpSourceExtension \"{}\"", "a".repeat(65536));
  match assemble(&text) {
    Err(error @ Error::LiteralTooLong { .. }) => assert!(error.is_resource_error()),
    other => panic!("expected a resource error, got {:?}", other.map(|words| words.len())),
  }
}

#[test]
fn preserved_numeric_ids_cannot_be_spelled_twice() {
  let assembler = Assembler::new(AssemblerOptions {
    preserve_numeric_ids: true,
    ..AssemblerOptions::default()
  });
  match assembler.assemble("%7 = OpTypeVoid\n%007 = OpTypeBool") {
    Err(Error::InvalidText(diagnostic)) => {
      assert_eq!(diagnostic.message, "ID %007 has the same value as ID %7.");
      assert_eq!(diagnostic.position.line, 1);
    }
    other => panic!("expected a text diagnostic, got {:?}", other.map(|assembly| assembly.words)),
  }
}
