/*!
  An assembler, disassembler and binary parser for SPIR-V 1.0.

  Everything is driven by the static grammar tables in `grammar`: the opcodes, the operand types
  each expects, and the named enumerants and masks that may stand in for numbers. The assembler
  (`bytecode::assemble`) reads text such as

  ```text
  %void = OpTypeVoid
  %fn   = OpTypeFunction %void
  ```

  and produces the words of a module. The parser (`bytecode::parse`) walks a module and hands each
  decoded instruction to a `ParseHandler`, which may stop the walk early. The disassembler and
  `module::Module`, a view of a module with its functions and basic blocks made explicit, are both
  built on the parser.
*/

#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod classify;
pub mod error;
pub mod grammar;
pub mod literal;
pub mod module;
pub mod pattern;
pub mod symboltable;
pub mod text;

pub use bytecode::{
  assemble,
  disassemble,
  parse,
  parse_bytes,
  Assembler,
  AssemblerOptions,
  Assembly,
  AssemblySyntax,
  DisassemblyOptions,
  Header,
  ParseHandler,
  ParseStatus,
  ParsedInstruction,
  ParsedOperand,
  Word,
};
pub use error::{Diagnostic, Error, Position};
pub use module::Module;
