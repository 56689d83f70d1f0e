/*!
  Static grammar tables and the lookups over them.

  Everything the assembler and parser know about SPIR-V comes from here: the opcodes and the
  operand types each expects, the named values of every enumerant and mask category together with
  the operands those values pull in, and the extended instruction sets. The tables are `static`
  slices compiled into the crate. They are immutable, so they may be shared freely between
  threads.

  Opcode lookups go through a hash index built on first use. Operand and extended instruction
  lookups scan their (short) tables in declaration order, so the first row wins when two rows
  share a name or value.
*/

mod capability;
mod ext_inst;
mod opcodes;
mod operand_type;
mod operands;

use std::collections::HashMap;

use thiserror::Error;

pub use capability::{Capability, CapabilityMask};
pub use ext_inst::{
  ext_inst_import_type,
  lookup_ext_inst_by_name,
  lookup_ext_inst_by_value,
  ExtInstDesc,
  ExtInstType,
  GLSL_STD_450,
  OPENCL_STD,
};
pub use opcodes::{Op, OpcodeDesc, OPCODE_TABLE};
pub use operand_type::OperandType;
pub use operands::{
  lookup_operand_by_name,
  lookup_operand_by_value,
  operand_table,
  parse_mask_operand,
  OperandDesc,
};

#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupError {
  #[error("no table entry with that name or value")]
  NotFound,
  #[error("{0} operands have no table of named values")]
  NoTable(OperandType),
  #[error("no extended instruction set was imported")]
  NoExtInstSet,
}

lazy_static! {
  static ref OPCODES_BY_NAME: HashMap<&'static str, &'static OpcodeDesc> =
    OPCODE_TABLE.iter().map(|entry| (entry.name, entry)).collect();

  static ref OPCODES_BY_VALUE: HashMap<u16, &'static OpcodeDesc> =
    OPCODE_TABLE.iter().map(|entry| (entry.opcode.value(), entry)).collect();
}

/// Finds an opcode by its name without the `Op` prefix.
pub fn lookup_opcode_by_name(name: &str) -> Result<&'static OpcodeDesc, LookupError> {
  OPCODES_BY_NAME.get(name).copied().ok_or(LookupError::NotFound)
}

pub fn lookup_opcode_by_value(value: u16) -> Result<&'static OpcodeDesc, LookupError> {
  OPCODES_BY_VALUE.get(&value).copied().ok_or(LookupError::NotFound)
}

/// The table row for an opcode. Every `Op` has one.
pub fn opcode_desc(opcode: Op) -> &'static OpcodeDesc {
  // The table holds one row per variant, in variant order, so the index exists.
  let position = OPCODE_TABLE.partition_point(|entry| entry.opcode.value() < opcode.value());
  &OPCODE_TABLE[position]
}

/// The vendor of a tool id, as found in the upper half of a module's generator word.
pub fn generator_name(tool_id: u32) -> &'static str {
  match tool_id {
    0  => "Khronos",
    1  => "LunarG",
    2  => "Valve",
    3  => "Codeplay",
    4  => "NVIDIA",
    5  => "ARM",
    6  => "Khronos LLVM/SPIR-V Translator",
    7  => "Khronos SPIR-V Tools Assembler",
    8  => "Khronos Glslang Reference Front End",
    9  => "Qualcomm",
    10 => "AMD",
    11 => "Intel",
    _  => "Unknown",
  }
}
