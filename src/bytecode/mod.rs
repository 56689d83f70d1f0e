/*!

  A SPIR-V module is a flat sequence of 32 bit words. The first five words are the header:

    0: magic number, `0x07230203`
    1: version, `0x00010000` for SPIR-V 1.0
    2: generator, a tool id in the high 16 bits and the tool's own version in the low 16 bits
    3: bound, one more than the largest id used in the module
    4: schema, reserved and always 0

  Instructions follow the header back to back. The first word of an instruction holds its word
  count in the high 16 bits and its opcode in the low 16 bits, so an instruction is at most 65535
  words long, opcode word included. The remaining words are the operands, laid out as the opcode's
  grammar dictates. Literal strings are UTF-8, NUL terminated and zero padded to a whole number of
  words, with the first byte in the least significant byte of the first word. Numeric literals
  wider than 32 bits take more than one word, low-order word first.

  A module may be stored in either byte order. Its byte order is recognized from the magic number,
  and words are swapped to the host's order before anything else looks at them.

  The submodules provide the two directions of translation and the model between them:

    `assembly`     text to binary
    `binary`       binary to a stream of `ParsedInstruction`s, handed to a `ParseHandler`
    `disassembly`  binary to text
    `instruction`  the parsed instruction and operand records

*/

mod assembly;
mod binary;
mod disassembly;
mod instruction;

use std::fmt::{Display, Formatter};

pub use assembly::{assemble, Assembler, AssemblerOptions, Assembly, AssemblySyntax};
pub use binary::{parse, parse_bytes, ParseHandler, ParseStatus};
pub use disassembly::{disassemble, format_instruction, DisassemblyOptions};
pub use instruction::{Instruction, NumberKind, ParsedInstruction, ParsedOperand};

pub type Word = u32;

pub const MAGIC_NUMBER         : Word  = 0x0723_0203;
pub const VERSION_1_0          : Word  = 0x0001_0000;
pub const HEADER_WORD_COUNT    : usize = 5;
/// The largest number of words one instruction may occupy, opcode word included.
pub const MAX_INSTRUCTION_WORDS: usize = 0xFFFF;
/// The tool id of this assembler in the generator word.
pub const ASSEMBLER_TOOL_ID    : u16   = 7;
/// The generator word written by this assembler: its tool id with tool version 0.
pub const GENERATOR_WORD       : Word  = (ASSEMBLER_TOOL_ID as Word) << 16;

/// The first word of an instruction.
pub fn make_opcode_word(word_count: u16, opcode: u16) -> Word {
  ((word_count as Word) << 16) | opcode as Word
}

/// Splits the first word of an instruction into its word count and opcode.
pub fn split_opcode_word(word: Word) -> (u16, u16) {
  ((word >> 16) as u16, (word & 0xFFFF) as u16)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Endianness {
  Little,
  Big,
}

impl Endianness {
  pub fn host() -> Endianness {
    match cfg!(target_endian = "little") {
      true  => Endianness::Little,
      false => Endianness::Big,
    }
  }

  /// The byte order of a module whose first word, as read in host order, is `magic`.
  pub fn of_magic(magic: Word) -> Option<Endianness> {
    match magic.to_ne_bytes() {
      [0x03, 0x02, 0x23, 0x07] => Some(Endianness::Little),
      [0x07, 0x23, 0x02, 0x03] => Some(Endianness::Big),
      _ => None,
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Header {
  /// The byte order the module was stored in.
  pub endianness : Endianness,
  pub magic      : Word,
  pub version    : Word,
  pub generator  : Word,
  pub bound      : Word,
  pub schema     : Word,
}

impl Header {
  /// The header of a module produced by this assembler.
  pub fn new(bound: Word, generator: Word) -> Header {
    Header {
      endianness : Endianness::host(),
      magic      : MAGIC_NUMBER,
      version    : VERSION_1_0,
      generator,
      bound,
      schema     : 0,
    }
  }

  pub fn to_words(&self) -> [Word; HEADER_WORD_COUNT] {
    [self.magic, self.version, self.generator, self.bound, self.schema]
  }

  pub fn major_version(&self) -> u32 {
    (self.version >> 16) & 0xFF
  }

  pub fn minor_version(&self) -> u32 {
    (self.version >> 8) & 0xFF
  }

  /// The generator's tool id and the tool's version.
  pub fn generator_parts(&self) -> (u16, u16) {
    ((self.generator >> 16) as u16, (self.generator & 0xFFFF) as u16)
  }
}

impl Display for Header {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let (tool, tool_version) = self.generator_parts();
    write!(
      f,
      "SPIR-V {}.{}, generator {}; {}, bound {}, schema {}",
      self.major_version(),
      self.minor_version(),
      crate::grammar::generator_name(tool as u32),
      tool_version,
      self.bound,
      self.schema
    )
  }
}

/// Packs a literal string into words: its UTF-8 bytes, a NUL terminator, and zero padding.
pub fn pack_string(text: &str) -> Vec<Word> {
  text
    .as_bytes()
    .chunks(4)
    .map(|chunk| {
      let mut bytes = [0u8; 4];
      bytes[..chunk.len()].copy_from_slice(chunk);
      Word::from_le_bytes(bytes)
    })
    .chain(
      // An exact multiple of four bytes needs a whole word for the terminator.
      (text.len() % 4 == 0).then_some(0)
    )
    .collect()
}

/**
  Reads a literal string from the start of `words`. Returns its bytes, without the terminator, and
  the number of words it occupies, or `None` if no NUL byte occurs within `words`.
*/
pub fn unpack_string(words: &[Word]) -> Option<(Vec<u8>, usize)> {
  let mut bytes = Vec::new();
  for (index, word) in words.iter().enumerate() {
    for byte in word.to_le_bytes() {
      if byte == 0 {
        return Some((bytes, index + 1));
      }
      bytes.push(byte);
    }
  }
  None
}
