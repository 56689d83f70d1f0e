/*!
  A decoded module with its functions and basic blocks made explicit.

  `Module::from_words` decodes every instruction into an owned record and, in the same pass,
  groups them: an `OpFunction` opens a function that the next `OpFunctionEnd` closes, and within a
  function an `OpLabel` opens a basic block that the next terminator closes. Every instruction
  records the function and block it belongs to, so questions like "are these two instructions in
  the same block" are answered by comparing indices rather than by walking the instruction
  stream.
*/

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::ops::{ControlFlow, Deref};

use tracing::debug;

use crate::bytecode::{self, parse, Header, ParseHandler, ParseStatus, ParsedInstruction, Word};
use crate::classify::{is_constant, is_terminator, is_type_declaration};
use crate::error::Error;
use crate::grammar::{Op, OperandType};

pub type InstructionIndex = usize;
pub type FunctionIndex    = usize;
pub type BlockIndex       = usize;

/// An instruction and its place in the module. Dereferences to the decoded instruction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instruction {
  pub code     : bytecode::Instruction,
  pub function : Option<FunctionIndex>,
  pub block    : Option<BlockIndex>,
}

impl Deref for Instruction {
  type Target = bytecode::Instruction;

  fn deref(&self) -> &Self::Target {
    &self.code
  }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Function {
  /// The `OpFunction` instruction.
  pub instruction : InstructionIndex,
  /// The `OpFunctionEnd` instruction, absent if the module ends first.
  pub end         : Option<InstructionIndex>,
  pub blocks      : Vec<BlockIndex>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BasicBlock {
  /// The `OpLabel` instruction.
  pub label        : InstructionIndex,
  pub function     : FunctionIndex,
  /// The block's instructions in order, from its label up to and including its terminator.
  pub instructions : Vec<InstructionIndex>,
}

impl BasicBlock {
  /// The last instruction, if it ends the block.
  pub fn terminator<'m>(&self, module: &'m Module) -> Option<&'m Instruction> {
    self
      .instructions
      .last()
      .and_then(|index| module.instruction(*index))
      .filter(|instruction| is_terminator(instruction.opcode))
  }
}

#[derive(Clone, Debug)]
pub struct Module {
  header       : Header,
  instructions : Vec<Instruction>,
  functions    : Vec<Function>,
  blocks       : Vec<BasicBlock>,
  definitions  : HashMap<Word, InstructionIndex>,
}

impl Module {
  pub fn from_words(words: &[Word]) -> Result<Module, Error> {
    let mut builder = ModuleBuilder::default();
    match parse(words, &mut builder)? {
      ParseStatus::Completed         => {}
      ParseStatus::Terminated(never) => match never {},
    }
    let module = builder.finish();
    debug!(
      instructions = module.instructions.len(),
      functions = module.functions.len(),
      blocks = module.blocks.len(),
      "built module"
    );
    Ok(module)
  }

  pub fn header(&self) -> &Header {
    &self.header
  }

  pub fn instructions(&self) -> &[Instruction] {
    &self.instructions
  }

  pub fn instruction(&self, index: InstructionIndex) -> Option<&Instruction> {
    self.instructions.get(index)
  }

  pub fn functions(&self) -> &[Function] {
    &self.functions
  }

  pub fn blocks(&self) -> &[BasicBlock] {
    &self.blocks
  }

  /// The index of the instruction whose result is `id`.
  pub fn definition_index(&self, id: Word) -> Option<InstructionIndex> {
    self.definitions.get(&id).copied()
  }

  /// The instruction whose result is `id`.
  pub fn definition(&self, id: Word) -> Option<&Instruction> {
    self.definition_index(id).and_then(|index| self.instruction(index))
  }

  pub fn function_of(&self, index: InstructionIndex) -> Option<&Function> {
    self
      .instruction(index)
      .and_then(|instruction| instruction.function)
      .and_then(|function| self.functions.get(function))
  }

  pub fn block_of(&self, index: InstructionIndex) -> Option<&BasicBlock> {
    self
      .instruction(index)
      .and_then(|instruction| instruction.block)
      .and_then(|block| self.blocks.get(block))
  }

  pub fn is_in_basic_block(&self, index: InstructionIndex) -> bool {
    self.block_of(index).is_some()
  }

  /// Whether both instructions belong to one basic block.
  pub fn is_in_same_block(&self, a: InstructionIndex, b: InstructionIndex) -> bool {
    match (self.instruction(a), self.instruction(b)) {
      (Some(a), Some(b)) => a.block.is_some() && a.block == b.block,
      _                  => false,
    }
  }

  /**
    Whether the ids `a` and `b` name the same type. Two type declarations are equal when they have
    the same opcode and the same operands, with the ids among the operands compared the same way:
    types recursively, constants (such as array lengths) by value, anything else by id. Recursive
    types through forward pointers are handled by assuming equality for a pair already being
    compared.
  */
  pub fn types_equal(&self, a: Word, b: Word) -> bool {
    self.ids_equal(a, b, &mut HashSet::new())
  }

  fn ids_equal(&self, a: Word, b: Word, assumed: &mut HashSet<(Word, Word)>) -> bool {
    if a == b || assumed.contains(&(a, b)) {
      return true;
    }
    let (first, second) = match (self.definition(a), self.definition(b)) {
      (Some(first), Some(second)) => (first, second),
      _                           => return false,
    };
    let comparable = first.opcode == second.opcode
      && (is_type_declaration(first.opcode) || is_constant(first.opcode))
      && first.words.len() == second.words.len()
      && first.operands.len() == second.operands.len();
    if !comparable {
      return false;
    }

    assumed.insert((a, b));
    if first.type_id != 0 && !self.ids_equal(first.type_id, second.type_id, assumed) {
      return false;
    }
    first.operands.iter().zip(&second.operands).enumerate().all(|(index, (left, right))| {
      match left.kind {
        OperandType::ResultId | OperandType::TypeId => true,
        kind if kind.is_id() => {
          match (first.operand_word(index), second.operand_word(index)) {
            (Some(x), Some(y)) => self.ids_equal(x, y, assumed),
            _                  => false,
          }
        }
        _ => left.kind == right.kind && first.operand_words(index) == second.operand_words(index),
      }
    })
  }
}

#[derive(Default)]
struct ModuleBuilder {
  header           : Option<Header>,
  instructions     : Vec<Instruction>,
  functions        : Vec<Function>,
  blocks           : Vec<BasicBlock>,
  definitions      : HashMap<Word, InstructionIndex>,
  current_function : Option<FunctionIndex>,
  current_block    : Option<BlockIndex>,
}

impl ModuleBuilder {
  fn finish(self) -> Module {
    Module {
      // The parser always reports a header before it succeeds.
      header       : self.header.unwrap_or_else(|| Header::new(0, 0)),
      instructions : self.instructions,
      functions    : self.functions,
      blocks       : self.blocks,
      definitions  : self.definitions,
    }
  }
}

impl ParseHandler for ModuleBuilder {
  type Break = Infallible;

  fn handle_header(&mut self, header: &Header) -> ControlFlow<Infallible> {
    self.header = Some(*header);
    ControlFlow::Continue(())
  }

  fn handle_instruction(&mut self, parsed: &ParsedInstruction<'_>) -> ControlFlow<Infallible> {
    let index = self.instructions.len();

    if parsed.opcode == Op::Function {
      self.current_function = Some(self.functions.len());
      self.current_block = None;
      self.functions.push(Function {
        instruction : index,
        end         : None,
        blocks      : Vec::new(),
      });
    }

    if let (Op::Label, Some(function)) = (parsed.opcode, self.current_function) {
      let block = self.blocks.len();
      self.current_block = Some(block);
      self.blocks.push(BasicBlock {
        label        : index,
        function,
        instructions : Vec::new(),
      });
      if let Some(owner) = self.functions.get_mut(function) {
        owner.blocks.push(block);
      }
    }

    if let Some(block) = self.current_block.and_then(|block| self.blocks.get_mut(block)) {
      block.instructions.push(index);
    }
    self.instructions.push(Instruction {
      code     : parsed.to_instruction(),
      function : self.current_function,
      block    : self.current_block,
    });
    if parsed.result_id != 0 {
      self.definitions.insert(parsed.result_id, index);
    }

    if is_terminator(parsed.opcode) {
      self.current_block = None;
    }
    if parsed.opcode == Op::FunctionEnd {
      if let Some(function) = self.current_function.and_then(|function| self.functions.get_mut(function)) {
        function.end = Some(index);
      }
      self.current_function = None;
      self.current_block = None;
    }

    ControlFlow::Continue(())
  }
}
