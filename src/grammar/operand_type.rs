/*!
  The closed set of operand types. Besides the concrete kinds of operand that appear in a binary
  (ids, literals, enumerants and masks), there are pattern-only types:

    * `Optional*` types may be absent at the end of an instruction.
    * `*InOptionalTuple` types are the second member of a repeated tuple. They are matched only
      after the first member of the tuple was present.
    * `Variable*` types repeat their element (or tuple) zero or more times, to the end of the
      instruction.
    * `OptionalCiv` is a context-independent value (literal, string, or id). It is only produced
      after a raw `!<integer>` word in assembly text, after which the grammar no longer applies.

  The `Display` form of each type is the phrase used in diagnostics.
*/

use strum_macros::{Display as StrumDisplay, EnumIter, IntoStaticStr};

#[derive(
StrumDisplay, IntoStaticStr, EnumIter,
Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum OperandType {
  /// Marks an exhausted operand pattern.
  #[strum(to_string = "NONE")]
  None,

  // region Ids
  #[strum(to_string = "ID")]
  Id,
  #[strum(to_string = "type ID")]
  TypeId,
  #[strum(to_string = "result ID")]
  ResultId,
  #[strum(to_string = "scope ID")]
  ScopeId,
  #[strum(to_string = "memory semantics ID")]
  MemorySemanticsId,
  // endregion

  // region Literals
  #[strum(to_string = "literal number")]
  LiteralInteger,
  /// A literal whose width and kind are those of a numeric type named elsewhere in the
  /// instruction. Wider than 32 bits means more than one word.
  #[strum(to_string = "possibly multi-word literal number")]
  TypedLiteralNumber,
  #[strum(to_string = "literal string")]
  LiteralString,
  #[strum(to_string = "extended instruction")]
  ExtensionInstructionNumber,
  #[strum(to_string = "OpSpecConstantOp opcode")]
  SpecConstantOpNumber,
  // endregion

  // region Enumerant categories
  #[strum(to_string = "source language")]
  SourceLanguage,
  #[strum(to_string = "execution model")]
  ExecutionModel,
  #[strum(to_string = "addressing model")]
  AddressingModel,
  #[strum(to_string = "memory model")]
  MemoryModel,
  #[strum(to_string = "execution mode")]
  ExecutionMode,
  #[strum(to_string = "storage class")]
  StorageClass,
  #[strum(to_string = "dimensionality")]
  Dimensionality,
  #[strum(to_string = "sampler addressing mode")]
  SamplerAddressingMode,
  #[strum(to_string = "sampler filter mode")]
  SamplerFilterMode,
  #[strum(to_string = "image format")]
  SamplerImageFormat,
  #[strum(to_string = "image channel order")]
  ImageChannelOrder,
  #[strum(to_string = "image channel data type")]
  ImageChannelDataType,
  #[strum(to_string = "floating-point rounding mode")]
  FpRoundingMode,
  #[strum(to_string = "linkage type")]
  LinkageType,
  #[strum(to_string = "access qualifier")]
  AccessQualifier,
  #[strum(to_string = "function parameter attribute")]
  FunctionParameterAttribute,
  #[strum(to_string = "decoration")]
  Decoration,
  #[strum(to_string = "built-in")]
  BuiltIn,
  #[strum(to_string = "group operation")]
  GroupOperation,
  #[strum(to_string = "kernel enqueue flags")]
  KernelEnqueueFlags,
  #[strum(to_string = "kernel profiling info")]
  KernelProfilingInfo,
  #[strum(to_string = "capability")]
  Capability,
  // endregion

  // region Mask categories
  #[strum(to_string = "image")]
  ImageOperands,
  #[strum(to_string = "floating-point fast math mode")]
  FpFastMathMode,
  #[strum(to_string = "selection control")]
  SelectionControl,
  #[strum(to_string = "loop control")]
  LoopControl,
  #[strum(to_string = "function control")]
  FunctionControl,
  #[strum(to_string = "memory access")]
  MemoryAccess,
  #[strum(to_string = "memory semantics")]
  MemorySemantics,
  // endregion

  // region Optional
  #[strum(to_string = "ID")]
  OptionalId,
  #[strum(to_string = "image")]
  OptionalImageOperands,
  #[strum(to_string = "memory access")]
  OptionalMemoryAccess,
  #[strum(to_string = "access qualifier")]
  OptionalAccessQualifier,
  #[strum(to_string = "literal number")]
  OptionalLiteralInteger,
  #[strum(to_string = "possibly multi-word literal number")]
  OptionalTypedLiteralNumber,
  #[strum(to_string = "literal string")]
  OptionalLiteralString,
  #[strum(to_string = "context-insensitive value")]
  OptionalCiv,
  #[strum(to_string = "ID")]
  IdInOptionalTuple,
  #[strum(to_string = "literal number")]
  LiteralIntegerInOptionalTuple,
  // endregion

  // region Variable
  #[strum(to_string = "ID")]
  VariableId,
  #[strum(to_string = "literal number")]
  VariableLiteralInteger,
  /// Zero or more (literal, id) pairs, as in the targets of `OpSwitch`.
  #[strum(to_string = "literal number, ID pair")]
  VariableLiteralId,
  /// Zero or more (id, literal) pairs, as in `OpGroupMemberDecorate`.
  #[strum(to_string = "ID, literal number pair")]
  VariableIdLiteralInteger,
  // endregion
}

impl OperandType {
  /// The concrete type an optional, tuple or variable type stands for. Concrete types map to
  /// themselves.
  pub fn base(self) -> OperandType {
    use OperandType::*;
    match self {
      OptionalId
      | IdInOptionalTuple
      | VariableId                    => Id,
      OptionalImageOperands           => ImageOperands,
      OptionalMemoryAccess            => MemoryAccess,
      OptionalAccessQualifier         => AccessQualifier,
      OptionalLiteralInteger
      | LiteralIntegerInOptionalTuple
      | VariableLiteralInteger        => LiteralInteger,
      OptionalTypedLiteralNumber      => TypedLiteralNumber,
      OptionalLiteralString           => LiteralString,
      other                           => other,
    }
  }

  /// Whether an operand of this type may be absent. Variable types count as optional because
  /// they may match zero times.
  pub fn is_optional(self) -> bool {
    use OperandType::*;
    matches!(
      self,
      OptionalId
      | OptionalImageOperands
      | OptionalMemoryAccess
      | OptionalAccessQualifier
      | OptionalLiteralInteger
      | OptionalTypedLiteralNumber
      | OptionalLiteralString
      | OptionalCiv
      | IdInOptionalTuple
      | LiteralIntegerInOptionalTuple
    ) || self.is_variable()
  }

  pub fn is_variable(self) -> bool {
    use OperandType::*;
    matches!(self, VariableId | VariableLiteralInteger | VariableLiteralId | VariableIdLiteralInteger)
  }

  /// Whether this type is written as `%name` in assembly.
  pub fn is_id(self) -> bool {
    use OperandType::*;
    matches!(
      self,
      Id | TypeId | ResultId | ScopeId | MemorySemanticsId | OptionalId | IdInOptionalTuple
    )
  }

  pub fn is_mask(self) -> bool {
    use OperandType::*;
    matches!(
      self.base(),
      ImageOperands
      | FpFastMathMode
      | SelectionControl
      | LoopControl
      | FunctionControl
      | MemoryAccess
      | MemorySemantics
    )
  }

  /// Whether values of this type are single enumerants of an operand table.
  pub fn is_enum(self) -> bool {
    use OperandType::*;
    matches!(
      self.base(),
      SourceLanguage
      | ExecutionModel
      | AddressingModel
      | MemoryModel
      | ExecutionMode
      | StorageClass
      | Dimensionality
      | SamplerAddressingMode
      | SamplerFilterMode
      | SamplerImageFormat
      | ImageChannelOrder
      | ImageChannelDataType
      | FpRoundingMode
      | LinkageType
      | AccessQualifier
      | FunctionParameterAttribute
      | Decoration
      | BuiltIn
      | GroupOperation
      | KernelEnqueueFlags
      | KernelProfilingInfo
      | Capability
    )
  }

  /// Whether this type has its own table of named values.
  pub fn has_table(self) -> bool {
    self.is_enum() || self.is_mask()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use strum::IntoEnumIterator;

  #[test]
  fn diagnostic_names() {
    assert_eq!(OperandType::ResultId.to_string(), "result ID");
    assert_eq!(OperandType::TypedLiteralNumber.to_string(), "possibly multi-word literal number");
    assert_eq!(OperandType::OptionalImageOperands.to_string(), "image");
    assert_eq!(OperandType::FpFastMathMode.to_string(), "floating-point fast math mode");
  }

  #[test]
  fn optional_types_have_concrete_bases() {
    for kind in OperandType::iter() {
      let base = kind.base();
      if base != kind {
        assert!(!base.is_optional(), "{:?} has optional base {:?}", kind, base);
      }
      assert_eq!(base.base(), base);
    }
  }

  #[test]
  fn variable_types_are_optional() {
    for kind in OperandType::iter().filter(|kind| kind.is_variable()) {
      assert!(kind.is_optional());
    }
    assert!(!OperandType::Id.is_optional());
    assert!(OperandType::OptionalMemoryAccess.is_mask());
    assert!(OperandType::OptionalAccessQualifier.is_enum());
    assert!(!OperandType::LiteralString.has_table());
  }
}
