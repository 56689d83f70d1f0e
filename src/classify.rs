/*!
  Predicates over opcodes. Each is a plain `match` on `Op`, so they are cheap enough to call per
  instruction.
*/

use crate::grammar::{opcode_desc, Op};

/// Whether `opcode` declares a type.
pub fn is_type_declaration(opcode: Op) -> bool {
  matches!(
    opcode,
    Op::TypeVoid
    | Op::TypeBool
    | Op::TypeInt
    | Op::TypeFloat
    | Op::TypeVector
    | Op::TypeMatrix
    | Op::TypeImage
    | Op::TypeSampler
    | Op::TypeSampledImage
    | Op::TypeArray
    | Op::TypeRuntimeArray
    | Op::TypeStruct
    | Op::TypeOpaque
    | Op::TypePointer
    | Op::TypeFunction
    | Op::TypeEvent
    | Op::TypeDeviceEvent
    | Op::TypeReserveId
    | Op::TypeQueue
    | Op::TypePipe
  )
}

/// Whether the result id of `opcode` is itself a type. This is every type declaration;
/// `OpTypeForwardPointer` only names a type declared elsewhere.
pub fn generates_type(opcode: Op) -> bool {
  is_type_declaration(opcode)
}

pub fn is_scalar_type(opcode: Op) -> bool {
  matches!(opcode, Op::TypeInt | Op::TypeFloat)
}

/// Whether `opcode` declares a constant. `OpSpecConstantOp` is excluded: its value is computed.
pub fn is_constant(opcode: Op) -> bool {
  matches!(
    opcode,
    Op::ConstantTrue
    | Op::ConstantFalse
    | Op::Constant
    | Op::ConstantComposite
    | Op::ConstantSampler
    | Op::ConstantNull
    | Op::SpecConstantTrue
    | Op::SpecConstantFalse
    | Op::SpecConstant
    | Op::SpecConstantComposite
  )
}

pub fn is_composite_type(opcode: Op) -> bool {
  matches!(opcode, Op::TypeVector | Op::TypeMatrix | Op::TypeArray | Op::TypeStruct)
}

/// Whether the result of `opcode` is a pointer.
pub fn is_pointer(opcode: Op) -> bool {
  matches!(
    opcode,
    Op::Variable
    | Op::AccessChain
    | Op::InBoundsAccessChain
    | Op::FunctionParameter
  )
}

/// Whether the result of `opcode` is an object: a constant, a pointer, or the result of a
/// conversion, composite, arithmetic, relational or derivative instruction.
pub fn is_object(opcode: Op) -> bool {
  if is_constant(opcode) && opcode != Op::ConstantSampler {
    return true;
  }
  matches!(
    opcode,
    Op::Variable
    | Op::AccessChain
    | Op::InBoundsAccessChain

    // region Conversions
    | Op::ConvertFToU
    | Op::ConvertFToS
    | Op::ConvertSToF
    | Op::ConvertUToF
    | Op::UConvert
    | Op::SConvert
    | Op::FConvert
    | Op::ConvertPtrToU
    | Op::PtrCastToGeneric
    | Op::Bitcast
    | Op::SatConvertSToU
    | Op::SatConvertUToS
    // endregion

    // region Composites
    | Op::VectorExtractDynamic
    | Op::CompositeConstruct
    | Op::CompositeExtract
    | Op::CopyObject
    | Op::Transpose
    // endregion

    // region Arithmetic
    | Op::SNegate
    | Op::FNegate
    | Op::Not
    | Op::IAdd
    | Op::FAdd
    | Op::ISub
    | Op::FSub
    | Op::IMul
    | Op::FMul
    | Op::UDiv
    | Op::SDiv
    | Op::FDiv
    | Op::UMod
    | Op::SRem
    | Op::SMod
    | Op::VectorTimesScalar
    | Op::MatrixTimesScalar
    | Op::VectorTimesMatrix
    | Op::MatrixTimesVector
    | Op::MatrixTimesMatrix
    | Op::OuterProduct
    | Op::Dot
    | Op::ShiftRightLogical
    | Op::ShiftRightArithmetic
    | Op::ShiftLeftLogical
    | Op::BitwiseOr
    | Op::BitwiseXor
    | Op::BitwiseAnd
    // endregion

    // region Relational and logical
    | Op::Any
    | Op::All
    | Op::IsNan
    | Op::IsInf
    | Op::IsFinite
    | Op::IsNormal
    | Op::SignBitSet
    | Op::LessOrGreater
    | Op::Ordered
    | Op::Unordered
    | Op::LogicalOr
    | Op::LogicalAnd
    | Op::Select
    | Op::IEqual
    | Op::FOrdEqual
    | Op::FUnordEqual
    | Op::INotEqual
    | Op::FOrdNotEqual
    | Op::FUnordNotEqual
    | Op::ULessThan
    | Op::SLessThan
    | Op::FOrdLessThan
    | Op::FUnordLessThan
    | Op::UGreaterThan
    | Op::SGreaterThan
    | Op::FOrdGreaterThan
    | Op::FUnordGreaterThan
    | Op::ULessThanEqual
    | Op::SLessThanEqual
    | Op::FOrdLessThanEqual
    | Op::FUnordLessThanEqual
    | Op::UGreaterThanEqual
    | Op::SGreaterThanEqual
    | Op::FOrdGreaterThanEqual
    | Op::FUnordGreaterThanEqual
    // endregion

    // region Derivatives
    | Op::DPdx
    | Op::DPdy
    | Op::Fwidth
    | Op::DPdxFine
    | Op::DPdyFine
    | Op::FwidthFine
    | Op::DPdxCoarse
    | Op::DPdyCoarse
    | Op::FwidthCoarse
    // endregion

    | Op::ReturnValue
  )
}

/// Whether `OpConstantNull` may have a value of the type `opcode` declares, without looking
/// inside composite types.
pub fn is_basic_type_nullable(opcode: Op) -> bool {
  matches!(
    opcode,
    Op::TypeBool
    | Op::TypeInt
    | Op::TypeFloat
    | Op::TypePointer
    | Op::TypeEvent
    | Op::TypeDeviceEvent
    | Op::TypeReserveId
    | Op::TypeQueue
  )
}

/// Whether `opcode` produces a typed value: it has both a result type and a result id.
pub fn is_value(opcode: Op) -> bool {
  let desc = opcode_desc(opcode);
  desc.has_result && desc.has_type
}

/// Whether `opcode` ends a basic block.
pub fn is_terminator(opcode: Op) -> bool {
  is_branch(opcode)
    || is_return(opcode)
    || matches!(opcode, Op::Kill | Op::Unreachable)
}

pub fn is_branch(opcode: Op) -> bool {
  matches!(opcode, Op::Branch | Op::BranchConditional | Op::Switch)
}

pub fn is_return(opcode: Op) -> bool {
  matches!(opcode, Op::Return | Op::ReturnValue)
}
