/*!
  The SPIR-V 1.0 core instruction set.

  A single `opcodes!` invocation lists every instruction once, as
  `Name = value, [capabilities], [operand types];`, and from that list generates both the `Op`
  enum and `OPCODE_TABLE`, the static table of `OpcodeDesc` rows in increasing opcode order.
  Whether an instruction has a result id or a result type is read off its operand list, so the
  two can never disagree.

  Operand lists are given as the assembler expects them: result type first, then result id, then
  the remaining operands in binary order.
*/

use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::capability::{Capability, CapabilityMask};
use super::OperandType;

/// The grammar of one instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct OpcodeDesc {
  /// The name without its `Op` prefix.
  pub name         : &'static str,
  pub opcode       : Op,
  pub has_result   : bool,
  pub has_type     : bool,
  pub capabilities : CapabilityMask,
  pub operands     : &'static [OperandType],
}

impl OpcodeDesc {
  /// The minimum number of words an instruction with this opcode occupies: the opcode word plus
  /// one word for each leading operand that is neither optional nor variable. Literal strings and
  /// wide literals may make the real instruction longer.
  pub fn word_count(&self) -> usize {
    1 + self.operands.iter().take_while(|kind| !kind.is_optional()).count()
  }

  /// Whether an instruction with this opcode may have a trailing run of optional operands.
  pub fn has_variable_tail(&self) -> bool {
    self.operands.iter().any(|kind| kind.is_optional())
  }

  pub fn requires_capability(&self) -> bool {
    !self.capabilities.is_empty()
  }
}

const fn contains_operand(operands: &[OperandType], kind: OperandType) -> bool {
  let mut i = 0;
  while i < operands.len() {
    if operands[i] as u8 == kind as u8 {
      return true;
    }
    i += 1;
  }
  false
}

macro_rules! opcodes {
  ( $( $name:ident = $value:literal, [$($cap:ident),*], [$($operand:ident),*]; )* ) => {
    /// A SPIR-V 1.0 opcode. Converts to and from its numeric value with `num_enum` and to and
    /// from its name without the `Op` prefix with `strum`. `Display` includes the prefix.
    #[derive(
    IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
    Clone,         Copy,       Eq,       PartialEq,        Debug,         Hash
    )]
    #[repr(u16)]
    pub enum Op {
      $( $name = $value, )*
    }

    /// Every core instruction, in increasing opcode order.
    pub static OPCODE_TABLE: &[OpcodeDesc] = &[
      $(
        OpcodeDesc {
          name         : stringify!($name),
          opcode       : Op::$name,
          has_result   : contains_operand(&[$(OperandType::$operand),*], OperandType::ResultId),
          has_type     : contains_operand(&[$(OperandType::$operand),*], OperandType::TypeId),
          capabilities : CapabilityMask::of(&[$(Capability::$cap),*]),
          operands     : &[$(OperandType::$operand),*],
        },
      )*
    ];
  };
}

impl Op {
  /// The name without the `Op` prefix.
  pub fn name(self) -> &'static str {
    self.into()
  }

  pub fn value(self) -> u16 {
    self.into()
  }
}

impl Display for Op {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "Op{}", self.name())
  }
}

opcodes! {
  // region Miscellaneous, debug and annotation
  Nop                       = 0,   [],       [];
  Undef                     = 1,   [],       [TypeId, ResultId];
  SourceContinued           = 2,   [],       [LiteralString];
  Source                    = 3,   [],       [SourceLanguage, LiteralInteger, OptionalId, OptionalLiteralString];
  SourceExtension           = 4,   [],       [LiteralString];
  Name                      = 5,   [],       [Id, LiteralString];
  MemberName                = 6,   [],       [Id, LiteralInteger, LiteralString];
  String                    = 7,   [],       [ResultId, LiteralString];
  Line                      = 8,   [],       [Id, LiteralInteger, LiteralInteger];
  Extension                 = 10,  [],       [LiteralString];
  ExtInstImport             = 11,  [],       [ResultId, LiteralString];
  ExtInst                   = 12,  [],       [TypeId, ResultId, Id, ExtensionInstructionNumber, VariableId];
  MemoryModel               = 14,  [],       [AddressingModel, MemoryModel];
  EntryPoint                = 15,  [],       [ExecutionModel, Id, LiteralString, VariableId];
  ExecutionMode             = 16,  [],       [Id, ExecutionMode];
  Capability                = 17,  [],       [Capability];
  // endregion

  // region Type declarations
  TypeVoid                  = 19,  [],               [ResultId];
  TypeBool                  = 20,  [],               [ResultId];
  TypeInt                   = 21,  [],               [ResultId, LiteralInteger, LiteralInteger];
  TypeFloat                 = 22,  [],               [ResultId, LiteralInteger];
  TypeVector                = 23,  [],               [ResultId, Id, LiteralInteger];
  TypeMatrix                = 24,  [Matrix],         [ResultId, Id, LiteralInteger];
  TypeImage                 = 25,  [],               [ResultId, Id, Dimensionality, LiteralInteger, LiteralInteger, LiteralInteger, LiteralInteger, SamplerImageFormat, OptionalAccessQualifier];
  TypeSampler               = 26,  [],               [ResultId];
  TypeSampledImage          = 27,  [],               [ResultId, Id];
  TypeArray                 = 28,  [],               [ResultId, Id, Id];
  TypeRuntimeArray          = 29,  [Shader],         [ResultId, Id];
  TypeStruct                = 30,  [],               [ResultId, VariableId];
  TypeOpaque                = 31,  [Kernel],         [ResultId, LiteralString];
  TypePointer               = 32,  [],               [ResultId, StorageClass, Id];
  TypeFunction              = 33,  [],               [ResultId, Id, VariableId];
  TypeEvent                 = 34,  [Kernel],         [ResultId];
  TypeDeviceEvent           = 35,  [DeviceEnqueue],  [ResultId];
  TypeReserveId             = 36,  [Pipes],          [ResultId];
  TypeQueue                 = 37,  [DeviceEnqueue],  [ResultId];
  TypePipe                  = 38,  [Pipes],          [ResultId, AccessQualifier];
  TypeForwardPointer        = 39,  [Addresses],      [Id, StorageClass];
  // endregion

  // region Constants
  ConstantTrue              = 41,  [],               [TypeId, ResultId];
  ConstantFalse             = 42,  [],               [TypeId, ResultId];
  Constant                  = 43,  [],               [TypeId, ResultId, TypedLiteralNumber];
  ConstantComposite         = 44,  [],               [TypeId, ResultId, VariableId];
  ConstantSampler           = 45,  [LiteralSampler], [TypeId, ResultId, SamplerAddressingMode, LiteralInteger, SamplerFilterMode];
  ConstantNull              = 46,  [],               [TypeId, ResultId];
  SpecConstantTrue          = 48,  [Shader],         [TypeId, ResultId];
  SpecConstantFalse         = 49,  [Shader],         [TypeId, ResultId];
  SpecConstant              = 50,  [Shader],         [TypeId, ResultId, TypedLiteralNumber];
  SpecConstantComposite     = 51,  [Shader],         [TypeId, ResultId, VariableId];
  SpecConstantOp            = 52,  [Shader],         [TypeId, ResultId, SpecConstantOpNumber];
  // endregion

  // region Functions
  Function                  = 54,  [],               [TypeId, ResultId, FunctionControl, Id];
  FunctionParameter         = 55,  [],               [TypeId, ResultId];
  FunctionEnd               = 56,  [],               [];
  FunctionCall              = 57,  [],               [TypeId, ResultId, Id, VariableId];
  // endregion

  // region Memory
  Variable                  = 59,  [],               [TypeId, ResultId, StorageClass, OptionalId];
  ImageTexelPointer         = 60,  [],               [TypeId, ResultId, Id, Id, Id];
  Load                      = 61,  [],               [TypeId, ResultId, Id, OptionalMemoryAccess];
  Store                     = 62,  [],               [Id, Id, OptionalMemoryAccess];
  CopyMemory                = 63,  [],               [Id, Id, OptionalMemoryAccess];
  CopyMemorySized           = 64,  [Addresses],      [Id, Id, Id, OptionalMemoryAccess];
  AccessChain               = 65,  [],               [TypeId, ResultId, Id, VariableId];
  InBoundsAccessChain       = 66,  [],               [TypeId, ResultId, Id, VariableId];
  PtrAccessChain            = 67,  [Addresses],      [TypeId, ResultId, Id, Id, VariableId];
  ArrayLength               = 68,  [Shader],         [TypeId, ResultId, Id, LiteralInteger];
  GenericPtrMemSemantics    = 69,  [Kernel],         [TypeId, ResultId, Id];
  InBoundsPtrAccessChain    = 70,  [Addresses],      [TypeId, ResultId, Id, Id, VariableId];
  // endregion

  // region Decorations
  Decorate                  = 71,  [],               [Id, Decoration];
  MemberDecorate            = 72,  [],               [Id, LiteralInteger, Decoration];
  DecorationGroup           = 73,  [],               [ResultId];
  GroupDecorate             = 74,  [],               [Id, VariableId];
  GroupMemberDecorate       = 75,  [],               [Id, VariableIdLiteralInteger];
  // endregion

  // region Composites
  VectorExtractDynamic      = 77,  [],               [TypeId, ResultId, Id, Id];
  VectorInsertDynamic       = 78,  [],               [TypeId, ResultId, Id, Id, Id];
  VectorShuffle             = 79,  [],               [TypeId, ResultId, Id, Id, VariableLiteralInteger];
  CompositeConstruct        = 80,  [],               [TypeId, ResultId, VariableId];
  CompositeExtract          = 81,  [],               [TypeId, ResultId, Id, VariableLiteralInteger];
  CompositeInsert           = 82,  [],               [TypeId, ResultId, Id, Id, VariableLiteralInteger];
  CopyObject                = 83,  [],               [TypeId, ResultId, Id];
  Transpose                 = 84,  [Matrix],         [TypeId, ResultId, Id];
  // endregion

  // region Images
  SampledImage                   = 86,  [],                      [TypeId, ResultId, Id, Id];
  ImageSampleImplicitLod         = 87,  [Shader],                [TypeId, ResultId, Id, Id, OptionalImageOperands];
  ImageSampleExplicitLod         = 88,  [],                      [TypeId, ResultId, Id, Id, ImageOperands];
  ImageSampleDrefImplicitLod     = 89,  [Shader],                [TypeId, ResultId, Id, Id, Id, OptionalImageOperands];
  ImageSampleDrefExplicitLod     = 90,  [Shader],                [TypeId, ResultId, Id, Id, Id, ImageOperands];
  ImageSampleProjImplicitLod     = 91,  [Shader],                [TypeId, ResultId, Id, Id, OptionalImageOperands];
  ImageSampleProjExplicitLod     = 92,  [Shader],                [TypeId, ResultId, Id, Id, ImageOperands];
  ImageSampleProjDrefImplicitLod = 93,  [Shader],                [TypeId, ResultId, Id, Id, Id, OptionalImageOperands];
  ImageSampleProjDrefExplicitLod = 94,  [Shader],                [TypeId, ResultId, Id, Id, Id, ImageOperands];
  ImageFetch                     = 95,  [],                      [TypeId, ResultId, Id, Id, OptionalImageOperands];
  ImageGather                    = 96,  [Shader],                [TypeId, ResultId, Id, Id, Id, OptionalImageOperands];
  ImageDrefGather                = 97,  [Shader],                [TypeId, ResultId, Id, Id, Id, OptionalImageOperands];
  ImageRead                      = 98,  [],                      [TypeId, ResultId, Id, Id, OptionalImageOperands];
  ImageWrite                     = 99,  [],                      [Id, Id, Id, OptionalImageOperands];
  Image                          = 100, [],                      [TypeId, ResultId, Id];
  ImageQueryFormat               = 101, [Kernel],                [TypeId, ResultId, Id];
  ImageQueryOrder                = 102, [Kernel],                [TypeId, ResultId, Id];
  ImageQuerySizeLod              = 103, [Kernel, ImageQuery],    [TypeId, ResultId, Id, Id];
  ImageQuerySize                 = 104, [Kernel, ImageQuery],    [TypeId, ResultId, Id];
  ImageQueryLod                  = 105, [ImageQuery],            [TypeId, ResultId, Id, Id];
  ImageQueryLevels               = 106, [Kernel, ImageQuery],    [TypeId, ResultId, Id];
  ImageQuerySamples              = 107, [Kernel, ImageQuery],    [TypeId, ResultId, Id];
  // endregion

  // region Conversions
  ConvertFToU               = 109, [],               [TypeId, ResultId, Id];
  ConvertFToS               = 110, [],               [TypeId, ResultId, Id];
  ConvertSToF               = 111, [],               [TypeId, ResultId, Id];
  ConvertUToF               = 112, [],               [TypeId, ResultId, Id];
  UConvert                  = 113, [],               [TypeId, ResultId, Id];
  SConvert                  = 114, [],               [TypeId, ResultId, Id];
  FConvert                  = 115, [],               [TypeId, ResultId, Id];
  QuantizeToF16             = 116, [Shader],         [TypeId, ResultId, Id];
  ConvertPtrToU             = 117, [Addresses],      [TypeId, ResultId, Id];
  SatConvertSToU            = 118, [Kernel],         [TypeId, ResultId, Id];
  SatConvertUToS            = 119, [Kernel],         [TypeId, ResultId, Id];
  ConvertUToPtr             = 120, [Addresses],      [TypeId, ResultId, Id];
  PtrCastToGeneric          = 121, [Kernel],         [TypeId, ResultId, Id];
  GenericCastToPtr          = 122, [Kernel],         [TypeId, ResultId, Id];
  GenericCastToPtrExplicit  = 123, [Kernel],         [TypeId, ResultId, Id, StorageClass];
  Bitcast                   = 124, [],               [TypeId, ResultId, Id];
  // endregion

  // region Arithmetic
  SNegate                   = 126, [],               [TypeId, ResultId, Id];
  FNegate                   = 127, [],               [TypeId, ResultId, Id];
  IAdd                      = 128, [],               [TypeId, ResultId, Id, Id];
  FAdd                      = 129, [],               [TypeId, ResultId, Id, Id];
  ISub                      = 130, [],               [TypeId, ResultId, Id, Id];
  FSub                      = 131, [],               [TypeId, ResultId, Id, Id];
  IMul                      = 132, [],               [TypeId, ResultId, Id, Id];
  FMul                      = 133, [],               [TypeId, ResultId, Id, Id];
  UDiv                      = 134, [],               [TypeId, ResultId, Id, Id];
  SDiv                      = 135, [],               [TypeId, ResultId, Id, Id];
  FDiv                      = 136, [],               [TypeId, ResultId, Id, Id];
  UMod                      = 137, [],               [TypeId, ResultId, Id, Id];
  SRem                      = 138, [],               [TypeId, ResultId, Id, Id];
  SMod                      = 139, [],               [TypeId, ResultId, Id, Id];
  FRem                      = 140, [],               [TypeId, ResultId, Id, Id];
  FMod                      = 141, [],               [TypeId, ResultId, Id, Id];
  VectorTimesScalar         = 142, [],               [TypeId, ResultId, Id, Id];
  MatrixTimesScalar         = 143, [Matrix],         [TypeId, ResultId, Id, Id];
  VectorTimesMatrix         = 144, [Matrix],         [TypeId, ResultId, Id, Id];
  MatrixTimesVector         = 145, [Matrix],         [TypeId, ResultId, Id, Id];
  MatrixTimesMatrix         = 146, [Matrix],         [TypeId, ResultId, Id, Id];
  OuterProduct              = 147, [Matrix],         [TypeId, ResultId, Id, Id];
  Dot                       = 148, [],               [TypeId, ResultId, Id, Id];
  IAddCarry                 = 149, [],               [TypeId, ResultId, Id, Id];
  ISubBorrow                = 150, [],               [TypeId, ResultId, Id, Id];
  UMulExtended              = 151, [],               [TypeId, ResultId, Id, Id];
  SMulExtended              = 152, [],               [TypeId, ResultId, Id, Id];
  // endregion

  // region Relational and logical
  Any                       = 154, [],               [TypeId, ResultId, Id];
  All                       = 155, [],               [TypeId, ResultId, Id];
  IsNan                     = 156, [],               [TypeId, ResultId, Id];
  IsInf                     = 157, [],               [TypeId, ResultId, Id];
  IsFinite                  = 158, [Kernel],         [TypeId, ResultId, Id];
  IsNormal                  = 159, [Kernel],         [TypeId, ResultId, Id];
  SignBitSet                = 160, [Kernel],         [TypeId, ResultId, Id];
  LessOrGreater             = 161, [Kernel],         [TypeId, ResultId, Id, Id];
  Ordered                   = 162, [Kernel],         [TypeId, ResultId, Id, Id];
  Unordered                 = 163, [Kernel],         [TypeId, ResultId, Id, Id];
  LogicalEqual              = 164, [],               [TypeId, ResultId, Id, Id];
  LogicalNotEqual           = 165, [],               [TypeId, ResultId, Id, Id];
  LogicalOr                 = 166, [],               [TypeId, ResultId, Id, Id];
  LogicalAnd                = 167, [],               [TypeId, ResultId, Id, Id];
  LogicalNot                = 168, [],               [TypeId, ResultId, Id];
  Select                    = 169, [],               [TypeId, ResultId, Id, Id, Id];
  IEqual                    = 170, [],               [TypeId, ResultId, Id, Id];
  INotEqual                 = 171, [],               [TypeId, ResultId, Id, Id];
  UGreaterThan              = 172, [],               [TypeId, ResultId, Id, Id];
  SGreaterThan              = 173, [],               [TypeId, ResultId, Id, Id];
  UGreaterThanEqual         = 174, [],               [TypeId, ResultId, Id, Id];
  SGreaterThanEqual         = 175, [],               [TypeId, ResultId, Id, Id];
  ULessThan                 = 176, [],               [TypeId, ResultId, Id, Id];
  SLessThan                 = 177, [],               [TypeId, ResultId, Id, Id];
  ULessThanEqual            = 178, [],               [TypeId, ResultId, Id, Id];
  SLessThanEqual            = 179, [],               [TypeId, ResultId, Id, Id];
  FOrdEqual                 = 180, [],               [TypeId, ResultId, Id, Id];
  FUnordEqual               = 181, [],               [TypeId, ResultId, Id, Id];
  FOrdNotEqual              = 182, [],               [TypeId, ResultId, Id, Id];
  FUnordNotEqual            = 183, [],               [TypeId, ResultId, Id, Id];
  FOrdLessThan              = 184, [],               [TypeId, ResultId, Id, Id];
  FUnordLessThan            = 185, [],               [TypeId, ResultId, Id, Id];
  FOrdGreaterThan           = 186, [],               [TypeId, ResultId, Id, Id];
  FUnordGreaterThan         = 187, [],               [TypeId, ResultId, Id, Id];
  FOrdLessThanEqual         = 188, [],               [TypeId, ResultId, Id, Id];
  FUnordLessThanEqual       = 189, [],               [TypeId, ResultId, Id, Id];
  FOrdGreaterThanEqual      = 190, [],               [TypeId, ResultId, Id, Id];
  FUnordGreaterThanEqual    = 191, [],               [TypeId, ResultId, Id, Id];
  // endregion

  // region Bit operations
  ShiftRightLogical         = 194, [],               [TypeId, ResultId, Id, Id];
  ShiftRightArithmetic      = 195, [],               [TypeId, ResultId, Id, Id];
  ShiftLeftLogical          = 196, [],               [TypeId, ResultId, Id, Id];
  BitwiseOr                 = 197, [],               [TypeId, ResultId, Id, Id];
  BitwiseXor                = 198, [],               [TypeId, ResultId, Id, Id];
  BitwiseAnd                = 199, [],               [TypeId, ResultId, Id, Id];
  Not                       = 200, [],               [TypeId, ResultId, Id];
  BitFieldInsert            = 201, [Shader],         [TypeId, ResultId, Id, Id, Id, Id];
  BitFieldSExtract          = 202, [Shader],         [TypeId, ResultId, Id, Id, Id];
  BitFieldUExtract          = 203, [Shader],         [TypeId, ResultId, Id, Id, Id];
  BitReverse                = 204, [Shader],         [TypeId, ResultId, Id];
  BitCount                  = 205, [],               [TypeId, ResultId, Id];
  // endregion

  // region Derivatives
  DPdx                      = 207, [Shader],            [TypeId, ResultId, Id];
  DPdy                      = 208, [Shader],            [TypeId, ResultId, Id];
  Fwidth                    = 209, [Shader],            [TypeId, ResultId, Id];
  DPdxFine                  = 210, [DerivativeControl], [TypeId, ResultId, Id];
  DPdyFine                  = 211, [DerivativeControl], [TypeId, ResultId, Id];
  FwidthFine                = 212, [DerivativeControl], [TypeId, ResultId, Id];
  DPdxCoarse                = 213, [DerivativeControl], [TypeId, ResultId, Id];
  DPdyCoarse                = 214, [DerivativeControl], [TypeId, ResultId, Id];
  FwidthCoarse              = 215, [DerivativeControl], [TypeId, ResultId, Id];
  // endregion

  // region Primitives and barriers
  EmitVertex                = 218, [Geometry],        [];
  EndPrimitive              = 219, [Geometry],        [];
  EmitStreamVertex          = 220, [GeometryStreams], [Id];
  EndStreamPrimitive        = 221, [GeometryStreams], [Id];
  ControlBarrier            = 224, [],                [ScopeId, ScopeId, MemorySemanticsId];
  MemoryBarrier             = 225, [],                [ScopeId, MemorySemanticsId];
  // endregion

  // region Atomics
  AtomicLoad                = 227, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId];
  AtomicStore               = 228, [],       [Id, ScopeId, MemorySemanticsId, Id];
  AtomicExchange            = 229, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicCompareExchange     = 230, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, MemorySemanticsId, Id, Id];
  AtomicCompareExchangeWeak = 231, [Kernel], [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, MemorySemanticsId, Id, Id];
  AtomicIIncrement          = 232, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId];
  AtomicIDecrement          = 233, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId];
  AtomicIAdd                = 234, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicISub                = 235, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicSMin                = 236, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicUMin                = 237, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicSMax                = 238, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicUMax                = 239, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicAnd                 = 240, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicOr                  = 241, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  AtomicXor                 = 242, [],       [TypeId, ResultId, Id, ScopeId, MemorySemanticsId, Id];
  // endregion

  // region Control flow
  Phi                       = 245, [],       [TypeId, ResultId, VariableId];
  LoopMerge                 = 246, [],       [Id, Id, LoopControl];
  SelectionMerge            = 247, [],       [Id, SelectionControl];
  Label                     = 248, [],       [ResultId];
  Branch                    = 249, [],       [Id];
  BranchConditional         = 250, [],       [Id, Id, Id, VariableLiteralInteger];
  Switch                    = 251, [],       [Id, Id, VariableLiteralId];
  Kill                      = 252, [Shader], [];
  Return                    = 253, [],       [];
  ReturnValue               = 254, [],       [Id];
  Unreachable               = 255, [],       [];
  LifetimeStart             = 256, [Kernel], [Id, LiteralInteger];
  LifetimeStop              = 257, [Kernel], [Id, LiteralInteger];
  // endregion

  // region Group operations
  GroupAsyncCopy            = 259, [Kernel], [TypeId, ResultId, ScopeId, Id, Id, Id, Id, Id];
  GroupWaitEvents           = 260, [Kernel], [ScopeId, Id, Id];
  GroupAll                  = 261, [Groups], [TypeId, ResultId, ScopeId, Id];
  GroupAny                  = 262, [Groups], [TypeId, ResultId, ScopeId, Id];
  GroupBroadcast            = 263, [Groups], [TypeId, ResultId, ScopeId, Id, Id];
  GroupIAdd                 = 264, [Groups], [TypeId, ResultId, ScopeId, GroupOperation, Id];
  GroupFAdd                 = 265, [Groups], [TypeId, ResultId, ScopeId, GroupOperation, Id];
  GroupFMin                 = 266, [Groups], [TypeId, ResultId, ScopeId, GroupOperation, Id];
  GroupUMin                 = 267, [Groups], [TypeId, ResultId, ScopeId, GroupOperation, Id];
  GroupSMin                 = 268, [Groups], [TypeId, ResultId, ScopeId, GroupOperation, Id];
  GroupFMax                 = 269, [Groups], [TypeId, ResultId, ScopeId, GroupOperation, Id];
  GroupUMax                 = 270, [Groups], [TypeId, ResultId, ScopeId, GroupOperation, Id];
  GroupSMax                 = 271, [Groups], [TypeId, ResultId, ScopeId, GroupOperation, Id];
  // endregion

  // region Pipes
  ReadPipe                     = 274, [Pipes], [TypeId, ResultId, Id, Id, Id, Id];
  WritePipe                    = 275, [Pipes], [TypeId, ResultId, Id, Id, Id, Id];
  ReservedReadPipe             = 276, [Pipes], [TypeId, ResultId, Id, Id, Id, Id, Id, Id];
  ReservedWritePipe            = 277, [Pipes], [TypeId, ResultId, Id, Id, Id, Id, Id, Id];
  ReserveReadPipePackets       = 278, [Pipes], [TypeId, ResultId, Id, Id, Id, Id];
  ReserveWritePipePackets      = 279, [Pipes], [TypeId, ResultId, Id, Id, Id, Id];
  CommitReadPipe               = 280, [Pipes], [Id, Id, Id, Id];
  CommitWritePipe              = 281, [Pipes], [Id, Id, Id, Id];
  IsValidReserveId             = 282, [Pipes], [TypeId, ResultId, Id];
  GetNumPipePackets            = 283, [Pipes], [TypeId, ResultId, Id, Id, Id];
  GetMaxPipePackets            = 284, [Pipes], [TypeId, ResultId, Id, Id, Id];
  GroupReserveReadPipePackets  = 285, [Pipes], [TypeId, ResultId, ScopeId, Id, Id, Id, Id];
  GroupReserveWritePipePackets = 286, [Pipes], [TypeId, ResultId, ScopeId, Id, Id, Id, Id];
  GroupCommitReadPipe          = 287, [Pipes], [ScopeId, Id, Id, Id, Id];
  GroupCommitWritePipe         = 288, [Pipes], [ScopeId, Id, Id, Id, Id];
  // endregion

  // region Device-side enqueue
  EnqueueMarker                           = 291, [DeviceEnqueue], [TypeId, ResultId, Id, Id, Id, Id];
  EnqueueKernel                           = 292, [DeviceEnqueue], [TypeId, ResultId, Id, Id, Id, Id, Id, Id, Id, Id, Id, Id, VariableId];
  GetKernelNDrangeSubGroupCount           = 293, [DeviceEnqueue], [TypeId, ResultId, Id, Id, Id, Id, Id];
  GetKernelNDrangeMaxSubGroupSize         = 294, [DeviceEnqueue], [TypeId, ResultId, Id, Id, Id, Id, Id];
  GetKernelWorkGroupSize                  = 295, [DeviceEnqueue], [TypeId, ResultId, Id, Id, Id, Id];
  GetKernelPreferredWorkGroupSizeMultiple = 296, [DeviceEnqueue], [TypeId, ResultId, Id, Id, Id, Id];
  RetainEvent                             = 297, [DeviceEnqueue], [Id];
  ReleaseEvent                            = 298, [DeviceEnqueue], [Id];
  CreateUserEvent                         = 299, [DeviceEnqueue], [TypeId, ResultId];
  IsValidEvent                            = 300, [DeviceEnqueue], [TypeId, ResultId, Id];
  SetUserEventStatus                      = 301, [DeviceEnqueue], [Id, Id];
  CaptureEventProfilingInfo               = 302, [DeviceEnqueue], [Id, Id, Id];
  GetDefaultQueue                         = 303, [DeviceEnqueue], [TypeId, ResultId];
  BuildNDRange                            = 304, [DeviceEnqueue], [TypeId, ResultId, Id, Id, Id];
  // endregion

  // region Sparse images
  ImageSparseSampleImplicitLod         = 305, [SparseResidency], [TypeId, ResultId, Id, Id, OptionalImageOperands];
  ImageSparseSampleExplicitLod         = 306, [SparseResidency], [TypeId, ResultId, Id, Id, ImageOperands];
  ImageSparseSampleDrefImplicitLod     = 307, [SparseResidency], [TypeId, ResultId, Id, Id, Id, OptionalImageOperands];
  ImageSparseSampleDrefExplicitLod     = 308, [SparseResidency], [TypeId, ResultId, Id, Id, Id, ImageOperands];
  ImageSparseSampleProjImplicitLod     = 309, [SparseResidency], [TypeId, ResultId, Id, Id, OptionalImageOperands];
  ImageSparseSampleProjExplicitLod     = 310, [SparseResidency], [TypeId, ResultId, Id, Id, ImageOperands];
  ImageSparseSampleProjDrefImplicitLod = 311, [SparseResidency], [TypeId, ResultId, Id, Id, Id, OptionalImageOperands];
  ImageSparseSampleProjDrefExplicitLod = 312, [SparseResidency], [TypeId, ResultId, Id, Id, Id, ImageOperands];
  ImageSparseFetch                     = 313, [SparseResidency], [TypeId, ResultId, Id, Id, OptionalImageOperands];
  ImageSparseGather                    = 314, [SparseResidency], [TypeId, ResultId, Id, Id, Id, OptionalImageOperands];
  ImageSparseDrefGather                = 315, [SparseResidency], [TypeId, ResultId, Id, Id, Id, OptionalImageOperands];
  ImageSparseTexelsResident            = 316, [SparseResidency], [TypeId, ResultId, Id];
  NoLine                               = 317, [],                [];
  AtomicFlagTestAndSet                 = 318, [Kernel],          [TypeId, ResultId, Id, ScopeId, MemorySemanticsId];
  AtomicFlagClear                      = 319, [Kernel],          [Id, ScopeId, MemorySemanticsId];
  ImageSparseRead                      = 320, [SparseResidency], [TypeId, ResultId, Id, Id, OptionalImageOperands];
  // endregion
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;
  use strum::IntoEnumIterator;

  #[test]
  fn table_is_sorted_and_complete() {
    assert_eq!(OPCODE_TABLE.len(), Op::iter().count());
    for pair in OPCODE_TABLE.windows(2) {
      assert!(pair[0].opcode.value() < pair[1].opcode.value());
    }
    for (entry, op) in OPCODE_TABLE.iter().zip(Op::iter()) {
      assert_eq!(entry.opcode, op);
      assert_eq!(entry.name, op.name());
    }
  }

  #[test]
  fn result_and_type_flags_follow_operands() {
    let constant = OPCODE_TABLE.iter().find(|e| e.opcode == Op::Constant).unwrap();
    assert!(constant.has_result);
    assert!(constant.has_type);
    assert_eq!(constant.word_count(), 4);

    let label = OPCODE_TABLE.iter().find(|e| e.opcode == Op::Label).unwrap();
    assert!(label.has_result);
    assert!(!label.has_type);

    let store = OPCODE_TABLE.iter().find(|e| e.opcode == Op::Store).unwrap();
    assert!(!store.has_result);
    assert!(store.has_variable_tail());
    assert_eq!(store.word_count(), 3);
  }

  #[test]
  fn type_always_precedes_result() {
    for entry in OPCODE_TABLE.iter().filter(|entry| entry.has_type) {
      assert_eq!(entry.operands[0], OperandType::TypeId, "{}", entry.opcode);
      assert_eq!(entry.operands[1], OperandType::ResultId, "{}", entry.opcode);
    }
  }

  #[test]
  fn names_and_values_convert() {
    assert_eq!(Op::from_str("TypeInt").unwrap(), Op::TypeInt);
    assert!(Op::from_str("OpTypeInt").is_err());
    assert_eq!(Op::try_from(21u16).unwrap(), Op::TypeInt);
    assert!(Op::try_from(9u16).is_err());
    assert_eq!(Op::ImageSparseRead.to_string(), "OpImageSparseRead");
    let matrix = OPCODE_TABLE.iter().find(|e| e.opcode == Op::TypeMatrix).unwrap();
    assert!(matrix.requires_capability());
    assert!(matrix.capabilities.contains(Capability::Matrix));
  }
}
