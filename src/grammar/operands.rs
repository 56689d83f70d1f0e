/*!
  Operand tables: for each enumerant or mask category, the named values it admits, the
  capabilities each value depends on, and the operands that must follow a value when it is
  chosen. Choosing `LocalSize` for an execution mode, for example, adds three literal numbers.

  Rows are kept in declaration order. Several rows may share a value (`Relaxed` and `None` in
  memory semantics); lookup by value returns the first such row, which is the canonical name used
  for disassembly.
*/

use super::capability::{Capability, CapabilityMask};
use super::{LookupError, OperandType};

/// One named value of an operand category.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct OperandDesc {
  pub name         : &'static str,
  pub value        : u32,
  pub capabilities : CapabilityMask,
  /// Operands that follow this value when it is chosen.
  pub operands     : &'static [OperandType],
}

macro_rules! operand_table {
  (
    $(#[$meta:meta])*
    $table:ident {
      $( $name:literal = $value:literal, [$($cap:ident),*], [$($operand:ident),*]; )*
    }
  ) => {
    $(#[$meta])*
    pub static $table: &[OperandDesc] = &[
      $(
        OperandDesc {
          name         : $name,
          value        : $value,
          capabilities : CapabilityMask::of(&[$(Capability::$cap),*]),
          operands     : &[$(OperandType::$operand),*],
        },
      )*
    ];
  };
}

// region Enumerant tables

operand_table!(SOURCE_LANGUAGE {
  "Unknown"    = 0, [], [];
  "ESSL"       = 1, [], [];
  "GLSL"       = 2, [], [];
  "OpenCL_C"   = 3, [], [];
  "OpenCL_CPP" = 4, [], [];
});

operand_table!(EXECUTION_MODEL {
  "Vertex"                 = 0, [Shader],       [];
  "TessellationControl"    = 1, [Tessellation], [];
  "TessellationEvaluation" = 2, [Tessellation], [];
  "Geometry"               = 3, [Geometry],     [];
  "Fragment"               = 4, [Shader],       [];
  "GLCompute"              = 5, [Shader],       [];
  "Kernel"                 = 6, [Kernel],       [];
});

operand_table!(ADDRESSING_MODEL {
  "Logical"    = 0, [],          [];
  "Physical32" = 1, [Addresses], [];
  "Physical64" = 2, [Addresses], [];
});

operand_table!(MEMORY_MODEL {
  "Simple"  = 0, [Shader], [];
  "GLSL450" = 1, [Shader], [];
  "OpenCL"  = 2, [Kernel], [];
});

operand_table!(EXECUTION_MODE {
  "Invocations"             = 0,  [Geometry],               [LiteralInteger];
  "SpacingEqual"            = 1,  [Tessellation],           [];
  "SpacingFractionalEven"   = 2,  [Tessellation],           [];
  "SpacingFractionalOdd"    = 3,  [Tessellation],           [];
  "VertexOrderCw"           = 4,  [Tessellation],           [];
  "VertexOrderCcw"          = 5,  [Tessellation],           [];
  "PixelCenterInteger"      = 6,  [Shader],                 [];
  "OriginUpperLeft"         = 7,  [Shader],                 [];
  "OriginLowerLeft"         = 8,  [Shader],                 [];
  "EarlyFragmentTests"      = 9,  [Shader],                 [];
  "PointMode"               = 10, [Tessellation],           [];
  "Xfb"                     = 11, [TransformFeedback],      [];
  "DepthReplacing"          = 12, [Shader],                 [];
  "DepthGreater"            = 14, [Shader],                 [];
  "DepthLess"               = 15, [Shader],                 [];
  "DepthUnchanged"          = 16, [Shader],                 [];
  "LocalSize"               = 17, [],                       [LiteralInteger, LiteralInteger, LiteralInteger];
  "LocalSizeHint"           = 18, [Kernel],                 [LiteralInteger, LiteralInteger, LiteralInteger];
  "InputPoints"             = 19, [Geometry],               [];
  "InputLines"              = 20, [Geometry],               [];
  "InputLinesAdjacency"     = 21, [Geometry],               [];
  "Triangles"               = 22, [Geometry, Tessellation], [];
  "InputTrianglesAdjacency" = 23, [Geometry],               [];
  "Quads"                   = 24, [Tessellation],           [];
  "Isolines"                = 25, [Tessellation],           [];
  "OutputVertices"          = 26, [Geometry, Tessellation], [LiteralInteger];
  "OutputPoints"            = 27, [Geometry],               [];
  "OutputLineStrip"         = 28, [Geometry],               [];
  "OutputTriangleStrip"     = 29, [Geometry],               [];
  "VecTypeHint"             = 30, [Kernel],                 [LiteralInteger];
  "ContractionOff"          = 31, [Kernel],                 [];
});

operand_table!(STORAGE_CLASS {
  "UniformConstant" = 0,  [],               [];
  "Input"           = 1,  [],               [];
  "Uniform"         = 2,  [Shader],         [];
  "Output"          = 3,  [Shader],         [];
  "Workgroup"       = 4,  [],               [];
  "CrossWorkgroup"  = 5,  [],               [];
  "Private"         = 6,  [Shader],         [];
  "Function"        = 7,  [],               [];
  "Generic"         = 8,  [GenericPointer], [];
  "PushConstant"    = 9,  [Shader],         [];
  "AtomicCounter"   = 10, [AtomicStorage],  [];
  "Image"           = 11, [],               [];
});

operand_table!(DIMENSIONALITY {
  "1D"          = 0, [Sampled1D],       [];
  "2D"          = 1, [],                [];
  "3D"          = 2, [],                [];
  "Cube"        = 3, [Shader],          [];
  "Rect"        = 4, [SampledRect],     [];
  "Buffer"      = 5, [SampledBuffer],   [];
  "SubpassData" = 6, [InputAttachment], [];
});

operand_table!(SAMPLER_ADDRESSING_MODE {
  "None"           = 0, [Kernel], [];
  "ClampToEdge"    = 1, [Kernel], [];
  "Clamp"          = 2, [Kernel], [];
  "Repeat"         = 3, [Kernel], [];
  "RepeatMirrored" = 4, [Kernel], [];
});

operand_table!(SAMPLER_FILTER_MODE {
  "Nearest" = 0, [Kernel], [];
  "Linear"  = 1, [Kernel], [];
});

operand_table!(IMAGE_FORMAT {
  "Unknown"      = 0,  [],                            [];
  "Rgba32f"      = 1,  [Shader],                      [];
  "Rgba16f"      = 2,  [Shader],                      [];
  "R32f"         = 3,  [Shader],                      [];
  "Rgba8"        = 4,  [Shader],                      [];
  "Rgba8Snorm"   = 5,  [Shader],                      [];
  "Rg32f"        = 6,  [StorageImageExtendedFormats], [];
  "Rg16f"        = 7,  [StorageImageExtendedFormats], [];
  "R11fG11fB10f" = 8,  [StorageImageExtendedFormats], [];
  "R16f"         = 9,  [StorageImageExtendedFormats], [];
  "Rgba16"       = 10, [StorageImageExtendedFormats], [];
  "Rgb10A2"      = 11, [StorageImageExtendedFormats], [];
  "Rg16"         = 12, [StorageImageExtendedFormats], [];
  "Rg8"          = 13, [StorageImageExtendedFormats], [];
  "R16"          = 14, [StorageImageExtendedFormats], [];
  "R8"           = 15, [StorageImageExtendedFormats], [];
  "Rgba16Snorm"  = 16, [StorageImageExtendedFormats], [];
  "Rg16Snorm"    = 17, [StorageImageExtendedFormats], [];
  "Rg8Snorm"     = 18, [StorageImageExtendedFormats], [];
  "R16Snorm"     = 19, [StorageImageExtendedFormats], [];
  "R8Snorm"      = 20, [StorageImageExtendedFormats], [];
  "Rgba32i"      = 21, [Shader],                      [];
  "Rgba16i"      = 22, [Shader],                      [];
  "Rgba8i"       = 23, [Shader],                      [];
  "R32i"         = 24, [Shader],                      [];
  "Rg32i"        = 25, [StorageImageExtendedFormats], [];
  "Rg16i"        = 26, [StorageImageExtendedFormats], [];
  "Rg8i"         = 27, [StorageImageExtendedFormats], [];
  "R16i"         = 28, [StorageImageExtendedFormats], [];
  "R8i"          = 29, [StorageImageExtendedFormats], [];
  "Rgba32ui"     = 30, [Shader],                      [];
  "Rgba16ui"     = 31, [Shader],                      [];
  "Rgba8ui"      = 32, [Shader],                      [];
  "R32ui"        = 33, [Shader],                      [];
  "Rgb10a2ui"    = 34, [StorageImageExtendedFormats], [];
  "Rg32ui"       = 35, [StorageImageExtendedFormats], [];
  "Rg16ui"       = 36, [StorageImageExtendedFormats], [];
  "Rg8ui"        = 37, [StorageImageExtendedFormats], [];
  "R16ui"        = 38, [StorageImageExtendedFormats], [];
  "R8ui"         = 39, [StorageImageExtendedFormats], [];
});

operand_table!(IMAGE_CHANNEL_ORDER {
  "R"            = 0,  [Kernel], [];
  "A"            = 1,  [Kernel], [];
  "RG"           = 2,  [Kernel], [];
  "RA"           = 3,  [Kernel], [];
  "RGB"          = 4,  [Kernel], [];
  "RGBA"         = 5,  [Kernel], [];
  "BGRA"         = 6,  [Kernel], [];
  "ARGB"         = 7,  [Kernel], [];
  "Intensity"    = 8,  [Kernel], [];
  "Luminance"    = 9,  [Kernel], [];
  "Rx"           = 10, [Kernel], [];
  "RGx"          = 11, [Kernel], [];
  "RGBx"         = 12, [Kernel], [];
  "Depth"        = 13, [Kernel], [];
  "DepthStencil" = 14, [Kernel], [];
  "sRGB"         = 15, [Kernel], [];
  "sRGBx"        = 16, [Kernel], [];
  "sRGBA"        = 17, [Kernel], [];
  "sBGRA"        = 18, [Kernel], [];
  "ABGR"         = 19, [Kernel], [];
});

operand_table!(IMAGE_CHANNEL_DATA_TYPE {
  "SnormInt8"         = 0,  [Kernel], [];
  "SnormInt16"        = 1,  [Kernel], [];
  "UnormInt8"         = 2,  [Kernel], [];
  "UnormInt16"        = 3,  [Kernel], [];
  "UnormShort565"     = 4,  [Kernel], [];
  "UnormShort555"     = 5,  [Kernel], [];
  "UnormInt101010"    = 6,  [Kernel], [];
  "SignedInt8"        = 7,  [Kernel], [];
  "SignedInt16"       = 8,  [Kernel], [];
  "SignedInt32"       = 9,  [Kernel], [];
  "UnsignedInt8"      = 10, [Kernel], [];
  "UnsignedInt16"     = 11, [Kernel], [];
  "UnsignedInt32"     = 12, [Kernel], [];
  "HalfFloat"         = 13, [Kernel], [];
  "Float"             = 14, [Kernel], [];
  "UnormInt24"        = 15, [Kernel], [];
  "UnormInt101010_2"  = 16, [Kernel], [];
});

operand_table!(FP_ROUNDING_MODE {
  "RTE" = 0, [], [];
  "RTZ" = 1, [], [];
  "RTP" = 2, [], [];
  "RTN" = 3, [], [];
});

operand_table!(LINKAGE_TYPE {
  "Export" = 0, [Linkage], [];
  "Import" = 1, [Linkage], [];
});

operand_table!(ACCESS_QUALIFIER {
  "ReadOnly"  = 0, [Kernel], [];
  "WriteOnly" = 1, [Kernel], [];
  "ReadWrite" = 2, [Kernel], [];
});

operand_table!(FUNCTION_PARAMETER_ATTRIBUTE {
  "Zext"        = 0, [Kernel], [];
  "Sext"        = 1, [Kernel], [];
  "ByVal"       = 2, [Kernel], [];
  "Sret"        = 3, [Kernel], [];
  "NoAlias"     = 4, [Kernel], [];
  "NoCapture"   = 5, [Kernel], [];
  "NoWrite"     = 6, [Kernel], [];
  "NoReadWrite" = 7, [Kernel], [];
});

operand_table!(DECORATION {
  "RelaxedPrecision"     = 0,  [Shader],            [];
  "SpecId"               = 1,  [Shader],            [LiteralInteger];
  "Block"                = 2,  [Shader],            [];
  "BufferBlock"          = 3,  [Shader],            [];
  "RowMajor"             = 4,  [Matrix],            [];
  "ColMajor"             = 5,  [Matrix],            [];
  "ArrayStride"          = 6,  [Shader],            [LiteralInteger];
  "MatrixStride"         = 7,  [Matrix],            [LiteralInteger];
  "GLSLShared"           = 8,  [Shader],            [];
  "GLSLPacked"           = 9,  [Shader],            [];
  "CPacked"              = 10, [Kernel],            [];
  "BuiltIn"              = 11, [],                  [BuiltIn];
  "NoPerspective"        = 13, [Shader],            [];
  "Flat"                 = 14, [Shader],            [];
  "Patch"                = 15, [Tessellation],      [];
  "Centroid"             = 16, [Shader],            [];
  "Sample"               = 17, [SampleRateShading], [];
  "Invariant"            = 18, [Shader],            [];
  "Restrict"             = 19, [],                  [];
  "Aliased"              = 20, [],                  [];
  "Volatile"             = 21, [],                  [];
  "Constant"             = 22, [Kernel],            [];
  "Coherent"             = 23, [],                  [];
  "NonWritable"          = 24, [],                  [];
  "NonReadable"          = 25, [],                  [];
  "Uniform"              = 26, [Shader],            [];
  "SaturatedConversion"  = 28, [Kernel],            [];
  "Stream"               = 29, [GeometryStreams],   [LiteralInteger];
  "Location"             = 30, [Shader],            [LiteralInteger];
  "Component"            = 31, [Shader],            [LiteralInteger];
  "Index"                = 32, [Shader],            [LiteralInteger];
  "Binding"              = 33, [Shader],            [LiteralInteger];
  "DescriptorSet"        = 34, [Shader],            [LiteralInteger];
  "Offset"               = 35, [Shader],            [LiteralInteger];
  "XfbBuffer"            = 36, [TransformFeedback], [LiteralInteger];
  "XfbStride"            = 37, [TransformFeedback], [LiteralInteger];
  "FuncParamAttr"        = 38, [Kernel],            [FunctionParameterAttribute];
  "FPRoundingMode"       = 39, [Kernel],            [FpRoundingMode];
  "FPFastMathMode"       = 40, [Kernel],            [FpFastMathMode];
  "LinkageAttributes"    = 41, [Linkage],           [LiteralString, LinkageType];
  "NoContraction"        = 42, [Shader],            [];
  "InputAttachmentIndex" = 43, [InputAttachment],   [LiteralInteger];
  "Alignment"            = 44, [Kernel],            [LiteralInteger];
});

operand_table!(BUILT_IN {
  "Position"                  = 0,  [Shader],                 [];
  "PointSize"                 = 1,  [Shader],                 [];
  "ClipDistance"              = 3,  [ClipDistance],           [];
  "CullDistance"              = 4,  [CullDistance],           [];
  "VertexId"                  = 5,  [Shader],                 [];
  "InstanceId"                = 6,  [Shader],                 [];
  "PrimitiveId"               = 7,  [Geometry, Tessellation], [];
  "InvocationId"              = 8,  [Geometry, Tessellation], [];
  "Layer"                     = 9,  [Geometry],               [];
  "ViewportIndex"             = 10, [MultiViewport],          [];
  "TessLevelOuter"            = 11, [Tessellation],           [];
  "TessLevelInner"            = 12, [Tessellation],           [];
  "TessCoord"                 = 13, [Tessellation],           [];
  "PatchVertices"             = 14, [Tessellation],           [];
  "FragCoord"                 = 15, [Shader],                 [];
  "PointCoord"                = 16, [Shader],                 [];
  "FrontFacing"               = 17, [Shader],                 [];
  "SampleId"                  = 18, [SampleRateShading],      [];
  "SamplePosition"            = 19, [SampleRateShading],      [];
  "SampleMask"                = 20, [Shader],                 [];
  "FragDepth"                 = 22, [Shader],                 [];
  "HelperInvocation"          = 23, [Shader],                 [];
  "NumWorkgroups"             = 24, [],                       [];
  "WorkgroupSize"             = 25, [],                       [];
  "WorkgroupId"               = 26, [],                       [];
  "LocalInvocationId"         = 27, [],                       [];
  "GlobalInvocationId"        = 28, [],                       [];
  "LocalInvocationIndex"      = 29, [],                       [];
  "WorkDim"                   = 30, [Kernel],                 [];
  "GlobalSize"                = 31, [Kernel],                 [];
  "EnqueuedWorkgroupSize"     = 32, [Kernel],                 [];
  "GlobalOffset"              = 33, [Kernel],                 [];
  "GlobalLinearId"            = 34, [Kernel],                 [];
  "SubgroupSize"              = 36, [Kernel],                 [];
  "SubgroupMaxSize"           = 37, [Kernel],                 [];
  "NumSubgroups"              = 38, [Kernel],                 [];
  "NumEnqueuedSubgroups"      = 39, [Kernel],                 [];
  "SubgroupId"                = 40, [Kernel],                 [];
  "SubgroupLocalInvocationId" = 41, [Kernel],                 [];
  "VertexIndex"               = 42, [Shader],                 [];
  "InstanceIndex"             = 43, [Shader],                 [];
});

operand_table!(GROUP_OPERATION {
  "Reduce"        = 0, [Kernel], [];
  "InclusiveScan" = 1, [Kernel], [];
  "ExclusiveScan" = 2, [Kernel], [];
});

operand_table!(KERNEL_ENQUEUE_FLAGS {
  "NoWait"        = 0, [Kernel], [];
  "WaitKernel"    = 1, [Kernel], [];
  "WaitWorkGroup" = 2, [Kernel], [];
});

operand_table!(KERNEL_PROFILING_INFO {
  "None"        = 0, [],       [];
  "CmdExecTime" = 1, [Kernel], [];
});

operand_table!(CAPABILITY {
  "Matrix"                            = 0,  [],                 [];
  "Shader"                            = 1,  [Matrix],           [];
  "Geometry"                          = 2,  [Shader],           [];
  "Tessellation"                      = 3,  [Shader],           [];
  "Addresses"                         = 4,  [],                 [];
  "Linkage"                           = 5,  [],                 [];
  "Kernel"                            = 6,  [],                 [];
  "Vector16"                          = 7,  [Kernel],           [];
  "Float16Buffer"                     = 8,  [Kernel],           [];
  "Float16"                           = 9,  [],                 [];
  "Float64"                           = 10, [],                 [];
  "Int64"                             = 11, [],                 [];
  "Int64Atomics"                      = 12, [Int64],            [];
  "ImageBasic"                        = 13, [Kernel],           [];
  "ImageReadWrite"                    = 14, [ImageBasic],       [];
  "ImageMipmap"                       = 15, [ImageBasic],       [];
  "Pipes"                             = 17, [Kernel],           [];
  "Groups"                            = 18, [],                 [];
  "DeviceEnqueue"                     = 19, [Kernel],           [];
  "LiteralSampler"                    = 20, [Kernel],           [];
  "AtomicStorage"                     = 21, [Shader],           [];
  "Int16"                             = 22, [],                 [];
  "TessellationPointSize"             = 23, [Tessellation],     [];
  "GeometryPointSize"                 = 24, [Geometry],         [];
  "ImageGatherExtended"               = 25, [Shader],           [];
  "StorageImageMultisample"           = 27, [Shader],           [];
  "UniformBufferArrayDynamicIndexing" = 28, [Shader],           [];
  "SampledImageArrayDynamicIndexing"  = 29, [Shader],           [];
  "StorageBufferArrayDynamicIndexing" = 30, [Shader],           [];
  "StorageImageArrayDynamicIndexing"  = 31, [Shader],           [];
  "ClipDistance"                      = 32, [Shader],           [];
  "CullDistance"                      = 33, [Shader],           [];
  "ImageCubeArray"                    = 34, [SampledCubeArray], [];
  "SampleRateShading"                 = 35, [Shader],           [];
  "ImageRect"                         = 36, [SampledRect],      [];
  "SampledRect"                       = 37, [Shader],           [];
  "GenericPointer"                    = 38, [Addresses],        [];
  "Int8"                              = 39, [Kernel],           [];
  "InputAttachment"                   = 40, [Shader],           [];
  "SparseResidency"                   = 41, [Shader],           [];
  "MinLod"                            = 42, [Shader],           [];
  "Sampled1D"                         = 43, [Shader],           [];
  "Image1D"                           = 44, [Sampled1D],        [];
  "SampledCubeArray"                  = 45, [Shader],           [];
  "SampledBuffer"                     = 46, [Shader],           [];
  "ImageBuffer"                       = 47, [SampledBuffer],    [];
  "ImageMSArray"                      = 48, [Shader],           [];
  "StorageImageExtendedFormats"       = 49, [Shader],           [];
  "ImageQuery"                        = 50, [Shader],           [];
  "DerivativeControl"                 = 51, [Shader],           [];
  "InterpolationFunction"             = 52, [Shader],           [];
  "TransformFeedback"                 = 53, [Shader],           [];
  "GeometryStreams"                   = 54, [Geometry],         [];
  "StorageImageReadWithoutFormat"     = 55, [Shader],           [];
  "StorageImageWriteWithoutFormat"    = 56, [Shader],           [];
  "MultiViewport"                     = 57, [Geometry],         [];
});

// endregion

// region Mask tables

operand_table!(IMAGE_OPERANDS {
  "None"         = 0x00, [],                    [];
  "Bias"         = 0x01, [Shader],              [Id];
  "Lod"          = 0x02, [],                    [Id];
  "Grad"         = 0x04, [],                    [Id, Id];
  "ConstOffset"  = 0x08, [],                    [Id];
  "Offset"       = 0x10, [ImageGatherExtended], [Id];
  "ConstOffsets" = 0x20, [],                    [Id];
  "Sample"       = 0x40, [],                    [Id];
  "MinLod"       = 0x80, [MinLod],              [Id];
});

operand_table!(FP_FAST_MATH_MODE {
  "None"       = 0x00, [],       [];
  "NotNaN"     = 0x01, [Kernel], [];
  "NotInf"     = 0x02, [Kernel], [];
  "NSZ"        = 0x04, [Kernel], [];
  "AllowRecip" = 0x08, [Kernel], [];
  "Fast"       = 0x10, [Kernel], [];
});

operand_table!(SELECTION_CONTROL {
  "None"        = 0, [], [];
  "Flatten"     = 1, [], [];
  "DontFlatten" = 2, [], [];
});

operand_table!(LOOP_CONTROL {
  "None"       = 0, [], [];
  "Unroll"     = 1, [], [];
  "DontUnroll" = 2, [], [];
});

operand_table!(FUNCTION_CONTROL {
  "None"       = 0, [], [];
  "Inline"     = 1, [], [];
  "DontInline" = 2, [], [];
  "Pure"       = 4, [], [];
  "Const"      = 8, [], [];
});

operand_table!(MEMORY_ACCESS {
  "None"        = 0, [], [];
  "Volatile"    = 1, [], [];
  "Aligned"     = 2, [], [LiteralInteger];
  "Nontemporal" = 4, [], [];
});

operand_table!(
  /// `Relaxed` is listed before its synonym `None`, so disassembly prints `Relaxed`.
  MEMORY_SEMANTICS {
    "Relaxed"                = 0x000, [],              [];
    "None"                   = 0x000, [],              [];
    "Acquire"                = 0x002, [],              [];
    "Release"                = 0x004, [],              [];
    "AcquireRelease"         = 0x008, [],              [];
    "SequentiallyConsistent" = 0x010, [],              [];
    "UniformMemory"          = 0x040, [Shader],        [];
    "SubgroupMemory"         = 0x080, [],              [];
    "WorkgroupMemory"        = 0x100, [],              [];
    "CrossWorkgroupMemory"   = 0x200, [],              [];
    "AtomicCounterMemory"    = 0x400, [AtomicStorage], [];
    "ImageMemory"            = 0x800, [],              [];
  }
);

// endregion

/// The table for an enumerant or mask category. Optional types share their base type's table.
pub fn operand_table(kind: OperandType) -> Option<&'static [OperandDesc]> {
  use OperandType::*;
  let table = match kind.base() {
    SourceLanguage             => SOURCE_LANGUAGE,
    ExecutionModel             => EXECUTION_MODEL,
    AddressingModel            => ADDRESSING_MODEL,
    MemoryModel                => MEMORY_MODEL,
    ExecutionMode              => EXECUTION_MODE,
    StorageClass               => STORAGE_CLASS,
    Dimensionality             => DIMENSIONALITY,
    SamplerAddressingMode      => SAMPLER_ADDRESSING_MODE,
    SamplerFilterMode          => SAMPLER_FILTER_MODE,
    SamplerImageFormat         => IMAGE_FORMAT,
    ImageChannelOrder          => IMAGE_CHANNEL_ORDER,
    ImageChannelDataType       => IMAGE_CHANNEL_DATA_TYPE,
    FpRoundingMode             => FP_ROUNDING_MODE,
    LinkageType                => LINKAGE_TYPE,
    AccessQualifier            => ACCESS_QUALIFIER,
    FunctionParameterAttribute => FUNCTION_PARAMETER_ATTRIBUTE,
    Decoration                 => DECORATION,
    BuiltIn                    => BUILT_IN,
    GroupOperation             => GROUP_OPERATION,
    KernelEnqueueFlags         => KERNEL_ENQUEUE_FLAGS,
    KernelProfilingInfo        => KERNEL_PROFILING_INFO,
    Capability                 => CAPABILITY,
    ImageOperands              => IMAGE_OPERANDS,
    FpFastMathMode             => FP_FAST_MATH_MODE,
    SelectionControl           => SELECTION_CONTROL,
    LoopControl                => LOOP_CONTROL,
    FunctionControl            => FUNCTION_CONTROL,
    MemoryAccess               => MEMORY_ACCESS,
    MemorySemantics            => MEMORY_SEMANTICS,
    _                          => return Option::None,
  };
  Some(table)
}

/// Finds the row of `kind`'s table with exactly the given name. Case sensitive.
pub fn lookup_operand_by_name(kind: OperandType, name: &str)
  -> Result<&'static OperandDesc, LookupError>
{
  let table = operand_table(kind).ok_or(LookupError::NoTable(kind))?;
  table
    .iter()
    .find(|entry| entry.name == name)
    .ok_or(LookupError::NotFound)
}

/// Finds the first row of `kind`'s table with the given value.
pub fn lookup_operand_by_value(kind: OperandType, value: u32)
  -> Result<&'static OperandDesc, LookupError>
{
  let table = operand_table(kind).ok_or(LookupError::NoTable(kind))?;
  table
    .iter()
    .find(|entry| entry.value == value)
    .ok_or(LookupError::NotFound)
}

/**
  Parses a mask written as `|`-separated enumerant names, e.g. `NotNaN|NotInf`, ORing together
  the values of the named bits. Every name must belong to `kind`'s table.
*/
pub fn parse_mask_operand(kind: OperandType, text: &str) -> Result<u32, LookupError> {
  use nom::{
    bytes::complete::take_till1,
    character::complete::char as one_char,
    combinator::all_consuming,
    multi::separated_list1,
  };

  let names: nom::IResult<&str, Vec<&str>> =
    all_consuming(separated_list1(one_char('|'), take_till1(|c| c == '|')))(text);
  let (_, names) = names.map_err(|_| LookupError::NotFound)?;

  names
    .into_iter()
    .try_fold(0u32, |mask, name| Ok(mask | lookup_operand_by_name(kind, name)?.value))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn value_lookup_prefers_first_entry() {
    let entry = lookup_operand_by_value(OperandType::MemorySemantics, 0).unwrap();
    assert_eq!(entry.name, "Relaxed");
    let none = lookup_operand_by_name(OperandType::MemorySemantics, "None").unwrap();
    assert_eq!(none.value, 0);
    assert_eq!(none.name, "None");
  }

  #[test]
  fn enumerants_carry_trailing_operands() {
    let local_size = lookup_operand_by_name(OperandType::ExecutionMode, "LocalSize").unwrap();
    assert_eq!(local_size.value, 17);
    assert_eq!(local_size.operands, &[OperandType::LiteralInteger; 3]);
    let input = lookup_operand_by_name(OperandType::StorageClass, "Input").unwrap();
    assert!(input.operands.is_empty());
  }

  #[test]
  fn lookups_are_case_sensitive() {
    assert_eq!(
      lookup_operand_by_name(OperandType::StorageClass, "input"),
      Err(LookupError::NotFound)
    );
    assert_eq!(
      lookup_operand_by_name(OperandType::LiteralString, "Input"),
      Err(LookupError::NoTable(OperandType::LiteralString))
    );
  }

  #[test]
  fn optional_types_use_their_base_table() {
    let entry = lookup_operand_by_name(OperandType::OptionalImageOperands, "Grad").unwrap();
    assert_eq!(entry.value, 4);
    assert_eq!(entry.operands, &[OperandType::Id, OperandType::Id]);
  }

  #[test]
  fn masks_parse_from_bar_separated_names() {
    assert_eq!(parse_mask_operand(OperandType::FpFastMathMode, "NotNaN|NotInf|Fast"), Ok(0x13));
    assert_eq!(parse_mask_operand(OperandType::LoopControl, "None"), Ok(0));
    assert!(parse_mask_operand(OperandType::LoopControl, "Unroll|").is_err());
    assert!(parse_mask_operand(OperandType::LoopControl, "Unroll|Bogus").is_err());
    assert!(parse_mask_operand(OperandType::LoopControl, "").is_err());
  }

  #[test]
  fn tables_have_unique_names() {
    use strum::IntoEnumIterator;
    for kind in OperandType::iter().filter(|kind| kind.has_table()) {
      let table = operand_table(kind).unwrap();
      for (i, entry) in table.iter().enumerate() {
        assert!(
          table[..i].iter().all(|other| other.name != entry.name),
          "{} appears twice in the {} table", entry.name, kind
        );
      }
    }
  }
}
