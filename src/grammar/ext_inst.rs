/*!
  Extended instruction sets. An `OpExtInstImport` names a set by string; each `OpExtInst` then
  selects an instruction of that set by number. Two sets are known: `GLSL.std.450` and
  `OpenCL.std`.
*/

use std::fmt::{Display, Formatter};

use super::capability::{Capability, CapabilityMask};
use super::{LookupError, OperandType};

/// The instruction set an `OpExtInstImport` refers to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ExtInstType {
  #[default]
  None,
  GlslStd450,
  OpenClStd,
}

impl ExtInstType {
  /// The import string naming this set.
  pub fn import_name(self) -> &'static str {
    match self {
      ExtInstType::None       => "",
      ExtInstType::GlslStd450 => "GLSL.std.450",
      ExtInstType::OpenClStd  => "OpenCL.std",
    }
  }
}

impl Display for ExtInstType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ExtInstType::None => write!(f, "<none>"),
      other             => write!(f, "{}", other.import_name()),
    }
  }
}

/// One instruction of an extended instruction set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ExtInstDesc {
  pub name         : &'static str,
  pub value        : u32,
  pub capabilities : CapabilityMask,
  pub operands     : &'static [OperandType],
}

macro_rules! ext_inst_table {
  ( $table:ident { $( $name:ident = $value:literal, [$($cap:ident),*], [$($operand:ident),*]; )* } ) => {
    pub static $table: &[ExtInstDesc] = &[
      $(
        ExtInstDesc {
          name         : stringify!($name),
          value        : $value,
          capabilities : CapabilityMask::of(&[$(Capability::$cap),*]),
          operands     : &[$(OperandType::$operand),*],
        },
      )*
    ];
  };
}

ext_inst_table!(GLSL_STD_450 {
  Round                 = 1,  [],                      [Id];
  RoundEven             = 2,  [],                      [Id];
  Trunc                 = 3,  [],                      [Id];
  FAbs                  = 4,  [],                      [Id];
  SAbs                  = 5,  [],                      [Id];
  FSign                 = 6,  [],                      [Id];
  SSign                 = 7,  [],                      [Id];
  Floor                 = 8,  [],                      [Id];
  Ceil                  = 9,  [],                      [Id];
  Fract                 = 10, [],                      [Id];
  Radians               = 11, [],                      [Id];
  Degrees               = 12, [],                      [Id];
  Sin                   = 13, [],                      [Id];
  Cos                   = 14, [],                      [Id];
  Tan                   = 15, [],                      [Id];
  Asin                  = 16, [],                      [Id];
  Acos                  = 17, [],                      [Id];
  Atan                  = 18, [],                      [Id];
  Sinh                  = 19, [],                      [Id];
  Cosh                  = 20, [],                      [Id];
  Tanh                  = 21, [],                      [Id];
  Asinh                 = 22, [],                      [Id];
  Acosh                 = 23, [],                      [Id];
  Atanh                 = 24, [],                      [Id];
  Atan2                 = 25, [],                      [Id, Id];
  Pow                   = 26, [],                      [Id, Id];
  Exp                   = 27, [],                      [Id];
  Log                   = 28, [],                      [Id];
  Exp2                  = 29, [],                      [Id];
  Log2                  = 30, [],                      [Id];
  Sqrt                  = 31, [],                      [Id];
  InverseSqrt           = 32, [],                      [Id];
  Determinant           = 33, [],                      [Id];
  MatrixInverse         = 34, [],                      [Id];
  Modf                  = 35, [],                      [Id, Id];
  ModfStruct            = 36, [],                      [Id];
  FMin                  = 37, [],                      [Id, Id];
  UMin                  = 38, [],                      [Id, Id];
  SMin                  = 39, [],                      [Id, Id];
  FMax                  = 40, [],                      [Id, Id];
  UMax                  = 41, [],                      [Id, Id];
  SMax                  = 42, [],                      [Id, Id];
  FClamp                = 43, [],                      [Id, Id, Id];
  UClamp                = 44, [],                      [Id, Id, Id];
  SClamp                = 45, [],                      [Id, Id, Id];
  FMix                  = 46, [],                      [Id, Id, Id];
  IMix                  = 47, [],                      [Id, Id, Id];
  Step                  = 48, [],                      [Id, Id];
  SmoothStep            = 49, [],                      [Id, Id, Id];
  Fma                   = 50, [],                      [Id, Id, Id];
  Frexp                 = 51, [],                      [Id, Id];
  FrexpStruct           = 52, [],                      [Id];
  Ldexp                 = 53, [],                      [Id, Id];
  PackSnorm4x8          = 54, [],                      [Id];
  PackUnorm4x8          = 55, [],                      [Id];
  PackSnorm2x16         = 56, [],                      [Id];
  PackUnorm2x16         = 57, [],                      [Id];
  PackHalf2x16          = 58, [],                      [Id];
  PackDouble2x32        = 59, [Float64],               [Id];
  UnpackSnorm2x16       = 60, [],                      [Id];
  UnpackUnorm2x16       = 61, [],                      [Id];
  UnpackHalf2x16        = 62, [],                      [Id];
  UnpackSnorm4x8        = 63, [],                      [Id];
  UnpackUnorm4x8        = 64, [],                      [Id];
  UnpackDouble2x32      = 65, [Float64],               [Id];
  Length                = 66, [],                      [Id];
  Distance              = 67, [],                      [Id, Id];
  Cross                 = 68, [],                      [Id, Id];
  Normalize             = 69, [],                      [Id];
  FaceForward           = 70, [],                      [Id, Id, Id];
  Reflect               = 71, [],                      [Id, Id];
  Refract               = 72, [],                      [Id, Id, Id];
  FindILsb              = 73, [],                      [Id];
  FindSMsb              = 74, [],                      [Id];
  FindUMsb              = 75, [],                      [Id];
  InterpolateAtCentroid = 76, [InterpolationFunction], [Id];
  InterpolateAtSample   = 77, [InterpolationFunction], [Id, Id];
  InterpolateAtOffset   = 78, [InterpolationFunction], [Id, Id];
  NMin                  = 79, [],                      [Id, Id];
  NMax                  = 80, [],                      [Id, Id];
  NClamp                = 81, [],                      [Id, Id, Id];
});

ext_inst_table!(OPENCL_STD {
  // region Math
  acos             = 0,   [], [Id];
  acosh            = 1,   [], [Id];
  acospi           = 2,   [], [Id];
  asin             = 3,   [], [Id];
  asinh            = 4,   [], [Id];
  asinpi           = 5,   [], [Id];
  atan             = 6,   [], [Id];
  atan2            = 7,   [], [Id, Id];
  atanh            = 8,   [], [Id];
  atanpi           = 9,   [], [Id];
  atan2pi          = 10,  [], [Id, Id];
  cbrt             = 11,  [], [Id];
  ceil             = 12,  [], [Id];
  copysign         = 13,  [], [Id, Id];
  cos              = 14,  [], [Id];
  cosh             = 15,  [], [Id];
  cospi            = 16,  [], [Id];
  erfc             = 17,  [], [Id];
  erf              = 18,  [], [Id];
  exp              = 19,  [], [Id];
  exp2             = 20,  [], [Id];
  exp10            = 21,  [], [Id];
  expm1            = 22,  [], [Id];
  fabs             = 23,  [], [Id];
  fdim             = 24,  [], [Id, Id];
  floor            = 25,  [], [Id];
  fma              = 26,  [], [Id, Id, Id];
  fmax             = 27,  [], [Id, Id];
  fmin             = 28,  [], [Id, Id];
  fmod             = 29,  [], [Id, Id];
  fract            = 30,  [], [Id, Id];
  frexp            = 31,  [], [Id, Id];
  hypot            = 32,  [], [Id, Id];
  ilogb            = 33,  [], [Id];
  ldexp            = 34,  [], [Id, Id];
  lgamma           = 35,  [], [Id];
  lgamma_r         = 36,  [], [Id, Id];
  log              = 37,  [], [Id];
  log2             = 38,  [], [Id];
  log10            = 39,  [], [Id];
  log1p            = 40,  [], [Id];
  logb             = 41,  [], [Id];
  mad              = 42,  [], [Id, Id, Id];
  maxmag           = 43,  [], [Id, Id];
  minmag           = 44,  [], [Id, Id];
  modf             = 45,  [], [Id, Id];
  nan              = 46,  [], [Id];
  nextafter        = 47,  [], [Id, Id];
  pow              = 48,  [], [Id, Id];
  pown             = 49,  [], [Id, Id];
  powr             = 50,  [], [Id, Id];
  remainder        = 51,  [], [Id, Id];
  remquo           = 52,  [], [Id, Id, Id];
  rint             = 53,  [], [Id];
  rootn            = 54,  [], [Id, Id];
  round            = 55,  [], [Id];
  rsqrt            = 56,  [], [Id];
  sin              = 57,  [], [Id];
  sincos           = 58,  [], [Id, Id];
  sinh             = 59,  [], [Id];
  sinpi            = 60,  [], [Id];
  sqrt             = 61,  [], [Id];
  tan              = 62,  [], [Id];
  tanh             = 63,  [], [Id];
  tanpi            = 64,  [], [Id];
  tgamma           = 65,  [], [Id];
  trunc            = 66,  [], [Id];
  half_cos         = 67,  [], [Id];
  half_divide      = 68,  [], [Id, Id];
  half_exp         = 69,  [], [Id];
  half_exp2        = 70,  [], [Id];
  half_exp10       = 71,  [], [Id];
  half_log         = 72,  [], [Id];
  half_log2        = 73,  [], [Id];
  half_log10       = 74,  [], [Id];
  half_powr        = 75,  [], [Id, Id];
  half_recip       = 76,  [], [Id];
  half_rsqrt       = 77,  [], [Id];
  half_sin         = 78,  [], [Id];
  half_sqrt        = 79,  [], [Id];
  half_tan         = 80,  [], [Id];
  native_cos       = 81,  [], [Id];
  native_divide    = 82,  [], [Id, Id];
  native_exp       = 83,  [], [Id];
  native_exp2      = 84,  [], [Id];
  native_exp10     = 85,  [], [Id];
  native_log       = 86,  [], [Id];
  native_log2      = 87,  [], [Id];
  native_log10     = 88,  [], [Id];
  native_powr      = 89,  [], [Id, Id];
  native_recip     = 90,  [], [Id];
  native_rsqrt     = 91,  [], [Id];
  native_sin       = 92,  [], [Id];
  native_sqrt      = 93,  [], [Id];
  native_tan       = 94,  [], [Id];
  // endregion

  // region Common and geometric
  fclamp           = 95,  [], [Id, Id, Id];
  degrees          = 96,  [], [Id];
  fmax_common      = 97,  [], [Id, Id];
  fmin_common      = 98,  [], [Id, Id];
  mix              = 99,  [], [Id, Id, Id];
  radians          = 100, [], [Id];
  step             = 101, [], [Id, Id];
  smoothstep       = 102, [], [Id, Id, Id];
  sign             = 103, [], [Id];
  cross            = 104, [], [Id, Id];
  distance         = 105, [], [Id, Id];
  length           = 106, [], [Id];
  normalize        = 107, [], [Id];
  fast_distance    = 108, [], [Id, Id];
  fast_length      = 109, [], [Id];
  fast_normalize   = 110, [], [Id];
  // endregion

  // region Integer
  s_abs            = 141, [], [Id];
  s_abs_diff       = 142, [], [Id, Id];
  s_add_sat        = 143, [], [Id, Id];
  u_add_sat        = 144, [], [Id, Id];
  s_hadd           = 145, [], [Id, Id];
  u_hadd           = 146, [], [Id, Id];
  s_rhadd          = 147, [], [Id, Id];
  u_rhadd          = 148, [], [Id, Id];
  s_clamp          = 149, [], [Id, Id, Id];
  u_clamp          = 150, [], [Id, Id, Id];
  clz              = 151, [], [Id];
  ctz              = 152, [], [Id];
  s_mad_hi         = 153, [], [Id, Id, Id];
  u_mad_sat        = 154, [], [Id, Id, Id];
  s_mad_sat        = 155, [], [Id, Id, Id];
  s_max            = 156, [], [Id, Id];
  u_max            = 157, [], [Id, Id];
  s_min            = 158, [], [Id, Id];
  u_min            = 159, [], [Id, Id];
  s_mul_hi         = 160, [], [Id, Id];
  rotate           = 161, [], [Id, Id];
  s_sub_sat        = 162, [], [Id, Id];
  u_sub_sat        = 163, [], [Id, Id];
  u_upsample       = 164, [], [Id, Id];
  s_upsample       = 165, [], [Id, Id];
  popcount         = 166, [], [Id];
  s_mad24          = 167, [], [Id, Id, Id];
  u_mad24          = 168, [], [Id, Id, Id];
  s_mul24          = 169, [], [Id, Id];
  u_mul24          = 170, [], [Id, Id];
  // endregion

  // region Vector loads and stores
  vloadn           = 171, [], [Id, Id, LiteralInteger];
  vstoren          = 172, [], [Id, Id, Id];
  vload_half       = 173, [], [Id, Id];
  vload_halfn      = 174, [], [Id, Id, LiteralInteger];
  vstore_half      = 175, [], [Id, Id, Id];
  vstore_half_r    = 176, [], [Id, Id, Id, FpRoundingMode];
  vstore_halfn     = 177, [], [Id, Id, Id];
  vstore_halfn_r   = 178, [], [Id, Id, Id, FpRoundingMode];
  vloada_halfn     = 179, [], [Id, Id, LiteralInteger];
  vstorea_halfn    = 180, [], [Id, Id, Id];
  vstorea_halfn_r  = 181, [], [Id, Id, Id, FpRoundingMode];
  // endregion

  // region Miscellaneous
  shuffle          = 182, [], [Id, Id];
  shuffle2         = 183, [], [Id, Id, Id];
  printf           = 184, [], [Id, VariableId];
  prefetch         = 185, [], [Id, Id];
  bitselect        = 186, [], [Id, Id, Id];
  select           = 187, [], [Id, Id, Id];
  u_abs            = 201, [], [Id];
  u_abs_diff       = 202, [], [Id, Id];
  u_mul_hi         = 203, [], [Id, Id];
  u_mad_hi         = 204, [], [Id, Id, Id];
  // endregion
});

/// The set an `OpExtInstImport` string names, or `ExtInstType::None` if it is not a known set.
pub fn ext_inst_import_type(name: &str) -> ExtInstType {
  match name {
    "GLSL.std.450" => ExtInstType::GlslStd450,
    "OpenCL.std"   => ExtInstType::OpenClStd,
    _              => ExtInstType::None,
  }
}

fn ext_inst_table(set: ExtInstType) -> Option<&'static [ExtInstDesc]> {
  match set {
    ExtInstType::None       => None,
    ExtInstType::GlslStd450 => Some(GLSL_STD_450),
    ExtInstType::OpenClStd  => Some(OPENCL_STD),
  }
}

pub fn lookup_ext_inst_by_name(set: ExtInstType, name: &str)
  -> Result<&'static ExtInstDesc, LookupError>
{
  ext_inst_table(set)
    .ok_or(LookupError::NoExtInstSet)?
    .iter()
    .find(|entry| entry.name == name)
    .ok_or(LookupError::NotFound)
}

pub fn lookup_ext_inst_by_value(set: ExtInstType, value: u32)
  -> Result<&'static ExtInstDesc, LookupError>
{
  ext_inst_table(set)
    .ok_or(LookupError::NoExtInstSet)?
    .iter()
    .find(|entry| entry.value == value)
    .ok_or(LookupError::NotFound)
}
