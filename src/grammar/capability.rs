/*!
  Capabilities gate opcodes and enumerants. Table rows record the capabilities they depend on as a
  `CapabilityMask`, a bit set indexed by capability value. Every SPIR-V 1.0 capability value fits
  in 64 bits.
*/

use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(
IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,         Copy,       Eq, PartialEq, Debug,      Hash
)]
#[repr(u32)]
pub enum Capability {
  Matrix                             = 0,
  Shader                             = 1,
  Geometry                           = 2,
  Tessellation                       = 3,
  Addresses                          = 4,
  Linkage                            = 5,
  Kernel                             = 6,
  Vector16                           = 7,
  Float16Buffer                      = 8,
  Float16                            = 9,
  Float64                            = 10,
  Int64                              = 11,
  Int64Atomics                       = 12,
  ImageBasic                         = 13,
  ImageReadWrite                     = 14,
  ImageMipmap                        = 15,
  Pipes                              = 17,
  Groups                             = 18,
  DeviceEnqueue                      = 19,
  LiteralSampler                     = 20,
  AtomicStorage                      = 21,
  Int16                              = 22,
  TessellationPointSize              = 23,
  GeometryPointSize                  = 24,
  ImageGatherExtended                = 25,
  StorageImageMultisample            = 27,
  UniformBufferArrayDynamicIndexing  = 28,
  SampledImageArrayDynamicIndexing   = 29,
  StorageBufferArrayDynamicIndexing  = 30,
  StorageImageArrayDynamicIndexing   = 31,
  ClipDistance                       = 32,
  CullDistance                       = 33,
  ImageCubeArray                     = 34,
  SampleRateShading                  = 35,
  ImageRect                          = 36,
  SampledRect                        = 37,
  GenericPointer                     = 38,
  Int8                               = 39,
  InputAttachment                    = 40,
  SparseResidency                    = 41,
  MinLod                             = 42,
  Sampled1D                          = 43,
  Image1D                            = 44,
  SampledCubeArray                   = 45,
  SampledBuffer                      = 46,
  ImageBuffer                        = 47,
  ImageMSArray                       = 48,
  StorageImageExtendedFormats        = 49,
  ImageQuery                         = 50,
  DerivativeControl                  = 51,
  InterpolationFunction              = 52,
  TransformFeedback                  = 53,
  GeometryStreams                    = 54,
  StorageImageReadWithoutFormat      = 55,
  StorageImageWriteWithoutFormat     = 56,
  MultiViewport                      = 57,
}

impl Capability {
  pub fn name(self) -> &'static str {
    self.into()
  }
}

impl Display for Capability {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

/// A set of capabilities, one bit per capability value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct CapabilityMask(u64);

impl CapabilityMask {
  pub const EMPTY: CapabilityMask = CapabilityMask(0);

  /// Builds a mask from a list of capabilities. Usable in `static` table initializers.
  pub const fn of(capabilities: &[Capability]) -> CapabilityMask {
    let mut bits = 0u64;
    let mut i = 0;
    while i < capabilities.len() {
      bits |= 1u64 << (capabilities[i] as u32);
      i += 1;
    }
    CapabilityMask(bits)
  }

  pub fn bits(&self) -> u64 {
    self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0 == 0
  }

  pub fn contains(&self, capability: Capability) -> bool {
    self.0 & (1u64 << (capability as u32)) != 0
  }

  pub fn insert(&mut self, capability: Capability) {
    self.0 |= 1u64 << (capability as u32);
  }

  /// The capabilities in this set, in increasing value order.
  pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
    (0..64u32)
      .filter(move |bit| self.0 & (1u64 << bit) != 0)
      .filter_map(|bit| Capability::try_from(bit).ok())
  }
}

impl FromIterator<Capability> for CapabilityMask {
  fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
    let mut mask = CapabilityMask::EMPTY;
    for capability in iter {
      mask.insert(capability);
    }
    mask
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;
  use strum::IntoEnumIterator;

  #[test]
  fn const_masks_match_inserted_masks() {
    const MASK: CapabilityMask = CapabilityMask::of(&[Capability::Shader, Capability::Kernel]);
    let built: CapabilityMask = [Capability::Kernel, Capability::Shader].into_iter().collect();
    assert_eq!(MASK, built);
    assert!(MASK.contains(Capability::Shader));
    assert!(!MASK.contains(Capability::Matrix));
    assert_eq!(MASK.iter().collect::<Vec<_>>(), vec![Capability::Shader, Capability::Kernel]);
  }

  #[test]
  fn every_capability_fits_in_the_mask() {
    for capability in Capability::iter() {
      assert!((capability as u32) < 64);
      assert!(CapabilityMask::of(&[capability]).contains(capability));
    }
  }

  #[test]
  fn names_round_trip() {
    assert_eq!(Capability::from_str("MultiViewport").unwrap(), Capability::MultiViewport);
    assert_eq!(Capability::ImageMSArray.to_string(), "ImageMSArray");
    assert_eq!(Capability::try_from(57u32).unwrap(), Capability::MultiViewport);
    assert!(Capability::try_from(16u32).is_err());
  }
}
