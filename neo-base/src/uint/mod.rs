// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Fixed-size hashes stored little-endian and displayed big-endian with a
//! `0x` prefix, matching how Neo tooling prints script and transaction hashes.

mod uint160;
mod uint256;


pub use uint160::UInt160;
pub use uint256::UInt256;

macro_rules! impl_uint {
    ($name:ident, $len:expr) => {
        impl $name {
            pub const LENGTH: usize = $len;
            pub const ZERO: Self = Self([0u8; $len]);

            #[inline]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(slice: &[u8]) -> Result<Self, $crate::encoding::DecodeError> {
                let bytes: [u8; $len] =
                    slice
                        .try_into()
                        .map_err(|_| $crate::encoding::DecodeError::LengthOutOfRange {
                            len: slice.len() as u64,
                            max: $len as u64,
                        })?;
                Ok(Self(bytes))
            }

            /// Parses the big-endian display form, with or without `0x`.
            pub fn from_hex_str(value: &str) -> Result<Self, $crate::encoding::DecodeError> {
                let digits = $crate::encoding::trim_0x(value.trim());
                if digits.len() != $len * 2 {
                    return Err($crate::encoding::DecodeError::LengthOutOfRange {
                        len: (digits.len() / 2) as u64,
                        max: $len as u64,
                    });
                }
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(digits, &mut bytes)
                    .map_err(|_| $crate::encoding::DecodeError::InvalidFormat(stringify!($name)))?;
                bytes.reverse();
                Ok(Self(bytes))
            }

            #[inline]
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            #[inline]
            pub fn to_array(self) -> [u8; $len] {
                self.0
            }

            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            #[inline]
            fn from(value: [u8; $len]) -> Self {
                Self(value)
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                self.0.iter().rev().cmp(other.0.iter().rev())
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                use $crate::encoding::ToRevHex;
                write!(f, "0x{}", self.0.to_rev_hex_lower())
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(self, f)
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::encoding::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex_str(s)
            }
        }

        impl $crate::encoding::NeoEncode for $name {
            #[inline]
            fn neo_encode<W: $crate::encoding::NeoWrite>(&self, writer: &mut W) {
                writer.write_bytes(&self.0);
            }

            #[inline]
            fn encoded_size(&self) -> usize {
                $len
            }
        }

        impl $crate::encoding::NeoDecode for $name {
            #[inline]
            fn neo_decode<R: $crate::encoding::NeoRead>(
                reader: &mut R,
            ) -> Result<Self, $crate::encoding::DecodeError> {
                Ok(Self(reader.read_array::<$len>()?))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex_str(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_uint;
