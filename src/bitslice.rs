//! Description of the key type `BitSlice`.

use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use num_traits::{PrimInt, Unsigned, Zero};

use crate::error::BitSliceError;

/// Maximum number of bits a [`BitSlice`] can hold.
pub const MAX_BITS: u8 = 128;

/// Maximum number of bytes that can be turned into a [`BitSlice`].
pub const MAX_BYTES: usize = MAX_BITS as usize / 8;

/// An ordered sequence of up to 128 binary digits, used as the key of an address or a network.
///
/// The bits are stored left-aligned in a `u128`. All bits past [`BitSlice::len`] are zero, such
/// that two bit slices are equal if and only if they hold the same digits. The ordering is
/// lexicographic on the digits, where a prefix is smaller than any of its extensions.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitSlice {
    bits: u128,
    len: u8,
}

impl BitSlice {
    /// Create an empty bit slice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bit slice from a byte buffer. The resulting slice holds `8 * bytes.len()` bits,
    /// the first bit being the most significant bit of the first byte.
    ///
    /// ```
    /// # use routesum::BitSlice;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let bits = BitSlice::from_bytes(&[0b1010_0000, 0xff])?;
    /// assert_eq!(bits.len(), 16);
    /// assert_eq!(bits.truncate(4).to_string(), "1010");
    /// assert!(BitSlice::from_bytes(&[]).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BitSliceError> {
        if bytes.is_empty() {
            return Err(BitSliceError::Empty);
        }
        if bytes.len() > MAX_BYTES {
            return Err(BitSliceError::TooLong(bytes.len() * 8));
        }
        let repr = bytes
            .iter()
            .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte));
        let len = (bytes.len() * 8) as u8;
        Ok(Self {
            bits: repr << (MAX_BITS - len),
            len,
        })
    }

    /// Create a bit slice from the `len` most significant bits of `repr`. `len` is clamped to
    /// the width of `R`.
    ///
    /// ```
    /// # use routesum::BitSlice;
    /// let bits = BitSlice::from_repr(0xc0a80100u32, 24);
    /// assert_eq!(bits.len(), 24);
    /// assert_eq!(bits.to_bytes(4), vec![192, 168, 1, 0]);
    /// ```
    pub fn from_repr<R>(repr: R, len: u8) -> Self
    where
        R: Unsigned + PrimInt + Zero,
    {
        let width = R::zero().count_zeros() as u8;
        let len = len.min(width);
        let repr = repr.to_u128().unwrap_or_default() << (MAX_BITS - width);
        Self {
            bits: repr & mask_from_prefix_len::<u128>(len),
            len,
        }
    }

    /// Number of bits in the sequence.
    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Check if the sequence holds no bits.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw left-aligned representation of the bits.
    #[inline(always)]
    pub fn repr(&self) -> u128 {
        self.bits
    }

    /// Get the bit at position `idx` (counted from the left). Positions past the end are `false`.
    #[inline(always)]
    pub fn bit(&self, idx: u8) -> bool {
        idx < self.len && (self.bits >> (MAX_BITS - 1 - idx)) & 1 == 1
    }

    /// Get the first bit, if there is any.
    #[inline(always)]
    pub fn first(&self) -> Option<bool> {
        (!self.is_empty()).then(|| self.bit(0))
    }

    /// Keep only the first `len` bits. Truncating to a length longer than `self` does nothing.
    pub fn truncate(&self, len: u8) -> Self {
        let len = len.min(self.len);
        Self {
            bits: self.bits & mask_from_prefix_len::<u128>(len),
            len,
        }
    }

    /// Get the bits in the range `start..end`. Both bounds are clamped to the length of `self`.
    pub fn slice(&self, start: u8, end: u8) -> Self {
        let end = end.min(self.len);
        let start = start.min(end);
        let bits = self.bits.checked_shl(start as u32).unwrap_or_default();
        Self {
            bits: bits & mask_from_prefix_len::<u128>(end - start),
            len: end - start,
        }
    }

    /// Get all bits after the first `start` ones.
    #[inline(always)]
    pub fn skip(&self, start: u8) -> Self {
        self.slice(start, self.len)
    }

    /// Append `other` to `self`. The result is cut at 128 bits.
    pub fn concat(&self, other: &Self) -> Self {
        debug_assert!(self.len as u16 + other.len as u16 <= MAX_BITS as u16);
        let bits = other.bits.checked_shr(self.len as u32).unwrap_or_default();
        Self {
            bits: self.bits | bits,
            len: self.len.saturating_add(other.len).min(MAX_BITS),
        }
    }

    /// Expand the bits into a buffer of `byte_len` bytes. Missing bits are filled with zeros,
    /// while bits that do not fit into the buffer are dropped.
    pub fn to_bytes(&self, byte_len: usize) -> Vec<u8> {
        let mut bytes = self.bits.to_be_bytes().to_vec();
        bytes.resize(byte_len, 0);
        bytes
    }

    /// Check if `prefix` is a prefix of `self`. This function also returns `true` if `self` is
    /// identical to `prefix`.
    ///
    /// ```
    /// # use routesum::BitSlice;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let a: BitSlice = "0110".parse()?;
    /// assert!(a.has_prefix(&"01".parse()?));
    /// assert!(a.has_prefix(&a));
    /// assert!(a.has_prefix(&BitSlice::new()));
    /// assert!(!a.has_prefix(&"00".parse()?));
    /// assert!(!a.has_prefix(&"01101".parse()?));
    /// # Ok(())
    /// # }
    /// ```
    pub fn has_prefix(&self, prefix: &Self) -> bool {
        prefix.len <= self.len && self.truncate(prefix.len) == *prefix
    }

    /// Number of leading bits that are equal in `self` and `other`.
    ///
    /// ```
    /// # use routesum::BitSlice;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let a: BitSlice = "0110".parse()?;
    /// assert_eq!(a.common_prefix_len(&"0100".parse()?), 2);
    /// assert_eq!(a.common_prefix_len(&"011".parse()?), 3);
    /// assert_eq!(a.common_prefix_len(&"1".parse()?), 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn common_prefix_len(&self, other: &Self) -> u8 {
        ((self.bits ^ other.bits).leading_zeros() as u8)
            .min(self.len)
            .min(other.len)
    }
}

pub(crate) fn mask_from_prefix_len<R>(len: u8) -> R
where
    R: PrimInt + Zero,
{
    if len as u32 == R::zero().count_zeros() {
        !R::zero()
    } else if len == 0 {
        R::zero()
    } else {
        !((!R::zero()) >> len as usize)
    }
}

impl Display for BitSlice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for idx in 0..self.len {
            f.write_str(if self.bit(idx) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Debug for BitSlice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitSlice(\"{self}\")")
    }
}

impl FromStr for BitSlice {
    type Err = BitSliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = BitSlice::new();
        for c in s.chars() {
            if bits.len == MAX_BITS {
                return Err(BitSliceError::TooLong(s.chars().count()));
            }
            let set = match c {
                '0' => false,
                '1' => true,
                c => return Err(BitSliceError::InvalidDigit(c)),
            };
            if set {
                bits.bits |= 1u128 << (MAX_BITS - 1 - bits.len);
            }
            bits.len += 1;
        }
        Ok(bits)
    }
}
