//! Typed values for the operand fields of an SM83 opcode.
//!
//! The decoder slices raw 2- and 3-bit fields out of opcode bytes and wraps
//! each in one of these types before touching any register. The selector
//! discriminants are the exact bit patterns of the opcode layout:
//!
//! | Type       | Encoding                                   |
//! |------------|--------------------------------------------|
//! | `R8`       | B=0, C=1, D=2, E=3, H=4, L=5, (HL)=6, A=7  |
//! | `R16`      | BC=0, DE=1, HL=2, SP=3                     |
//! | `R16Stack` | BC=0, DE=1, HL=2, AF=3                     |
//! | `R16Mem`   | BC=0, DE=1, (HL+)=2, (HL-)=3               |
//! | `Cond`     | NZ=0, Z=1, NC=2, C=3                       |

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::contract;

/// 8-bit operand selector, bits 5-3 or 2-0 of the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum R8 {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    /// The byte at the address in HL.
    MemHl = 6,
    A = 7,
}

impl R8 {
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Map the low three bits of `bits`; higher bits are ignored.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => R8::B,
            1 => R8::C,
            2 => R8::D,
            3 => R8::E,
            4 => R8::H,
            5 => R8::L,
            6 => R8::MemHl,
            _ => R8::A,
        }
    }
}


/// 16-bit operand selector for LD/INC/DEC/ADD HL, bits 5-4 of the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum R16 {
    BC = 0,
    DE = 1,
    HL = 2,
    SP = 3,
}

impl R16 {
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => R16::BC,
            1 => R16::DE,
            2 => R16::HL,
            _ => R16::SP,
        }
    }
}


/// PUSH/POP selector. Same as `R16` except that 3 is AF.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum R16Stack {
    BC = 0,
    DE = 1,
    HL = 2,
    AF = 3,
}

impl R16Stack {
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => R16Stack::BC,
            1 => R16Stack::DE,
            2 => R16Stack::HL,
            _ => R16Stack::AF,
        }
    }
}


/// Indirect pointer selector for `LD (r16),A` / `LD A,(r16)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum R16Mem {
    BC = 0,
    DE = 1,
    /// (HL), then HL is incremented.
    HlInc = 2,
    /// (HL), then HL is decremented.
    HlDec = 3,
}

impl R16Mem {
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => R16Mem::BC,
            1 => R16Mem::DE,
            2 => R16Mem::HlInc,
            _ => R16Mem::HlDec,
        }
    }
}


/// Branch condition for JR/JP/CALL/RET, bits 4-3 of the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cond {
    NZ = 0,
    Z = 1,
    NC = 2,
    C = 3,
}

impl Cond {
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }
}


mod sealed {
    pub trait Sealed {}
}

/// Marker for what a 3-bit field means. Implemented only by the tags in
/// this module.
pub trait Field: sealed::Sealed {
    const NAME: &'static str;
}

/// Tag for the bit number of BIT/RES/SET.
#[derive(Debug)]
pub enum BitIndex {}

/// Tag for the RST vector number.
#[derive(Debug)]
pub enum RstTarget {}

impl sealed::Sealed for BitIndex {}
impl sealed::Sealed for RstTarget {}

impl Field for BitIndex {
    const NAME: &'static str = "Index3Bit";
}

impl Field for RstTarget {
    const NAME: &'static str = "Target3Bit";
}

/// A value in `0..=7` whose meaning is fixed by the tag `T`.
///
/// Values with different tags are different types, so a bit index can not be
/// compared with or turned into an RST target:
///
/// ```compile_fail
/// use gbcore::operand::{Index3Bit, Target3Bit};
///
/// let _ = Index3Bit::new(1) == Target3Bit::new(1);
/// ```
///
/// ```compile_fail
/// use gbcore::operand::{Index3Bit, Target3Bit};
///
/// let _: Target3Bit = Index3Bit::new(1).into();
/// ```
pub struct U3<T: Field> {
    value: u8,
    _field: PhantomData<T>,
}

pub type Index3Bit = U3<BitIndex>;
pub type Target3Bit = U3<RstTarget>;

// Exclusive upper bound of a 3-bit field.
const U3_LIMIT: u8 = 1 << 3;

impl<T: Field> U3<T> {
    pub const MAX: u8 = U3_LIMIT - 1;

    /// # Panics
    ///
    /// Panics if `value > 7`. An out-of-range value is a decoder bug.
    #[track_caller]
    #[inline]
    pub fn new(value: u8) -> Self {
        Self::wrap(contract::checked_u8::<U3_LIMIT>(value))
    }

    #[inline]
    pub const fn try_new(value: u8) -> Option<Self> {
        if value < U3_LIMIT {
            Some(Self::wrap(value))
        } else {
            None
        }
    }

    /// Take the low three bits of `bits`; never fails.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self::wrap(bits & 0b111)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.value
    }

    #[inline]
    const fn wrap(value: u8) -> Self {
        Self {
            value,
            _field: PhantomData,
        }
    }
}

impl U3<BitIndex> {
    /// `1 << index`, the mask BIT/RES/SET apply to their operand.
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.value
    }
}

impl U3<RstTarget> {
    /// Call address of the RST vector: 0x00, 0x08, ..., 0x38.
    #[inline]
    pub const fn rst_address(self) -> u16 {
        self.value as u16 * 8
    }
}

// Manual impls: derives would put bounds on the uninhabited tag.
impl<T: Field> Clone for U3<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Field> Copy for U3<T> {}

impl<T: Field> PartialEq for U3<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Field> Eq for U3<T> {}

impl<T: Field> Hash for U3<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: Field> fmt::Debug for U3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(T::NAME).field(&self.value).finish()
    }
}



/// 8-bit immediate (`n8`). Any byte is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Imm8(u8);

impl Imm8 {
    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}


/// 16-bit immediate (`n16` / `a16`). Any word is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Imm16(u16);

impl Imm16 {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Build from the two bytes following the opcode, low byte first.
    #[inline]
    pub const fn from_le_bytes(lo: u8, hi: u8) -> Self {
        Self(u16::from_le_bytes([lo, hi]))
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}


/// Signed displacement (`e8`) of JR, `ADD SP,e8` and `LD HL,SP+e8`.
///
/// Stores the byte as it appeared in the instruction stream.
///
/// ```
/// use gbcore::operand::Imm8Signed;
///
/// let e = Imm8Signed::from_raw(0xFE);
/// assert_eq!(e.value_i16(), -2);
/// assert_eq!(e.offset(0x0152), 0x0150);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Imm8Signed(u8);

impl Imm8Signed {
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Store the two's-complement byte of `value`.
    #[inline]
    pub const fn from_signed(value: i8) -> Self {
        Self(value as u8)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn value(self) -> i8 {
        self.value_i16() as i8
    }

    /// Sign extension: raw bytes below 0x80 are themselves, the rest are
    /// `raw - 256`.
    #[inline]
    pub const fn value_i16(self) -> i16 {
        let raw = self.0 as i16;
        if raw < 0x80 {
            raw
        } else {
            raw - 0x100
        }
    }

    /// `base` displaced by this value, wrapping at the 16-bit boundary.
    #[inline]
    pub const fn offset(self, base: u16) -> u16 {
        base.wrapping_add_signed(self.value_i16())
    }
}
