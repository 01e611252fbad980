use std::fmt;

use bitflags::bitflags;
use typed_builder::TypedBuilder;

bitflags! {
    /// Flag bits in the F register.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0–3 are always zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const ZERO       = 0b1000_0000;
        const SUBTRACT   = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY      = 0b0001_0000;
    }
}

/// A single flag, with its bit position in F as the discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Flag {
    pub const ALL: [Flag; 4] = [Flag::Z, Flag::N, Flag::H, Flag::C];

    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }

    const fn symbol(self) -> char {
        match self {
            Flag::Z => 'Z',
            Flag::N => 'N',
            Flag::H => 'H',
            Flag::C => 'C',
        }
    }
}

impl From<Flag> for Flags {
    #[inline]
    fn from(flag: Flag) -> Flags {
        Flags::from_bits_truncate(flag.mask())
    }
}

/// 8-bit registers of the register file.
///
/// Unlike the opcode-level `R8` selector this includes F and has no `(HL)`
/// entry; the numbering carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg8 {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl Reg8 {
    pub const ALL: [Reg8; 8] = [
        Reg8::A,
        Reg8::F,
        Reg8::B,
        Reg8::C,
        Reg8::D,
        Reg8::E,
        Reg8::H,
        Reg8::L,
    ];
}

/// 16-bit registers: the four pairs plus SP and PC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

impl Reg16 {
    pub const ALL: [Reg16; 6] = [
        Reg16::AF,
        Reg16::BC,
        Reg16::DE,
        Reg16::HL,
        Reg16::SP,
        Reg16::PC,
    ];

    /// The `(high, low)` 8-bit halves backing a pair, or `None` for SP/PC
    /// which are stored as whole words.
    pub const fn halves(self) -> Option<(Reg8, Reg8)> {
        match self {
            Reg16::AF => Some((Reg8::A, Reg8::F)),
            Reg16::BC => Some((Reg8::B, Reg8::C)),
            Reg16::DE => Some((Reg8::D, Reg8::E)),
            Reg16::HL => Some((Reg8::H, Reg8::L)),
            Reg16::SP | Reg16::PC => None,
        }
    }
}

/// Register access as seen by the instruction executor.
///
/// Every operation is total. Implementations must keep the low nibble of F
/// at zero after any call that can write F.
pub trait RegisterFile {
    fn read8(&self, reg: Reg8) -> u8;
    fn write8(&mut self, reg: Reg8, value: u8);

    fn read16(&self, reg: Reg16) -> u16;
    fn write16(&mut self, reg: Reg16, value: u16);

    fn flag(&self, flag: Flag) -> bool;
    fn set_flag(&mut self, flag: Flag, value: bool);
}

/// Start state for a register file, all zero unless set.
///
/// ```
/// use gbcore::{Reg16, RegisterFile, RegisterInit, Registers};
///
/// let init = RegisterInit::builder().sp(0xFFFE).pc(0x0100).build();
/// let regs = Registers::from_init(&init);
/// assert_eq!(regs.read16(Reg16::PC), 0x0100);
/// assert_eq!(regs.read16(Reg16::AF), 0x0000);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, TypedBuilder)]
pub struct RegisterInit {
    #[builder(default)]
    pub af: u16,
    #[builder(default)]
    pub bc: u16,
    #[builder(default)]
    pub de: u16,
    #[builder(default)]
    pub hl: u16,
    #[builder(default)]
    pub sp: u16,
    #[builder(default)]
    pub pc: u16,
}

impl RegisterInit {
    /// State the DMG boot ROM leaves behind when it jumps to cartridge code
    /// at 0x0100 (values as documented in Pan Docs).
    pub fn dmg() -> Self {
        Self::builder()
            .af(0x01B0)
            .bc(0x0013)
            .de(0x00D8)
            .hl(0x014D)
            .sp(0xFFFE)
            .pc(0x0100)
            .build()
    }
}

/// Registers for the Game Boy CPU (LR35902).
///
/// Each 8-bit half is its own field; the AF/BC/DE/HL words are composed on
/// read and split on write. F is kept as a `Flags` set so that nothing but
/// the four flag bits can ever be stored in it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    a: u8,
    f: Flags,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    h: u8,
    l: u8,
    sp: u16,
    pc: u16,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_init(init: &RegisterInit) -> Self {
        let mut regs = Self::new();
        regs.write16(Reg16::AF, init.af);
        regs.write16(Reg16::BC, init.bc);
        regs.write16(Reg16::DE, init.de);
        regs.write16(Reg16::HL, init.hl);
        regs.write16(Reg16::SP, init.sp);
        regs.write16(Reg16::PC, init.pc);
        regs
    }

    /// Zero every register.
    pub fn reset(&mut self) {
        *self = Self::default();
        self.set_f(0);
        log::trace!("registers reset");
    }

    /// All four flags at once.
    #[inline]
    pub fn flags(&self) -> Flags {
        self.f
    }

    // Single write path for F: bits 0-3 are dropped here.
    #[inline]
    fn set_f(&mut self, value: u8) {
        self.f = Flags::from_bits_truncate(value);
    }
}

impl RegisterFile for Registers {
    #[inline]
    fn read8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a,
            Reg8::F => self.f.bits(),
            Reg8::B => self.b,
            Reg8::C => self.c,
            Reg8::D => self.d,
            Reg8::E => self.e,
            Reg8::H => self.h,
            Reg8::L => self.l,
        }
    }

    #[inline]
    fn write8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.a = value,
            Reg8::F => self.set_f(value),
            Reg8::B => self.b = value,
            Reg8::C => self.c = value,
            Reg8::D => self.d = value,
            Reg8::E => self.e = value,
            Reg8::H => self.h = value,
            Reg8::L => self.l = value,
        }
    }

    #[inline]
    fn read16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => u16::from_be_bytes([self.a, self.f.bits()]),
            Reg16::BC => u16::from_be_bytes([self.b, self.c]),
            Reg16::DE => u16::from_be_bytes([self.d, self.e]),
            Reg16::HL => u16::from_be_bytes([self.h, self.l]),
            Reg16::SP => self.sp,
            Reg16::PC => self.pc,
        }
    }

    #[inline]
    fn write16(&mut self, reg: Reg16, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        match reg {
            Reg16::AF => {
                self.a = hi;
                self.set_f(lo);
            }
            Reg16::BC => {
                self.b = hi;
                self.c = lo;
            }
            Reg16::DE => {
                self.d = hi;
                self.e = lo;
            }
            Reg16::HL => {
                self.h = hi;
                self.l = lo;
            }
            Reg16::SP => self.sp = value,
            Reg16::PC => self.pc = value,
        }
    }

    #[inline]
    fn flag(&self, flag: Flag) -> bool {
        (self.f.bits() >> flag.bit()) & 1 != 0
    }

    #[inline]
    fn set_flag(&mut self, flag: Flag, value: bool) {
        let mask = flag.mask();
        let f = self.f.bits();
        self.set_f(if value { f | mask } else { f & !mask });
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reg) in Reg16::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:?}={:04X}", reg, self.read16(reg))?;
        }
        f.write_str(" [")?;
        for flag in Flag::ALL {
            let c = if self.flag(flag) { flag.symbol() } else { '-' };
            write!(f, "{}", c)?;
        }
        f.write_str("]")
    }
}
