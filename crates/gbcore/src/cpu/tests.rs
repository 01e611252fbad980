use super::operand::{Imm8Signed, Index3Bit, Target3Bit};
use super::*;

const PAIRS: [Reg16; 3] = [Reg16::BC, Reg16::DE, Reg16::HL];

fn assert_f_low_nibble_clear(regs: &Registers) {
    assert_eq!(regs.read8(Reg8::F) & 0x0F, 0, "F = {:02X}", regs.read8(Reg8::F));
}

#[test]
fn af_forces_f_low_nibble_for_every_a() {
    let mut regs = Registers::new();
    for x in 0..=u8::MAX {
        let word = u16::from_be_bytes([x, 0xFF]);
        regs.write16(Reg16::AF, word);
        assert_eq!(regs.read8(Reg8::A), x);
        assert_eq!(regs.read16(Reg16::AF), u16::from_be_bytes([x, 0xF0]));
        assert_f_low_nibble_clear(&regs);
    }
}

#[test]
fn f_low_nibble_clear_for_every_byte_written() {
    let mut regs = Registers::new();
    for value in 0..=u8::MAX {
        regs.write8(Reg8::F, value);
        assert_eq!(regs.read8(Reg8::F), value & 0xF0);
    }
}

#[test]
fn pairs_round_trip_every_word() {
    let mut regs = Registers::new();
    for pair in PAIRS {
        for word in 0..=u16::MAX {
            regs.write16(pair, word);
            assert_eq!(regs.read16(pair), word, "{:?}", pair);
        }
    }
}

#[test]
fn pairs_join_their_halves() {
    let mut regs = Registers::new();
    for pair in PAIRS {
        let (high, low) = pair.halves().unwrap();
        for hi in 0..=u8::MAX {
            for lo in 0..=u8::MAX {
                regs.write8(high, hi);
                regs.write8(low, lo);
                assert_eq!(regs.read16(pair), u16::from_be_bytes([hi, lo]), "{:?}", pair);
            }
        }
    }
}

#[test]
fn pair_writes_do_not_leak_into_other_registers() {
    let mut regs = Registers::new();
    regs.write16(Reg16::DE, 0xFFFF);
    for reg in [Reg16::AF, Reg16::BC, Reg16::HL, Reg16::SP, Reg16::PC] {
        assert_eq!(regs.read16(reg), 0, "{:?}", reg);
    }
}

#[test]
fn set_flag_touches_only_its_bit() {
    for start in [0x00, 0xF0, 0xA0, 0x50] {
        for flag in Flag::ALL {
            let mut regs = Registers::new();
            regs.write8(Reg8::F, start);

            regs.set_flag(flag, true);
            assert!(regs.flag(flag));
            assert_eq!(regs.read8(Reg8::F), start | flag.mask());
            assert_f_low_nibble_clear(&regs);

            regs.set_flag(flag, false);
            assert!(!regs.flag(flag));
            assert_eq!(regs.read8(Reg8::F), start & !flag.mask());
            assert_f_low_nibble_clear(&regs);

            for other in Flag::ALL.into_iter().filter(|&f| f != flag) {
                assert_eq!(
                    regs.flag(other),
                    start & other.mask() != 0,
                    "{:?} changed while setting {:?}",
                    other,
                    flag
                );
            }
        }
    }
}

#[test]
fn set_flag_leaves_a_alone() {
    let mut regs = Registers::new();
    regs.write16(Reg16::AF, 0x4200);
    for flag in Flag::ALL {
        regs.set_flag(flag, true);
    }
    assert_eq!(regs.read16(Reg16::AF), 0x42F0);
}

#[test]
fn reset_zeroes_everything() {
    let mut regs = Registers::from_init(&RegisterInit::dmg());
    regs.write8(Reg8::F, 0xFF);
    regs.reset();

    for reg in Reg8::ALL {
        assert_eq!(regs.read8(reg), 0, "{:?}", reg);
    }
    for reg in Reg16::ALL {
        assert_eq!(regs.read16(reg), 0, "{:?}", reg);
    }
    for flag in Flag::ALL {
        assert!(!regs.flag(flag), "{:?}", flag);
    }
    assert_f_low_nibble_clear(&regs);
    assert_eq!(regs, Registers::new());
}

#[test]
fn flag_bit_positions() {
    let mut regs = Registers::new();
    let expected = [(Flag::Z, 0x80), (Flag::N, 0x40), (Flag::H, 0x20), (Flag::C, 0x10)];
    for (flag, bits) in expected {
        regs.write8(Reg8::F, bits);
        assert!(regs.flag(flag));
        for other in Flag::ALL.into_iter().filter(|&f| f != flag) {
            assert!(!regs.flag(other));
        }
    }
}

// Executor-side code only sees the trait.
fn swap_bc_de<R: RegisterFile>(rf: &mut R) {
    let bc = rf.read16(Reg16::BC);
    let de = rf.read16(Reg16::DE);
    rf.write16(Reg16::BC, de);
    rf.write16(Reg16::DE, bc);
}

#[test]
fn register_file_trait_is_usable_generically() {
    let mut regs = Registers::from_init(&RegisterInit::dmg());
    swap_bc_de(&mut regs);
    assert_eq!(regs.read16(Reg16::BC), 0x00D8);
    assert_eq!(regs.read16(Reg16::DE), 0x0013);
}

#[test]
fn rst_targets_map_to_vectors() {
    let vectors = [0x00, 0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38];
    for (t, vector) in (0..8u8).zip(vectors) {
        let target = Target3Bit::new(t);
        assert_eq!(target.rst_address(), vector);
        assert_eq!(u16::from(target.value()) * 8, vector);
    }
}

#[test]
fn bit_index_masks_select_flags() {
    // BIT 7,A style test of F through the bit index mask.
    let mut regs = Registers::new();
    regs.set_flag(Flag::Z, true);
    let f = regs.read8(Reg8::F);
    assert_ne!(f & Index3Bit::new(7).mask(), 0);
    assert_eq!(f & Index3Bit::new(4).mask(), 0);
}

#[test]
fn relative_jump_from_pc() {
    // JR -2 at 0x0150: PC already points past the operand at 0x0152.
    let mut regs = Registers::new();
    regs.write16(Reg16::PC, 0x0152);
    let e = Imm8Signed::from_raw(0xFE);
    let target = e.offset(regs.read16(Reg16::PC));
    regs.write16(Reg16::PC, target);
    assert_eq!(regs.read16(Reg16::PC), 0x0150);
}
