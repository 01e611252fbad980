pub mod cpu;

pub use cpu::operand;
pub use cpu::{Flag, Flags, Reg16, Reg8, RegisterFile, RegisterInit, Registers};
