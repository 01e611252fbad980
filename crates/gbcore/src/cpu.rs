//! CPU-visible state of the Game Boy CPU (LR35902 / SM83).
//!
//! `regs` holds the register file the executor mutates, `operand` holds the
//! small value types the decoder builds from opcode bit fields. The two do
//! not depend on each other.

mod contract;
pub mod operand;
mod regs;

pub use regs::{Flag, Flags, Reg16, Reg8, RegisterFile, RegisterInit, Registers};

#[cfg(test)]
mod tests;
