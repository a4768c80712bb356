//! Instruction-stepped MOS 6502 CPU emulator core.
//!
//! The crate owns the execution engine only: register file, flag
//! computation, the twelve addressing modes, the 256-entry opcode table,
//! the stack page and the reset/IRQ/NMI/BRK protocol, over a flat 64KB
//! memory. Front ends (debuggers, visualizers) drive it through
//! [`Cpu::step`]/[`Cpu::run`] and read state back through the accessors.

pub mod consts;
pub mod cpu;
pub mod memory;

use std::io::Error;

pub use cpu::addressing::{AddressingMode, Resolved};
pub use cpu::opcodes::opcode_info;
pub use cpu::{Cpu, Flags};
pub use memory::Memory;

pub fn serialize(cpu: &Cpu, data: &mut [u8]) -> Result<(), Error> {
    match postcard::to_slice(&cpu, data) {
        Err(e) => Err(Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}", e),
        )),
        Ok(_) => Ok(()),
    }
}

pub fn deserialize(data: &[u8]) -> Result<Cpu, Error> {
    match postcard::from_bytes::<Cpu>(data) {
        Err(e) => Err(Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}", e),
        )),
        Ok(c) => Ok(c),
    }
}

pub fn serialize_size(cpu: &Cpu) -> Result<usize, Error> {
    match postcard::experimental::serialized_size(&cpu) {
        Err(e) => Err(Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}", e),
        )),
        Ok(n) => Ok(n),
    }
}

pub const fn info() -> (&'static str, &'static str) {
    ("mos6502", env!("CARGO_PKG_VERSION"))
}
