pub mod addressing;
mod alu;
pub mod opcodes;

use std::fmt;

use bitflags::bitflags;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::memory::Memory;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Flags: u8 {
        const N = 0b1000_0000; // negative
        const V = 0b0100_0000; // overflow
        const X = 0b0010_0000; // unused, reads back as 1
        const B = 0b0001_0000; // break
        const D = 0b0000_1000; // decimal, state-only on this core
        const I = 0b0000_0100; // interrupt disable
        const Z = 0b0000_0010; // zero
        const C = 0b0000_0001; // carry
    }
}

impl Default for Flags {
    fn default() -> Flags {
        Flags::I | Flags::X
    }
}

/// Instruction-stepped MOS 6502 core: register file, status flags and a
/// flat 64KB memory, driven one whole instruction per `step`.
///
/// The core is synchronous and single-threaded; callers serialize access
/// and check their own stop signal between steps.
#[derive(Clone, Serialize, Deserialize)]
pub struct Cpu {
    a: u8,
    x: u8,
    y: u8,
    s: u8,
    pc: u16,
    flags: Flags,
    cycles: u64,
    memory: Memory,
}

impl Cpu {
    pub fn new() -> Cpu {
        let mut c = Cpu {
            a: 0,
            x: 0,
            y: 0,
            s: STACK_RESET,
            pc: 0,
            flags: Flags::default(),
            cycles: 0,
            memory: Memory::new(),
        };
        c.reset();
        c
    }

    /// Hardware reset: forces I and the unused bit, clears D and B, parks
    /// the stack pointer at 0xFD and jumps through the reset vector.
    /// Registers and memory are left as-is.
    pub fn reset(&mut self) {
        self.set_flag(Flags::I, true);
        self.set_flag(Flags::D, false);
        self.set_flag(Flags::B, false);
        self.s = STACK_RESET;
        self.pc = self.memory.get_u16(RESV_ADDR);
        self.cycles = 0;
        trace!("Reset, PC:0x{:04x}", self.pc);
    }

    /// Maskable interrupt. Ignored while the I flag is set.
    pub fn irq(&mut self) {
        if self.flags.contains(Flags::I) {
            return;
        }
        self.interrupt(INTV_ADDR, IRQ_TICKS);
    }

    /// Non-maskable interrupt, taken regardless of the I flag.
    pub fn nmi(&mut self) {
        self.interrupt(NMIV_ADDR, NMI_TICKS);
    }

    fn interrupt(&mut self, vector: u16, ticks: u64) {
        self.push_u16(self.pc);
        self.push_u8(((self.flags | Flags::X) & !Flags::B).bits());
        self.set_flag(Flags::I, true);
        self.pc = self.memory.get_u16(vector);
        self.cycles += ticks;
        trace!("Interrupt through 0x{:04x}, PC:0x{:04x}", vector, self.pc);
    }

    /// Executes exactly one instruction.
    ///
    /// An opcode without a table entry is a contained fault: it is logged,
    /// charged a flat 2 cycles, and execution continues at the next byte.
    pub fn step(&mut self) {
        let at = self.pc;
        let code = self.fetch_u8();
        match opcodes::lookup(code) {
            None => {
                warn!("Unimplemented opcode 0x{:02x} at 0x{:04x}", code, at);
                self.cycles += UNIMPLEMENTED_TICKS;
            }
            Some(op) => {
                trace!("[0x{:04x}] {} {:?}", at, op.mnemonic, op.mode);
                let r = self.resolve(op.mode);
                (op.exec)(self, r);
                if op.page_penalty && r.page_crossed {
                    self.cycles += 1;
                }
                self.cycles += op.ticks;
            }
        }
    }

    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Copies a program image into memory, wrapping past 0xFFFF.
    pub fn load_program(&mut self, program: &[u8], start: u16) {
        trace!("Load {} bytes at 0x{:04x}", program.len(), start);
        self.memory.load(start, program);
    }

    /* instruction stream */

    pub(crate) fn fetch_u8(&mut self) -> u8 {
        let v = self.memory.get(self.pc);
        self.pc = self.pc.wrapping_add(1);
        v
    }

    pub(crate) fn fetch_u16(&mut self) -> u16 {
        let v = self.memory.get_u16(self.pc);
        self.pc = self.pc.wrapping_add(2);
        v
    }

    /* stack, confined to page 1 */

    pub(crate) fn push_u8(&mut self, v: u8) {
        self.memory.set(STACK_BASE + u16::from(self.s), v);
        self.s = self.s.wrapping_sub(1);
    }

    pub(crate) fn pop_u8(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        self.memory.get(STACK_BASE + u16::from(self.s))
    }

    pub(crate) fn push_u16(&mut self, v: u16) {
        self.push_u8((v >> 8) as u8);
        self.push_u8(v as u8);
    }

    pub(crate) fn pop_u16(&mut self) -> u16 {
        let low = self.pop_u8();
        let high = self.pop_u8();
        u16::from(high) << 8 | u16::from(low)
    }

    /* flags */

    /// Single flag mutation primitive; the unused bit is re-asserted on
    /// every write so the status byte always reads back with it set.
    pub(crate) fn set_flag(&mut self, flag: Flags, state: bool) {
        self.flags.set(flag, state);
        self.flags.insert(Flags::X);
    }

    pub(crate) fn nz(&mut self, value: u8) {
        self.set_flag(Flags::Z, value == 0);
        self.set_flag(Flags::N, value & 0x80 != 0);
    }

    /* observer surface */

    #[must_use]
    pub fn a(&self) -> u8 {
        self.a
    }

    #[must_use]
    pub fn x(&self) -> u8 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u8 {
        self.y
    }

    #[must_use]
    pub fn s(&self) -> u8 {
        self.s
    }

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[must_use]
    pub fn status(&self) -> u8 {
        (self.flags | Flags::X).bits()
    }

    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub fn memory(&self, addr: u16) -> u8 {
        self.memory.get(addr)
    }

    pub fn set_memory(&mut self, addr: u16, data: u8) {
        self.memory.set(addr, data);
    }

    pub fn set_a(&mut self, a: u8) {
        self.a = a;
    }

    pub fn set_x(&mut self, x: u8) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: u8) {
        self.y = y;
    }

    pub fn set_s(&mut self, s: u8) {
        self.s = s;
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags | Flags::X;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu::new()
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ A:0x{:02x} X:0x{:02x} Y:0x{:02x} S:0x{:02x} PC:0x{:04x} P:{:?} cycles:{} }}",
            self.a, self.x, self.y, self.s, self.pc, self.flags, self.cycles
        )
    }
}
