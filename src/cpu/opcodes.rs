use lazy_static::lazy_static;

use super::addressing::{AddressingMode, Resolved};
use super::{Cpu, Flags};
use crate::consts::INTV_ADDR;

/// One slot of the dispatch table: mnemonic (diagnostic only), addressing
/// mode, base cycle cost and the executor. `page_penalty` marks the
/// read-class indexed opcodes that pay +1 cycle when the resolved address
/// crosses a page; stores and modify-writes carry that cost in `ticks`.
#[derive(Copy, Clone)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub ticks: u64,
    pub page_penalty: bool,
    pub exec: fn(&mut Cpu, Resolved),
}

macro_rules! op {
    ($t:ident, $code:expr, $name:literal, $mode:ident, $ticks:expr, $exec:path) => {
        $t[$code] = Some(Opcode {
            mnemonic: $name,
            mode: AddressingMode::$mode,
            ticks: $ticks,
            page_penalty: false,
            exec: $exec,
        });
    };
}

macro_rules! opp {
    ($t:ident, $code:expr, $name:literal, $mode:ident, $ticks:expr, $exec:path) => {
        $t[$code] = Some(Opcode {
            mnemonic: $name,
            mode: AddressingMode::$mode,
            ticks: $ticks,
            page_penalty: true,
            exec: $exec,
        });
    };
}

lazy_static! {
    static ref OPCODES: [Option<Opcode>; 256] = build_table();
}

pub(crate) fn lookup(code: u8) -> Option<&'static Opcode> {
    OPCODES[code as usize].as_ref()
}

/// Mnemonic and addressing mode of an opcode byte, for diagnostic display.
#[must_use]
pub fn opcode_info(code: u8) -> Option<(&'static str, AddressingMode)> {
    lookup(code).map(|op| (op.mnemonic, op.mode))
}

/// The 151 documented opcodes. Slots left `None` are unimplemented and
/// fault through the dispatcher's 2-cycle no-op path.
#[rustfmt::skip]
fn build_table() -> [Option<Opcode>; 256] {
    let mut t: [Option<Opcode>; 256] = [None; 256];

    /* load */
    op!(t, 0xa9, "LDA", Immediate,   2, Cpu::lda);
    op!(t, 0xa5, "LDA", ZeroPage,    3, Cpu::lda);
    op!(t, 0xb5, "LDA", ZeroPageX,   4, Cpu::lda);
    op!(t, 0xad, "LDA", Absolute,    4, Cpu::lda);
    opp!(t, 0xbd, "LDA", AbsoluteX,  4, Cpu::lda);
    opp!(t, 0xb9, "LDA", AbsoluteY,  4, Cpu::lda);
    op!(t, 0xa1, "LDA", IndirectX,   6, Cpu::lda);
    opp!(t, 0xb1, "LDA", IndirectY,  5, Cpu::lda);
    op!(t, 0xa2, "LDX", Immediate,   2, Cpu::ldx);
    op!(t, 0xa6, "LDX", ZeroPage,    3, Cpu::ldx);
    op!(t, 0xb6, "LDX", ZeroPageY,   4, Cpu::ldx);
    op!(t, 0xae, "LDX", Absolute,    4, Cpu::ldx);
    opp!(t, 0xbe, "LDX", AbsoluteY,  4, Cpu::ldx);
    op!(t, 0xa0, "LDY", Immediate,   2, Cpu::ldy);
    op!(t, 0xa4, "LDY", ZeroPage,    3, Cpu::ldy);
    op!(t, 0xb4, "LDY", ZeroPageX,   4, Cpu::ldy);
    op!(t, 0xac, "LDY", Absolute,    4, Cpu::ldy);
    opp!(t, 0xbc, "LDY", AbsoluteX,  4, Cpu::ldy);

    /* store */
    op!(t, 0x85, "STA", ZeroPage,    3, Cpu::sta);
    op!(t, 0x95, "STA", ZeroPageX,   4, Cpu::sta);
    op!(t, 0x8d, "STA", Absolute,    4, Cpu::sta);
    op!(t, 0x9d, "STA", AbsoluteX,   5, Cpu::sta);
    op!(t, 0x99, "STA", AbsoluteY,   5, Cpu::sta);
    op!(t, 0x81, "STA", IndirectX,   6, Cpu::sta);
    op!(t, 0x91, "STA", IndirectY,   6, Cpu::sta);
    op!(t, 0x86, "STX", ZeroPage,    3, Cpu::stx);
    op!(t, 0x96, "STX", ZeroPageY,   4, Cpu::stx);
    op!(t, 0x8e, "STX", Absolute,    4, Cpu::stx);
    op!(t, 0x84, "STY", ZeroPage,    3, Cpu::sty);
    op!(t, 0x94, "STY", ZeroPageX,   4, Cpu::sty);
    op!(t, 0x8c, "STY", Absolute,    4, Cpu::sty);

    /* transfer */
    op!(t, 0xaa, "TAX", Implied,     2, Cpu::tax);
    op!(t, 0xa8, "TAY", Implied,     2, Cpu::tay);
    op!(t, 0x8a, "TXA", Implied,     2, Cpu::txa);
    op!(t, 0x98, "TYA", Implied,     2, Cpu::tya);
    op!(t, 0xba, "TSX", Implied,     2, Cpu::tsx);
    op!(t, 0x9a, "TXS", Implied,     2, Cpu::txs);

    /* stack */
    op!(t, 0x48, "PHA", Implied,     3, Cpu::pha);
    op!(t, 0x08, "PHP", Implied,     3, Cpu::php);
    op!(t, 0x68, "PLA", Implied,     4, Cpu::pla);
    op!(t, 0x28, "PLP", Implied,     4, Cpu::plp);

    /* arithmetic */
    op!(t, 0x69, "ADC", Immediate,   2, Cpu::adc_mem);
    op!(t, 0x65, "ADC", ZeroPage,    3, Cpu::adc_mem);
    op!(t, 0x75, "ADC", ZeroPageX,   4, Cpu::adc_mem);
    op!(t, 0x6d, "ADC", Absolute,    4, Cpu::adc_mem);
    opp!(t, 0x7d, "ADC", AbsoluteX,  4, Cpu::adc_mem);
    opp!(t, 0x79, "ADC", AbsoluteY,  4, Cpu::adc_mem);
    op!(t, 0x61, "ADC", IndirectX,   6, Cpu::adc_mem);
    opp!(t, 0x71, "ADC", IndirectY,  5, Cpu::adc_mem);
    op!(t, 0xe9, "SBC", Immediate,   2, Cpu::sbc_mem);
    op!(t, 0xe5, "SBC", ZeroPage,    3, Cpu::sbc_mem);
    op!(t, 0xf5, "SBC", ZeroPageX,   4, Cpu::sbc_mem);
    op!(t, 0xed, "SBC", Absolute,    4, Cpu::sbc_mem);
    opp!(t, 0xfd, "SBC", AbsoluteX,  4, Cpu::sbc_mem);
    opp!(t, 0xf9, "SBC", AbsoluteY,  4, Cpu::sbc_mem);
    op!(t, 0xe1, "SBC", IndirectX,   6, Cpu::sbc_mem);
    opp!(t, 0xf1, "SBC", IndirectY,  5, Cpu::sbc_mem);
    op!(t, 0xc9, "CMP", Immediate,   2, Cpu::cmp);
    op!(t, 0xc5, "CMP", ZeroPage,    3, Cpu::cmp);
    op!(t, 0xd5, "CMP", ZeroPageX,   4, Cpu::cmp);
    op!(t, 0xcd, "CMP", Absolute,    4, Cpu::cmp);
    opp!(t, 0xdd, "CMP", AbsoluteX,  4, Cpu::cmp);
    opp!(t, 0xd9, "CMP", AbsoluteY,  4, Cpu::cmp);
    op!(t, 0xc1, "CMP", IndirectX,   6, Cpu::cmp);
    opp!(t, 0xd1, "CMP", IndirectY,  5, Cpu::cmp);
    op!(t, 0xe0, "CPX", Immediate,   2, Cpu::cpx);
    op!(t, 0xe4, "CPX", ZeroPage,    3, Cpu::cpx);
    op!(t, 0xec, "CPX", Absolute,    4, Cpu::cpx);
    op!(t, 0xc0, "CPY", Immediate,   2, Cpu::cpy);
    op!(t, 0xc4, "CPY", ZeroPage,    3, Cpu::cpy);
    op!(t, 0xcc, "CPY", Absolute,    4, Cpu::cpy);

    /* logic */
    op!(t, 0x29, "AND", Immediate,   2, Cpu::and);
    op!(t, 0x25, "AND", ZeroPage,    3, Cpu::and);
    op!(t, 0x35, "AND", ZeroPageX,   4, Cpu::and);
    op!(t, 0x2d, "AND", Absolute,    4, Cpu::and);
    opp!(t, 0x3d, "AND", AbsoluteX,  4, Cpu::and);
    opp!(t, 0x39, "AND", AbsoluteY,  4, Cpu::and);
    op!(t, 0x21, "AND", IndirectX,   6, Cpu::and);
    opp!(t, 0x31, "AND", IndirectY,  5, Cpu::and);
    op!(t, 0x09, "ORA", Immediate,   2, Cpu::ora);
    op!(t, 0x05, "ORA", ZeroPage,    3, Cpu::ora);
    op!(t, 0x15, "ORA", ZeroPageX,   4, Cpu::ora);
    op!(t, 0x0d, "ORA", Absolute,    4, Cpu::ora);
    opp!(t, 0x1d, "ORA", AbsoluteX,  4, Cpu::ora);
    opp!(t, 0x19, "ORA", AbsoluteY,  4, Cpu::ora);
    op!(t, 0x01, "ORA", IndirectX,   6, Cpu::ora);
    opp!(t, 0x11, "ORA", IndirectY,  5, Cpu::ora);
    op!(t, 0x49, "EOR", Immediate,   2, Cpu::eor);
    op!(t, 0x45, "EOR", ZeroPage,    3, Cpu::eor);
    op!(t, 0x55, "EOR", ZeroPageX,   4, Cpu::eor);
    op!(t, 0x4d, "EOR", Absolute,    4, Cpu::eor);
    opp!(t, 0x5d, "EOR", AbsoluteX,  4, Cpu::eor);
    opp!(t, 0x59, "EOR", AbsoluteY,  4, Cpu::eor);
    op!(t, 0x41, "EOR", IndirectX,   6, Cpu::eor);
    opp!(t, 0x51, "EOR", IndirectY,  5, Cpu::eor);
    op!(t, 0x24, "BIT", ZeroPage,    3, Cpu::bit);
    op!(t, 0x2c, "BIT", Absolute,    4, Cpu::bit);

    /* shift and rotate */
    op!(t, 0x0a, "ASL", Accumulator, 2, Cpu::asl_a);
    op!(t, 0x06, "ASL", ZeroPage,    5, Cpu::asl_mem);
    op!(t, 0x16, "ASL", ZeroPageX,   6, Cpu::asl_mem);
    op!(t, 0x0e, "ASL", Absolute,    6, Cpu::asl_mem);
    op!(t, 0x1e, "ASL", AbsoluteX,   7, Cpu::asl_mem);
    op!(t, 0x4a, "LSR", Accumulator, 2, Cpu::lsr_a);
    op!(t, 0x46, "LSR", ZeroPage,    5, Cpu::lsr_mem);
    op!(t, 0x56, "LSR", ZeroPageX,   6, Cpu::lsr_mem);
    op!(t, 0x4e, "LSR", Absolute,    6, Cpu::lsr_mem);
    op!(t, 0x5e, "LSR", AbsoluteX,   7, Cpu::lsr_mem);
    op!(t, 0x2a, "ROL", Accumulator, 2, Cpu::rol_a);
    op!(t, 0x26, "ROL", ZeroPage,    5, Cpu::rol_mem);
    op!(t, 0x36, "ROL", ZeroPageX,   6, Cpu::rol_mem);
    op!(t, 0x2e, "ROL", Absolute,    6, Cpu::rol_mem);
    op!(t, 0x3e, "ROL", AbsoluteX,   7, Cpu::rol_mem);
    op!(t, 0x6a, "ROR", Accumulator, 2, Cpu::ror_a);
    op!(t, 0x66, "ROR", ZeroPage,    5, Cpu::ror_mem);
    op!(t, 0x76, "ROR", ZeroPageX,   6, Cpu::ror_mem);
    op!(t, 0x6e, "ROR", Absolute,    6, Cpu::ror_mem);
    op!(t, 0x7e, "ROR", AbsoluteX,   7, Cpu::ror_mem);

    /* increment and decrement */
    op!(t, 0xe6, "INC", ZeroPage,    5, Cpu::inc);
    op!(t, 0xf6, "INC", ZeroPageX,   6, Cpu::inc);
    op!(t, 0xee, "INC", Absolute,    6, Cpu::inc);
    op!(t, 0xfe, "INC", AbsoluteX,   7, Cpu::inc);
    op!(t, 0xc6, "DEC", ZeroPage,    5, Cpu::dec);
    op!(t, 0xd6, "DEC", ZeroPageX,   6, Cpu::dec);
    op!(t, 0xce, "DEC", Absolute,    6, Cpu::dec);
    op!(t, 0xde, "DEC", AbsoluteX,   7, Cpu::dec);
    op!(t, 0xe8, "INX", Implied,     2, Cpu::inx);
    op!(t, 0xc8, "INY", Implied,     2, Cpu::iny);
    op!(t, 0xca, "DEX", Implied,     2, Cpu::dex);
    op!(t, 0x88, "DEY", Implied,     2, Cpu::dey);

    /* branch */
    op!(t, 0x90, "BCC", Relative,    2, Cpu::bcc);
    op!(t, 0xb0, "BCS", Relative,    2, Cpu::bcs);
    op!(t, 0xf0, "BEQ", Relative,    2, Cpu::beq);
    op!(t, 0xd0, "BNE", Relative,    2, Cpu::bne);
    op!(t, 0x30, "BMI", Relative,    2, Cpu::bmi);
    op!(t, 0x10, "BPL", Relative,    2, Cpu::bpl);
    op!(t, 0x50, "BVC", Relative,    2, Cpu::bvc);
    op!(t, 0x70, "BVS", Relative,    2, Cpu::bvs);

    /* control flow */
    op!(t, 0x4c, "JMP", Absolute,         3, Cpu::jmp);
    op!(t, 0x6c, "JMP", AbsoluteIndirect, 5, Cpu::jmp);
    op!(t, 0x20, "JSR", Absolute,         6, Cpu::jsr);
    op!(t, 0x60, "RTS", Implied,          6, Cpu::rts);
    op!(t, 0x40, "RTI", Implied,          6, Cpu::rti);
    op!(t, 0x00, "BRK", Implied,          7, Cpu::brk);
    op!(t, 0xea, "NOP", Implied,          2, Cpu::nop);

    /* flag manipulation */
    op!(t, 0x18, "CLC", Implied,     2, Cpu::clc);
    op!(t, 0x38, "SEC", Implied,     2, Cpu::sec);
    op!(t, 0x58, "CLI", Implied,     2, Cpu::cli);
    op!(t, 0x78, "SEI", Implied,     2, Cpu::sei);
    op!(t, 0xb8, "CLV", Implied,     2, Cpu::clv);
    op!(t, 0xd8, "CLD", Implied,     2, Cpu::cld);
    op!(t, 0xf8, "SED", Implied,     2, Cpu::sed);

    t
}

impl Cpu {
    /* load and store */

    fn lda(&mut self, r: Resolved) {
        self.a = self.memory.get(r.addr);
        self.nz(self.a);
    }

    fn ldx(&mut self, r: Resolved) {
        self.x = self.memory.get(r.addr);
        self.nz(self.x);
    }

    fn ldy(&mut self, r: Resolved) {
        self.y = self.memory.get(r.addr);
        self.nz(self.y);
    }

    fn sta(&mut self, r: Resolved) {
        self.memory.set(r.addr, self.a);
    }

    fn stx(&mut self, r: Resolved) {
        self.memory.set(r.addr, self.x);
    }

    fn sty(&mut self, r: Resolved) {
        self.memory.set(r.addr, self.y);
    }

    /* transfer */

    fn tax(&mut self, _r: Resolved) {
        self.x = self.a;
        self.nz(self.x);
    }

    fn tay(&mut self, _r: Resolved) {
        self.y = self.a;
        self.nz(self.y);
    }

    fn txa(&mut self, _r: Resolved) {
        self.a = self.x;
        self.nz(self.a);
    }

    fn tya(&mut self, _r: Resolved) {
        self.a = self.y;
        self.nz(self.a);
    }

    fn tsx(&mut self, _r: Resolved) {
        self.x = self.s;
        self.nz(self.x);
    }

    // the one transfer that leaves the flags alone
    fn txs(&mut self, _r: Resolved) {
        self.s = self.x;
    }

    /* stack */

    fn pha(&mut self, _r: Resolved) {
        self.push_u8(self.a);
    }

    fn php(&mut self, _r: Resolved) {
        self.push_u8((self.flags | Flags::B | Flags::X).bits());
    }

    fn pla(&mut self, _r: Resolved) {
        self.a = self.pop_u8();
        self.nz(self.a);
    }

    fn plp(&mut self, _r: Resolved) {
        let p = self.pop_u8();
        self.flags = Flags::from_bits_retain(p) | Flags::X;
    }

    /* arithmetic */

    fn adc_mem(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        self.adc(v);
    }

    fn sbc_mem(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        self.sbc(v);
    }

    fn cmp(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        self.compare(self.a, v);
    }

    fn cpx(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        self.compare(self.x, v);
    }

    fn cpy(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        self.compare(self.y, v);
    }

    /* logic */

    fn and(&mut self, r: Resolved) {
        self.a &= self.memory.get(r.addr);
        self.nz(self.a);
    }

    fn ora(&mut self, r: Resolved) {
        self.a |= self.memory.get(r.addr);
        self.nz(self.a);
    }

    fn eor(&mut self, r: Resolved) {
        self.a ^= self.memory.get(r.addr);
        self.nz(self.a);
    }

    fn bit(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        self.bit_test(v);
    }

    /* shift and rotate */

    fn asl_a(&mut self, _r: Resolved) {
        self.a = self.asl(self.a);
    }

    fn asl_mem(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        let v = self.asl(v);
        self.memory.set(r.addr, v);
    }

    fn lsr_a(&mut self, _r: Resolved) {
        self.a = self.lsr(self.a);
    }

    fn lsr_mem(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        let v = self.lsr(v);
        self.memory.set(r.addr, v);
    }

    fn rol_a(&mut self, _r: Resolved) {
        self.a = self.rol(self.a);
    }

    fn rol_mem(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        let v = self.rol(v);
        self.memory.set(r.addr, v);
    }

    fn ror_a(&mut self, _r: Resolved) {
        self.a = self.ror(self.a);
    }

    fn ror_mem(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr);
        let v = self.ror(v);
        self.memory.set(r.addr, v);
    }

    /* increment and decrement */

    fn inc(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr).wrapping_add(1);
        self.memory.set(r.addr, v);
        self.nz(v);
    }

    fn dec(&mut self, r: Resolved) {
        let v = self.memory.get(r.addr).wrapping_sub(1);
        self.memory.set(r.addr, v);
        self.nz(v);
    }

    fn inx(&mut self, _r: Resolved) {
        self.x = self.x.wrapping_add(1);
        self.nz(self.x);
    }

    fn iny(&mut self, _r: Resolved) {
        self.y = self.y.wrapping_add(1);
        self.nz(self.y);
    }

    fn dex(&mut self, _r: Resolved) {
        self.x = self.x.wrapping_sub(1);
        self.nz(self.x);
    }

    fn dey(&mut self, _r: Resolved) {
        self.y = self.y.wrapping_sub(1);
        self.nz(self.y);
    }

    /* branch */

    /// Every taken branch costs +1 cycle, +1 more when the target is on
    /// another page. Not-taken branches stay at the base cost.
    fn branch(&mut self, cond: bool, r: Resolved) {
        if !cond {
            return;
        }
        self.pc = r.addr;
        self.cycles += 1;
        if r.page_crossed {
            self.cycles += 1;
        }
    }

    fn bcc(&mut self, r: Resolved) {
        self.branch(!self.flags.contains(Flags::C), r);
    }

    fn bcs(&mut self, r: Resolved) {
        self.branch(self.flags.contains(Flags::C), r);
    }

    fn beq(&mut self, r: Resolved) {
        self.branch(self.flags.contains(Flags::Z), r);
    }

    fn bne(&mut self, r: Resolved) {
        self.branch(!self.flags.contains(Flags::Z), r);
    }

    fn bmi(&mut self, r: Resolved) {
        self.branch(self.flags.contains(Flags::N), r);
    }

    fn bpl(&mut self, r: Resolved) {
        self.branch(!self.flags.contains(Flags::N), r);
    }

    fn bvc(&mut self, r: Resolved) {
        self.branch(!self.flags.contains(Flags::V), r);
    }

    fn bvs(&mut self, r: Resolved) {
        self.branch(self.flags.contains(Flags::V), r);
    }

    /* control flow */

    fn jmp(&mut self, r: Resolved) {
        self.pc = r.addr;
    }

    // PC already points past the operand, so the pushed return address is
    // one short; RTS adds it back.
    fn jsr(&mut self, r: Resolved) {
        self.push_u16(self.pc.wrapping_sub(1));
        self.pc = r.addr;
    }

    fn rts(&mut self, _r: Resolved) {
        self.pc = self.pop_u16().wrapping_add(1);
    }

    fn rti(&mut self, _r: Resolved) {
        let p = self.pop_u8();
        self.flags = Flags::from_bits_retain(p) | Flags::X;
        self.pc = self.pop_u16();
    }

    fn brk(&mut self, _r: Resolved) {
        self.pc = self.pc.wrapping_add(1);
        self.push_u16(self.pc);
        self.push_u8((self.flags | Flags::B | Flags::X).bits());
        self.set_flag(Flags::I, true);
        self.pc = self.memory.get_u16(INTV_ADDR);
    }

    fn nop(&mut self, _r: Resolved) {}

    /* flag manipulation */

    fn clc(&mut self, _r: Resolved) {
        self.set_flag(Flags::C, false);
    }

    fn sec(&mut self, _r: Resolved) {
        self.set_flag(Flags::C, true);
    }

    fn cli(&mut self, _r: Resolved) {
        self.set_flag(Flags::I, false);
    }

    fn sei(&mut self, _r: Resolved) {
        self.set_flag(Flags::I, true);
    }

    fn clv(&mut self, _r: Resolved) {
        self.set_flag(Flags::V, false);
    }

    fn cld(&mut self, _r: Resolved) {
        self.set_flag(Flags::D, false);
    }

    fn sed(&mut self, _r: Resolved) {
        self.set_flag(Flags::D, true);
    }
}
