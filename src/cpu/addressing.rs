use super::Cpu;

/// How an instruction's operand bytes are turned into an effective address.
///
/// Operand widths: 0 bytes for `Implied`/`Accumulator`, 2 bytes for the
/// `Absolute*` family and `AbsoluteIndirect`, 1 byte for everything else.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// #$nn, the operand byte itself is the value.
    Immediate,
    /// $nn
    ZeroPage,
    /// $nn,X; the sum wraps within the zero page.
    ZeroPageX,
    /// $nn,Y; the sum wraps within the zero page.
    ZeroPageY,
    /// $nnnn
    Absolute,
    /// $nnnn,X
    AbsoluteX,
    /// $nnnn,Y
    AbsoluteY,
    /// ($nnnn), JMP only. A pointer ending in 0xFF takes its high byte
    /// from the start of the same page, the documented NMOS wrap defect.
    AbsoluteIndirect,
    /// ($nn,X)
    IndirectX,
    /// ($nn),Y
    IndirectY,
    /// Signed 8-bit branch offset from the post-operand PC.
    Relative,
    /// Shift/rotate directly on the accumulator.
    Accumulator,
    /// No operand.
    Implied,
}

/// Effective address plus the page-boundary indicator the dispatcher uses
/// for cycle penalties. `addr` is a placeholder 0 for `Accumulator` and
/// `Implied` and must not be dereferenced by those executors.
#[derive(Copy, Clone, Debug)]
pub struct Resolved {
    pub addr: u16,
    pub page_crossed: bool,
}

impl Resolved {
    fn at(addr: u16) -> Resolved {
        Resolved {
            addr,
            page_crossed: false,
        }
    }
}

fn crossed(from: u16, to: u16) -> bool {
    from & 0xff00 != to & 0xff00
}

impl Cpu {
    /// Consumes the operand bytes at PC and computes the effective address.
    /// Advances PC by the operand width; never touches flags or cycles.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Resolved {
        match mode {
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                Resolved::at(addr)
            }
            AddressingMode::ZeroPage => {
                let addr = u16::from(self.fetch_u8());
                Resolved::at(addr)
            }
            AddressingMode::ZeroPageX => {
                let base = self.fetch_u8();
                Resolved::at(u16::from(base.wrapping_add(self.x)))
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_u8();
                Resolved::at(u16::from(base.wrapping_add(self.y)))
            }
            AddressingMode::Absolute => {
                let addr = self.fetch_u16();
                Resolved::at(addr)
            }
            AddressingMode::AbsoluteX => {
                let base = self.fetch_u16();
                let addr = base.wrapping_add(u16::from(self.x));
                Resolved {
                    addr,
                    page_crossed: crossed(base, addr),
                }
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_u16();
                let addr = base.wrapping_add(u16::from(self.y));
                Resolved {
                    addr,
                    page_crossed: crossed(base, addr),
                }
            }
            AddressingMode::AbsoluteIndirect => {
                let ptr = self.fetch_u16();
                let low = self.memory.get(ptr);
                // high byte comes from the same page as the pointer
                let high = self.memory.get(ptr & 0xff00 | ptr.wrapping_add(1) & 0x00ff);
                Resolved::at(u16::from(high) << 8 | u16::from(low))
            }
            AddressingMode::IndirectX => {
                let ptr = self.fetch_u8().wrapping_add(self.x);
                let low = self.memory.get(u16::from(ptr));
                let high = self.memory.get(u16::from(ptr.wrapping_add(1)));
                Resolved::at(u16::from(high) << 8 | u16::from(low))
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_u8();
                let low = self.memory.get(u16::from(zp));
                let high = self.memory.get(u16::from(zp.wrapping_add(1)));
                let base = u16::from(high) << 8 | u16::from(low);
                let addr = base.wrapping_add(u16::from(self.y));
                Resolved {
                    addr,
                    page_crossed: crossed(base, addr),
                }
            }
            AddressingMode::Relative => {
                let offset = i16::from(self.fetch_u8() as i8);
                let addr = self.pc.wrapping_add(offset as u16);
                Resolved {
                    addr,
                    page_crossed: crossed(self.pc, addr),
                }
            }
            AddressingMode::Accumulator | AddressingMode::Implied => Resolved::at(0),
        }
    }
}
