use super::{Cpu, Flags};

/// Arithmetic and logic helpers shared by the instruction executors.
/// Each one owns its full flag contract; callers never patch flags up
/// afterwards. Decimal mode is intentionally not consulted: the D flag
/// is state-only on this core.
impl Cpu {
    pub(crate) fn adc(&mut self, val: u8) {
        let carry = u16::from(self.flags.contains(Flags::C));
        let sum = u16::from(self.a) + u16::from(val) + carry;
        self.set_flag(Flags::C, sum & 0xff00 != 0);
        // overflow: both operands share a sign the result does not
        self.set_flag(Flags::V, !(self.a ^ val) & (self.a ^ sum as u8) & 0x80 != 0);
        self.a = sum as u8;
        self.nz(self.a);
    }

    pub(crate) fn sbc(&mut self, val: u8) {
        let borrow = u16::from(!self.flags.contains(Flags::C));
        let diff = u16::from(self.a)
            .wrapping_sub(u16::from(val))
            .wrapping_sub(borrow);
        self.set_flag(Flags::C, diff & 0xff00 == 0);
        self.set_flag(Flags::V, (self.a ^ val) & (self.a ^ diff as u8) & 0x80 != 0);
        self.a = diff as u8;
        self.nz(self.a);
    }

    pub(crate) fn compare(&mut self, r: u8, v: u8) {
        let t = u16::from(r).wrapping_sub(u16::from(v));
        self.nz(t as u8);
        self.set_flag(Flags::C, t & 0xff00 == 0);
    }

    pub(crate) fn bit_test(&mut self, v: u8) {
        self.set_flag(Flags::Z, self.a & v == 0);
        self.set_flag(Flags::N, v & 0x80 != 0);
        self.set_flag(Flags::V, v & 0x40 != 0);
    }

    pub(crate) fn asl(&mut self, v: u8) -> u8 {
        self.set_flag(Flags::C, v & 0x80 != 0);
        let r = v << 1;
        self.nz(r);
        r
    }

    pub(crate) fn lsr(&mut self, v: u8) -> u8 {
        self.set_flag(Flags::C, v & 0x01 != 0);
        let r = v >> 1;
        self.nz(r);
        r
    }

    pub(crate) fn rol(&mut self, v: u8) -> u8 {
        let carry = self.flags.contains(Flags::C);
        self.set_flag(Flags::C, v & 0x80 != 0);
        let mut r = v << 1;
        if carry {
            r |= 0x01;
        }
        self.nz(r);
        r
    }

    pub(crate) fn ror(&mut self, v: u8) -> u8 {
        let carry = self.flags.contains(Flags::C);
        self.set_flag(Flags::C, v & 0x01 != 0);
        let mut r = v >> 1;
        if carry {
            r |= 0x80;
        }
        self.nz(r);
        r
    }
}
