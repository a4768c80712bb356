use crate::consts::*;
use serde::{Deserialize, Serialize};

/// Flat 64KB byte store. Addresses are `u16`, so every access is in range
/// by construction; word reads wrap at the top of the address space.
#[derive(Clone, Serialize, Deserialize)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            data: vec![0; MEM_LEN],
        }
    }

    #[must_use]
    pub fn get(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    pub fn set(&mut self, addr: u16, data: u8) {
        self.data[addr as usize] = data;
    }

    /// Little-endian word read. `addr` 0xFFFF takes its high byte from 0x0000.
    #[must_use]
    pub fn get_u16(&self, addr: u16) -> u16 {
        let low = self.get(addr);
        let high = self.get(addr.wrapping_add(1));
        u16::from(high) << 8 | u16::from(low)
    }

    pub fn fill(&mut self, v: u8) {
        self.data.fill(v);
    }

    /// Copies `buf` starting at `dest`, wrapping past 0xFFFF back to 0x0000.
    pub fn load(&mut self, dest: u16, buf: &[u8]) {
        let mut addr = dest;
        for &b in buf {
            self.data[addr as usize] = b;
            addr = addr.wrapping_add(1);
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_read_wraps_at_top() {
        let mut m = Memory::new();
        m.set(0xffff, 0x34);
        m.set(0x0000, 0x12);
        assert_eq!(m.get_u16(0xffff), 0x1234);
    }

    #[test]
    fn load_wraps_at_top() {
        let mut m = Memory::new();
        m.load(0xfffe, &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(m.get(0xfffe), 0x01);
        assert_eq!(m.get(0xffff), 0x02);
        assert_eq!(m.get(0x0000), 0x03);
        assert_eq!(m.get(0x0001), 0x04);
    }

    #[test]
    fn fill_covers_whole_space() {
        let mut m = Memory::new();
        m.fill(0xa5);
        assert_eq!(m.get(0x0000), 0xa5);
        assert_eq!(m.get(0xffff), 0xa5);
        assert!(m.as_slice().iter().all(|&b| b == 0xa5));
    }
}
