pub const MEM_MAX: u16 = 0xffff;
pub const MEM_LEN: usize = MEM_MAX as usize + 1;

/* push/pop never leaves page 1 */
pub const STACK_BASE: u16 = 0x0100;
pub const STACK_RESET: u8 = 0xfd;

pub const NMIV_ADDR: u16 = 0xfffa;
pub const RESV_ADDR: u16 = 0xfffc;
pub const INTV_ADDR: u16 = 0xfffe;

pub const IRQ_TICKS: u64 = 7;
pub const NMI_TICKS: u64 = 8;
pub const UNIMPLEMENTED_TICKS: u64 = 2;
