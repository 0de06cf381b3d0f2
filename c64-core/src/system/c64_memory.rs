//! C64 memory system with bank switching.
//!
//! The C64 has a complex memory architecture where multiple ROMs, RAM,
//! and I/O devices are mapped to overlapping address ranges. The 6510
//! CPU's I/O port ($00-$01) controls which components are visible.
//!
//! Memory Map:
//! - $0000-$0001: 6510 I/O port
//! - $0002-$9FFF: RAM (always)
//! - $A000-$BFFF: BASIC ROM or RAM
//! - $C000-$CFFF: RAM (always)
//! - $D000-$DFFF: I/O, Character ROM, or RAM
//! - $E000-$FFFF: KERNAL ROM or RAM

use super::keyboard::Keyboard;
use crate::devices::{Cia6526, ColorRam, Device, Port6510, SidStub, VicBankView, VicII};
use mos6502::MemoryBus;

/// C64 I/O area start address.
const IO_START: u16 = 0xD000;
/// C64 I/O area end address (inclusive).
const IO_END: u16 = 0xDFFF;
/// BASIC ROM start address.
const BASIC_START: u16 = 0xA000;
/// BASIC ROM end address (inclusive).
const BASIC_END: u16 = 0xBFFF;
/// KERNAL ROM start address.
const KERNAL_START: u16 = 0xE000;

/// C64 memory system implementing bank switching.
pub struct C64Memory {
    /// 64KB main RAM.
    ram: Box<[u8; 65536]>,

    /// BASIC ROM (8KB at $A000-$BFFF).
    basic_rom: Box<[u8; 8192]>,
    /// KERNAL ROM (8KB at $E000-$FFFF).
    kernal_rom: Box<[u8; 8192]>,
    /// Character ROM (4KB at $D000-$DFFF when visible).
    char_rom: Box<[u8; 4096]>,

    /// 6510 I/O port (bank switching control).
    pub port: Port6510,

    /// VIC-II video chip.
    pub vic: VicII,
    /// SID register-file stub (no audio synthesis, §4.2.1).
    pub sid: SidStub,
    /// CIA1 (keyboard matrix, IRQ).
    pub cia1: Cia6526,
    /// CIA2 (VIC bank select, NMI).
    pub cia2: Cia6526,
    /// Color RAM.
    pub color_ram: ColorRam,

    /// Keyboard matrix.
    pub keyboard: Keyboard,

    /// ROMs loaded flag.
    roms_loaded: bool,
}

impl C64Memory {
    /// Create a new C64 memory system with empty ROMs.
    pub fn new() -> Self {
        let mut ram = Box::new([0u8; 65536]);
        ram[0x00] = 0x2F; // DDR default
        ram[0x01] = 0x37; // Port default

        Self {
            ram,
            basic_rom: Box::new([0; 8192]),
            kernal_rom: Box::new([0; 8192]),
            char_rom: Box::new([0; 4096]),
            port: Port6510::new(),
            vic: VicII::new(),
            sid: SidStub::new(),
            cia1: Cia6526::new_cia1(),
            cia2: Cia6526::new_cia2(),
            color_ram: ColorRam::new(),
            keyboard: Keyboard::new(),
            roms_loaded: false,
        }
    }

    /// Load ROMs into memory.
    ///
    /// # Returns
    /// `Ok(())` if ROMs are valid sizes, `Err` with message otherwise.
    pub fn load_roms(&mut self, basic: &[u8], kernal: &[u8], charrom: &[u8]) -> Result<(), String> {
        if basic.len() != 8192 {
            return Err(format!("BASIC ROM must be 8192 bytes, got {}", basic.len()));
        }
        if kernal.len() != 8192 {
            return Err(format!("KERNAL ROM must be 8192 bytes, got {}", kernal.len()));
        }
        if charrom.len() != 4096 {
            return Err(format!(
                "Character ROM must be 4096 bytes, got {}",
                charrom.len()
            ));
        }

        self.basic_rom.copy_from_slice(basic);
        self.kernal_rom.copy_from_slice(kernal);
        self.char_rom.copy_from_slice(charrom);
        self.roms_loaded = true;

        Ok(())
    }

    pub fn roms_loaded(&self) -> bool {
        self.roms_loaded
    }

    pub fn load_kernal(&mut self, data: &[u8]) {
        self.kernal_rom.copy_from_slice(data);
        self.update_roms_loaded();
    }

    pub fn load_basic(&mut self, data: &[u8]) {
        self.basic_rom.copy_from_slice(data);
        self.update_roms_loaded();
    }

    pub fn load_charrom(&mut self, data: &[u8]) {
        self.char_rom.copy_from_slice(data);
        self.update_roms_loaded();
    }

    fn update_roms_loaded(&mut self) {
        let kernal_loaded = self.kernal_rom.iter().any(|&b| b != 0);
        let basic_loaded = self.basic_rom.iter().any(|&b| b != 0);
        let char_loaded = self.char_rom.iter().any(|&b| b != 0);
        self.roms_loaded = kernal_loaded && basic_loaded && char_loaded;
    }

    /// Get the current VIC-II bank (0-3), per CIA2 port A bits 0-1.
    pub fn vic_bank(&self) -> u8 {
        self.cia2.vic_bank()
    }

    /// Raw character ROM bytes, independent of bank switching.
    pub fn char_rom(&self) -> &[u8; 4096] {
        &self.char_rom
    }

    /// Advance CIA timers and the VIC-II rasterizer by the cycles an
    /// instruction just consumed, then service keyboard-matrix reads.
    pub fn tick(&mut self, total_cycles: u64, cycles_consumed: u32) {
        for _ in 0..cycles_consumed {
            self.cia1.clock();
            self.cia2.clock();
        }
        let bank = self.cia2.vic_bank();
        // Destructure to borrow `vic` mutably and the RAM/ROM fields it
        // reads immutably at the same time; these are disjoint fields so
        // the borrow checker allows it without a back-reference to `self`.
        let Self {
            vic,
            ram,
            char_rom,
            color_ram,
            ..
        } = self;
        let view = BorrowedVicView {
            ram: &**ram,
            char_rom: &**char_rom,
            color_ram: &*color_ram,
            bank,
        };
        vic.refresh(total_cycles, &view, bank);
    }

    /// Reset memory to power-on state (preserving ROMs).
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.ram[0x00] = 0x2F;
        self.ram[0x01] = 0x37;

        self.port = Port6510::new();
        self.vic.reset();
        self.sid.reset();
        self.cia1.reset();
        self.cia2.reset();
        self.color_ram.reset();
        self.keyboard.release_all();
    }

    #[inline]
    fn io_offset(&self, addr: u16) -> u16 {
        addr & 0x00FF
    }
}

/// A disjoint borrow of the RAM/ROM/color-RAM fields `VicII::refresh` reads,
/// letting it see C64Memory's sibling fields without owning or borrowing
/// `C64Memory` itself.
struct BorrowedVicView<'a> {
    ram: &'a [u8; 65536],
    char_rom: &'a [u8; 4096],
    color_ram: &'a ColorRam,
    bank: u8,
}

impl VicBankView for BorrowedVicView<'_> {
    fn vic_read(&self, offset: u16) -> u8 {
        let physical = ((self.bank as u16) << 14) | (offset & 0x3FFF);
        self.ram[physical as usize]
    }

    fn char_rom_read(&self, offset: u16) -> u8 {
        self.char_rom[(offset & 0x0FFF) as usize]
    }

    fn color_ram_nibble(&self, offset: u16) -> u8 {
        self.color_ram.get(offset as usize)
    }
}

impl Default for C64Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for C64Memory {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x0001 => self.port.read(addr),

            0x0002..=0x9FFF | 0xC000..=0xCFFF => self.ram[addr as usize],

            BASIC_START..=BASIC_END => {
                if self.port.basic_visible() {
                    self.basic_rom[(addr - BASIC_START) as usize]
                } else {
                    self.ram[addr as usize]
                }
            }

            IO_START..=IO_END => {
                if self.port.io_visible() {
                    match addr {
                        0xD000..=0xD3FF => self.vic.read(self.io_offset(addr) & 0x3F),
                        0xD400..=0xD7FF => self.sid.read(self.io_offset(addr) & 0x1F),
                        0xD800..=0xDBFF => self.color_ram.read(addr - 0xD800),
                        0xDC00..=0xDCFF => {
                            let offset = self.io_offset(addr) & 0x0F;
                            if offset == 0x01 {
                                let col_select = self.cia1.port_a.output();
                                let kb_rows = self.keyboard.scan(col_select);
                                let combined = self.cia1.external_b & kb_rows;
                                self.cia1.port_b.read(combined)
                            } else {
                                self.cia1.read(self.io_offset(addr))
                            }
                        }
                        0xDD00..=0xDDFF => self.cia2.read(self.io_offset(addr)),
                        0xDE00..=0xDFFF => {
                            log::warn!("read from unmapped I/O expansion address ${addr:04X}");
                            0xFF
                        }
                        _ => unreachable!(),
                    }
                } else if self.port.char_rom_visible() {
                    self.char_rom[(addr - IO_START) as usize]
                } else {
                    self.ram[addr as usize]
                }
            }

            KERNAL_START..=0xFFFF => {
                if self.port.kernal_visible() {
                    self.kernal_rom[(addr - KERNAL_START) as usize]
                } else {
                    self.ram[addr as usize]
                }
            }
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x0001 => {
                self.port.write(addr, value);
                self.ram[addr as usize] = value;
            }

            0x0002..=0x9FFF | 0xC000..=0xCFFF => {
                self.ram[addr as usize] = value;
            }

            BASIC_START..=BASIC_END => {
                self.ram[addr as usize] = value;
            }

            IO_START..=IO_END => {
                if self.port.io_visible() {
                    match addr {
                        0xD000..=0xD3FF => self.vic.write(self.io_offset(addr) & 0x3F, value),
                        0xD400..=0xD7FF => self.sid.write(self.io_offset(addr) & 0x1F, value),
                        0xD800..=0xDBFF => self.color_ram.write(addr - 0xD800, value),
                        0xDC00..=0xDCFF => self.cia1.write(self.io_offset(addr), value),
                        0xDD00..=0xDDFF => self.cia2.write(self.io_offset(addr), value),
                        0xDE00..=0xDFFF => {
                            log::warn!("write to unmapped I/O expansion address ${addr:04X}");
                        }
                        _ => unreachable!(),
                    }
                } else {
                    self.ram[addr as usize] = value;
                }
            }

            KERNAL_START..=0xFFFF => {
                self.ram[addr as usize] = value;
            }
        }
    }
}

impl C64Memory {
    /// Whether CIA1 or the VIC-II currently assert the IRQ line.
    pub fn irq_active(&self) -> bool {
        self.cia1.has_interrupt() || self.vic.has_interrupt()
    }

    /// Whether CIA2 currently asserts the NMI line.
    pub fn nmi_active(&self) -> bool {
        self.cia2.has_interrupt()
    }
}
