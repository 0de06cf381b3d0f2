//! C64 system orchestration and timing.
//!
//! This module provides the top-level `Machine` struct that coordinates
//! CPU execution, VIC-II rasterizing, and CIA timing into a single
//! PAL-clocked frame loop. NTSC and SID audio are out of scope; the only
//! region modeled is PAL (985,248 Hz, 312 scanlines, 63 cycles/line).

use super::keyboard::keys;
use super::C64Memory;
use mos6502::{CPU, MemoryBus, OPCODE_TABLE};
use thiserror::Error;

/// PAL CPU clock frequency in Hz.
pub const CLOCK_HZ: u32 = 985_248;
/// PAL scanlines per frame.
pub const SCANLINES_PER_FRAME: u16 = 312;
/// PAL CPU cycles per scanline.
pub const CYCLES_PER_LINE: u16 = 63;
/// PAL CPU cycles per frame.
pub const CYCLES_PER_FRAME: u32 = SCANLINES_PER_FRAME as u32 * CYCLES_PER_LINE as u32;

/// Errors raised while loading ROM or program images into a `Machine`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A KERNAL, BASIC, or character ROM image was the wrong size.
    #[error("{name} ROM must be {expected} bytes, got {actual}")]
    WrongSize {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A `.prg` image was too short to contain a load address.
    #[error("PRG image must contain at least a 2-byte load address, got {actual} bytes")]
    PrgTooShort { actual: usize },
}

/// Commodore 64 emulator system.
///
/// This is the main entry point for C64 emulation: it owns the CPU and its
/// memory-mapped devices and coordinates their timing frame by frame.
pub struct Machine {
    cpu: CPU<C64Memory>,
    cycle_in_scanline: u16,
    frame_count: u64,
    running: bool,
}

impl Machine {
    /// Create a new, unreset C64 system with empty ROMs.
    pub fn new() -> Self {
        let memory = C64Memory::new();
        let cpu = CPU::new(memory);

        Self {
            cpu,
            cycle_in_scanline: 0,
            frame_count: 0,
            running: false,
        }
    }

    /// Load the three mask ROM images required to boot.
    pub fn load_roms(&mut self, basic: &[u8], kernal: &[u8], charrom: &[u8]) -> Result<(), ConfigError> {
        if basic.len() != 8192 {
            return Err(ConfigError::WrongSize {
                name: "BASIC",
                expected: 8192,
                actual: basic.len(),
            });
        }
        if kernal.len() != 8192 {
            return Err(ConfigError::WrongSize {
                name: "KERNAL",
                expected: 8192,
                actual: kernal.len(),
            });
        }
        if charrom.len() != 4096 {
            return Err(ConfigError::WrongSize {
                name: "character",
                expected: 4096,
                actual: charrom.len(),
            });
        }
        self.cpu
            .memory_mut()
            .load_roms(basic, kernal, charrom)
            .expect("sizes already validated above");
        Ok(())
    }

    /// Whether all three ROMs have been loaded.
    pub fn roms_loaded(&self) -> bool {
        self.cpu.memory().roms_loaded()
    }

    /// Reset the C64 to power-on state (ROM contents are preserved).
    pub fn reset(&mut self) {
        self.cpu.memory_mut().reset();
        self.cpu.reset();
        self.cycle_in_scanline = 0;
        self.running = true;
    }

    /// Execute one full frame of emulation (19656 PAL cycles).
    ///
    /// Steps CPU instructions until the frame's cycle budget is spent,
    /// rasterizing the VIC-II and clocking the CIAs as each instruction
    /// consumes cycles, and servicing IRQ/NMI between instructions.
    ///
    /// Returns the number of CPU cycles actually executed.
    pub fn step_frame(&mut self) -> u32 {
        if !self.running {
            return 0;
        }

        let mut cycles_remaining = CYCLES_PER_FRAME as i64;
        let mut total_cycles = 0u32;

        while cycles_remaining > 0 {
            let cycles = self.step_instruction();
            cycles_remaining -= cycles as i64;
            total_cycles += cycles;
        }

        self.frame_count += 1;
        total_cycles
    }

    /// Execute a single CPU instruction, advancing devices and servicing
    /// any pending interrupt before the next fetch. Returns cycles consumed.
    fn step_instruction(&mut self) -> u32 {
        let cycles_before = self.cpu.cycles();
        let pc = self.cpu.pc();
        let opcode = self.cpu.memory().read(pc);
        let base_cycles = OPCODE_TABLE[opcode as usize].base_cycles as u32;

        if self.cpu.step().is_err() {
            log::warn!("unimplemented opcode ${opcode:02X} at ${pc:04X}");
        }

        let cycles = (self.cpu.cycles() - cycles_before) as u32;
        let cycles = if cycles == 0 { base_cycles.max(1) } else { cycles };

        let total_cycles = self.cpu.cycles();
        self.cpu.memory_mut().tick(total_cycles, cycles);

        self.cycle_in_scanline += cycles as u16;
        while self.cycle_in_scanline >= CYCLES_PER_LINE {
            self.cycle_in_scanline -= CYCLES_PER_LINE;
        }

        if self.cpu.memory().irq_active() {
            self.cpu.irq();
        }
        if self.cpu.memory().nmi_active() {
            self.cpu.nmi();
        }

        cycles
    }

    /// Frame count since the last reset.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the emulator is currently running frames.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// The rendered PAL framebuffer (405x284 visible window).
    pub fn framebuffer(&self) -> &[[u8; crate::devices::FRAME_WIDTH]; crate::devices::FRAME_HEIGHT] {
        self.cpu.memory().vic.framebuffer()
    }

    /// Press a key on the 8x8 keyboard matrix.
    pub fn key_down(&mut self, row: u8, col: u8) {
        self.cpu.memory_mut().keyboard.key_down(row, col);
    }

    /// Release a key on the 8x8 keyboard matrix.
    pub fn key_up(&mut self, row: u8, col: u8) {
        self.cpu.memory_mut().keyboard.key_up(row, col);
    }

    /// Trigger the RESTORE key, which drives the CPU's NMI line directly
    /// rather than going through a CIA.
    pub fn restore_key(&mut self) {
        self.cpu.nmi();
    }

    /// Whether the RUN/STOP key's matrix position is currently held; a
    /// convenience over `key_down`/`key_up` for the one key most host
    /// front-ends wire to a dedicated button.
    pub fn run_stop_down(&mut self) {
        self.key_down(keys::RUN_STOP.0, keys::RUN_STOP.1);
    }

    pub fn run_stop_up(&mut self) {
        self.key_up(keys::RUN_STOP.0, keys::RUN_STOP.1);
    }

    pub fn cpu(&self) -> &CPU<C64Memory> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU<C64Memory> {
        &mut self.cpu
    }

    pub fn memory(&self) -> &C64Memory {
        self.cpu.memory()
    }

    pub fn memory_mut(&mut self) -> &mut C64Memory {
        self.cpu.memory_mut()
    }

    pub fn load_kernal(&mut self, data: &[u8]) -> Result<(), ConfigError> {
        if data.len() != 8192 {
            return Err(ConfigError::WrongSize {
                name: "KERNAL",
                expected: 8192,
                actual: data.len(),
            });
        }
        self.cpu.memory_mut().load_kernal(data);
        Ok(())
    }

    pub fn load_basic(&mut self, data: &[u8]) -> Result<(), ConfigError> {
        if data.len() != 8192 {
            return Err(ConfigError::WrongSize {
                name: "BASIC",
                expected: 8192,
                actual: data.len(),
            });
        }
        self.cpu.memory_mut().load_basic(data);
        Ok(())
    }

    pub fn load_charrom(&mut self, data: &[u8]) -> Result<(), ConfigError> {
        if data.len() != 4096 {
            return Err(ConfigError::WrongSize {
                name: "character",
                expected: 4096,
                actual: data.len(),
            });
        }
        self.cpu.memory_mut().load_charrom(data);
        Ok(())
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Load a `.prg` image (2-byte little-endian load address followed by
    /// raw bytes) into memory. Returns the load address.
    pub fn load_prg(&mut self, data: &[u8]) -> Result<u16, ConfigError> {
        if data.len() < 2 {
            return Err(ConfigError::PrgTooShort { actual: data.len() });
        }
        let load_addr = (data[0] as u16) | ((data[1] as u16) << 8);
        let mem = self.cpu.memory_mut();
        for (i, &byte) in data[2..].iter().enumerate() {
            let addr = load_addr.wrapping_add(i as u16);
            mem.write(addr, byte);
        }
        Ok(load_addr)
    }

    pub fn peek(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    pub fn poke(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
