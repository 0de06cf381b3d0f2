//! # Commodore 64 Emulator Core
//!
//! A Commodore 64 emulator core built on the mos6502 CPU, modeling the
//! MOS 6510 CPU, the bank-switched memory map, the VIC-II video chip
//! (text mode and bitmap/multicolor bitmap mode, 8 sprites), and the two
//! CIA 6526 I/O chips (keyboard matrix scanning, interval timers,
//! interrupt signaling). SID is represented by a register-latch stub with
//! no audio synthesis; the 1541 disk drive, cartridges, save states, and
//! NTSC timing are out of scope.
//!
//! ## Architecture
//!
//! The C64's custom hardware is modeled as memory-mapped devices
//! implementing this crate's own offset-relative `Device` trait:
//!
//! - **VIC-II** (MOS 6569): video chip with sprites, graphics modes, raster interrupts
//! - **SID** (MOS 6581): register file stub, no synthesis
//! - **CIA** (MOS 6526): timer/I/O chips for keyboard matrix scanning and VIC bank select
//! - **Port 6510**: CPU I/O port for memory bank switching
//! - **Color RAM**: 1KB of 4-bit color memory
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use c64_core::Machine;
//!
//! let mut c64 = Machine::new();
//! c64.load_roms(&basic_rom, &kernal_rom, &char_rom).unwrap();
//! c64.reset();
//! c64.step_frame();
//!
//! let fb = c64.framebuffer();
//! ```
//!
//! ## Module Organization
//!
//! - `devices`: hardware device implementations (VIC-II, SID stub, CIA, etc.)
//! - `system`: C64 system integration, timing, and orchestration

pub mod devices;
pub mod system;

pub use devices::{Cia6526, ColorRam, Device, Port6510, SidStub, VicBankView, VicII};
pub use system::{keys, C64Memory, ConfigError, Keyboard, Machine};
