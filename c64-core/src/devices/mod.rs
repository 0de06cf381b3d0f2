//! C64-specific hardware devices, addressed by the bus through a shared
//! offset-relative interface.
//!
//! Each device emulates a specific chip from the Commodore 64:
//!
//! - [`VicII`]: MOS 6569 Video Interface Chip (graphics, sprites, raster)
//! - [`SidStub`]: MOS 6581 register file with no audio synthesis (§4.2.1)
//! - [`Cia6526`]: MOS 6526 Complex Interface Adapter (timers, I/O, keyboard)
//! - [`Port6510`]: 6510 CPU I/O port (memory bank switching)
//! - [`ColorRam`]: 1KB color RAM for VIC-II
//!
//! `mos6502::MemoryBus` is the CPU-facing, absolute-address contract; `Device`
//! is the narrower, offset-relative contract these peripherals implement once
//! `C64Memory` has already routed an address to one of them.

mod cia;
mod color_ram;
mod port_6510;
mod sid;
mod vic_ii;

pub use cia::Cia6526;
pub use color_ram::ColorRam;
pub use port_6510::Port6510;
pub use sid::SidStub;
pub use vic_ii::{VicBankView, VicII, FRAME_HEIGHT, FRAME_WIDTH};

use std::any::Any;

/// A memory-mapped peripheral addressed by an offset relative to its own
/// base address, rather than the CPU's full 16-bit address space.
pub trait Device {
    /// Read the byte at `offset` (already relative to the device's base).
    fn read(&self, offset: u16) -> u8;
    /// Write `value` to `offset`.
    fn write(&mut self, offset: u16, value: u8);
    /// Size in bytes of the address range this device occupies (used to mask
    /// an incoming address down to its mirrored register range).
    fn size(&self) -> u16;
    /// Downcast support for tests and debug tooling.
    fn as_any(&self) -> &dyn Any;
    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Whether this device currently asserts its interrupt line. Devices
    /// that never raise one can rely on the default.
    fn has_interrupt(&self) -> bool {
        false
    }
}
