//! MOS 6526 CIA, trimmed to what this machine actually wires up.
//!
//! CIA1 ($DC00-$DCFF) drives the keyboard matrix (port A selects columns,
//! port B reads back rows) and raises IRQ. CIA2 ($DD00-$DDFF) selects the
//! VIC-II's 16K memory bank from port A bits 0-1 and raises NMI. Both
//! instances share the same register file and interval-timer logic; which
//! line a chip drives is the caller's business (`C64Memory` polls
//! `cia1.has_interrupt()` for IRQ and `cia2.has_interrupt()` for NMI
//! separately), not something this type tracks about itself.
//!
//! The real 6526 also has a time-of-day clock with alarm and a serial
//! shift register at registers $08-$0C. Neither is driven by anything in
//! this machine, so those registers are stubbed: reads return 0, writes
//! are accepted and ignored.

use super::Device;
use std::any::Any;
use std::cell::Cell;

#[derive(Debug, Clone, Default)]
pub struct CiaPort {
    pub data: u8,
    pub ddr: u8,
}

impl CiaPort {
    pub fn new() -> Self {
        Self { data: 0, ddr: 0 }
    }

    /// The value this port is actively driving on its output-configured pins.
    pub fn output(&self) -> u8 {
        self.data & self.ddr
    }

    /// Output pins read back the data register; input pins read `external`.
    pub fn read(&self, external: u8) -> u8 {
        (self.data & self.ddr) | (external & !self.ddr)
    }
}

#[derive(Debug, Clone)]
pub struct CiaTimer {
    pub counter: u16,
    pub latch: u16,
    pub running: bool,
    pub one_shot: bool,
}

impl CiaTimer {
    pub fn new() -> Self {
        Self {
            counter: 0xFFFF,
            latch: 0xFFFF,
            running: false,
            one_shot: false,
        }
    }

    /// Advances by one tick; returns whether it underflowed this tick.
    pub fn clock(&mut self) -> bool {
        if !self.running {
            return false;
        }

        if self.counter == 0 {
            self.counter = self.latch;
            if self.one_shot {
                self.running = false;
            }
            true
        } else {
            self.counter = self.counter.wrapping_sub(1);
            false
        }
    }

    pub fn force_reload(&mut self) {
        self.counter = self.latch;
    }
}

impl Default for CiaTimer {
    fn default() -> Self {
        Self::new()
    }
}

const ICR_TIMER_A: u8 = 0x01;
const ICR_TIMER_B: u8 = 0x02;

#[derive(Debug)]
pub struct Cia6526 {
    pub port_a: CiaPort,
    pub port_b: CiaPort,
    pub timer_a: CiaTimer,
    pub timer_b: CiaTimer,

    /// Set bits are pending interrupt sources; cleared by reading $0D.
    interrupt_flags: Cell<u8>,
    interrupt_mask: u8,
    /// Mirrors `interrupt_flags & interrupt_mask != 0`, latched at the tick
    /// a masked source fires rather than recomputed on every poll, so a
    /// later mask write can't retroactively clear a line that's already up.
    interrupt_pending: Cell<bool>,

    cra: u8,
    crb: u8,

    pub external_a: u8,
    pub external_b: u8,
}

impl Cia6526 {
    pub fn new() -> Self {
        Self {
            port_a: CiaPort::new(),
            port_b: CiaPort::new(),
            timer_a: CiaTimer::new(),
            timer_b: CiaTimer::new(),
            interrupt_flags: Cell::new(0),
            interrupt_mask: 0,
            interrupt_pending: Cell::new(false),
            cra: 0,
            crb: 0,
            external_a: 0xFF,
            external_b: 0xFF,
        }
    }

    pub fn new_cia1() -> Self {
        Self::new()
    }

    pub fn new_cia2() -> Self {
        Self::new()
    }

    /// Advances both timers by one system clock tick, raising an interrupt
    /// on any masked timer underflow.
    pub fn clock(&mut self) {
        let timer_a_underflow = self.timer_a.clock();
        if timer_a_underflow {
            self.raise(ICR_TIMER_A);
        }

        let timer_b_counts_timer_a = self.crb & 0x60 == 0x40;
        if !timer_b_counts_timer_a || timer_a_underflow {
            if self.timer_b.clock() {
                self.raise(ICR_TIMER_B);
            }
        }
    }

    fn raise(&self, source: u8) {
        self.interrupt_flags.set(self.interrupt_flags.get() | source);
        if self.interrupt_flags.get() & self.interrupt_mask != 0 {
            self.interrupt_pending.set(true);
        }
    }

    /// VIC-II bank (0-3) selected by CIA2 port A bits 0-1, active low.
    pub fn vic_bank(&self) -> u8 {
        (!self.port_a.read(self.external_a)) & 0x03
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Cia6526 {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Cia6526 {
    fn read(&self, offset: u16) -> u8 {
        match (offset & 0x0F) as usize {
            0x00 => self.port_a.read(self.external_a),
            0x01 => self.port_b.read(self.external_b),
            0x02 => self.port_a.ddr,
            0x03 => self.port_b.ddr,
            0x04 => (self.timer_a.counter & 0xFF) as u8,
            0x05 => (self.timer_a.counter >> 8) as u8,
            0x06 => (self.timer_b.counter & 0xFF) as u8,
            0x07 => (self.timer_b.counter >> 8) as u8,
            0x08..=0x0C => 0, // TOD / serial shift register: not modeled
            0x0D => {
                let flags = self.interrupt_flags.get();
                let pending = self.interrupt_pending.get();
                self.interrupt_flags.set(0);
                self.interrupt_pending.set(false);
                flags | if pending { 0x80 } else { 0 }
            }
            0x0E => self.cra,
            0x0F => self.crb,
            _ => unreachable!("offset masked to 4 bits"),
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        match (offset & 0x0F) as usize {
            0x00 => self.port_a.data = value,
            0x01 => self.port_b.data = value,
            0x02 => self.port_a.ddr = value,
            0x03 => self.port_b.ddr = value,
            0x04 => self.timer_a.latch = (self.timer_a.latch & 0xFF00) | value as u16,
            0x05 => {
                self.timer_a.latch = (self.timer_a.latch & 0x00FF) | ((value as u16) << 8);
                if !self.timer_a.running {
                    self.timer_a.counter = self.timer_a.latch;
                }
            }
            0x06 => self.timer_b.latch = (self.timer_b.latch & 0xFF00) | value as u16,
            0x07 => {
                self.timer_b.latch = (self.timer_b.latch & 0x00FF) | ((value as u16) << 8);
                if !self.timer_b.running {
                    self.timer_b.counter = self.timer_b.latch;
                }
            }
            0x08..=0x0C => {} // TOD / serial shift register: not modeled
            0x0D => {
                let mask = value & 0x1F;
                if value & 0x80 != 0 {
                    self.interrupt_mask |= mask;
                } else {
                    self.interrupt_mask &= !mask;
                }
                if self.interrupt_flags.get() & self.interrupt_mask != 0 {
                    self.interrupt_pending.set(true);
                }
            }
            0x0E => {
                self.cra = value;
                self.timer_a.running = value & 0x01 != 0;
                self.timer_a.one_shot = value & 0x08 != 0;
                if value & 0x10 != 0 {
                    self.timer_a.force_reload();
                }
            }
            0x0F => {
                self.crb = value;
                self.timer_b.running = value & 0x01 != 0;
                self.timer_b.one_shot = value & 0x08 != 0;
                if value & 0x10 != 0 {
                    self.timer_b.force_reload();
                }
            }
            _ => {}
        }
    }

    fn size(&self) -> u16 {
        256
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn has_interrupt(&self) -> bool {
        self.interrupt_pending.get()
    }
}
