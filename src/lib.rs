//! # 6502 CPU Emulator Core
//!
//! A cycle-accurate NMOS 6502/6510 CPU emulator designed for modularity and
//! clarity.
//!
//! This crate provides the foundational architecture for emulating the MOS Technology 6502
//! processor, including CPU state structures, a trait-based memory bus abstraction,
//! and a table-driven opcode metadata system.
//!
//! ## Quick Start
//!
//! ```rust
//! use mos6502::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = CPU::new(memory);
//!
//! // Verify initial state
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//! assert_eq!(cpu.flag_i(), true);
//! ```
//!
//! ## Architecture
//!
//! The emulator follows a modular architecture adhering to these principles:
//!
//! - **Modularity**: CPU state is separated from memory implementation via the `MemoryBus` trait
//! - **Determinism**: no OS dependencies, no hidden global state
//! - **Cycle Accuracy**: tracks cycle counts for timing-accurate emulation
//! - **Clarity & Hackability**: simple, readable code with comprehensive documentation
//! - **Table-Driven Design**: all opcode metadata in a single source of truth
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution logic
//! - `memory` - MemoryBus trait and implementations
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumerations
//!
//! Diagnostics are routed through the [`log`] crate; install a logger (e.g.
//! `env_logger`) to observe non-fatal conditions logged by the host
//! (`c64-core`'s memory-mapped I/O emits `log::warn!` for unmapped register
//! accesses). Fatal CPU faults are returned as [`ExecutionError`] instead.

pub mod addressing;
pub mod cpu;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::CPU;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, OPCODE_TABLE};

/// Errors that can occur during CPU execution.
///
/// Fatal variants are surfaced from [`CPU::step`]; callers at the top of a
/// run loop are expected to catch these and stop, printing the diagnostic.
/// Everything below the run loop propagates them with `?` rather than
/// attempting recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The opcode at PC has no handler: one of the 105 illegal/undocumented
    /// 6502 opcodes. Carries a diagnostic snapshot of the machine state at
    /// the moment of the fault.
    #[error(
        "unknown opcode 0x{opcode:02X} at PC=${pc:04X} (??? {opcode:02X}); \
         A={a:02X} X={x:02X} Y={y:02X} SP={sp:02X} P={status:02X}; \
         mem[${memory_window_base:04X}..]={memory_window:02X?}"
    )]
    UnknownOpcode {
        /// The fetched opcode byte.
        opcode: u8,
        /// Program counter at the time of the fault.
        pc: u16,
        /// Accumulator.
        a: u8,
        /// X index register.
        x: u8,
        /// Y index register.
        y: u8,
        /// Stack pointer.
        sp: u8,
        /// Packed status register (NV-BDIZC).
        status: u8,
        /// A small window of memory bytes centered on `pc`, for a minimal
        /// disassembly-style dump.
        memory_window: [u8; 8],
        /// Address of `memory_window[0]`.
        memory_window_base: u16,
    },
}
