//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is implemented as a standalone function that takes a mutable reference
//! to the CPU and the opcode byte; the function resolves its own addressing mode via
//! `cpu.get_operand_value()`/`cpu.get_effective_address()`, updates registers/flags/memory,
//! then advances PC and cycles itself.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Dispatches a fetched opcode to its handler.
///
/// This is the single bounded switch every implemented opcode passes
/// through: the mnemonic at `OPCODE_TABLE[opcode]` selects the handler
/// regardless of which of the opcode's several addressing-mode encodings
/// fired (e.g. all eight LDA opcodes route here to the same
/// `load_store::execute_lda`, which reads the addressing mode back out of
/// the table itself).
pub(crate) fn dispatch<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let mnemonic = OPCODE_TABLE[opcode as usize].mnemonic;
    match mnemonic {
        // Load/store
        "LDA" => load_store::execute_lda(cpu, opcode),
        "LDX" => load_store::execute_ldx(cpu, opcode),
        "LDY" => load_store::execute_ldy(cpu, opcode),
        "STA" => load_store::execute_sta(cpu, opcode),
        "STX" => load_store::execute_stx(cpu, opcode),
        "STY" => load_store::execute_sty(cpu, opcode),

        // ALU
        "ADC" => alu::execute_adc(cpu, opcode),
        "SBC" => alu::execute_sbc(cpu, opcode),
        "AND" => alu::execute_and(cpu, opcode),
        "ORA" => alu::execute_ora(cpu, opcode),
        "EOR" => alu::execute_eor(cpu, opcode),
        "CMP" => alu::execute_cmp(cpu, opcode),
        "CPX" => alu::execute_cpx(cpu, opcode),
        "CPY" => alu::execute_cpy(cpu, opcode),
        "BIT" => alu::execute_bit(cpu, opcode),

        // Shifts/rotates
        "ASL" => shifts::execute_asl(cpu, opcode),
        "LSR" => shifts::execute_lsr(cpu, opcode),
        "ROL" => shifts::execute_rol(cpu, opcode),
        "ROR" => shifts::execute_ror(cpu, opcode),

        // Increment/decrement
        "INC" => inc_dec::execute_inc(cpu, opcode),
        "DEC" => inc_dec::execute_dec(cpu, opcode),
        "INX" => inc_dec::execute_inx(cpu, opcode),
        "INY" => inc_dec::execute_iny(cpu, opcode),
        "DEX" => inc_dec::execute_dex(cpu, opcode),
        "DEY" => inc_dec::execute_dey(cpu, opcode),

        // Branches
        "BCC" => branches::execute_bcc(cpu, opcode),
        "BCS" => branches::execute_bcs(cpu, opcode),
        "BEQ" => branches::execute_beq(cpu, opcode),
        "BNE" => branches::execute_bne(cpu, opcode),
        "BMI" => branches::execute_bmi(cpu, opcode),
        "BPL" => branches::execute_bpl(cpu, opcode),
        "BVC" => branches::execute_bvc(cpu, opcode),
        "BVS" => branches::execute_bvs(cpu, opcode),

        // Control flow
        "JMP" => control::execute_jmp(cpu, opcode),
        "JSR" => control::execute_jsr(cpu, opcode),
        "RTS" => control::execute_rts(cpu, opcode),
        "RTI" => control::execute_rti(cpu, opcode),
        "BRK" => control::execute_brk(cpu, opcode),
        "NOP" => control::execute_nop(cpu, opcode),

        // Stack
        "PHA" => stack::execute_pha(cpu, opcode),
        "PHP" => stack::execute_php(cpu, opcode),
        "PLA" => stack::execute_pla(cpu, opcode),
        "PLP" => stack::execute_plp(cpu, opcode),

        // Flags
        "CLC" => flags::execute_clc(cpu, opcode),
        "SEC" => flags::execute_sec(cpu, opcode),
        "CLI" => flags::execute_cli(cpu, opcode),
        "SEI" => flags::execute_sei(cpu, opcode),
        "CLD" => flags::execute_cld(cpu, opcode),
        "SED" => flags::execute_sed(cpu, opcode),
        "CLV" => flags::execute_clv(cpu, opcode),

        // Register transfers
        "TAX" => transfer::execute_tax(cpu, opcode),
        "TAY" => transfer::execute_tay(cpu, opcode),
        "TXA" => transfer::execute_txa(cpu, opcode),
        "TYA" => transfer::execute_tya(cpu, opcode),
        "TSX" => transfer::execute_tsx(cpu, opcode),
        "TXS" => transfer::execute_txs(cpu, opcode),

        // Every entry with `implemented: true` has a mnemonic covered above.
        _ => unreachable!("opcode 0x{opcode:02X} marked implemented with no handler"),
    }
}
