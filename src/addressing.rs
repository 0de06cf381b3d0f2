//! The 6502's addressing modes: how an opcode's operand bytes turn into the
//! value or address an instruction acts on. `OpcodeMetadata::size_bytes` is
//! the authority on how many operand bytes a mode consumes; this enum only
//! names which mode it is, not its shape.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand; the instruction itself is the whole operation (CLC, RTS).
    Implicit,
    /// Operates on the accumulator in place (LSR A, ROL A).
    Accumulator,
    /// Operand byte is the value itself: `LDA #$10`.
    Immediate,
    /// Operand byte is an address in $00-$FF: `LDA $80`.
    ZeroPage,
    /// Zero-page address plus X, wrapping within the page: `LDA $80,X`.
    ZeroPageX,
    /// Zero-page address plus Y, wrapping within the page: `LDX $80,Y`.
    ZeroPageY,
    /// Signed 8-bit branch displacement, relative to the PC past the
    /// instruction: `BEQ label`.
    Relative,
    /// Full 16-bit address: `JMP $1234`.
    Absolute,
    /// 16-bit address plus X; crossing a page boundary costs an extra
    /// cycle on `Read`-shape instructions: `LDA $1234,X`.
    AbsoluteX,
    /// 16-bit address plus Y; same page-cross penalty as `AbsoluteX`:
    /// `LDA $1234,Y`.
    AbsoluteY,
    /// Dereferences a 16-bit pointer to get the target address. Only used
    /// by JMP, and carries the famous page-wrap bug where a pointer ending
    /// in $FF reads its high byte from the start of the same page.
    Indirect,
    /// `(ZP + X)`, then dereference the result as a pointer: `LDA ($40,X)`.
    IndirectX,
    /// Dereference the zero-page pointer, then add Y to the result; same
    /// page-cross penalty as `AbsoluteX`: `LDA ($40),Y`.
    IndirectY,
}
