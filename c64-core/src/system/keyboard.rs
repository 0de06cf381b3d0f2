//! C64 keyboard matrix scanned through CIA1's I/O ports.
//!
//! CIA1 port A ($DC00) drives column select (active low outputs) and port B
//! ($DC01) reads back which rows are pulled low (active low inputs). A key
//! connects one row to one column, so scanning means: for every column the
//! caller is driving low, OR in the pressed bits of every row that has a key
//! in that column.
//!
//! ```text
//! Row\Col |  0    1    2    3    4    5    6    7
//! --------|------------------------------------------
//!    0    | DEL  RET   →   F7   F1   F3   F5   ↓
//!    1    |  3    W    A    4    Z    S    E  LSHFT
//!    2    |  5    R    D    6    C    F    T    X
//!    3    |  7    Y    G    8    B    H    U    V
//!    4    |  9    I    J    0    M    K    O    N
//!    5    |  +    P    L    -    .    :    @    ,
//!    6    |  £    *    ;  HOME RSHFT =    ↑    /
//!    7    |  1    ←  CTRL   2  SPACE  C=   Q  STOP
//! ```
//!
//! RESTORE is not part of the matrix — it drives the NMI line directly and
//! is handled by `Machine::restore_key`, not here.

/// Keyboard matrix state, one bit per (row, column) cell.
///
/// Each row is stored as a bitmask (bit N set = column N pressed in that
/// row), the same bitmask idiom the CIA/VIC-II register files in this crate
/// use for their enable/select bits, rather than an 8x8 bool grid.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    rows: [u8; 8],
}

impl Keyboard {
    pub fn new() -> Self {
        Self { rows: [0; 8] }
    }

    /// Presses the key at `(row, col)`. Positions outside the 8x8 matrix are
    /// silently ignored rather than panicking, since `(row, col)` pairs
    /// usually come from PC keycode lookup tables an embedder controls.
    pub fn key_down(&mut self, row: u8, col: u8) {
        if row < 8 && col < 8 {
            self.rows[row as usize] |= 1 << col;
        }
    }

    pub fn key_up(&mut self, row: u8, col: u8) {
        if row < 8 && col < 8 {
            self.rows[row as usize] &= !(1 << col);
        }
    }

    pub fn is_key_pressed(&self, row: u8, col: u8) -> bool {
        row < 8 && col < 8 && self.rows[row as usize] & (1 << col) != 0
    }

    /// Scans the matrix for the given active-low column select (as driven on
    /// CIA1 port A) and returns the active-low row result (as read back from
    /// CIA1 port B).
    pub fn scan(&self, col_select: u8) -> u8 {
        let mut rows_pulled_low = 0u8;
        for col in 0..8u8 {
            if col_select & (1 << col) == 0 {
                for row in 0..8u8 {
                    if self.rows[row as usize] & (1 << col) != 0 {
                        rows_pulled_low |= 1 << row;
                    }
                }
            }
        }
        !rows_pulled_low
    }

    pub fn release_all(&mut self) {
        self.rows = [0; 8];
    }
}

/// (row, col) matrix positions for keys `Machine::key_down`/`key_up` callers
/// commonly need by name.
#[allow(dead_code)]
pub mod keys {
    pub const DEL: (u8, u8) = (0, 0);
    pub const RETURN: (u8, u8) = (0, 1);
    pub const CRSR_RIGHT: (u8, u8) = (0, 2);
    pub const F7: (u8, u8) = (0, 3);
    pub const F1: (u8, u8) = (0, 4);
    pub const F3: (u8, u8) = (0, 5);
    pub const F5: (u8, u8) = (0, 6);
    pub const CRSR_DOWN: (u8, u8) = (0, 7);

    pub const DIGIT_3: (u8, u8) = (1, 0);
    pub const W: (u8, u8) = (1, 1);
    pub const A: (u8, u8) = (1, 2);
    pub const DIGIT_4: (u8, u8) = (1, 3);
    pub const Z: (u8, u8) = (1, 4);
    pub const S: (u8, u8) = (1, 5);
    pub const E: (u8, u8) = (1, 6);
    pub const LEFT_SHIFT: (u8, u8) = (1, 7);

    pub const DIGIT_5: (u8, u8) = (2, 0);
    pub const R: (u8, u8) = (2, 1);
    pub const D: (u8, u8) = (2, 2);
    pub const DIGIT_6: (u8, u8) = (2, 3);
    pub const C: (u8, u8) = (2, 4);
    pub const F: (u8, u8) = (2, 5);
    pub const T: (u8, u8) = (2, 6);
    pub const X: (u8, u8) = (2, 7);

    pub const DIGIT_7: (u8, u8) = (3, 0);
    pub const Y: (u8, u8) = (3, 1);
    pub const G: (u8, u8) = (3, 2);
    pub const DIGIT_8: (u8, u8) = (3, 3);
    pub const B: (u8, u8) = (3, 4);
    pub const H: (u8, u8) = (3, 5);
    pub const U: (u8, u8) = (3, 6);
    pub const V: (u8, u8) = (3, 7);

    pub const DIGIT_9: (u8, u8) = (4, 0);
    pub const I: (u8, u8) = (4, 1);
    pub const J: (u8, u8) = (4, 2);
    pub const DIGIT_0: (u8, u8) = (4, 3);
    pub const M: (u8, u8) = (4, 4);
    pub const K: (u8, u8) = (4, 5);
    pub const O: (u8, u8) = (4, 6);
    pub const N: (u8, u8) = (4, 7);

    pub const PLUS: (u8, u8) = (5, 0);
    pub const P: (u8, u8) = (5, 1);
    pub const L: (u8, u8) = (5, 2);
    pub const MINUS: (u8, u8) = (5, 3);
    pub const PERIOD: (u8, u8) = (5, 4);
    pub const COLON: (u8, u8) = (5, 5);
    pub const AT: (u8, u8) = (5, 6);
    pub const COMMA: (u8, u8) = (5, 7);

    pub const POUND: (u8, u8) = (6, 0);
    pub const ASTERISK: (u8, u8) = (6, 1);
    pub const SEMICOLON: (u8, u8) = (6, 2);
    pub const HOME: (u8, u8) = (6, 3);
    pub const RIGHT_SHIFT: (u8, u8) = (6, 4);
    pub const EQUALS: (u8, u8) = (6, 5);
    pub const UP_ARROW: (u8, u8) = (6, 6);
    pub const SLASH: (u8, u8) = (6, 7);

    pub const DIGIT_1: (u8, u8) = (7, 0);
    pub const LEFT_ARROW: (u8, u8) = (7, 1);
    pub const CTRL: (u8, u8) = (7, 2);
    pub const DIGIT_2: (u8, u8) = (7, 3);
    pub const SPACE: (u8, u8) = (7, 4);
    pub const COMMODORE: (u8, u8) = (7, 5);
    pub const Q: (u8, u8) = (7, 6);
    pub const RUN_STOP: (u8, u8) = (7, 7);
}
