//! Fixed 5x5 risk matrix lookup.
//!
//! The table is the standing government risk matrix this tool records against.
//! It is deliberately asymmetric: a rare event with severe impact does not
//! score the same as a frequent event with mild impact.

/// Risk matrix indexed by `[likelihood - 1][impact - 1]`.
pub const RISK_MATRIX: [[u8; 5]; 5] = [
    [1, 3, 5, 9, 20],
    [2, 7, 10, 13, 21],
    [4, 8, 14, 17, 22],
    [6, 12, 16, 19, 24],
    [11, 15, 18, 23, 25],
];

/// Look up the matrix score for a likelihood/impact pair.
///
/// Out-of-range inputs are clamped into [1,5] rather than rejected; callers
/// that need strict validation do it at the payload boundary.
pub fn matrix_score(likelihood: i32, impact: i32) -> u8 {
    let row = (likelihood.clamp(1, 5) - 1) as usize;
    let col = (impact.clamp(1, 5) - 1) as usize;
    RISK_MATRIX[row][col]
}
