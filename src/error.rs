///! Structural precondition failures for the update/downdate core.
///!
///! A non-positive pivot is *not* an error in this module's sense: the
///! factorization is still numerically complete, it is simply no longer a
///! valid Cholesky factor, and callers learn about it through
///! [`crate::UpdownStatus`]. The variants here are reserved for bugs in the
///! path plan handed down by the symbolic layer -- conditions that, per the
///! spec, "indicate a bug in the symbolic layer" and should fail fast rather
///! than be silently tolerated.
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UpdownError {
    #[error("path {path}: start column {start} is after end column {end}")]
    StartAfterEnd {
        path: usize,
        start: usize,
        end: usize,
    },

    #[error("path {path}: rank {rank} exceeds path width {width}")]
    RankExceedsWidth {
        path: usize,
        rank: usize,
        width: usize,
    },

    #[error(
        "path {path}: fusion pattern at column {col} contradicts Lnz \
         (expected a run of {expected} adjacent columns with shrinking Lnz)"
    )]
    FusionPatternMismatch {
        path: usize,
        col: usize,
        expected: usize,
    },

    #[error("rank {rank} is outside the supported range 1..=8")]
    RankOutOfRange { rank: usize },

    #[error(
        "leaf path descriptor {path} has ccol {ccol} but the update matrix \
         only has {ncols} columns"
    )]
    CcolOutOfRange {
        path: usize,
        ccol: usize,
        ncols: usize,
    },
}
