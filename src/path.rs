///! The path plan: an immutable description, produced by an external
///! symbolic analysis stage, of which columns of `L` each subpath touches.

use crate::error::UpdownError;
use crate::factor::FactorMut;

/// One subpath of the path plan.
///
/// Leaf descriptors (index `< rank_total`, the total update rank) represent
/// a single scattered column of `C`/`D` and carry `ccol`; interior
/// descriptors (index `>= rank_total`) are produced by merging leaves along
/// shared elimination-tree ancestry and carry `ccol = None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathDescriptor {
    /// First column of the subpath.
    pub start: usize,
    /// Last column of the subpath (inclusive, ancestor of `start`).
    pub end: usize,
    /// Index of the first column of the dense workspace `W` this subpath
    /// consumes.
    pub wfirst: usize,
    /// Number of `W` columns this subpath consumes, i.e. `k` in `N(w, k)`.
    pub rank: usize,
    /// Source column in `C` for scatter; only set for leaf descriptors.
    pub ccol: Option<usize>,
}

impl PathDescriptor {
    pub fn leaf(start: usize, end: usize, wfirst: usize, ccol: usize) -> Self {
        PathDescriptor {
            start,
            end,
            wfirst,
            rank: 1,
            ccol: Some(ccol),
        }
    }

    pub fn interior(start: usize, end: usize, wfirst: usize, rank: usize) -> Self {
        PathDescriptor {
            start,
            end,
            wfirst,
            rank,
            ccol: None,
        }
    }

    /// Validate this descriptor against the factor it will be applied to
    /// (spec §7 kind 2: "invalid path plan" is a bug in the symbolic layer).
    pub fn validate(&self, index: usize, width: usize, l: &FactorMut) -> Result<(), UpdownError> {
        if self.start > self.end {
            return Err(UpdownError::StartAfterEnd {
                path: index,
                start: self.start,
                end: self.end,
            });
        }
        if self.rank == 0 || self.rank > width {
            return Err(UpdownError::RankExceedsWidth {
                path: index,
                rank: self.rank,
                width,
            });
        }
        if self.end >= l.n() {
            return Err(UpdownError::StartAfterEnd {
                path: index,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Smallest power of two `w` in `{1, 2, 4, 8}` with `w >= rank`.
///
/// This is how the dispatcher picks the whole-call path width from the
/// total update rank (spec §4.4: "the dispatcher selects w = smallest power
/// of two >= total-rank for the whole call").
pub fn path_width_for_rank(rank: usize) -> usize {
    match rank {
        0 => 1,
        1 => 1,
        2 => 2,
        3 | 4 => 4,
        5..=8 => 8,
        _ => panic!("rank {rank} is outside the supported range 1..=8"),
    }
}

#[cfg(test)]
mod test {
    use super::path_width_for_rank;

    #[test]
    fn widths() {
        assert_eq!(path_width_for_rank(1), 1);
        assert_eq!(path_width_for_rank(2), 2);
        assert_eq!(path_width_for_rank(3), 4);
        assert_eq!(path_width_for_rank(4), 4);
        assert_eq!(path_width_for_rank(5), 8);
        assert_eq!(path_width_for_rank(8), 8);
    }
}
