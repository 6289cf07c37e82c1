///! Mini-supernode fusion detection (spec §4.3).
///!
///! Before sweeping a column `j`, check whether its immediate
///! elimination-tree descendants within the path share `j`'s sparsity
///! pattern, shifted by one, two, or three rows. If so, the outer column
///! sweep can process 2 or 4 columns together instead of one, sharing the
///! row loads of the common tail rows.

use crate::factor::FactorMut;

/// The number of adjacent columns fused into one inner-loop group,
/// starting at the column passed to [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionWidth {
    One,
    Two,
    Four,
}

impl FusionWidth {
    pub fn len(self) -> usize {
        match self {
            FusionWidth::One => 1,
            FusionWidth::Two => 2,
            FusionWidth::Four => 4,
        }
    }
}

/// Classify the fusion opportunity starting at column `j`, restricted to
/// columns that stay within the path (`<= end`). `disabled` forces
/// [`FusionWidth::One`] regardless of the pattern, for the fusion
/// equivalence property (spec §8, [`crate::options::UpdownOptions::disable_fusion`]).
pub fn classify(j: usize, end: usize, l: &FactorMut, disabled: bool) -> FusionWidth {
    if disabled {
        return FusionWidth::One;
    }
    let nz_j = l.nnz(j);
    if nz_j < 2 {
        return FusionWidth::One;
    }
    let diag = l.diag_slot(j);
    let j1 = l.row(diag + 1);
    if j1 > end || l.nnz(j1) != nz_j - 1 {
        return FusionWidth::One;
    }

    if nz_j >= 4 {
        let j2 = l.row(diag + 2);
        let j3 = l.row(diag + 3);
        if j2 <= end
            && j3 <= end
            && l.nnz(j2) == nz_j - 2
            && l.nnz(j3) == nz_j - 3
        {
            return FusionWidth::Four;
        }
    }

    FusionWidth::Two
}

/// The columns participating in the fused group starting at `j`, in
/// elimination-tree order (`j`, then its parent, then its parent's parent,
/// ...).
pub fn group_columns(j: usize, width: FusionWidth, l: &FactorMut) -> [usize; 4] {
    let diag = l.diag_slot(j);
    match width {
        FusionWidth::One => [j, 0, 0, 0],
        FusionWidth::Two => [j, l.row(diag + 1), 0, 0],
        FusionWidth::Four => [j, l.row(diag + 1), l.row(diag + 2), l.row(diag + 3)],
    }
}
