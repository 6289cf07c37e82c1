///! Entry points: validate a path plan, scatter the leaves, sweep the
///! interior subpaths (spec §4.6/§6).
///!
///! This is the only module that sees the whole path plan at once; everything
///! below it (`scatter`, `kernel`) operates one subpath at a time.

use crate::error::UpdownError;
use crate::factor::FactorMut;
use crate::kernel;
use crate::options::UpdownOptions;
use crate::path::PathDescriptor;
use crate::scatter::{scatter_column, UpdateSource};
use crate::workspace::Workspace;

/// Which rank-1 perturbation the single-polarity entry point applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `L D Lᵀ + C Cᵀ`.
    Add,
    /// `L D Lᵀ − C Cᵀ`.
    Subtract,
}

/// The non-`Err` outcome of a call: how many columns hit a non-positive
/// pivot along the way. The factorization is complete either way -- a
/// non-zero count just means it is no longer a valid Cholesky factor (spec
/// §7 kind 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdownStatus {
    pub non_positive_pivots: u32,
}

impl UpdownStatus {
    pub(crate) fn record(&mut self, non_positive: bool) {
        if non_positive {
            self.non_positive_pivots += 1;
            log::debug!("non-positive pivot encountered during update/downdate");
        }
    }

    pub(crate) fn merge(&mut self, other: UpdownStatus) {
        self.non_positive_pivots += other.non_positive_pivots;
    }

    /// `true` iff every column's diagonal stayed positive.
    pub fn is_ok(&self) -> bool {
        self.non_positive_pivots == 0
    }
}

fn validate_paths(
    paths: &[PathDescriptor],
    width: usize,
    l: &FactorMut,
    source_ncols: usize,
) -> Result<(), UpdownError> {
    for (index, path) in paths.iter().enumerate() {
        path.validate(index, width, l)?;
        if let Some(ccol) = path.ccol {
            if ccol >= source_ncols {
                return Err(UpdownError::CcolOutOfRange {
                    path: index,
                    ccol,
                    ncols: source_ncols,
                });
            }
        }
    }
    Ok(())
}

/// Apply a rank-`rank_total` update or downdate described by `paths` to `l`.
///
/// `paths[..rank_total]` are the leaf descriptors (one per column of
/// `source`, scattered into `workspace` before any sweeping starts);
/// `paths[rank_total..]` are the interior descriptors produced by merging
/// leaves along shared elimination-tree ancestry, swept in order.
///
/// `mask`, when given, is `(mask_array, maskmark)`: a row is suppressed from
/// the scatter iff `mask_array[row] >= maskmark` (spec §4.5).
#[allow(clippy::too_many_arguments)]
pub fn numeric_updown(
    sign: Sign,
    source: &UpdateSource,
    rank_total: usize,
    l: &mut FactorMut,
    workspace: &mut Workspace,
    paths: &[PathDescriptor],
    mask: Option<(&[usize], usize)>,
    options: &UpdownOptions,
    mut violation_count: Option<&mut u64>,
) -> Result<UpdownStatus, UpdownError> {
    let width = workspace.width();
    validate_paths(paths, width, l, source.ncols())?;

    for (i, path) in paths[..rank_total].iter().enumerate() {
        let ccol = path.ccol.expect("leaf path descriptor must carry ccol");
        debug_assert_eq!(path.wfirst, i, "leaf paths must map 1:1 onto workspace columns");
        scatter_column(workspace, path.wfirst, source, ccol, mask);
    }

    let mut status = UpdownStatus::default();
    let (w_buf, alpha) = workspace.split_mut();
    for path in &paths[rank_total..] {
        status.merge(kernel::dispatch(width, path, l, w_buf, alpha, sign, options)?);
    }

    if let Some(counter) = violation_count.as_deref_mut() {
        *counter += u64::from(status.non_positive_pivots);
    }
    Ok(status)
}

/// Apply the combined `L D Lᵀ + C Cᵀ − D Dᵀ` update to `l`.
///
/// `workspace_c`/`workspace_d` must share the same width and `n`; `paths` is
/// shared by both sources, so `rank_total` must equal both `source_c.ncols()`
/// and `source_d.ncols()`.
#[allow(clippy::too_many_arguments)]
pub fn numeric_updown_combined(
    source_c: &UpdateSource,
    source_d: &UpdateSource,
    rank_total: usize,
    l: &mut FactorMut,
    workspace_c: &mut Workspace,
    workspace_d: &mut Workspace,
    paths: &[PathDescriptor],
    mask: Option<(&[usize], usize)>,
    options: &UpdownOptions,
    mut violation_count: Option<&mut u64>,
) -> Result<UpdownStatus, UpdownError> {
    debug_assert_eq!(workspace_c.width(), workspace_d.width());
    let width = workspace_c.width();
    validate_paths(paths, width, l, source_c.ncols())?;
    validate_paths(paths, width, l, source_d.ncols())?;

    for path in &paths[..rank_total] {
        let ccol = path.ccol.expect("leaf path descriptor must carry ccol");
        scatter_column(workspace_c, path.wfirst, source_c, ccol, mask);
        scatter_column(workspace_d, path.wfirst, source_d, ccol, mask);
    }

    let mut status = UpdownStatus::default();
    let (wc_buf, alpha_c) = workspace_c.split_mut();
    let (wd_buf, alpha_d) = workspace_d.split_mut();
    for path in &paths[rank_total..] {
        status.merge(kernel::dispatch_combined(
            width, path, l, wc_buf, alpha_c, wd_buf, alpha_d, options,
        )?);
    }

    if let Some(counter) = violation_count.as_deref_mut() {
        *counter += u64::from(status.non_positive_pivots);
    }
    Ok(status)
}

#[cfg(test)]
mod test {
    use super::*;
    use sprs::CsMat;

    // Single column [0, 1] chained into one path, n = 2, rank 1.
    fn chain2() -> (Vec<usize>, Vec<usize>, Vec<f64>, Vec<usize>) {
        let lp = vec![0, 2, 3];
        let li = vec![0, 1, 1];
        let lx = vec![2.0, 0.5, 3.0];
        let lnz = vec![2, 1];
        (lp, li, lx, lnz)
    }

    #[test]
    fn rank1_update_runs_end_to_end() {
        let (lp, li, mut lx, lnz) = chain2();
        let mut l = FactorMut::new(&lp, &li, &mut lx, &lnz);
        let c = CsMat::new_csc((2, 1), vec![0, 2], vec![0, 1], vec![1.0, 0.5]);
        let source = UpdateSource::Packed(c.view());

        let mut ws = Workspace::new(2, 1);
        let paths = vec![
            PathDescriptor::leaf(0, 1, 0, 0),
            PathDescriptor::interior(0, 1, 0, 1),
        ];
        let options = UpdownOptions::new();

        let status = numeric_updown(
            Sign::Add,
            &source,
            1,
            &mut l,
            &mut ws,
            &paths,
            None,
            &options,
            None,
        )
        .unwrap();

        assert!(status.is_ok());
        assert!(ws.is_clean());
        // D(0,0) grows from 2.0 by exactly z0^2 = 1.0.
        assert!((l.diag(0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_start_after_end() {
        let (lp, li, mut lx, lnz) = chain2();
        let mut l = FactorMut::new(&lp, &li, &mut lx, &lnz);
        let c = CsMat::new_csc((2, 1), vec![0, 1], vec![0], vec![1.0]);
        let source = UpdateSource::Packed(c.view());
        let mut ws = Workspace::new(2, 1);
        let paths = vec![PathDescriptor {
            start: 1,
            end: 0,
            wfirst: 0,
            rank: 1,
            ccol: Some(0),
        }];
        let options = UpdownOptions::new();

        let err = numeric_updown(
            Sign::Add,
            &source,
            1,
            &mut l,
            &mut ws,
            &paths,
            None,
            &options,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            UpdownError::StartAfterEnd {
                path: 0,
                start: 1,
                end: 0
            }
        );
    }
}
