///! The fused column sweep (spec §4.2/§4.3), generic over the path width
///! `W` and the rank `K` (spec §4.4's kernel family `N(w, k)`).
///!
///! `W` fixes the row stride of the workspace buffer; `K` fixes the rank and
///! therefore the bound of every `for k in 0..K` loop, letting the compiler
///! unroll and vectorize the innermost loop per the Design Notes. The
///! mini-supernode fusion group size (1, 2, or 4 columns) is a runtime
///! decision independent of `(W, K)`, made once per outer-loop step by
///! [`crate::kernel::fusion::classify`].
///!
///! The fused group is processed as: a "cleanup" phase where each column in
///! the group visits its own diagonal and then feeds its off-diagonal
///! contribution forward to the next group member's row (spec §4.3's
///! "L(j1,j), D(j1,j1), L(j2,{j,j1}), D(j2,j2), ..." framing), followed by a
///! single shared loop over the group's common tail rows that applies every
///! group member's update to each row in turn. This produces, row by row,
///! exactly the same sequence of floating point operations as sweeping the
///! group's columns one at a time -- the fusion changes only the loop
///! nesting, not the arithmetic order, so the fused and unfused codepaths
///! agree to within the last bit, not merely within the spec's epsilon
///! tolerance.

use crate::factor::FactorMut;
use crate::kernel::fusion::{self, FusionWidth};
use crate::options::UpdownOptions;
use crate::path::PathDescriptor;
use crate::recurrence::{downdate_step, finish_column, update_step};
use crate::update::{Sign, UpdownStatus};

#[inline]
fn load_and_zero_row<const K: usize>(w_buf: &mut [f64], stride: usize, wfirst: usize, row: usize) -> [f64; K] {
    let base = row * stride + wfirst;
    let mut z = [0.0; K];
    z.copy_from_slice(&w_buf[base..base + K]);
    w_buf[base..base + K].iter_mut().for_each(|v| *v = 0.0);
    z
}

/// Apply one group member's contribution to the off-diagonal slot `slot`,
/// carrying the serial `lx -> W[i,k] -> lx'` dependency across the `k` loop
/// exactly as spec §4.2 requires (`Lx[p]` is re-read at the start of every
/// `k` iteration, not just once per row).
#[inline]
fn apply_entry<const K: usize>(
    l: &mut FactorMut,
    slot: usize,
    z: &[f64; K],
    gamma: &[f64; K],
    w_buf: &mut [f64],
    stride: usize,
    wfirst: usize,
) {
    let row = l.row(slot);
    let base = row * stride + wfirst;
    let mut lx = l.value(slot);
    for k in 0..K {
        let mut wik = w_buf[base + k];
        wik -= z[k] * lx;
        lx -= gamma[k] * wik;
        w_buf[base + k] = wik;
    }
    l.set_value(slot, lx);
}

/// Sweep one subpath with a single-polarity (update-only or downdate-only)
/// kernel `N(w, k)` with `w = W`, `k = K`.
pub fn sweep_path<const W: usize, const K: usize>(
    path: &PathDescriptor,
    l: &mut FactorMut,
    w_buf: &mut [f64],
    alpha: &mut [f64],
    sign: Sign,
    options: &UpdownOptions,
) -> UpdownStatus {
    debug_assert!(K <= W);
    debug_assert_eq!(path.rank, K);
    let wfirst = path.wfirst;
    let mut status = UpdownStatus::default();
    let mut j = path.start;

    loop {
        let width = fusion::classify(j, path.end, l, options.disable_fusion);
        let cols = fusion::group_columns(j, width, l);
        let group_len = width.len();

        let mut z: [[f64; K]; 4] = [[0.0; K]; 4];
        let mut gamma: [[f64; K]; 4] = [[0.0; K]; 4];

        for idx in 0..group_len {
            let col = cols[idx];
            z[idx] = load_and_zero_row::<K>(w_buf, W, wfirst, col);

            let diag_slot = l.diag_slot(col);
            let mut dj = l.value(diag_slot);
            let mut any_non_positive = false;
            for k in 0..K {
                let outcome = match sign {
                    Sign::Add => update_step(&mut alpha[wfirst + k], z[idx][k], &mut dj),
                    Sign::Subtract => downdate_step(&mut alpha[wfirst + k], z[idx][k], &mut dj),
                };
                gamma[idx][k] = outcome.gamma;
                any_non_positive |= outcome.non_positive;
            }
            let (final_dj, non_positive) = finish_column(dj, options);
            l.set_diag(col, final_dj);
            status.record(non_positive || any_non_positive);

            let col_tail_start = diag_slot + 1;
            for g in (idx + 1)..group_len {
                let slot = col_tail_start + (g - idx - 1);
                debug_assert_eq!(l.row(slot), cols[g]);
                apply_entry::<K>(l, slot, &z[idx], &gamma[idx], w_buf, W, wfirst);
            }
        }

        let remaining = l.nnz(cols[0]) - group_len;
        for t in 0..remaining {
            for idx in 0..group_len {
                let col = cols[idx];
                let slot = l.diag_slot(col) + 1 + (group_len - idx - 1) + t;
                apply_entry::<K>(l, slot, &z[idx], &gamma[idx], w_buf, W, wfirst);
            }
        }

        let last = cols[group_len - 1];
        match l.parent(last) {
            Some(p) if p <= path.end => j = p,
            _ => break,
        }
    }

    status
}

/// Apply one group member's contribution to off-diagonal slot `slot` for
/// the combined update+downdate kernel: the update half runs to completion
/// (updating `lx` and `wc_buf`) before the downdate half begins, reusing
/// the update-adjusted `lx` -- the frozen ordering from spec §9.
#[inline]
#[allow(clippy::too_many_arguments)]
fn apply_entry_combined<const K: usize>(
    l: &mut FactorMut,
    slot: usize,
    zc: &[f64; K],
    gc: &[f64; K],
    wc_buf: &mut [f64],
    zd: &[f64; K],
    gd: &[f64; K],
    wd_buf: &mut [f64],
    stride: usize,
    wfirst: usize,
) {
    let row = l.row(slot);
    let base = row * stride + wfirst;
    let mut lx = l.value(slot);
    for k in 0..K {
        let mut wck = wc_buf[base + k];
        wck -= zc[k] * lx;
        lx -= gc[k] * wck;
        wc_buf[base + k] = wck;

        let mut wdk = wd_buf[base + k];
        wdk -= zd[k] * lx;
        lx -= gd[k] * wdk;
        wd_buf[base + k] = wdk;
    }
    l.set_value(slot, lx);
}

/// Sweep one subpath with the combined `+C·Cᵀ − D·Dᵀ` kernel `N(w, k)`.
#[allow(clippy::too_many_arguments)]
pub fn sweep_path_combined<const W: usize, const K: usize>(
    path: &PathDescriptor,
    l: &mut FactorMut,
    wc_buf: &mut [f64],
    alpha_c: &mut [f64],
    wd_buf: &mut [f64],
    alpha_d: &mut [f64],
    options: &UpdownOptions,
) -> UpdownStatus {
    debug_assert!(K <= W);
    debug_assert_eq!(path.rank, K);
    let wfirst = path.wfirst;
    let mut status = UpdownStatus::default();
    let mut j = path.start;

    loop {
        let width = fusion::classify(j, path.end, l, options.disable_fusion);
        let cols = fusion::group_columns(j, width, l);
        let group_len = width.len();

        let mut zc: [[f64; K]; 4] = [[0.0; K]; 4];
        let mut gc: [[f64; K]; 4] = [[0.0; K]; 4];
        let mut zd: [[f64; K]; 4] = [[0.0; K]; 4];
        let mut gd: [[f64; K]; 4] = [[0.0; K]; 4];

        for idx in 0..group_len {
            let col = cols[idx];
            zc[idx] = load_and_zero_row::<K>(wc_buf, W, wfirst, col);
            zd[idx] = load_and_zero_row::<K>(wd_buf, W, wfirst, col);

            let diag_slot = l.diag_slot(col);
            let mut dj = l.value(diag_slot);
            let mut any_non_positive = false;
            for k in 0..K {
                let c = update_step(&mut alpha_c[wfirst + k], zc[idx][k], &mut dj);
                let d = downdate_step(&mut alpha_d[wfirst + k], zd[idx][k], &mut dj);
                gc[idx][k] = c.gamma;
                gd[idx][k] = d.gamma;
                any_non_positive |= c.non_positive || d.non_positive;
            }
            let (final_dj, non_positive) = finish_column(dj, options);
            l.set_diag(col, final_dj);
            status.record(non_positive || any_non_positive);

            let col_tail_start = diag_slot + 1;
            for g in (idx + 1)..group_len {
                let slot = col_tail_start + (g - idx - 1);
                debug_assert_eq!(l.row(slot), cols[g]);
                apply_entry_combined::<K>(
                    l, slot, &zc[idx], &gc[idx], wc_buf, &zd[idx], &gd[idx], wd_buf, W, wfirst,
                );
            }
        }

        let remaining = l.nnz(cols[0]) - group_len;
        for t in 0..remaining {
            for idx in 0..group_len {
                let col = cols[idx];
                let slot = l.diag_slot(col) + 1 + (group_len - idx - 1) + t;
                apply_entry_combined::<K>(
                    l, slot, &zc[idx], &gc[idx], wc_buf, &zd[idx], &gd[idx], wd_buf, W, wfirst,
                );
            }
        }

        let last = cols[group_len - 1];
        match l.parent(last) {
            Some(p) if p <= path.end => j = p,
            _ => break,
        }
    }

    status
}
