///! The kernel specialization family `N(w, k)` and its dispatch table
///! (spec §4.4).
///!
///! `w` is fixed for an entire `numeric_updown` call (the smallest power of
///! two `>= total rank`, see [`crate::path::path_width_for_rank`]); `k` is
///! chosen per subpath from the path plan. Each `(w, k)` pair is realized as
///! one monomorphization of [`sweep::sweep_path`] /
///! [`sweep::sweep_path_combined`], per Design Notes §9 option (a): "generic
///! monomorphization over a compile-time (W, RANK) pair." This match is the
///! literal dispatch table; it does not hide a runtime loop over `k`.

pub mod fusion;
pub mod sweep;

use crate::error::UpdownError;
use crate::factor::FactorMut;
use crate::options::UpdownOptions;
use crate::path::PathDescriptor;
use crate::update::{Sign, UpdownStatus};

/// Dispatch the single-polarity kernel `N(w, k)` for one subpath.
pub fn dispatch(
    w: usize,
    path: &PathDescriptor,
    l: &mut FactorMut,
    w_buf: &mut [f64],
    alpha: &mut [f64],
    sign: Sign,
    options: &UpdownOptions,
) -> Result<UpdownStatus, UpdownError> {
    let k = path.rank;
    macro_rules! call {
        ($w:literal, $k:literal) => {
            sweep::sweep_path::<$w, $k>(path, l, w_buf, alpha, sign, options)
        };
    }
    let status = match (w, k) {
        (1, 1) => call!(1, 1),
        (2, 1) => call!(2, 1),
        (2, 2) => call!(2, 2),
        (4, 1) => call!(4, 1),
        (4, 2) => call!(4, 2),
        (4, 3) => call!(4, 3),
        (4, 4) => call!(4, 4),
        (8, 1) => call!(8, 1),
        (8, 2) => call!(8, 2),
        (8, 3) => call!(8, 3),
        (8, 4) => call!(8, 4),
        (8, 5) => call!(8, 5),
        (8, 6) => call!(8, 6),
        (8, 7) => call!(8, 7),
        (8, 8) => call!(8, 8),
        _ => {
            return Err(UpdownError::RankExceedsWidth {
                path: 0,
                rank: k,
                width: w,
            })
        }
    };
    Ok(status)
}

/// Dispatch the combined `+C·Cᵀ − D·Dᵀ` kernel `N(w, k)` for one subpath.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_combined(
    w: usize,
    path: &PathDescriptor,
    l: &mut FactorMut,
    wc_buf: &mut [f64],
    alpha_c: &mut [f64],
    wd_buf: &mut [f64],
    alpha_d: &mut [f64],
    options: &UpdownOptions,
) -> Result<UpdownStatus, UpdownError> {
    let k = path.rank;
    macro_rules! call {
        ($w:literal, $k:literal) => {
            sweep::sweep_path_combined::<$w, $k>(path, l, wc_buf, alpha_c, wd_buf, alpha_d, options)
        };
    }
    let status = match (w, k) {
        (1, 1) => call!(1, 1),
        (2, 1) => call!(2, 1),
        (2, 2) => call!(2, 2),
        (4, 1) => call!(4, 1),
        (4, 2) => call!(4, 2),
        (4, 3) => call!(4, 3),
        (4, 4) => call!(4, 4),
        (8, 1) => call!(8, 1),
        (8, 2) => call!(8, 2),
        (8, 3) => call!(8, 3),
        (8, 4) => call!(8, 4),
        (8, 5) => call!(8, 5),
        (8, 6) => call!(8, 6),
        (8, 7) => call!(8, 7),
        (8, 8) => call!(8, 8),
        _ => {
            return Err(UpdownError::RankExceedsWidth {
                path: 0,
                rank: k,
                width: w,
            })
        }
    };
    Ok(status)
}
