///! Method C1 of Davis & Hager: the per-column alpha/gamma recurrence that
///! keeps `D` positive (update) or correctly signed (downdate) while
///! producing the row-sweep coefficient `gamma` for one update column.
///!
///! Every function here operates on a single scalar `k`-th column of the
///! update; [`crate::kernel::sweep`] loops these over `0..rank` with the
///! loop bound fixed by a const generic so the compiler can unroll and
///! vectorize it.

use crate::options::UpdownOptions;

/// The outcome of one alpha/gamma step: the row-sweep coefficient, and
/// whether this step broke positive-(semi)definiteness (spec §4.1:
/// "If αC[k] <= 0 at any step... the factorization is non-positive-definite
/// under the perturbation").
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    pub gamma: f64,
    pub non_positive: bool,
}

/// One column's worth of the update (`+C·Cᵀ`) half of the recurrence.
///
/// `alpha` and `dj` are updated in place; `dj` is left divided by the
/// *previous* alpha, exactly as spec §4.1 specifies, so that a subsequent
/// downdate half (combined variant) or the next off-diagonal row can use it.
#[inline]
pub fn update_step(alpha: &mut f64, z: f64, dj: &mut f64) -> StepOutcome {
    let alpha_prev = *alpha;
    let a = alpha_prev + (z * z) / *dj;
    *dj *= a;
    *alpha = a;
    let gamma = -z / *dj;
    *dj /= alpha_prev;
    StepOutcome {
        gamma,
        non_positive: a <= 0.0,
    }
}

/// One column's worth of the downdate (`-D·Dᵀ`) half of the recurrence.
#[inline]
pub fn downdate_step(alpha: &mut f64, z: f64, dj: &mut f64) -> StepOutcome {
    let alpha_prev = *alpha;
    let a = alpha_prev - (z * z) / *dj;
    *dj *= a;
    *alpha = a;
    let gamma = z / *dj;
    *dj /= alpha_prev;
    StepOutcome {
        gamma,
        non_positive: a <= 0.0,
    }
}

/// Both halves of the combined update+downdate recurrence for one column of
/// the update, in the frozen order spec §9 calls out as load-bearing: the
/// update half runs to completion (including its final division by the
/// *previous* `alphaC`) before the downdate half begins, reusing the
/// update-adjusted `dj`.
#[inline]
pub fn combined_step(
    alpha_c: &mut f64,
    z_c: f64,
    alpha_d: &mut f64,
    z_d: f64,
    dj: &mut f64,
) -> (StepOutcome, StepOutcome) {
    let c = update_step(alpha_c, z_c, dj);
    let d = downdate_step(alpha_d, z_d, dj);
    (c, d)
}

/// Finalize a column's diagonal after the rank-k recurrence has swept
/// through it: clamp to `dbound` if configured, and treat a non-finite
/// result as a non-positive-pivot event rather than letting a `NaN`
/// propagate silently (spec §9, third Open Question).
pub fn finish_column(dj: f64, options: &UpdownOptions) -> (f64, bool) {
    if !dj.is_finite() {
        log::debug!("non-finite pivot encountered during update/downdate; clamping");
        let clamped = options.clamp(0.0);
        return (clamped, true);
    }
    let non_positive = dj <= 0.0;
    let clamped = options.clamp(dj);
    if non_positive {
        log::debug!("non-positive pivot {dj} encountered during update/downdate");
    } else if clamped != dj {
        log::warn!("dbound clamp raised pivot {dj} to {clamped}");
    }
    (clamped, non_positive)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rank1_update_matches_hand_derivation() {
        // D(j,j) = 1, single update column with z = 1: expect D' = 2.
        let mut alpha = 1.0_f64;
        let mut dj = 1.0_f64;
        let outcome = update_step(&mut alpha, 1.0, &mut dj);
        assert_eq!(dj, 2.0);
        assert!(!outcome.non_positive);
    }

    #[test]
    fn rank1_downdate_inverts_rank1_update() {
        let mut alpha = 1.0_f64;
        let mut dj = 2.0_f64;
        let outcome = downdate_step(&mut alpha, 1.0, &mut dj);
        assert!((dj - 1.0).abs() < 1e-12);
        assert!(!outcome.non_positive);
    }

    #[test]
    fn downdate_past_zero_is_flagged_non_positive() {
        let mut alpha = 1.0_f64;
        let mut dj = 0.5_f64;
        let outcome = downdate_step(&mut alpha, 1.0, &mut dj);
        assert!(outcome.non_positive);
    }

    #[test]
    fn finish_column_clamps_to_dbound() {
        let options = UpdownOptions::with_dbound(1e-6);
        let (clamped, non_positive) = finish_column(1e-18, &options);
        assert_eq!(clamped, 1e-6);
        assert!(non_positive);
    }

    #[test]
    fn finish_column_reports_non_finite_as_non_positive() {
        let options = UpdownOptions::new();
        let (clamped, non_positive) = finish_column(f64::NAN, &options);
        assert_eq!(clamped, 0.0);
        assert!(non_positive);
    }
}
