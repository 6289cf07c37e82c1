///! Caller-provided options shared by every call into the core.
///!
///! Mirrors the `Common`-style options struct from the spec: confined to a
///! small, read-only-by-reference struct rather than a process-wide global,
///! per the "Global `Common`" design note.

/// Options shared by a single call to [`crate::numeric_updown`] or
/// [`crate::numeric_updown_combined`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdownOptions {
    /// Lower-bound clamp applied to every updated diagonal entry. `None` (or
    /// a non-positive value) disables clamping entirely.
    pub dbound: Option<f64>,
    /// Force every path to sweep one column at a time, bypassing mini-
    /// supernode fusion (spec §4.3) even where the `Lnz` pattern would allow
    /// it. Not part of the numerical contract -- it exists so the fusion
    /// equivalence property (spec §8) can be checked by running the same
    /// path plan twice and comparing. Defaults to `false`.
    pub disable_fusion: bool,
}

impl UpdownOptions {
    pub fn new() -> Self {
        Self { dbound: None, disable_fusion: false }
    }

    pub fn with_dbound(dbound: f64) -> Self {
        let dbound = if dbound > 0.0 { Some(dbound) } else { None };
        Self { dbound, disable_fusion: false }
    }

    /// Return a copy with fusion forced off (see [`Self::disable_fusion`]).
    pub fn without_fusion(self) -> Self {
        Self { disable_fusion: true, ..self }
    }

    #[inline]
    pub(crate) fn clamp(&self, dj: f64) -> f64 {
        match self.dbound {
            Some(bound) if dj < bound => bound,
            _ => dj,
        }
    }
}
