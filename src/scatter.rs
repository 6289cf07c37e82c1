///! Materializing columns of `C` (and `D`) into the dense workspace `W`.
///!
///! Spec §3 allows the update matrix to be either packed (every column's
///! storage span is exactly its nonzero count) or unpacked (each column has
///! its own `Cnz[]` shorter than its allocated span, the classic CHOLMOD
///! layout that leaves room for a column to grow without reallocating the
///! whole matrix). `sprs::CsMat` only models the packed case, so the
///! unpacked case is realized here as a small raw-array variant alongside
///! it.

use sprs::CsMatView;

use crate::workspace::Workspace;

/// A sparse n-by-r update matrix (`C` or `D`), in either of the two layouts
/// spec §3 allows.
pub enum UpdateSource<'a> {
    /// Every column's storage span is exactly its nonzero count.
    Packed(CsMatView<'a, f64>),
    /// Column `c` occupies `indptr[c]..indptr[c] + nz[c]`, which may be
    /// shorter than `indptr[c + 1] - indptr[c]`.
    Unpacked {
        indptr: &'a [usize],
        indices: &'a [usize],
        data: &'a [f64],
        nz: &'a [usize],
        nrows: usize,
    },
}

impl<'a> UpdateSource<'a> {
    pub fn ncols(&self) -> usize {
        match self {
            UpdateSource::Packed(mat) => mat.cols(),
            UpdateSource::Unpacked { nz, .. } => nz.len(),
        }
    }

    pub fn nrows(&self) -> usize {
        match self {
            UpdateSource::Packed(mat) => mat.rows(),
            UpdateSource::Unpacked { nrows, .. } => *nrows,
        }
    }

    /// Iterate `(row, value)` pairs of column `c`, forbidding empty columns
    /// per spec §3 ("Empty columns forbidden").
    fn column(&self, c: usize) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        match self {
            UpdateSource::Packed(mat) => {
                let outer = mat.outer_view(c).expect("ccol out of range");
                debug_assert!(outer.nnz() > 0, "empty columns are forbidden");
                Box::new(
                    outer
                        .indices()
                        .iter()
                        .copied()
                        .zip(outer.data().iter().copied())
                        .collect::<Vec<_>>()
                        .into_iter(),
                )
            }
            UpdateSource::Unpacked {
                indptr,
                indices,
                data,
                nz,
                ..
            } => {
                let start = indptr[c];
                let end = start + nz[c];
                debug_assert!(end > start, "empty columns are forbidden");
                Box::new(
                    indices[start..end]
                        .iter()
                        .copied()
                        .zip(data[start..end].iter().copied()),
                )
            }
        }
    }
}

/// Scatter column `ccol` of `source` into workspace column `path`
/// (spec §4.5), honoring the optional `mask`/`maskmark` row suppression and
/// resetting `alpha[path]` to `1.0` afterward.
pub fn scatter_column(
    workspace: &mut Workspace,
    path: usize,
    source: &UpdateSource,
    ccol: usize,
    mask: Option<(&[usize], usize)>,
) {
    for (row, value) in source.column(ccol) {
        let suppressed = match mask {
            Some((mask, maskmark)) => mask[row] >= maskmark,
            None => false,
        };
        if !suppressed {
            workspace.set(row, path, value);
        }
    }
    workspace.reset_alpha(path);
}

#[cfg(test)]
mod test {
    use super::*;
    use sprs::CsMat;

    fn single_column_source() -> CsMat<f64> {
        // 3x1: only row 0 populated.
        CsMat::new_csc((3, 1), vec![0, 1], vec![0], vec![1.0])
    }

    #[test]
    fn scatter_writes_column_and_resets_alpha() {
        let mat = single_column_source();
        let source = UpdateSource::Packed(mat.view());
        let mut ws = Workspace::new(3, 1);
        ws.alpha_mut()[0] = 99.0;
        scatter_column(&mut ws, 0, &source, 0, None);
        assert_eq!(ws.get(0, 0), 1.0);
        assert_eq!(ws.get(1, 0), 0.0);
        assert_eq!(ws.alpha()[0], 1.0);
    }

    #[test]
    fn mask_suppresses_masked_rows() {
        let indptr = vec![0, 2];
        let indices = vec![0, 1];
        let data = vec![1.0, 1.0];
        let mat = CsMat::new_csc((2, 1), indptr, indices, data);
        let source = UpdateSource::Packed(mat.view());
        let mut ws = Workspace::new(2, 1);
        let mask = vec![0usize, 5usize];
        scatter_column(&mut ws, 0, &source, 0, Some((&mask, 1)));
        assert_eq!(ws.get(0, 0), 1.0);
        assert_eq!(ws.get(1, 0), 0.0);
    }
}
