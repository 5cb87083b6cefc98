//! # Compressed Sparse Column Matrix

use serde::{Deserialize, Serialize};

/// A frozen sparse count matrix in compressed-sparse-column layout.
///
/// Column `c`'s entries are at `indptr[c]..indptr[c + 1]` of
/// `indices` (row ids, ascending) and `data` (counts).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CscMatrix {
    shape: (usize, usize),
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<u32>,
}

impl CscMatrix {
    /// Build a [`CscMatrix`] from per-row `(col, count)` entries.
    ///
    /// Every `col` must be `< num_cols`; zero counts are dropped.
    pub fn from_rows<R>(
        rows: &[R],
        num_cols: usize,
    ) -> Self
    where
        R: AsRef<[(usize, u32)]>,
    {
        let mut col_counts = vec![0usize; num_cols];
        for row in rows {
            for &(col, count) in row.as_ref() {
                if count > 0 {
                    col_counts[col] += 1;
                }
            }
        }

        let mut indptr = Vec::with_capacity(num_cols + 1);
        indptr.push(0);
        for n in &col_counts {
            indptr.push(indptr[indptr.len() - 1] + n);
        }

        let nnz = indptr[num_cols];
        let mut indices = vec![0usize; nnz];
        let mut data = vec![0u32; nnz];
        let mut next = indptr[..num_cols].to_vec();

        // Rows are visited in order, so each column's row ids come out sorted.
        for (row_idx, row) in rows.iter().enumerate() {
            for &(col, count) in row.as_ref() {
                if count == 0 {
                    continue;
                }
                let pos = next[col];
                indices[pos] = row_idx;
                data[pos] = count;
                next[col] += 1;
            }
        }

        Self {
            shape: (rows.len(), num_cols),
            indptr,
            indices,
            data,
        }
    }

    /// The ``(rows, cols)`` shape.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// The number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// The column pointer array.
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// The row index array.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The stored counts.
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// The value at ``(row, col)``; zero when absent or out of bounds.
    pub fn get(
        &self,
        row: usize,
        col: usize,
    ) -> u32 {
        if row >= self.shape.0 || col >= self.shape.1 {
            return 0;
        }
        let span = self.indptr[col]..self.indptr[col + 1];
        match self.indices[span.clone()].binary_search(&row) {
            Ok(offset) => self.data[span.start + offset],
            Err(_) => 0,
        }
    }

    /// Iterate the ``(row, count)`` entries of one column.
    pub fn column(
        &self,
        col: usize,
    ) -> impl Iterator<Item = (usize, u32)> + '_ {
        let span = if col < self.shape.1 {
            self.indptr[col]..self.indptr[col + 1]
        } else {
            0..0
        };
        span.map(move |i| (self.indices[i], self.data[i]))
    }

    /// All ``(row, col, count)`` entries, sorted by row then column.
    pub fn triplets(&self) -> Vec<(usize, usize, u32)> {
        let mut out: Vec<(usize, usize, u32)> = (0..self.shape.1)
            .flat_map(|col| self.column(col).map(move |(row, n)| (row, col, n)))
            .collect();
        out.sort_unstable();
        out
    }

    /// The sum of each column.
    pub fn column_sums(&self) -> Vec<u64> {
        (0..self.shape.1)
            .map(|col| self.column(col).map(|(_, n)| n as u64).sum())
            .collect()
    }
}
