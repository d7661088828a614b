// ============================================================
// Layer 3: Matrix Domain Type
// ============================================================
// Every input the predictor takes is a 2-D matrix:
//
//   TermEmbeddingTable : [num_terms,  term_dim]
//   ProteinBatch       : [batch_size, protein_dim]
//   LabelBatch         : [batch_size, num_terms]
//
// Matrix is the framework-free form of those inputs: a
// row-major Vec<f32> plus its shape. The data layer turns it
// into a Burn tensor; nothing here knows about Burn.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    /// Row-major values, length rows * cols
    data: Vec<f32>,
}

impl Matrix {
    /// Build a matrix from row-major values.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        ensure!(
            data.len() == rows * cols,
            "matrix data has {} values, expected {rows} x {cols} = {}",
            data.len(),
            rows * cols,
        );
        Ok(Self { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Fill a matrix row by row from `f(row, col)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let data = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| f(r, c))
            .collect();
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn shape(&self) -> [usize; 2] { [self.rows, self.cols] }

    pub fn data(&self) -> &[f32] { &self.data }

    pub fn row(&self, index: usize) -> &[f32] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }
}
