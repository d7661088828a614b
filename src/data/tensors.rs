// ============================================================
// Layer 4: Matrix ⇄ Tensor assembly
// ============================================================
// Moves row-major Matrix values onto a Burn device and back.
//
//   Matrix [rows, cols] (Vec<f32>)
//       → 1-D tensor from the flat slice
//       → .reshape([rows, cols])
//
// Label matrices go through the same path, which is also
// where 0/1 labels become floats for the loss.

use anyhow::{anyhow, Result};
use burn::prelude::*;

use crate::domain::matrix::Matrix;

pub fn tensor_from_matrix<B: Backend>(matrix: &Matrix, device: &B::Device) -> Tensor<B, 2> {
    Tensor::<B, 1>::from_floats(matrix.data(), device).reshape(matrix.shape())
}

pub fn matrix_from_tensor<B: Backend>(tensor: Tensor<B, 2>) -> Result<Matrix> {
    let [rows, cols] = tensor.dims();
    let values = tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Cannot read tensor values: {e:?}"))?;
    Matrix::new(rows, cols, values)
}
