use burn::{prelude::*, tensor::Distribution};

/// Inverted dropout: zero each element with probability `prob` and scale the
/// survivors by `1 / (1 - prob)`. Identity when `active` is false.
///
/// Burn's `nn::Dropout` decides on its own whether it is training by looking
/// at the backend. Here the caller decides, so the same model value can run
/// either mode.
pub fn dropout<B: Backend, const D: usize>(
    x:      Tensor<B, D>,
    prob:   f64,
    active: bool,
) -> Tensor<B, D> {
    if !active || prob <= 0.0 {
        return x;
    }
    if prob >= 1.0 {
        return x.zeros_like();
    }

    let keep = 1.0 - prob;
    let mask = x.random_like(Distribution::Bernoulli(keep));
    (x * mask).div_scalar(keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_inactive_is_identity() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 2>::ones([4, 8], &device);
        let y = dropout(x.clone(), 0.5, false);
        assert_eq!(
            x.into_data().to_vec::<f32>().unwrap(),
            y.into_data().to_vec::<f32>().unwrap(),
        );
    }

    #[test]
    fn test_active_zeroes_or_scales() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 2>::ones([16, 16], &device);
        let values = dropout(x, 0.2, true).into_data().to_vec::<f32>().unwrap();

        // Every surviving value is scaled to 1 / 0.8
        assert!(values.iter().all(|&v| v == 0.0 || (v - 1.25).abs() < 1e-5));
        // 256 draws at p = 0.2: some zeroed, most kept
        let zeroed = values.iter().filter(|&&v| v == 0.0).count();
        assert!(zeroed > 0 && zeroed < 128);
    }

    #[test]
    fn test_full_drop_gives_zeros() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 1>::ones([5], &device);
        let values = dropout(x, 1.0, true).into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|&v| v == 0.0));
    }
}
