// ============================================================
// Layer 5: Batch Normalisation (mode-explicit)
// ============================================================
// y = gamma * (x - mean) / sqrt(var + eps) + beta
//
// Train: mean / var come from the current batch (biased var),
//        and the running statistics are moved towards them:
//          running = (1 - momentum) * running + momentum * batch
//        The running variance uses the unbiased estimate.
// Eval:  mean / var come from the running statistics, read with
//        value_sync() so the latest train update is visible.
//
// Caveat: with batch_size = 1 in Train mode the batch variance
// is 0, so every normalised value is 0 and the layer outputs
// beta. This is not special-cased.

use burn::{
    module::{Param, RunningState},
    prelude::*,
};

use crate::domain::mode::Mode;

#[derive(Config, Debug)]
pub struct BatchNorm1dConfig {
    pub num_features: usize,
    #[config(default = 1e-5)]
    pub epsilon:      f64,
    #[config(default = 0.1)]
    pub momentum:     f64,
}

impl BatchNorm1dConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> BatchNorm1d<B> {
        let n = self.num_features;
        BatchNorm1d {
            gamma:        Param::from_tensor(Tensor::ones([n], device)),
            beta:         Param::from_tensor(Tensor::zeros([n], device)),
            running_mean: RunningState::new(Tensor::zeros([n], device)),
            running_var:  RunningState::new(Tensor::ones([n], device)),
            momentum:     self.momentum,
            epsilon:      self.epsilon,
        }
    }
}

/// Batch normalisation over the feature axis of a [batch, features] input.
#[derive(Module, Debug)]
pub struct BatchNorm1d<B: Backend> {
    pub gamma:        Param<Tensor<B, 1>>,
    pub beta:         Param<Tensor<B, 1>>,
    pub running_mean: RunningState<Tensor<B, 1>>,
    pub running_var:  RunningState<Tensor<B, 1>>,
    pub momentum:     f64,
    pub epsilon:      f64,
}

impl<B: Backend> BatchNorm1d<B> {
    /// x: [batch, features] → [batch, features]
    pub fn forward(&self, x: Tensor<B, 2>, mode: Mode) -> Tensor<B, 2> {
        match mode {
            Mode::Train => self.forward_train(x),
            Mode::Eval  => self.forward_eval(x),
        }
    }

    fn forward_train(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch_size, _] = x.dims();

        let mean     = x.clone().mean_dim(0);                       // [1, features]
        let centered = x - mean.clone();
        let var      = centered.clone().powf_scalar(2.0).mean_dim(0); // biased

        self.update_running(mean, var.clone(), batch_size);

        let normalized = centered / var.add_scalar(self.epsilon).sqrt();
        self.scale_shift(normalized)
    }

    fn forward_eval(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let mean = self.running_mean.value_sync().unsqueeze::<2>();
        let var  = self.running_var.value_sync().unsqueeze::<2>();

        let normalized = (x - mean) / var.add_scalar(self.epsilon).sqrt();
        self.scale_shift(normalized)
    }

    fn update_running(&self, mean: Tensor<B, 2>, var: Tensor<B, 2>, batch_size: usize) {
        let [_, features] = mean.dims();

        let unbiased = if batch_size > 1 {
            var.mul_scalar(batch_size as f64 / (batch_size - 1) as f64)
        } else {
            var
        };

        let m = self.momentum;
        let running_mean = self.running_mean.value_sync()
            .mul_scalar(1.0 - m)
            .add(mean.reshape([features]).detach().mul_scalar(m));
        let running_var = self.running_var.value_sync()
            .mul_scalar(1.0 - m)
            .add(unbiased.reshape([features]).detach().mul_scalar(m));

        self.running_mean.update(running_mean.detach());
        self.running_var.update(running_var.detach());
    }

    fn scale_shift(&self, normalized: Tensor<B, 2>) -> Tensor<B, 2> {
        normalized * self.gamma.val().unsqueeze::<2>() + self.beta.val().unsqueeze::<2>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn column_stats(values: &[f32], rows: usize, cols: usize, col: usize) -> (f32, f32) {
        let column: Vec<f32> = (0..rows).map(|r| values[r * cols + col]).collect();
        let mean = column.iter().sum::<f32>() / rows as f32;
        let var  = column.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / rows as f32;
        (mean, var)
    }

    #[test]
    fn test_train_mode_normalises_each_feature() {
        let device = Default::default();
        let bn = BatchNorm1dConfig::new(3).init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 1>::from_floats(
            [1.0, 10.0, -5.0,
             2.0, 20.0, -4.0,
             3.0, 30.0, -3.0,
             4.0, 40.0, -2.0],
            &device,
        ).reshape([4, 3]);

        let y = bn.forward(x, Mode::Train).into_data().to_vec::<f32>().unwrap();
        for col in 0..3 {
            let (mean, var) = column_stats(&y, 4, 3, col);
            assert!(mean.abs() < 1e-4, "col {col} mean {mean}");
            assert!((var - 1.0).abs() < 1e-2, "col {col} var {var}");
        }
    }

    #[test]
    fn test_train_mode_updates_running_stats() {
        let device = Default::default();
        let bn = BatchNorm1dConfig::new(1).init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 1>::from_floats([2.0, 4.0], &device).reshape([2, 1]);

        bn.forward(x, Mode::Train);

        // mean = 3, unbiased var = 2
        let mean = bn.running_mean.value_sync().into_data().to_vec::<f32>().unwrap();
        let var  = bn.running_var.value_sync().into_data().to_vec::<f32>().unwrap();
        assert!((mean[0] - 0.3).abs() < 1e-5);             // 0.9 * 0 + 0.1 * 3
        assert!((var[0]  - (0.9 + 0.2)).abs() < 1e-5);     // 0.9 * 1 + 0.1 * 2
    }

    #[test]
    fn test_eval_mode_uses_running_stats_and_leaves_them() {
        let device = Default::default();
        let bn = BatchNorm1dConfig::new(2).init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 1>::from_floats([1.0, -1.0], &device).reshape([1, 2]);

        // Fresh running stats are mean 0 / var 1, so eval is ~identity
        let y = bn.forward(x, Mode::Eval).into_data().to_vec::<f32>().unwrap();
        assert!((y[0] - 1.0).abs() < 1e-4);
        assert!((y[1] + 1.0).abs() < 1e-4);

        let mean = bn.running_mean.value_sync().into_data().to_vec::<f32>().unwrap();
        assert_eq!(mean, vec![0.0, 0.0]);
    }

    #[test]
    fn test_eval_after_train_sees_updated_stats() {
        let device = Default::default();
        let bn = BatchNorm1dConfig::new(1).init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 1>::from_floats([2.0, 4.0], &device).reshape([2, 1]);
        bn.forward(x, Mode::Train);

        // Running stats are now mean 0.3 / var 1.1
        let std = (1.1f32 + 1e-5).sqrt();
        let x = Tensor::<TestBackend, 1>::from_floats([0.3, 0.3 + std], &device).reshape([2, 1]);
        let y = bn.forward(x, Mode::Eval).into_data().to_vec::<f32>().unwrap();
        assert!(y[0].abs() < 1e-4, "got {}", y[0]);
        assert!((y[1] - 1.0).abs() < 1e-4, "got {}", y[1]);
    }

    #[test]
    fn test_single_row_train_collapses_to_beta() {
        let device = Default::default();
        let bn = BatchNorm1dConfig::new(2).init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 1>::from_floats([7.0, -3.0], &device).reshape([1, 2]);

        let y = bn.forward(x, Mode::Train).into_data().to_vec::<f32>().unwrap();
        assert!(y.iter().all(|v| v.abs() < 1e-6));
    }
}
