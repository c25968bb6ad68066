use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig},
        pool::{MaxPool1d, MaxPool1dConfig},
        Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig1d, Relu,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};

/// Number of coordinate channels — (x, y)
pub const IN_CHANNELS: usize = 2;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ActivityCnnConfig {
    pub seq_len:     usize,
    pub num_classes: usize,
    #[config(default = 64)]
    pub conv1_filters: usize,
    #[config(default = 128)]
    pub conv2_filters: usize,
    #[config(default = 128)]
    pub conv3_filters: usize,
    #[config(default = 3)]
    pub kernel_size: usize,
    #[config(default = 2)]
    pub pool_size: usize,
    #[config(default = 128)]
    pub hidden_size: usize,
    #[config(default = 0.5)]
    pub dropout: f64,
}

impl ActivityCnnConfig {
    /// Build the model on the given device.
    ///
    /// # Panics
    /// Panics when `seq_len` is too short for the three conv/pool
    /// blocks. The trainer validates with `flattened_steps` and
    /// reports the problem as an error before ever calling this.
    pub fn init<B: Backend>(&self, device: &B::Device) -> ActivityCnn<B> {
        let flattened = self.flattened_steps().unwrap_or_else(|| {
            panic!(
                "seq_len {} is too short for the conv stack; need at least {}",
                self.seq_len,
                self.min_seq_len()
            )
        });

        let conv1 = Conv1dConfig::new(IN_CHANNELS, self.conv1_filters, self.kernel_size)
            .with_padding(PaddingConfig1d::Valid)
            .init(device);
        let conv2 = Conv1dConfig::new(self.conv1_filters, self.conv2_filters, self.kernel_size)
            .with_padding(PaddingConfig1d::Valid)
            .init(device);
        let conv3 = Conv1dConfig::new(self.conv2_filters, self.conv3_filters, self.kernel_size)
            .with_padding(PaddingConfig1d::Valid)
            .init(device);

        let pool1 = MaxPool1dConfig::new(self.pool_size)
            .with_stride(self.pool_size)
            .init();
        let pool2 = MaxPool1dConfig::new(self.pool_size)
            .with_stride(self.pool_size)
            .init();
        let pool3 = MaxPool1dConfig::new(self.pool_size)
            .with_stride(self.pool_size)
            .init();

        let fc1 = LinearConfig::new(self.conv3_filters * flattened, self.hidden_size)
            .init(device);
        let fc2 = LinearConfig::new(self.hidden_size, self.num_classes).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();

        ActivityCnn {
            conv1, conv2, conv3,
            pool1, pool2, pool3,
            fc1, fc2, dropout,
            activation: Relu::new(),
        }
    }

    /// Time steps remaining after the three conv/pool blocks, or None
    /// when the sequence is too short to survive all three.
    /// Valid convolutions eat kernel_size - 1 steps; pooling with
    /// stride == kernel floors the length down by pool_size.
    pub fn flattened_steps(&self) -> Option<usize> {
        let mut steps = self.seq_len;
        for _ in 0..3 {
            steps = steps.checked_sub(self.kernel_size - 1)?;
            steps = steps.checked_sub(self.pool_size)? / self.pool_size + 1;
        }
        Some(steps)
    }

    /// Smallest seq_len the three blocks reduce without vanishing —
    /// 22 for the default kernel and pool sizes.
    pub fn min_seq_len(&self) -> usize {
        (1..=4096)
            .find(|&len| {
                ActivityCnnConfig { seq_len: len, ..self.clone() }
                    .flattened_steps()
                    .is_some()
            })
            .unwrap_or(4096)
    }
}

/// Stacked 1D convolution classifier for coordinate sequences.
///
/// Input  [batch, seq_len, 2] → logits [batch, num_classes].
#[derive(Module, Debug)]
pub struct ActivityCnn<B: Backend> {
    pub conv1: Conv1d<B>,
    pub conv2: Conv1d<B>,
    pub conv3: Conv1d<B>,
    pub pool1: MaxPool1d,
    pub pool2: MaxPool1d,
    pub pool3: MaxPool1d,
    pub fc1:   Linear<B>,
    pub fc2:   Linear<B>,
    pub dropout:    Dropout,
    pub activation: Relu,
}

impl<B: Backend> ActivityCnn<B> {
    /// sequences: [batch, seq_len, 2] → class logits: [batch, num_classes]
    pub fn forward(&self, sequences: Tensor<B, 3>) -> Tensor<B, 2> {
        // Conv1d expects [batch, channels, length]
        let x = sequences.swap_dims(1, 2);

        let x = self.pool1.forward(self.activation.forward(self.conv1.forward(x)));
        let x = self.pool2.forward(self.activation.forward(self.conv2.forward(x)));
        let x = self.pool3.forward(self.activation.forward(self.conv3.forward(x)));

        // Flatten [batch, filters, steps] for the dense head
        let [batch_size, filters, steps] = x.dims();
        let x = x.reshape([batch_size, filters * steps]);

        let x = self.activation.forward(self.fc1.forward(x));
        let x = self.dropout.forward(x);
        self.fc2.forward(x)
    }

    /// Forward pass plus cross-entropy loss against integer targets.
    /// Softmax lives inside the loss, so the head stays in logit space.
    pub fn forward_loss(
        &self,
        sequences: Tensor<B, 3>,
        targets:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(sequences);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(logits.clone(), targets);
        (loss, logits)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_flattened_steps() {
        // 100 → conv 98 → pool 49 → conv 47 → pool 23 → conv 21 → pool 10
        let cfg = ActivityCnnConfig::new(100, 2);
        assert_eq!(cfg.flattened_steps(), Some(10));
    }

    #[test]
    fn test_short_sequences_yield_no_steps() {
        // 20 steps vanish inside the third block instead of underflowing
        assert_eq!(ActivityCnnConfig::new(20, 2).flattened_steps(), None);
        assert_eq!(ActivityCnnConfig::new(1, 2).flattened_steps(), None);
        // 22 is the shortest survivor with the default kernel/pool sizes
        assert_eq!(ActivityCnnConfig::new(22, 2).flattened_steps(), Some(1));
        assert_eq!(ActivityCnnConfig::new(21, 2).flattened_steps(), None);
        assert_eq!(ActivityCnnConfig::new(100, 2).min_seq_len(), 22);
    }

    #[test]
    #[should_panic(expected = "too short for the conv stack")]
    fn test_init_rejects_short_sequences() {
        let device = Default::default();
        let _ = ActivityCnnConfig::new(20, 2).init::<TestBackend>(&device);
    }

    #[test]
    fn test_forward_output_shape() {
        let device = Default::default();
        let cfg = ActivityCnnConfig::new(100, 3);
        let model: ActivityCnn<TestBackend> = cfg.init(&device);

        let input = Tensor::<TestBackend, 3>::zeros([4, 100, 2], &device);
        let logits = model.forward(input);
        assert_eq!(logits.dims(), [4, 3]);
    }

    #[test]
    fn test_forward_handles_single_sample() {
        let device = Default::default();
        let cfg = ActivityCnnConfig::new(50, 2);
        let model: ActivityCnn<TestBackend> = cfg.init(&device);

        let input = Tensor::<TestBackend, 3>::ones([1, 50, 2], &device);
        assert_eq!(model.forward(input).dims(), [1, 2]);
    }
}
