//! Two-layer recurrent sequence regressor.
//!
//! A compact Elman-style network: two stacked tanh recurrent layers of equal
//! hidden width with inverted dropout on the connections between layers
//! (training only), and a linear head reading the final hidden state. Trained
//! by per-sample stochastic gradient descent with backpropagation through
//! time and elementwise gradient clipping. All state is serde-serializable so
//! a trained model can be persisted as an opaque artifact.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecurrentLayer {
    w_in: Array2<f64>,
    w_rec: Array2<f64>,
    bias: Array1<f64>,
}

impl RecurrentLayer {
    fn new(input: usize, hidden: usize, rng: &mut StdRng) -> Self {
        let bound = 1.0 / (input as f64).sqrt();
        Self {
            w_in: Array2::from_shape_fn((hidden, input), |_| rng.gen_range(-bound..bound)),
            w_rec: Array2::from_shape_fn((hidden, hidden), |_| rng.gen_range(-bound..bound)),
            bias: Array1::zeros(hidden),
        }
    }

    fn step(&self, x: ArrayView1<f64>, h: &Array1<f64>) -> Array1<f64> {
        (self.w_in.dot(&x) + self.w_rec.dot(h) + &self.bias).mapv(f64::tanh)
    }
}

/// Training hyperparameters. `epochs` comes from the caller; the rest are
/// fixed by the engine.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub dropout: f64,
    pub clip: f64,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 15,
            learning_rate: 0.05,
            dropout: 0.2,
            clip: 1.0,
            seed: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceModel {
    layer1: RecurrentLayer,
    layer2: RecurrentLayer,
    head_w: Array1<f64>,
    head_b: f64,
    pub input_size: usize,
    pub hidden_size: usize,
}

impl SequenceModel {
    pub fn new(input_size: usize, hidden_size: usize, rng: &mut StdRng) -> Self {
        let bound = 1.0 / (hidden_size as f64).sqrt();
        Self {
            layer1: RecurrentLayer::new(input_size, hidden_size, rng),
            layer2: RecurrentLayer::new(hidden_size, hidden_size, rng),
            head_w: Array1::from_shape_fn(hidden_size, |_| rng.gen_range(-bound..bound)),
            head_b: 0.0,
            input_size,
            hidden_size,
        }
    }

    /// Forward pass over one sequence (rows are timesteps), no dropout
    pub fn predict(&self, sequence: ArrayView2<f64>) -> f64 {
        let mut h1 = Array1::zeros(self.hidden_size);
        let mut h2 = Array1::zeros(self.hidden_size);
        for x in sequence.axis_iter(Axis(0)) {
            h1 = self.layer1.step(x, &h1);
            h2 = self.layer2.step(h1.view(), &h2);
        }
        self.head_w.dot(&h2) + self.head_b
    }

    /// Train on (sequence, scaled next close) pairs, in the given order
    pub fn fit(&mut self, inputs: &[Array2<f64>], targets: &[f64], config: &TrainConfig) {
        let mut rng = StdRng::seed_from_u64(config.seed);
        for epoch in 0..config.epochs {
            let mut loss_sum = 0.0;
            for (sequence, &target) in inputs.iter().zip(targets) {
                loss_sum += self.train_sample(sequence, target, config, &mut rng);
            }
            if !inputs.is_empty() {
                debug!(
                    epoch = epoch + 1,
                    loss = loss_sum / inputs.len() as f64,
                    "training epoch complete"
                );
            }
        }
    }

    /// One forward/backward pass plus parameter update; returns squared error
    fn train_sample(
        &mut self,
        sequence: &Array2<f64>,
        target: f64,
        config: &TrainConfig,
        rng: &mut StdRng,
    ) -> f64 {
        let steps = sequence.nrows();
        let hidden = self.hidden_size;

        // Forward, keeping activations for BPTT. Index 0 holds the initial
        // zero state; timestep t lives at index t.
        let mut h1s: Vec<Array1<f64>> = Vec::with_capacity(steps + 1);
        let mut h2s: Vec<Array1<f64>> = Vec::with_capacity(steps + 1);
        let mut z1s: Vec<Array1<f64>> = Vec::with_capacity(steps);
        let mut masks1: Vec<Array1<f64>> = Vec::with_capacity(steps);
        h1s.push(Array1::zeros(hidden));
        h2s.push(Array1::zeros(hidden));

        for x in sequence.axis_iter(Axis(0)) {
            let h1 = self.layer1.step(x, &h1s[h1s.len() - 1]);
            let mask1 = dropout_mask(hidden, config.dropout, rng);
            let z1 = &h1 * &mask1;
            let h2 = self.layer2.step(z1.view(), &h2s[h2s.len() - 1]);
            h1s.push(h1);
            z1s.push(z1);
            masks1.push(mask1);
            h2s.push(h2);
        }

        let mask2 = dropout_mask(hidden, config.dropout, rng);
        let z2 = &h2s[steps] * &mask2;
        let output = self.head_w.dot(&z2) + self.head_b;
        let error = output - target;

        // Head gradients
        let d_output = 2.0 * error;
        let mut g_head_w = z2.mapv(|v| v * d_output);
        let g_head_b = d_output;

        // Layer 2 BPTT, collecting the gradient flowing down into layer 1
        let mut g2_in = Array2::zeros(self.layer2.w_in.raw_dim());
        let mut g2_rec = Array2::zeros(self.layer2.w_rec.raw_dim());
        let mut g2_bias = Array1::zeros(hidden);
        let mut down: Vec<Array1<f64>> = vec![Array1::zeros(hidden); steps];

        let mut dh2 = &(&self.head_w * &mask2) * d_output;
        for t in (1..=steps).rev() {
            let d_raw = &dh2 * &h2s[t].mapv(|h| 1.0 - h * h);
            g2_in = g2_in + outer(d_raw.view(), z1s[t - 1].view());
            g2_rec = g2_rec + outer(d_raw.view(), h2s[t - 1].view());
            g2_bias = g2_bias + &d_raw;
            down[t - 1] = self.layer2.w_in.t().dot(&d_raw) * &masks1[t - 1];
            dh2 = self.layer2.w_rec.t().dot(&d_raw);
        }

        // Layer 1 BPTT
        let mut g1_in = Array2::zeros(self.layer1.w_in.raw_dim());
        let mut g1_rec = Array2::zeros(self.layer1.w_rec.raw_dim());
        let mut g1_bias = Array1::zeros(hidden);

        let mut dh1 = Array1::zeros(hidden);
        for t in (1..=steps).rev() {
            let total = &dh1 + &down[t - 1];
            let d_raw = &total * &h1s[t].mapv(|h| 1.0 - h * h);
            g1_in = g1_in + outer(d_raw.view(), sequence.row(t - 1));
            g1_rec = g1_rec + outer(d_raw.view(), h1s[t - 1].view());
            g1_bias = g1_bias + &d_raw;
            dh1 = self.layer1.w_rec.t().dot(&d_raw);
        }

        // Clip and apply
        let clip = config.clip;
        let lr = config.learning_rate;
        for grad in [&mut g1_in, &mut g1_rec, &mut g2_in, &mut g2_rec] {
            grad.mapv_inplace(|g: f64| g.clamp(-clip, clip));
        }
        for grad in [&mut g1_bias, &mut g2_bias, &mut g_head_w] {
            grad.mapv_inplace(|g| g.clamp(-clip, clip));
        }

        self.layer1.w_in = &self.layer1.w_in - &(g1_in * lr);
        self.layer1.w_rec = &self.layer1.w_rec - &(g1_rec * lr);
        self.layer1.bias = &self.layer1.bias - &(g1_bias * lr);
        self.layer2.w_in = &self.layer2.w_in - &(g2_in * lr);
        self.layer2.w_rec = &self.layer2.w_rec - &(g2_rec * lr);
        self.layer2.bias = &self.layer2.bias - &(g2_bias * lr);
        self.head_w = &self.head_w - &(g_head_w * lr);
        self.head_b -= lr * g_head_b.clamp(-clip, clip);

        error * error
    }
}

/// Inverted dropout mask: zero with probability `p`, else 1/(1-p)
fn dropout_mask(size: usize, p: f64, rng: &mut StdRng) -> Array1<f64> {
    if p <= 0.0 {
        return Array1::ones(size);
    }
    let keep = 1.0 - p;
    Array1::from_shape_fn(size, |_| {
        if rng.gen::<f64>() < keep {
            1.0 / keep
        } else {
            0.0
        }
    })
}

fn outer(u: ArrayView1<f64>, v: ArrayView1<f64>) -> Array2<f64> {
    let col = u.insert_axis(Axis(1));
    let row = v.insert_axis(Axis(0));
    col.dot(&row)
}
