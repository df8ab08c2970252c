//! Sequence-model machinery behind the price prediction engine.

pub mod metrics;
pub mod network;
pub mod scaler;
pub mod store;

pub use network::{SequenceModel, TrainConfig};
pub use scaler::MinMaxScaler;
pub use store::ModelStore;
