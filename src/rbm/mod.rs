pub mod activations;
pub mod machine;
pub mod snapshot;

pub use activations::Activations;
pub use machine::Rbm;
pub use snapshot::WeightSnapshot;
