pub mod stream;
pub mod bernoulli;

pub use stream::RandomStream;
pub use bernoulli::binomial;
