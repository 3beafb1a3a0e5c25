use crate::prelude::*;

pub mod cpu;

pub mod prelude {
    pub use super::Device;
    pub use super::cpu::CPUDevice;
}

/// Abstraction over device which can calculate gradients
/// of the training examples batch.
pub trait Device {
    /// Calculate gradients of all the given examples (perform backward
    /// propagation) and return them in the same order as the examples.
    ///
    /// Network is not modified, so examples can be processed in any order
    /// or in parallel as long as the result order is kept.
    fn gradients<F: Float>(
        &self,
        network: &Network<F>,
        examples: &[Example<F>]
    ) -> Result<Vec<Gradient<F>>, NetworkError> {
        examples.iter()
            .map(|(input, expected)| network.gradient(input, expected))
            .collect()
    }
}
