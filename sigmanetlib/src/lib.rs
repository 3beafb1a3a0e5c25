//! Minimal fully connected feed-forward network with sigmoid activations,
//! trained by backpropagation with mini-batch gradient descent.

pub mod neural_network;

pub mod prelude {
    pub use super::neural_network::prelude::*;
}
