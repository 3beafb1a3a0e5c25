pub mod float;
pub mod error;
pub mod activations;
pub mod losses;
pub mod sampler;
pub mod gradient;
pub mod network;
pub mod device;
pub mod training;

pub mod prelude {
    pub use super::float::*;
    pub use super::error::*;
    pub use super::activations::*;
    pub use super::losses::*;
    pub use super::sampler::*;
    pub use super::gradient::*;
    pub use super::network::*;
    pub use super::device::prelude::*;
    pub use super::training::*;
}
