//! Business services: image normalization, the pose-feedback relay, and
//! the vision provider abstraction it depends on.

pub mod image;
pub mod providers;
pub mod relay;

pub use relay::{PoseFeedbackRelay, RelayError};
