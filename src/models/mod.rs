//! Domain model types.
//!
//! Orders are the caller-owned input; batches are the engine's output.

mod batch;
mod order;

pub use batch::Batch;
pub use order::Order;
