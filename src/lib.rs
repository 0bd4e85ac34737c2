// Speculative premove queue: queue moves during the opponent's turn, preview
// their cumulative effect, auto-execute once it is the user's turn.
pub mod board;
pub mod executor;
pub mod preview;
pub mod queue;
pub mod session;
pub mod submit;
pub mod types;

// Re-exports kept minimal.
pub use types::{Premove, Promotion, Side, Square};
