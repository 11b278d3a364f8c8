//! Lead status tracking: the closed status enum, the per-session board and
//! the registry that owns one board per open session.

pub mod status;
pub mod board;
pub mod session;

pub use status::LeadStatus;
pub use board::{LeadBoard, StatusChange, StatusCount};
pub use session::{SessionId, SessionRegistry};
