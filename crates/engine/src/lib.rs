//! Collaborators around the core session: the drag/snap placement flow, the
//! JSON high-score store, and a logging feedback sink.

pub mod feedback;
pub mod place;
pub mod store;

pub use feedback::LogFeedback;
pub use place::{find_best_placement, DragController, Preview};
pub use store::{JsonHighScoreStore, StoreError};
