pub mod store;
pub mod tracker;

pub use store::{
    FileStore,
    GrammarProgress,
    ProgressStore,
};
pub use tracker::ProgressTracker;
