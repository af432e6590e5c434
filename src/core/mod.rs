pub mod catalog;
pub mod errors;
pub mod models;

pub use errors::BunpoError;
pub use models::GrammarEntry;
