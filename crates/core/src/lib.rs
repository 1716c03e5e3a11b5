pub mod block;
pub mod error;
pub mod hook;
pub mod index;
pub mod payload;
pub mod session;
pub mod source;
pub mod totals;

pub use block::BlockRecord;
pub use error::Error;
pub use index::{BlockIndex, IndexSnapshot, InsertOutcome};

pub type Result<T> = std::result::Result<T, error::Error>;
