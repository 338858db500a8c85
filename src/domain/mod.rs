pub mod models;
pub mod catalogue;
pub mod tasks;
pub mod storage;
pub mod errors;

pub use models::*;
pub use catalogue::*;
pub use tasks::*;
pub use storage::*;
pub use errors::*;
