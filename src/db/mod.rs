pub mod entities;
pub mod genres;
pub mod transaction;

pub use entities::*;
pub use genres::Genres;
pub use transaction::Txn;
