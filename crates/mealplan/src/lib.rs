mod command;
mod query;
mod store;

pub use command::*;
pub use query::*;
pub use store::*;
