pub mod factory;
pub mod memory;
pub mod postgrest;
pub mod types;

pub use factory::{StoreFactory, StoreType};
pub use types::{Direction, Filter, Operation, Order, RowRequest, RowStore};
