pub mod datatype;
pub mod ledger;
pub mod persist;
pub mod sample_data;

pub use datatype::*;
pub use ledger::*;
pub use persist::{Storage, CREDITS_KEY, SALES_KEY};
