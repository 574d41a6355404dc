pub mod indicator;
pub mod query;
pub mod quote;
pub mod response;

pub use indicator::*;
pub use query::*;
pub use quote::*;
pub use response::*;
