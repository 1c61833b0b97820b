pub mod common;
pub mod form_data;
pub mod query;

pub use common::*;
pub use form_data::*;
pub use query::*;
