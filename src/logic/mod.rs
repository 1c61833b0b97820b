pub mod form_data_read;
pub mod query_lifecycle;
pub mod validate;

pub use form_data_read::*;
pub use query_lifecycle::*;
pub use validate::*;
