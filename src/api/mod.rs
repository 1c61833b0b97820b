pub mod envelope;
pub mod handlers;
pub mod routes;

pub use envelope::*;
pub use handlers::*;
pub use routes::*;
