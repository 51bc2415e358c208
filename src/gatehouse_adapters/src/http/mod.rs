pub mod routes;
pub mod state;

pub use routes::error::{AccountApiError, ErrorResponse};
pub use state::AppState;
