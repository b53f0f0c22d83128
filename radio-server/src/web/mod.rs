//! HTTP layer: router, handlers, DTOs, and error mapping.

mod dto;
mod error;
mod routes;
mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
