pub mod page;
pub mod server;
pub mod store;

pub use server::{build_router, start, AppState, ServerHandle};
pub use store::{latest_message, BoardError};
