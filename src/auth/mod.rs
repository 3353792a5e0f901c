pub mod middleware;
pub mod session;
pub mod token_store;
pub mod validate;
