//! Server-side session state.
//!
//! The client only ever holds an opaque [`domain::SessionId`]; the
//! authentication state lives in a [`SessionStore`].

mod manager;
mod memory;
mod redis_store;
mod store;

pub use manager::SessionManager;
pub use memory::MemorySessionStore;
pub use redis_store::RedisSessionStore;
pub use store::SessionStore;

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockSessionStore;
