//! Outbound adapters implementing domain ports for infrastructure concerns.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **persistence**: process-local user store guarded by a mutex
//! - **tokens**: process-local session token store
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
pub mod tokens;

pub use persistence::InMemoryUserRepository;
pub use tokens::InMemoryTokenIssuer;
