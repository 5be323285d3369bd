//! Password hashing and token issuance

mod hashing;
mod tokens;

pub use hashing::HashingManager;
pub use tokens::{Claims, TokenManager, TokenPair, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
