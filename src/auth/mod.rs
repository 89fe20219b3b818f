mod middleware;
mod token;

pub use middleware::ensure_correct_user;
pub use token::{Claims, create_token, decode_token};

#[cfg(test)]
pub use middleware::AuthState;
