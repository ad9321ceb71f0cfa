//! Identity and session handling
//!
//! Provides JWT-based owner identity. There are no passwords: a session is
//! issued for a fresh owner key and refreshed with its refresh token.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::{AuthUser, OnboardedUser};
