pub mod bearer;
pub mod jwt;

pub use bearer::BearerAccount;
pub use jwt::{Claims, IssuedToken, JwtConfig, JwtTokenIssuer, TokenAuthError};
