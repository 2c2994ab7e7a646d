pub mod auth;
pub mod response;

pub use auth::{role_claims_middleware, Principal, RoleClaims};
pub use response::{ApiResponse, ApiResult};
