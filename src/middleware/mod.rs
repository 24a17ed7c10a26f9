pub mod auth;
pub mod extract;
pub mod recovery;
pub mod response;

pub use auth::{auth_gate_middleware, AuthGate, AuthMode, IdentityContext, TokenResolver};
pub use extract::{UserId, ValidJson, Validate};
pub use response::{ApiResponse, ApiResult};
