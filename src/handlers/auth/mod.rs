// handlers/auth/mod.rs - Identity handlers
//
// Mounted behind an enforced AuthGate; by the time these run the
// IdentityContext in the request is authenticated.

pub mod whoami; // GET /api/v1/auth/whoami

pub use whoami::whoami_get;
