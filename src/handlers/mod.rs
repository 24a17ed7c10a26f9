// handlers/mod.rs - Handler tiers
//
// system → public probes and banners (/, /health, /api/v1/hello)
// users  → user CRUD (/api/v1/users), gated per configuration
// auth   → identity inspection (/api/v1/auth/*), always behind an enforced gate

pub mod auth;
pub mod system;
pub mod users;
