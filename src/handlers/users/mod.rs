// handlers/users/mod.rs - User management handlers
//
// Every handler talks to the UserStore held in AppState and never to a
// concrete backend. Path ids go through the UserId extractor (400
// InvalidIdentifier on failure), bodies through ValidJson (400 InvalidPayload).

pub mod create; // POST   /api/v1/users
pub mod delete; // DELETE /api/v1/users/:id
pub mod list;   // GET    /api/v1/users
pub mod show;   // GET    /api/v1/users/:id
pub mod update; // PUT    /api/v1/users/:id

pub use create::user_create;
pub use delete::user_delete;
pub use list::user_list;
pub use show::user_show;
pub use update::user_update;
