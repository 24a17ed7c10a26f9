pub mod user;

pub use user::{CreateUserRequest, NewUser, UpdateUserRequest, User, UserChanges, UserResponse};
