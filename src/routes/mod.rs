mod auth;
mod general;
mod users;

pub use auth::login;
pub use auth::logout;
pub use auth::refresh;
pub use auth::register;
pub use general::health_check;
pub use general::welcome;
pub use users::get_current_user;
