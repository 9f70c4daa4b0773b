pub mod health;
pub use self::health::health;

pub mod register;
pub use self::register::{form_redirect, register};

/// Path of the static registration form page, served next to this service.
pub const FORM_PATH: &str = "/register.html";
