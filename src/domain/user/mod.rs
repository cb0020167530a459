// User domain module
// Registration and login payloads, the stored user, and their value objects

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{LoginCredentials, NewUser, User, LOGIN_SCHEMA, REGISTER_SCHEMA};
pub use value_objects::{Email, PhoneType};
