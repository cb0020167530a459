pub mod cards;
pub mod health;
pub mod users;
