// Card domain module
// Card uploads, the stored card, and their value objects

#![allow(clippy::module_inception)]

pub mod card;
pub mod value_objects;

pub use card::{Card, NewCard, CARD_SCHEMA};
pub use value_objects::{CardStatus, Orientation};
