//! JSON data transfer objects.

pub mod health;
