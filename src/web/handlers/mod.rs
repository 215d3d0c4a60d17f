pub mod analyze;
pub mod data;
pub mod health;
pub mod topics;
