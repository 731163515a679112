pub mod enrich;
pub mod health;
