pub mod db;
#[cfg(test)]
pub mod memory;
pub mod repository;

pub use db::connect_to_mongo;
