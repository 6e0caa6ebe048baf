pub mod account;
pub mod controller;
pub mod index;
pub mod model;
pub mod service;
