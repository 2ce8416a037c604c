pub mod error;
pub mod frequency;
pub mod models;
pub mod picks;
pub mod repository;
