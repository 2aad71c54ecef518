pub mod controller;
pub mod usecase;
