pub mod ai;
pub mod controller;
pub mod damage;
mod engine;
pub mod state;

mod tests;
