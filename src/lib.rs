pub mod catalog;
pub mod heightmap;
pub mod render;
pub mod solver;
pub mod types;
