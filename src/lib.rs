pub mod codec;
pub mod conditions;
pub mod config;
pub mod contour;
pub mod errors;
pub mod geometry;
pub mod polar;
pub mod serialize;
pub mod solver;
