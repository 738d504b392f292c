pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod input;
pub mod overview;
pub mod session;
pub mod source;
pub mod viewport;
