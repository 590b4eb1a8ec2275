//! Main module for mathml library functionality

pub mod ast;
pub mod config;
pub mod emitting;
pub mod formats;
pub mod math;
pub mod testing;
pub mod token;
pub mod transforms;
pub mod validation;
