#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod summary;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
