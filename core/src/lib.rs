#![no_std]

extern crate alloc;

pub use columns::*;
pub use engine::*;
pub use error::*;
pub use level::*;
pub use resolve::*;
pub use slots::*;
pub use types::*;

mod columns;
mod engine;
mod error;
mod level;
mod resolve;
mod slots;
mod types;
