// engine crate

mod context;
mod validate;

pub use context::{engine, init, init_with_store, is_initialized, validate};
pub use validate::ValidationEngine;
