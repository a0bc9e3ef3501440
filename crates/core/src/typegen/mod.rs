//! TypeScript IR and emission.
//!
//! - `types`: TypeScript IR (TsType, TsProp, TsTypeDef)
//! - `emit`: IR -> code strings (via the `Emit` trait)
//! - `utils`: identifier and comment helpers

mod emit;
mod types;
pub mod utils;

pub use emit::Emit;
pub use types::{TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
