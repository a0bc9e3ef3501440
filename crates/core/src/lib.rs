//! YAPI interface definitions to TypeScript declarations.
//!
//! This crate holds the schema-to-type compiler and the batch pipeline around
//! it. Pure pieces (normalization, resolution, module generation) never await;
//! the batch coordinator talks to the outside world only through the
//! [`DetailSource`] and [`ModuleStore`] capabilities.

pub mod batch;
pub mod categories;
pub mod error;
pub mod generator;
pub mod interface;
pub mod params;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod typegen;
pub mod yapi;

// Re-export commonly used types
pub use batch::{
    BatchCoordinator, BatchFailure, BatchOptions, BatchResult, CollisionStrategy,
    DEFAULT_CONCURRENCY, DetailSource,
};
pub use categories::{
    InterfaceCategory, MenuEntry, MenuInterface, Selection, UNCATEGORIZED, index_categories,
    select,
};
pub use error::{BatchError, FetchError, SchemaError, SelectionError, StoreError};
pub use generator::{DeclarationKind, GeneratedModule, ModuleHeader, TypeDeclaration, generate_module};
pub use interface::{InterfaceDetail, InterfaceSummary, ParamSpec, interface_name};
pub use params::{ParameterSet, build_parameter_set};
pub use resolver::resolve;
pub use schema::{MAX_SCHEMA_DEPTH, PrimitiveKind, SchemaNode, SchemaProperty};
pub use store::{FsModuleStore, ModuleStore};
pub use typegen::Emit;
pub use yapi::YapiClient;
