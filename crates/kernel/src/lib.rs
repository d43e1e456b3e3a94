pub mod module;
pub mod registry;
pub mod settings;

pub use bookstore_db::Migration;
pub use module::{resource_path, InitCtx, Module, API_PREFIX};
pub use registry::ModuleRegistry;
