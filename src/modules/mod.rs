pub mod books;
pub mod sellers;

use bookstore_db::Database;
use bookstore_kernel::ModuleRegistry;

/// Register all project modules; sellers first since books reference them
pub fn register_all(registry: &mut ModuleRegistry, db: &Database) {
    registry.register(sellers::create_module(db));
    registry.register(books::create_module(db));
}

/// Registry with every project module wired to `db`
pub fn build_registry(db: &Database) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    register_all(&mut registry, db);
    registry
}
