//! Process bootstrap: database, migrations, module lifecycle, HTTP server.

use anyhow::Context;
use bookstore_db::{run_migrations, Database};
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::{modules, utils};

/// Apply every registered module's pending migrations.
pub async fn migrate(db: &Database, registry: &ModuleRegistry) -> anyhow::Result<usize> {
    let applied = run_migrations(db, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;

    tracing::info!(applied, "migrations complete");
    Ok(applied)
}

/// Connect, migrate, and serve until a shutdown signal arrives.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let db = Database::connect(&settings.database)
        .await
        .context("failed to connect to database")?;

    let registry = modules::build_registry(&db);
    migrate(&db, &registry).await?;

    let ctx = InitCtx {
        settings: &settings,
        db: &db,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookstore_http::start_server(&registry, &settings, utils::shutdown_signal()).await;

    let stopped = registry.stop_modules().await;
    db.close().await;

    shutdown_outcome(served, stopped)
}

/// A server error wins over a module shutdown error; the latter is still logged.
fn shutdown_outcome(
    served: anyhow::Result<()>,
    stopped: anyhow::Result<()>,
) -> anyhow::Result<()> {
    match (served, stopped) {
        (Err(serve_err), Err(stop_err)) => {
            tracing::error!(error = ?stop_err, "module shutdown failed");
            Err(serve_err)
        }
        (Err(serve_err), Ok(())) => Err(serve_err),
        (Ok(()), stopped) => stopped,
    }
}
