use std::path::PathBuf;

use anyhow::Context;
use bookstore_db::Database;
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};

const HTTP_METHODS: [&str; 5] = ["get", "post", "put", "patch", "delete"];

#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about = "Bookstore catalog service")]
struct Cli {
    /// Configuration environment (local, staging, production).
    #[arg(long, global = true)]
    env: Option<String>,

    /// Directory holding base.toml and the per-environment overlays.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Migrate the database and serve the HTTP API.
    Serve,
    /// Apply pending migrations and exit.
    Migrate,
    /// Print every HTTP route the service exposes.
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            let settings = load_settings(&cli)?;
            bookstore_telemetry::init(&settings.telemetry)?;
            bookstore_app::app::run(settings).await
        }
        Command::Migrate => {
            let settings = load_settings(&cli)?;
            bookstore_telemetry::init(&settings.telemetry)?;

            let db = Database::connect(&settings.database)
                .await
                .context("failed to connect to database")?;
            let registry = bookstore_app::build_registry(&db);
            let applied = bookstore_app::app::migrate(&db, &registry).await?;
            db.close().await;

            println!("applied {applied} migration(s)");
            Ok(())
        }
        Command::Routes => {
            let db = Database::in_memory()
                .await
                .context("failed to open scratch database")?;
            let registry = bookstore_app::build_registry(&db);

            for (method, path) in route_table(&bookstore_http::router::collect_openapi(&registry)) {
                println!("{method:<7} {path}");
            }
            Ok(())
        }
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    Settings::load_with(cli.config_dir.clone(), cli.env.clone())
        .context("failed to load bookstore settings")
}

/// Flatten an OpenAPI document into `(METHOD, path)` pairs, sorted by path.
fn route_table(openapi: &serde_json::Value) -> Vec<(String, String)> {
    let mut routes = Vec::new();
    let Some(paths) = openapi.get("paths").and_then(|p| p.as_object()) else {
        return routes;
    };

    for (path, item) in paths {
        for method in HTTP_METHODS {
            if item.get(method).is_some() {
                routes.push((method.to_uppercase(), path.clone()));
            }
        }
    }
    routes.sort_by(|a, b| a.1.cmp(&b.1));
    routes
}
