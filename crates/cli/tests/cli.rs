use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("bookstore")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for command in ["serve", "migrate", "routes"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn routes_prints_seller_and_book_endpoints() {
    let output = Command::cargo_bin("bookstore")
        .unwrap()
        .arg("routes")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("/api/v1/sellers/"));
    assert!(stdout.contains("/api/v1/sellers/{id}"));
    assert!(stdout.contains("/api/v1/books/"));
    assert!(stdout.contains("/healthz"));
}

#[test]
fn migrate_creates_schema_in_a_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");

    let output = Command::cargo_bin("bookstore")
        .unwrap()
        .arg("migrate")
        .arg("--config-dir")
        .arg(dir.path())
        .env(
            "BOOKSTORE_DATABASE__URL",
            format!("sqlite://{}?mode=rwc", db_path.display()),
        )
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("applied 2 migration(s)"));
    assert!(db_path.exists());
}
