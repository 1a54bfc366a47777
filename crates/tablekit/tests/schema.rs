mod common;

use common::{RecordingDriver, text};
use serde_json::json;
use tablekit::{Columns, ConditionSet, SelectOptions, Table, TableConfig, TableError};

#[test]
fn invalid_table_name_is_rejected() {
    let driver = RecordingDriver::posts();
    let err = Table::new(&driver, "posts; DROP TABLE users").unwrap_err();
    assert!(matches!(err, TableError::Validation(_)));
}

#[test]
fn missing_table_fails_data_operations() {
    let driver = RecordingDriver::posts();
    let ghosts = Table::new(&driver, "ghosts").unwrap();
    assert!(ghosts.columns().is_empty());

    let err = ghosts
        .select_where(Columns::all(), ConditionSet::new(), SelectOptions::new())
        .unwrap_err();
    assert!(err.is_table_missing());
    assert!(ghosts.count().unwrap_err().is_table_missing());
    assert!(
        ghosts
            .delete_rows(&ConditionSet::new().with("id", 1), "%d")
            .unwrap_err()
            .is_table_missing()
    );
    assert!(driver.statements().is_empty());
}

#[test]
fn table_exists_compares_first_value() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    driver.returns(vec![json!({"Tables_in_blog (posts)": "posts"})]);
    assert!(posts.table_exists().unwrap());
    let last = driver.last().unwrap();
    assert_eq!(last.sql, "SHOW TABLES LIKE ?");
    assert_eq!(last.params, vec![text("posts")]);

    driver.returns(vec![]);
    assert!(!posts.table_exists().unwrap());
}

#[test]
fn create_table_when_missing() {
    let driver = RecordingDriver::new();
    let config = TableConfig::new().charset_collate("DEFAULT CHARSET=utf8mb4");
    let logs = Table::with_config(&driver, "logs", config).unwrap();

    let created = logs
        .create_table_if_missing(&["id INT NOT NULL AUTO_INCREMENT", "PRIMARY KEY (id)"])
        .unwrap();

    assert!(created);
    assert_eq!(
        driver.last().unwrap().sql,
        "CREATE TABLE logs (id INT NOT NULL AUTO_INCREMENT,PRIMARY KEY (id)) DEFAULT CHARSET=utf8mb4;"
    );
}

#[test]
fn create_table_skips_existing_table_and_empty_definitions() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    let none: [&str; 0] = [];
    assert!(!posts.create_table_if_missing(&none).unwrap());
    assert!(driver.statements().is_empty());

    driver.returns(vec![json!({"t": "posts"})]);
    assert!(!posts.create_table_if_missing(&["id INT"]).unwrap());
    assert_eq!(driver.statements().len(), 1);
}

#[test]
fn reopen_refreshes_columns() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();
    let posts = posts.reopen().unwrap();
    assert_eq!(posts.columns(), ["id", "title", "status", "author"]);
}

#[test]
fn config_from_toml() {
    let config = TableConfig::from_toml_str(
        r#"
        charset_collate = "DEFAULT CHARSET=utf8mb4"
        default_order = "DESC"

        [sql_log]
        level = "info"
        "#,
    )
    .unwrap();
    assert_eq!(
        config.charset_collate.as_deref(),
        Some("DEFAULT CHARSET=utf8mb4")
    );
}
