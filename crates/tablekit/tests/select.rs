mod common;

use common::{RecordingDriver, Recorded, row, text};
use serde::Deserialize;
use serde_json::json;
use tablekit::{
    Columns, ConditionSet, Filter, Format, FormatSpec, Limit, Operator, OperatorSpec, Order, Param,
    QueryOutput, ResultShape, SelectOptions, Table, TableConfig, TableError,
};

#[test]
fn select_where_with_default_operator() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    posts
        .select_where(
            ["id", "title"],
            ConditionSet::new().with("status", "draft"),
            SelectOptions::new(),
        )
        .unwrap();

    assert_eq!(
        driver.last().unwrap(),
        Recorded {
            sql: "SELECT id,title FROM posts WHERE 1=1 AND `status` = ?".into(),
            params: vec![text("draft")],
        }
    );
}

#[test]
fn select_row_with_explicit_operator_and_format() {
    let driver = RecordingDriver::new().with_table("posts", &["id", "title", "status"]);
    let posts = Table::new(&driver, "posts").unwrap();

    let filter = Filter::new(ConditionSet::new().with("status", "draft"))
        .operators("=")
        .formats("%s");
    posts
        .select_row(["id", "title"], filter, SelectOptions::new())
        .unwrap();

    let last = driver.last().unwrap();
    assert_eq!(
        last.sql,
        "SELECT id,title FROM posts WHERE 1=1 AND `status` = ?"
    );
    assert_eq!(last.params, vec![text("draft")]);
}

#[test]
fn select_by_in_list_with_integer_format() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    posts
        .select_by(
            Columns::all(),
            "id",
            &json!([1, 2, 3]),
            Operator::In,
            "%d",
            SelectOptions::new(),
        )
        .unwrap();

    let last = driver.last().unwrap();
    assert_eq!(last.sql, "SELECT * FROM posts WHERE `id` IN (?, ?, ?)");
    assert_eq!(last.params, vec![Param::Int(1), Param::Int(2), Param::Int(3)]);
}

#[test]
fn select_by_keeps_empty_value() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    posts
        .select_by("id", "status", &json!(""), "=", "%s", SelectOptions::new())
        .unwrap();

    let last = driver.last().unwrap();
    assert_eq!(last.sql, "SELECT id FROM posts WHERE `status` = ?");
    assert_eq!(last.params, vec![text("")]);
}

#[test]
fn empty_conditions_are_skipped_and_positions_stay_aligned() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    let conditions = ConditionSet::new()
        .with("author", "")
        .with("id", json!([10, 20]))
        .with("title", "%rust%");
    let filter = Filter::new(conditions)
        .operators(OperatorSpec::by_position(["=", "between", "like"]))
        .formats(FormatSpec::by_position([Format::String, Format::Integer]));

    posts
        .select_where(Columns::all(), filter, SelectOptions::new())
        .unwrap();

    let last = driver.last().unwrap();
    assert_eq!(
        last.sql,
        "SELECT * FROM posts WHERE 1=1 AND `id` BETWEEN ? AND ? AND `title` LIKE ?"
    );
    assert_eq!(
        last.params,
        vec![Param::Int(10), Param::Int(20), text("%rust%")]
    );
}

#[test]
fn between_with_one_value_issues_nothing() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    let filter = Filter::new(ConditionSet::new().with("id", json!([5])))
        .operators(Operator::Between);
    let err = posts
        .select_where(Columns::all(), filter, SelectOptions::new())
        .unwrap_err();

    assert!(matches!(
        err,
        TableError::Arity {
            expected: 2,
            got: 1,
            ..
        }
    ));
    assert!(driver.statements().is_empty());
}

#[test]
fn unknown_columns_and_order_by_are_dropped() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    posts
        .select_where(
            ["password"],
            ConditionSet::new(),
            SelectOptions::new().order_by("password; DROP TABLE posts"),
        )
        .unwrap();

    assert_eq!(driver.last().unwrap().sql, "SELECT * FROM posts WHERE 1=1");
}

#[test]
fn order_join_limit_and_raw_columns() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    posts
        .select_where(
            Columns::from(["id"]).with_raw(["u.name AS author_name"]),
            ConditionSet::new().with("status", "live"),
            SelectOptions::new()
                .join("LEFT JOIN users u ON u.id = posts.author")
                .order_by("id")
                .order(Order::Desc)
                .limit(Limit::offset(20, 10)),
        )
        .unwrap();

    assert_eq!(
        driver.last().unwrap().sql,
        "SELECT id,u.name AS author_name FROM posts LEFT JOIN users u ON u.id = posts.author \
         WHERE 1=1 AND `status` = ? ORDER BY id DESC LIMIT 20,10"
    );
}

#[test]
fn lower_case_order_is_ascending() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    posts
        .select_all(SelectOptions::new().order_by("title").order("desc"))
        .unwrap();

    assert_eq!(
        driver.last().unwrap().sql,
        "SELECT * FROM posts ORDER BY title ASC"
    );
}

#[test]
fn default_order_comes_from_config() {
    let driver = RecordingDriver::posts();
    let config = TableConfig::new().default_order(Order::Desc);
    let posts = Table::with_config(&driver, "posts", config).unwrap();

    posts
        .select_all(SelectOptions::new().order_by("id").limit(Limit::count(5)))
        .unwrap();

    assert_eq!(
        driver.last().unwrap().sql,
        "SELECT * FROM posts ORDER BY id DESC LIMIT 5"
    );
}

#[test]
fn table_filters_join_with_and() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    posts
        .select_where(
            Columns::all(),
            ConditionSet::new().with("status", "a").with("author", 3),
            SelectOptions::new(),
        )
        .unwrap();

    assert_eq!(
        driver.last().unwrap().sql,
        "SELECT * FROM posts WHERE 1=1 AND `status` = ? AND `author` = ?"
    );
}

#[test]
fn result_shapes() {
    let driver = RecordingDriver::posts();
    driver.returns(vec![
        json!({"id": 1, "title": "a"}),
        json!({"id": 2, "title": "b"}),
    ]);
    let posts = Table::new(&driver, "posts").unwrap();

    let keyed = posts
        .select_all(SelectOptions::new().shape(ResultShape::Keyed))
        .unwrap();
    let QueryOutput::Keyed(map) = keyed else {
        panic!("expected keyed output");
    };
    assert_eq!(map["2"]["title"], json!("b"));

    let arrays = posts
        .select_all(SelectOptions::new().shape(ResultShape::Arrays))
        .unwrap();
    assert_eq!(
        arrays,
        QueryOutput::Arrays(vec![vec![json!(1), json!("a")], vec![json!(2), json!("b")]])
    );
}

#[test]
fn select_row_honours_offset() {
    let driver = RecordingDriver::posts();
    driver.returns(vec![
        json!({"id": 1, "title": "a"}),
        json!({"id": 2, "title": "b"}),
    ]);
    let posts = Table::new(&driver, "posts").unwrap();

    let second = posts
        .select_row(
            ["id", "title"],
            ConditionSet::new(),
            SelectOptions::new().row_offset(1),
        )
        .unwrap();
    assert_eq!(
        second,
        QueryOutput::Objects(vec![row(json!({"id": 2, "title": "b"}))])
    );

    let missing = posts
        .select_row(
            ["id"],
            ConditionSet::new(),
            SelectOptions::new().row_offset(5),
        )
        .unwrap();
    assert!(missing.is_empty());
}

#[derive(Debug, Deserialize, PartialEq)]
struct Post {
    id: i64,
    title: String,
}

#[test]
fn typed_rows() {
    let driver = RecordingDriver::posts();
    driver.returns(vec![json!({"id": 7, "title": "hello"})]);
    let posts = Table::new(&driver, "posts").unwrap();

    let post: Option<Post> = posts
        .select_row_as(["id", "title"], ConditionSet::new().with("id", 7), 0)
        .unwrap();
    assert_eq!(
        post,
        Some(Post {
            id: 7,
            title: "hello".into()
        })
    );

    let all: Vec<Post> = posts
        .select_where_as(Columns::all(), ConditionSet::new(), SelectOptions::new())
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn scalar_and_counts() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    driver.returns(vec![json!({"title": "first"})]);
    let title = posts
        .select_scalar("title", ConditionSet::new().with("id", 1))
        .unwrap();
    assert_eq!(title, Some(json!("first")));
    assert_eq!(
        driver.last().unwrap().sql,
        "SELECT title FROM posts WHERE 1=1 AND `id` = ?"
    );

    driver.returns(vec![json!({"COUNT(*)": 42})]);
    assert_eq!(posts.count().unwrap(), 42);
    assert_eq!(driver.last().unwrap().sql, "SELECT COUNT(*) FROM posts");

    driver.returns(vec![
        json!({"status": "draft", "count": 3}),
        json!({"status": "live", "count": "4"}),
    ]);
    let counts = posts.count_by_column("status").unwrap();
    assert_eq!(counts.get("draft"), 3);
    assert_eq!(counts.get("live"), 4);
    assert_eq!(counts.get("archived"), 0);
    assert_eq!(counts.all, 7);
    assert_eq!(
        driver.last().unwrap().sql,
        "SELECT status, COUNT(*) AS count FROM posts GROUP BY status"
    );
}

#[test]
fn count_by_unknown_column_issues_nothing() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    let counts = posts.count_by_column("nope").unwrap();
    assert_eq!(counts.all, 0);
    assert!(driver.statements().is_empty());
}

#[test]
fn custom_operator_appends_raw_fragments() {
    let driver = RecordingDriver::posts();
    let posts = Table::new(&driver, "posts").unwrap();

    let filter = Filter::new(
        ConditionSet::new()
            .with("status", "live")
            .with("raw", json!(["author IS NOT NULL"])),
    )
    .operators(OperatorSpec::by_field([("raw", Operator::Custom)]));
    posts
        .select_where(Columns::all(), filter, SelectOptions::new())
        .unwrap();

    let last = driver.last().unwrap();
    assert_eq!(
        last.sql,
        "SELECT * FROM posts WHERE 1=1 AND `status` = ? AND author IS NOT NULL"
    );
    assert_eq!(last.params, vec![text("live")]);
}
