use flatline::group::{group_by, group_by_field, try_group_by, FieldError, Record};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
struct User {
    name: &'static str,
    age: u32,
    state: &'static str,
}

impl Record for User {
    fn field_key(&self, field: &str) -> Option<String> {
        serde_json::to_value(self).ok()?.field_key(field)
    }
}

fn users() -> Vec<User> {
    vec![
        User { name: "Greg", age: 12, state: "NJ" },
        User { name: "Julie", age: 18, state: "NY" },
        User { name: "Joe", age: 11, state: "TX" },
        User { name: "Bobby", age: 23, state: "NJ" },
        User { name: "John", age: 13, state: "NV" },
        User { name: "Katherine", age: 45, state: "NJ" },
        User { name: "Dan", age: 67, state: "MA" },
    ]
}

fn names(users: &[User]) -> Vec<&'static str> {
    users.iter().map(|user| user.name).collect()
}

#[test]
fn keys_match_selector_return_values() {
    let users = users();
    let grouped = group_by(users.clone(), |user| {
        if user.age > 13 {
            "over13"
        } else {
            "underOrExactly13"
        }
    });

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped["underOrExactly13"].len(), 3);
    assert_eq!(grouped["over13"].len(), users.len() - 3);
    assert_eq!(names(&grouped["underOrExactly13"]), ["Greg", "Joe", "John"]);
}

#[test]
fn keys_are_not_limited_to_two_buckets() {
    let grouped = group_by(users(), |user| user.age / 10);
    assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), [1, 2, 4, 6]);
    assert_eq!(names(&grouped[&1]), ["Greg", "Julie", "Joe", "John"]);
    assert_eq!(grouped.total(), users().len());
}

#[test]
fn field_name_groups_in_first_occurrence_order() {
    let grouped = group_by_field(users(), "state").unwrap();

    assert_eq!(
        grouped.keys().collect::<Vec<_>>(),
        ["NJ", "NY", "TX", "NV", "MA"]
    );
    assert_eq!(names(&grouped["NJ"]), ["Greg", "Bobby", "Katherine"]);
    assert_eq!(grouped.total(), users().len());
}

#[test]
fn numeric_fields_are_stringified() {
    let grouped = group_by_field(users(), "age").unwrap();
    assert_eq!(grouped.len(), users().len());
    assert_eq!(names(&grouped["45"]), ["Katherine"]);
}

#[test]
fn json_records() {
    let records = vec![json!({ "state": "NJ" }), json!({ "state": "NY" }), json!({ "state": "NJ" })];
    let grouped = group_by_field(records.iter(), "state").unwrap();

    let expected: Vec<(String, Vec<&Value>)> = vec![
        ("NJ".into(), vec![&records[0], &records[2]]),
        ("NY".into(), vec![&records[1]]),
    ];
    assert_eq!(grouped.into_vec(), expected);
}

#[test]
fn missing_field_fails_whole_call() {
    let err = group_by_field(users(), "zip").unwrap_err();
    assert_eq!(
        err,
        FieldError::Missing {
            index: 0,
            field: "zip".to_string()
        }
    );
}

#[test]
fn failing_selector_returns_no_partial_map() {
    let res = try_group_by(users(), |user| {
        if user.state == "NV" {
            Err(format!("{} lives in NV", user.name))
        } else {
            Ok(user.state)
        }
    });
    assert_eq!(res.unwrap_err(), "John lives in NV");
}

#[test]
fn empty_collection() {
    let grouped = group_by_field(Vec::<Value>::new(), "state").unwrap();
    assert!(grouped.is_empty());
}
