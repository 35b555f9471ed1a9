//! Runtime type-check E2E tests.

use safe_result::prelude::*;
use safe_result::{TYPE_MISMATCH_MESSAGE, is_type};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Todo {
    id: u64,
    user_id: u64,
    title: String,
    completed: bool,
}

impl Truthy for Todo {}

fn is_a_todo(value: &Value) -> bool {
    ["id", "title", "completed", "userId"]
        .iter()
        .all(|key| value.get(key).is_some())
        && value.get("id").is_some_and(Value::is_number)
        && value.get("title").is_some_and(Value::is_string)
}

#[test]
fn object_is_a_todo() {
    let todo = json!({ "id": 1, "title": "Test todo function", "completed": false, "userId": 2 });
    let checked = is_type(todo, is_a_todo);

    assert_eq!(checked.result().and_then(|todo| todo["id"].as_u64()), Some(1));
    assert!(checked.error().is_none());
}

#[test]
fn object_is_not_a_todo() {
    let todo = json!({ "id": 1, "title": 25, "completed": true, "userId": 1 });
    let checked = is_type(todo, is_a_todo);

    assert!(checked.result().is_none());
    assert_eq!(
        checked.error().map(SafeError::message).as_deref(),
        Some(TYPE_MISMATCH_MESSAGE)
    );
}

#[test]
fn typed_values_can_be_checked_after_decoding() -> Result<(), serde_json::Error> {
    let todo: Todo = serde_json::from_value(
        json!({ "id": 3, "title": "", "completed": false, "userId": 9 }),
    )?;
    assert_eq!((todo.id, todo.user_id), (3, 9));

    let checked = is_type(todo, |todo| !todo.title.is_empty());
    assert!(checked.error().is_some_and(SafeError::is_type_mismatch));
    Ok(())
}

#[test]
fn envelope_serializes_for_callers_that_log_it() -> Result<(), serde_json::Error> {
    let checked = is_type(json!({ "id": 1 }), is_a_todo);
    let report = serde_json::to_value(&checked)?;

    assert_eq!(report["result"], Value::Null);
    assert_eq!(report["error"]["kind"], "expected");
    assert_eq!(report["error"]["message"], TYPE_MISMATCH_MESSAGE);
    Ok(())
}

#[test]
fn checked_struct_passes_through_unchanged() {
    let todo = Todo {
        id: 1,
        user_id: 2,
        title: "write tests".to_string(),
        completed: true,
    };
    let checked = is_type(todo.clone(), |todo| todo.completed);

    assert_eq!(checked.into_result().ok(), Some(todo));
}
