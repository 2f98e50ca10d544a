//! End-to-end GraphQL schema tests over the in-memory fixture store.
//!
//! These exercise the full resolver chain: argument parsing, domain
//! validation, repository calls, and wire-shape reshaping.

use async_graphql::{Request, Variables};
use serde_json::{json, Value};

use backend::inbound::graphql::{build_schema, state::GqlPorts, AppSchema};

/// A syntactically valid ULID no fixture ever stores.
const UNKNOWN_ID: &str = "01ARZ3NDEKTSV4RRFFQ69G5FAV";

fn schema() -> AppSchema {
    build_schema(GqlPorts::fixture())
}

async fn execute(schema: &AppSchema, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let response = schema.execute(request).await;
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().expect("data serializes to JSON")
}

async fn execute_expecting_error(schema: &AppSchema, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let response = schema.execute(request).await;
    let error = response.errors.first().expect("an error is returned");
    serde_json::to_value(error).expect("error serializes to JSON")
}

async fn add_user(schema: &AppSchema, name: &str) -> String {
    let data = execute(
        schema,
        "mutation($name: String!) { addUser(name: $name) { id name } }",
        json!({ "name": name }),
    )
    .await;
    data["addUser"]["id"]
        .as_str()
        .expect("addUser returns an id")
        .to_owned()
}

async fn add_post(schema: &AppSchema, user_id: &str, text: &str) -> String {
    let data = execute(
        schema,
        "mutation($userId: ID!, $text: String!) { addPost(userId: $userId, text: $text) { id text } }",
        json!({ "userId": user_id, "text": text }),
    )
    .await;
    data["addPost"]["id"]
        .as_str()
        .expect("addPost returns an id")
        .to_owned()
}

async fn add_todo(schema: &AppSchema, text: &str) -> Value {
    let data = execute(
        schema,
        "mutation($text: String!) { addTodo(text: $text) { id text status createdAt } }",
        json!({ "text": text }),
    )
    .await;
    data["addTodo"].clone()
}

async fn get_user(schema: &AppSchema, id: &str) -> Value {
    let data = execute(
        schema,
        "query($id: ID!) { getUser(id: $id) { id name posts { id text } } }",
        json!({ "id": id }),
    )
    .await;
    data["getUser"].clone()
}

async fn get_todo_list(schema: &AppSchema) -> Vec<Value> {
    let data = execute(
        schema,
        "{ getTodoList { id text status createdAt } }",
        json!({}),
    )
    .await;
    data["getTodoList"]
        .as_array()
        .expect("getTodoList returns a list")
        .clone()
}

#[tokio::test]
async fn created_user_round_trips_with_an_empty_post_list() {
    let schema = schema();
    let id = add_user(&schema, "Ada").await;

    let user = get_user(&schema, &id).await;
    assert_eq!(user["id"], json!(id));
    assert_eq!(user["name"], json!("Ada"));
    assert_eq!(user["posts"], json!([]));
}

#[tokio::test]
async fn user_posts_are_newest_first_and_capped_at_five() {
    let schema = schema();
    let user_id = add_user(&schema, "Ada").await;
    for n in 0..6 {
        add_post(&schema, &user_id, &format!("post {n}")).await;
    }

    let user = get_user(&schema, &user_id).await;
    let texts: Vec<&str> = user["posts"]
        .as_array()
        .expect("posts is a list")
        .iter()
        .map(|post| post["text"].as_str().expect("post has text"))
        .collect();
    assert_eq!(texts, ["post 5", "post 4", "post 3", "post 2", "post 1"]);
}

#[tokio::test]
async fn post_lookup_includes_the_owning_user() {
    let schema = schema();
    let user_id = add_user(&schema, "Ada").await;
    let post_id = add_post(&schema, &user_id, "hello").await;

    let data = execute(
        &schema,
        "query($id: ID!) { getPost(id: $id) { id text user { id name posts { id } } } }",
        json!({ "id": post_id }),
    )
    .await;
    assert_eq!(data["getPost"]["text"], json!("hello"));
    assert_eq!(data["getPost"]["user"]["id"], json!(user_id));
    assert_eq!(data["getPost"]["user"]["posts"], json!([]));
}

#[tokio::test]
async fn unknown_lookups_return_null_not_errors() {
    let schema = schema();

    for query in [
        "query($id: ID!) { getUser(id: $id) { id } }",
        "query($id: ID!) { getPost(id: $id) { id } }",
        "query($id: ID!) { getTodo(id: $id) { id } }",
    ] {
        let data = execute(&schema, query, json!({ "id": UNKNOWN_ID })).await;
        let field = data
            .as_object()
            .expect("response data is an object")
            .values()
            .next()
            .expect("one field selected")
            .clone();
        assert_eq!(field, Value::Null);
    }
}

#[tokio::test]
async fn malformed_ids_resolve_to_null() {
    let schema = schema();
    let data = execute(
        &schema,
        "query($id: ID!) { getUser(id: $id) { id } }",
        json!({ "id": "definitely-not-a-ulid" }),
    )
    .await;
    assert_eq!(data["getUser"], Value::Null);
}

#[tokio::test]
async fn adding_a_post_for_a_missing_user_is_a_not_found_error() {
    let schema = schema();
    let error = execute_expecting_error(
        &schema,
        "mutation($userId: ID!, $text: String!) { addPost(userId: $userId, text: $text) { id } }",
        json!({ "userId": UNKNOWN_ID, "text": "orphan" }),
    )
    .await;
    assert_eq!(error["extensions"]["code"], json!("not_found"));
}

#[tokio::test]
async fn user_names_over_ten_characters_are_rejected() {
    let schema = schema();
    let error = execute_expecting_error(
        &schema,
        "mutation($name: String!) { addUser(name: $name) { id } }",
        json!({ "name": "elevenchars" }),
    )
    .await;
    assert_eq!(error["extensions"]["code"], json!("invalid_request"));
    assert!(error["message"]
        .as_str()
        .expect("error has a message")
        .contains("at most 10"));
}

#[tokio::test]
async fn new_todos_default_to_open_with_an_iso_timestamp() {
    let schema = schema();
    let todo = add_todo(&schema, "water the plants").await;

    assert_eq!(todo["status"], json!("OPEN"));
    let created_at = todo["createdAt"].as_str().expect("createdAt is a string");
    assert!(created_at.ends_with('Z'));
    chrono::DateTime::parse_from_rfc3339(created_at).expect("createdAt is RFC 3339");
}

#[tokio::test]
async fn todo_list_returns_the_ten_newest_descending() {
    let schema = schema();
    let mut ids = Vec::new();
    for n in 0..11 {
        let todo = add_todo(&schema, &format!("todo {n}")).await;
        ids.push(todo["id"].as_str().expect("todo has an id").to_owned());
    }

    let listed = get_todo_list(&schema).await;
    assert_eq!(listed.len(), 10);

    let listed_ids: Vec<&str> = listed
        .iter()
        .map(|todo| todo["id"].as_str().expect("todo has an id"))
        .collect();
    let expected: Vec<&str> = ids.iter().rev().take(10).map(String::as_str).collect();
    assert_eq!(listed_ids, expected, "newest first, oldest dropped");
}

#[tokio::test]
async fn update_todo_toggles_status_both_ways() {
    let schema = schema();
    let todo = add_todo(&schema, "flip me").await;
    let id = todo["id"].as_str().expect("todo has an id");

    let data = execute(
        &schema,
        "mutation($id: ID!) { updateTodo(id: $id, status: CLOSE) { status } }",
        json!({ "id": id }),
    )
    .await;
    assert_eq!(data["updateTodo"]["status"], json!("CLOSE"));

    let listed = get_todo_list(&schema).await;
    let stored = listed
        .iter()
        .find(|entry| entry["id"] == json!(id))
        .expect("todo appears in the list");
    assert_eq!(stored["status"], json!("CLOSE"));

    let data = execute(
        &schema,
        "mutation($id: ID!) { updateTodo(id: $id, status: OPEN) { status } }",
        json!({ "id": id }),
    )
    .await;
    assert_eq!(data["updateTodo"]["status"], json!("OPEN"));
}

#[tokio::test]
async fn update_todo_replaces_text_without_touching_status() {
    let schema = schema();
    let todo = add_todo(&schema, "old text").await;
    let id = todo["id"].as_str().expect("todo has an id");

    let data = execute(
        &schema,
        "mutation($id: ID!, $text: String) { updateTodo(id: $id, text: $text) { text status } }",
        json!({ "id": id, "text": "new text" }),
    )
    .await;
    assert_eq!(data["updateTodo"]["text"], json!("new text"));
    assert_eq!(data["updateTodo"]["status"], json!("OPEN"));
}

#[tokio::test]
async fn update_todo_with_no_fields_returns_the_stored_row() {
    let schema = schema();
    let todo = add_todo(&schema, "keep me").await;
    let id = todo["id"].as_str().expect("todo has an id");

    let data = execute(
        &schema,
        "mutation($id: ID!) { updateTodo(id: $id) { id text status createdAt } }",
        json!({ "id": id }),
    )
    .await;
    assert_eq!(data["updateTodo"], todo);
}

#[tokio::test]
async fn update_todo_with_an_unknown_id_is_a_not_found_error() {
    let schema = schema();
    let error = execute_expecting_error(
        &schema,
        "mutation($id: ID!) { updateTodo(id: $id, status: CLOSE) { id } }",
        json!({ "id": UNKNOWN_ID }),
    )
    .await;
    assert_eq!(error["extensions"]["code"], json!("not_found"));
}

#[tokio::test]
async fn get_todo_returns_the_stored_todo() {
    let schema = schema();
    let todo = add_todo(&schema, "find me").await;
    let id = todo["id"].as_str().expect("todo has an id");

    let data = execute(
        &schema,
        "query($id: ID!) { getTodo(id: $id) { id text status createdAt } }",
        json!({ "id": id }),
    )
    .await;
    assert_eq!(data["getTodo"], todo);
}
