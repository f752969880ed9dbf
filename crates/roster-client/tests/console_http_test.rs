//! Client tests against a mocked HTTP server.

use roster_client::{NoticeKind, UserApi, UserApiClient, UserConsole, UserField};
use roster_core::{NewUser, RosterError, User, UserId};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> UserApiClient {
    UserApiClient::new(&format!("{}/user", server.uri())).unwrap()
}

fn ada_json() -> serde_json::Value {
    json!({"id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com"})
}

#[tokio::test]
async fn test_list_reads_user_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": [ada_json()],
            "message": "User read successfully"
        })))
        .mount(&server)
        .await;

    let reply = client(&server).list().await.unwrap();

    assert_eq!(reply.message, "User read successfully");
    assert_eq!(reply.value.len(), 1);
    assert_eq!(reply.value[0].first_name, "Ada");
}

#[tokio::test]
async fn test_create_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user"))
        .and(body_json(json!({"firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "User created successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = NewUser {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@x.com".to_string(),
    };
    let reply = client(&server).create(&draft).await.unwrap();

    assert_eq!(reply.message, "User created successfully");
}

#[tokio::test]
async fn test_update_sends_whole_record() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/user/1"))
        .and(body_json(ada_json()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": ada_json(),
            "message": "User updated successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user: User = serde_json::from_value(ada_json()).unwrap();
    let reply = client(&server).update(&user).await.unwrap();

    assert_eq!(reply.value, user);
}

#[tokio::test]
async fn test_get_reads_single_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": ada_json(),
            "message": "User read successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).get(UserId(1)).await.unwrap();

    assert_eq!(reply.value.id, UserId(1));
    assert_eq!(reply.value.email, "ada@x.com");
}

#[tokio::test]
async fn test_error_status_becomes_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/user/9"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "code": "NOT_FOUND",
            "message": "User not found"
        })))
        .mount(&server)
        .await;

    let err = client(&server).delete(UserId(9)).await.unwrap_err();

    match err {
        RosterError::Remote { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "User not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_console_create_then_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "User created successfully"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": [ada_json()],
            "message": "User read successfully"
        })))
        .mount(&server)
        .await;

    let mut console = UserConsole::new(client(&server));
    console.set_draft_field(UserField::FirstName, "Ada");
    console.set_draft_field(UserField::LastName, "Lovelace");
    console.set_draft_field(UserField::Email, "ada@x.com");
    console.create().await;

    assert_eq!(console.users().len(), 1);
    assert!(console.new_user().first_name.is_empty());
    let notice = console.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "User created successfully");
    assert!(console.render().contains("ada@x.com"));
}

#[tokio::test]
async fn test_console_duplicate_create_shows_generic_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "code": "DUPLICATE_EMAIL",
            "message": "Email already exists"
        })))
        .mount(&server)
        .await;

    let mut console = UserConsole::new(client(&server));
    console.set_draft_field(UserField::FirstName, "Ada");
    console.set_draft_field(UserField::LastName, "Lovelace");
    console.set_draft_field(UserField::Email, "ada@x.com");
    console.create().await;

    let notice = console.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Failed to create user!");
    assert_eq!(console.new_user().email, "ada@x.com");
}

#[tokio::test]
async fn test_console_unreachable_server() {
    let server = MockServer::start().await;
    let api = client(&server);
    drop(server);

    let mut console = UserConsole::new(api);
    console.load().await;

    assert_eq!(console.notice().map(|n| n.text.as_str()), Some("Failed to fetch users!"));
}
