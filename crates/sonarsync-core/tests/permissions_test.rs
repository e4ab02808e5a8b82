// Integration tests for the `Permissions` reconciler using wiremock.
#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sonarsync_api::{Credentials, SonarClient};
use sonarsync_core::{
    CoreError, Permissions, PermissionsDeclaration, Reconcile, ResourceIdentity, ServerInfo,
    Session,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Permissions) {
    let server = MockServer::start().await;
    let client =
        SonarClient::from_reqwest(&server.uri(), reqwest::Client::new(), Credentials::Anonymous)
            .unwrap();
    let session = Session::new(client, ServerInfo::new("developer", "10.4.1"));
    (server, Permissions::new(session))
}

fn alice_on_proj1() -> PermissionsDeclaration {
    PermissionsDeclaration {
        login_name: Some("alice".into()),
        project_key: Some("proj1".into()),
        permissions: vec!["user".into(), "scan".into()],
        ..PermissionsDeclaration::default()
    }
}

fn users_body() -> serde_json::Value {
    json!({
        "paging": { "pageIndex": 1, "pageSize": 100, "total": 2 },
        "users": [
            { "login": "admin", "name": "Administrator", "permissions": ["admin"] },
            { "login": "Alice", "name": "Alice", "permissions": ["user", "scan"] }
        ]
    })
}

async fn requests(server: &MockServer) -> Vec<(String, String, String)> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .map(|r| {
            (
                r.method.to_string(),
                r.url.path().to_owned(),
                r.url.query().unwrap_or_default().to_owned(),
            )
        })
        .collect()
}

// ── Create / Read ───────────────────────────────────────────────────

#[tokio::test]
async fn test_create_user_permissions_on_project() {
    let (server, permissions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/permissions/add_user"))
        .and(query_param("login", "alice"))
        .and(query_param("projectKey", "proj1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/permissions/users"))
        .and(query_param("projectKey", "proj1"))
        .and(query_param("ps", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .expect(1)
        .mount(&server)
        .await;

    let declared = alice_on_proj1();
    let created = permissions.create(&declared).await.unwrap();

    assert!(Uuid::parse_str(created.identity.as_str()).is_ok());
    assert_eq!(created.declaration.login_name.as_deref(), Some("Alice"));
    assert_eq!(created.declaration.permissions, vec!["user", "scan"]);
    assert_eq!(created.declaration.project_key.as_deref(), Some("proj1"));
    // Input untouched.
    assert_eq!(declared, alice_on_proj1());

    assert_eq!(
        requests(&server).await,
        vec![
            (
                "POST".to_owned(),
                "/api/permissions/add_user".to_owned(),
                "login=alice&permission=user&projectKey=proj1".to_owned()
            ),
            (
                "POST".to_owned(),
                "/api/permissions/add_user".to_owned(),
                "login=alice&permission=scan&projectKey=proj1".to_owned()
            ),
            (
                "GET".to_owned(),
                "/api/permissions/users".to_owned(),
                "projectKey=proj1&ps=100".to_owned()
            ),
        ]
    );
}

#[tokio::test]
async fn test_read_takes_server_spelling_and_order() {
    let (server, permissions) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/permissions/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groups": [
                { "id": "1", "name": "Sonar-Users", "permissions": ["scan", "admin", "user"] }
            ]
        })))
        .mount(&server)
        .await;

    let declared = PermissionsDeclaration {
        group_name: Some("sonar-users".into()),
        permissions: vec!["user".into()],
        ..PermissionsDeclaration::default()
    };
    let read = permissions
        .read(&ResourceIdentity::generate(), &declared)
        .await
        .unwrap();

    assert_eq!(read.group_name.as_deref(), Some("Sonar-Users"));
    assert_eq!(read.permissions, vec!["scan", "admin", "user"]);
}

#[tokio::test]
async fn test_read_template_users_by_name() {
    let (server, permissions) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/permissions/template_users"))
        .and(query_param("templateName", "Default template"))
        .and(query_param("ps", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "login": "bob", "permissions": ["codeviewer"] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let declared = PermissionsDeclaration {
        login_name: Some("BOB".into()),
        template_name: Some("Default template".into()),
        permissions: vec!["codeviewer".into()],
        ..PermissionsDeclaration::default()
    };
    let read = permissions
        .read(&ResourceIdentity::generate(), &declared)
        .await
        .unwrap();

    assert_eq!(read.login_name.as_deref(), Some("bob"));
    assert_eq!(read.template_name.as_deref(), Some("Default template"));
}

#[tokio::test]
async fn test_read_project_creator_keeps_flagged_permissions() {
    let (server, permissions) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/permissions/search_templates"))
        .and(query_param("q", "default template"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "permissionTemplates": [{
                "id": "AU-Tpxb--iU5OvuD2FLy",
                "name": "Default template",
                "permissions": [
                    { "key": "admin", "withProjectCreator": true },
                    { "key": "user", "withProjectCreator": false },
                    { "key": "issueadmin", "withProjectCreator": true }
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let declared = PermissionsDeclaration {
        special_group_name: Some("project_creator".into()),
        template_name: Some("default template".into()),
        permissions: vec!["admin".into()],
        ..PermissionsDeclaration::default()
    };
    let read = permissions
        .read(&ResourceIdentity::generate(), &declared)
        .await
        .unwrap();

    assert_eq!(read.special_group_name.as_deref(), Some("project_creator"));
    assert_eq!(read.permissions, vec!["admin", "issueadmin"]);
}

#[tokio::test]
async fn test_read_without_match_is_not_found() {
    let (server, permissions) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/permissions/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "login": "admin", "permissions": ["admin"] }]
        })))
        .mount(&server)
        .await;

    let identity = ResourceIdentity::generate();
    let result = permissions.read(&identity, &alice_on_proj1()).await;

    match result {
        Err(CoreError::NotFound { kind, identity: id }) => {
            assert_eq!(kind, "permissions");
            assert_eq!(id, identity.to_string());
        }
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_is_idempotent() {
    let (server, permissions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/permissions/add_user"))
        .respond_with(ResponseTemplate::new(204))
        .expect(4)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/permissions/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .expect(2)
        .mount(&server)
        .await;

    let identity = ResourceIdentity::generate();
    let first = permissions.update(&identity, &alice_on_proj1()).await.unwrap();
    let second = permissions.update(&identity, &alice_on_proj1()).await.unwrap();

    assert_eq!(first.identity, identity);
    assert_eq!(second.identity, identity);
    assert_eq!(first.declaration, second.declaration);
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn test_create_aborts_on_first_failed_grant() {
    let (server, permissions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/permissions/add_user"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "msg": "User with login 'alice' is not found" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = permissions.create(&alice_on_proj1()).await.unwrap_err();

    assert!(matches!(err, CoreError::Transport(_)), "got: {err:?}");
    assert!(err.to_string().contains("is not found"));
    assert_eq!(requests(&server).await.len(), 1);
}

#[tokio::test]
async fn test_project_creator_without_template_sends_nothing() {
    let (server, permissions) = setup().await;

    let declared = PermissionsDeclaration {
        special_group_name: Some("project_creator".into()),
        permissions: vec!["admin".into()],
        ..PermissionsDeclaration::default()
    };

    let created = permissions.create(&declared).await;
    let deleted = permissions
        .delete(&ResourceIdentity::generate(), &declared)
        .await;

    assert!(matches!(created, Err(CoreError::Validation { .. })));
    assert!(matches!(deleted, Err(CoreError::Validation { .. })));
    assert!(requests(&server).await.is_empty());
}

#[tokio::test]
async fn test_invalid_selectors_send_nothing() {
    let (server, permissions) = setup().await;

    let declared = PermissionsDeclaration {
        login_name: Some("alice".into()),
        group_name: Some("devs".into()),
        permissions: vec!["user".into()],
        ..PermissionsDeclaration::default()
    };

    let result = permissions.create(&declared).await;

    assert!(matches!(result, Err(CoreError::Validation { .. })));
    assert!(requests(&server).await.is_empty());
}

// ── Delete / Import ─────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_trusts_status_after_out_of_band_removal() {
    let (server, permissions) = setup().await;

    // The grants are already gone; the server still answers 204.
    Mock::given(method("POST"))
        .and(path("/api/permissions/remove_group_from_template"))
        .and(query_param("groupName", "devs"))
        .and(query_param("templateId", "tmpl-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let declared = PermissionsDeclaration {
        group_name: Some("devs".into()),
        template_id: Some("tmpl-1".into()),
        permissions: vec!["user".into(), "codeviewer".into()],
        ..PermissionsDeclaration::default()
    };

    permissions
        .delete(&ResourceIdentity::generate(), &declared)
        .await
        .unwrap();

    // No existence check before the removals.
    assert!(
        requests(&server)
            .await
            .iter()
            .all(|(method, _, _)| method == "POST")
    );
}

#[tokio::test]
async fn test_delete_project_creator_from_template() {
    let (server, permissions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/permissions/remove_project_creator_from_template"))
        .and(query_param("templateName", "Default template"))
        .and(query_param("permission", "admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let declared = PermissionsDeclaration {
        special_group_name: Some("project_creator".into()),
        template_name: Some("Default template".into()),
        permissions: vec!["admin".into()],
        ..PermissionsDeclaration::default()
    };

    permissions
        .delete(&ResourceIdentity::generate(), &declared)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_import_is_unsupported() {
    let (server, permissions) = setup().await;

    let result = permissions
        .import(&ResourceIdentity::from("6f1c6a4e-8d7b-4b8e-9d0a-1f2e3d4c5b6a"))
        .await;

    assert!(matches!(result, Err(CoreError::Unsupported { .. })));
    assert!(requests(&server).await.is_empty());
}
