//! Resource client behavior over a scripted transport.

mod common;

use common::{harness, FakeTransport, API_ROOT};
use serde_json::{json, Value};

use pelada_client::domain::{NextMatchRequest, Round, StatFilter};
use pelada_client::error::GENERIC_ERROR_MESSAGE;
use pelada_client::http::{ApiResponse, Method};
use pelada_client::session::{AuthMethod, Credential, KeyValueStore, Navigator, SESSION_KEY};
use pelada_client::{ApiError, QueryParams};

fn round_json() -> Value {
    json!({ "id": 7, "championship_id": 1, "name": "Round 1" })
}

fn enveloped(items: Value) -> Value {
    json!({
        "data": items,
        "meta": { "page": 1, "per_page": 10, "total": 1, "total_pages": 1 }
    })
}

#[tokio::test]
async fn test_get_by_path_with_fields_sends_one_bodyless_request() {
    let transport = FakeTransport::replying(200, round_json());
    let h = harness(transport.clone(), "/");

    let query = QueryParams::new().fields(&["name"]);
    let value: Value = h
        .api
        .resource::<Value>("/rounds")
        .request(Method::Get, "/42", Some(json!({ "ignored": true })), Some(&query))
        .await
        .unwrap();

    assert_eq!(value, round_json());
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Get);
    assert_eq!(calls[0].url.as_str(), format!("{}/api/v1/rounds/42?fields=name", API_ROOT));
    assert!(calls[0].body.is_none());
}

#[tokio::test]
async fn test_post_returns_server_payload_unchanged() {
    let transport = FakeTransport::replying(201, json!({ "id": 7, "name": "Round 1" }));
    let h = harness(transport.clone(), "/");

    let created: Value = h
        .api
        .resource::<Value>("/rounds")
        .create(&json!({ "name": "Round 1" }))
        .await
        .unwrap();

    assert_eq!(created, json!({ "id": 7, "name": "Round 1" }));
    let sent = transport.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url.as_str(), format!("{}/api/v1/rounds", API_ROOT));
    assert_eq!(sent.body, Some(json!({ "name": "Round 1" })));
}

#[tokio::test]
async fn test_absent_query_values_are_omitted() {
    let transport = FakeTransport::replying(200, json!([]));
    let h = harness(transport.clone(), "/");

    let query = QueryParams::new()
        .page(2)
        .set("per_page", None::<u32>)
        .filter("round_id", Some(7i64))
        .filter("status", None::<String>);
    h.api.matches().get_all(Some(&query)).await.unwrap();

    let url = transport.last().url;
    assert_eq!(url.query(), Some("page=2&round_id=7"));
}

#[tokio::test]
async fn test_get_all_accepts_both_collection_shapes() {
    let bare = harness(FakeTransport::replying(200, json!([round_json()])), "/");
    let paged = harness(FakeTransport::replying(200, enveloped(json!([round_json()]))), "/");

    let from_bare: Vec<Round> = bare.api.rounds().get_all(None).await.unwrap();
    let from_paged: Vec<Round> = paged.api.rounds().get_all(None).await.unwrap();

    assert_eq!(from_bare, from_paged);
    assert_eq!(from_bare.len(), 1);
    assert_eq!(from_bare[0].name, "Round 1");
}

#[tokio::test]
async fn test_get_all_paginated_keeps_metadata() {
    let body = json!({
        "data": [round_json()],
        "meta": { "page": 2, "per_page": 1, "total": 3, "total_pages": 3 }
    });
    let h = harness(FakeTransport::replying(200, body), "/");

    let page = h.api.rounds().get_all_paginated(Some(&QueryParams::new().page(2))).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.total, 3);
    assert_eq!(page.meta.total_pages, 3);
    assert!(page.has_next());
}

#[tokio::test]
async fn test_get_all_paginated_rejects_bare_array() {
    let h = harness(FakeTransport::replying(200, json!([round_json()])), "/");

    let err = h.api.rounds().get_all_paginated(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn test_authorization_header_follows_session() {
    let transport = FakeTransport::replying(200, json!([]));
    let h = harness(transport.clone(), "/");

    h.api.rounds().get_all(None).await.unwrap();
    assert!(transport.last().authorization().is_none());

    h.api
        .credentials()
        .save(&Credential::new("abc123", AuthMethod::Standard))
        .unwrap();
    h.api.rounds().get_all(None).await.unwrap();
    assert_eq!(transport.last().authorization(), Some("Bearer abc123"));

    // Read per request: clearing takes effect on the next call.
    h.api.credentials().clear().unwrap();
    h.api.rounds().get_all(None).await.unwrap();
    assert!(transport.last().authorization().is_none());
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_redirects() {
    let transport = FakeTransport::replying(401, json!({ "message": "Token expired" }));
    let h = harness(transport, "/rounds/3");
    h.api
        .credentials()
        .save(&Credential::new("stale", AuthMethod::Standard))
        .unwrap();

    let err = h.api.rounds().get_by_id(3).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Token expired");
    assert!(h.store.get(SESSION_KEY).unwrap().is_none());
    assert_eq!(h.location.current_path(), "/login");
    assert_eq!(h.location.redirects(), 1);
}

#[tokio::test]
async fn test_unauthorized_on_login_view_does_not_redirect() {
    let transport = FakeTransport::replying(401, json!({ "error": "Invalid credentials" }));
    let h = harness(transport, "/login?next=%2Frounds");

    let err = h.api.auth().login("a@b.c", "wrong").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Invalid credentials");
    assert_eq!(h.location.redirects(), 0);
    assert!(h.api.credentials().load().unwrap().is_none());
}

#[tokio::test]
async fn test_delete_resolves_to_unit() {
    let transport = FakeTransport::new(|_| Ok(ApiResponse::new(204, Vec::new())));
    let h = harness(transport.clone(), "/");

    h.api.players().delete(5).await.unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.url.path(), "/api/v1/players/5");
    assert!(sent.body.is_none());
}

#[tokio::test]
async fn test_server_message_is_surfaced() {
    let transport = FakeTransport::replying(422, json!({ "message": "Team already has a match in progress" }));
    let h = harness(transport, "/");

    let err = h.api.teams().delete(2).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), "Team already has a match in progress");
}

#[tokio::test]
async fn test_status_without_body_gets_fallback_message() {
    let transport = FakeTransport::new(|_| Ok(ApiResponse::new(500, Vec::new())));
    let h = harness(transport, "/");

    let err = h.api.rounds().get_all(None).await.unwrap_err();
    assert_eq!(err.message(), "Request failed with status code 500");
}

#[tokio::test]
async fn test_not_found_is_distinguished() {
    let transport = FakeTransport::replying(404, json!({ "message": "Round not found" }));
    let h = harness(transport, "/");

    let err = h.api.rounds().get_by_id(999).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "Round not found");
}

#[tokio::test]
async fn test_network_failure_rejects_every_verb() {
    let transport = FakeTransport::failing("connection refused");
    let h = harness(transport.clone(), "/");
    let rounds = h.api.rounds();

    let errors = vec![
        rounds.get_all(None).await.unwrap_err(),
        rounds.get_by_id(1).await.unwrap_err(),
        rounds.create(&json!({ "name": "x" })).await.unwrap_err(),
        rounds.update(1, &json!({ "name": "y" })).await.unwrap_err(),
        rounds.delete(1).await.unwrap_err(),
    ];

    for err in errors {
        assert!(matches!(err, ApiError::Transport { .. }), "unexpected error: {:?}", err);
        assert!(!err.message().is_empty());
        assert_ne!(err.message(), GENERIC_ERROR_MESSAGE);
    }
    // One attempt per call, idempotent verbs included.
    assert_eq!(transport.calls().len(), 5);
    assert_eq!(h.location.redirects(), 0);
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let transport = FakeTransport::new(|_| Ok(ApiResponse::new(500, Vec::new())));
    let h = harness(transport.clone(), "/");
    let teams = h.api.teams();

    assert_eq!(teams.get_by_id(3).await.unwrap_err().status(), Some(500));
    assert_eq!(transport.calls().len(), 1);

    assert_eq!(teams.update(3, &json!({ "name": "Blue" })).await.unwrap_err().status(), Some(500));
    assert_eq!(teams.delete(3).await.unwrap_err().status(), Some(500));
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn test_update_sends_partial_payload_with_put() {
    let transport = FakeTransport::replying(200, round_json());
    let h = harness(transport.clone(), "/");

    let update = pelada_client::domain::RoundUpdate {
        name: Some("Round 1".into()),
        ..Default::default()
    };
    let round = h.api.rounds().update(7, &update).await.unwrap();

    assert_eq!(round.id, 7);
    let sent = transport.last();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url.path(), "/api/v1/rounds/7");
    assert_eq!(sent.body, Some(json!({ "name": "Round 1" })));
}

#[tokio::test]
async fn test_next_match_flow() {
    let transport = FakeTransport::new(|req| {
        let body = match req.method {
            Method::Get => json!({
                "home_team": { "id": 1, "name": "Blue" },
                "away_team": null,
                "queue": [{ "id": 3, "name": "Green" }],
                "requires_decision": true,
                "candidates": [{ "id": 1, "name": "Blue" }, { "id": 2, "name": "Red" }]
            }),
            _ => json!({
                "id": 11, "round_id": 4, "home_team_id": 1, "away_team_id": 3,
                "status": "scheduled"
            }),
        };
        Ok(ApiResponse::json(200, &body))
    });
    let h = harness(transport.clone(), "/");
    let rounds = h.api.rounds();

    let suggestion = rounds.suggest_next_match(4).await.unwrap();
    assert!(suggestion.requires_decision);
    assert_eq!(suggestion.candidates.len(), 2);
    assert_eq!(transport.last().url.path(), "/api/v1/rounds/4/next-match");

    let created = rounds.create_next_match(4, &NextMatchRequest::keep(1)).await.unwrap();
    assert_eq!(created.id, 11);
    let sent = transport.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.body, Some(json!({ "staying_team_id": 1 })));
}

#[tokio::test]
async fn test_stat_filter_drops_unset_fields() {
    let transport = FakeTransport::replying(200, json!([]));
    let h = harness(transport.clone(), "/");

    let filter = StatFilter {
        match_id: Some(9),
        player_id: None,
    };
    h.api.player_stats().find(&filter).await.unwrap();

    let url = transport.last().url;
    assert_eq!(url.path(), "/api/v1/player-stats");
    assert_eq!(url.query(), Some("match_id=9"));
}

#[tokio::test]
async fn test_login_then_logout() {
    let transport = FakeTransport::new(|req| {
        if req.url.path() == "/api/v1/auth/login" {
            Ok(ApiResponse::json(200, &json!({ "access_token": "tok-1" })))
        } else {
            Ok(ApiResponse::new(204, Vec::new()))
        }
    });
    let h = harness(transport.clone(), "/login");
    let auth = h.api.auth();

    let credential = auth.login("a@b.c", "secret").await.unwrap();
    assert_eq!(credential.token, "tok-1");
    assert_eq!(credential.method, AuthMethod::Standard);
    assert_eq!(h.api.credentials().load().unwrap(), Some(credential));

    auth.logout().await;
    let sent = transport.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url.path(), "/api/v1/auth/logout");
    assert_eq!(sent.authorization(), Some("Bearer tok-1"));
    assert!(h.api.credentials().load().unwrap().is_none());
}

#[tokio::test]
async fn test_legacy_session_uses_unversioned_endpoints() {
    let transport = FakeTransport::new(|req| {
        if req.url.path() == "/auth/sign_in" {
            Ok(ApiResponse::json(200, &json!({ "token": "legacy-1" })))
        } else {
            Ok(ApiResponse::new(200, Vec::new()))
        }
    });
    let h = harness(transport.clone(), "/login");
    let auth = h.api.auth();

    let credential = auth.legacy_sign_in("a@b.c", "secret").await.unwrap();
    assert_eq!(credential.method, AuthMethod::Legacy);
    assert_eq!(transport.last().url.as_str(), format!("{}/auth/sign_in", API_ROOT));

    auth.logout().await;
    let sent = transport.last();
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.url.path(), "/auth/sign_out");
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let h = harness(FakeTransport::failing("network down"), "/");
    h.api
        .credentials()
        .save(&Credential::new("tok", AuthMethod::Standard))
        .unwrap();

    h.api.auth().logout().await;

    assert!(h.api.credentials().load().unwrap().is_none());
}

#[tokio::test]
async fn test_clients_share_one_session() {
    let transport = FakeTransport::replying(200, json!([]));
    let h = harness(transport.clone(), "/");
    let teams = h.api.teams();
    let matches = h.api.matches();

    h.api
        .credentials()
        .save(&Credential::new("shared", AuthMethod::Standard))
        .unwrap();
    teams.get_all(None).await.unwrap();
    matches.get_all(None).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.authorization() == Some("Bearer shared")));
}
