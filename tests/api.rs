//! End-to-end tests against a live server.

use reqwest::{header, Method, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

use cards_api::store::{Store, ValidCard, ValidList};

mod common;

#[tokio::test]
async fn test_create_card_then_fetch() {
    let server = common::start_server().await;

    let res = server
        .authed(Method::POST, "/card")
        .json(&json!({ "title": "Write tests", "content": "Cover the API" }))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap();
    assert_eq!(location, format!("http://localhost:8000/card/{id}"));

    let res = server
        .authed(Method::GET, &format!("/card/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(
        fetched,
        json!({ "id": id, "title": "Write tests", "content": "Cover the API" })
    );
}

#[tokio::test]
async fn test_create_card_missing_fields() {
    let server = common::start_server().await;

    for body in [
        json!({ "content": "no title" }),
        json!({ "title": "no content" }),
        json!({ "title": "", "content": "empty title" }),
        json!({}),
    ] {
        let res = server
            .authed(Method::POST, "/card")
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(res.text().await.unwrap(), "Invalid data");
    }

    assert_eq!(server.store.card_count().unwrap(), 1);
}

#[tokio::test]
async fn test_get_seeded_collections() {
    let server = common::start_server().await;

    let cards: Value = server
        .authed(Method::GET, "/card")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        cards,
        json!([{ "id": "1", "title": "Task One", "content": "This is card one" }])
    );

    let lists: Value = server
        .authed(Method::GET, "/list")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        lists,
        json!([{ "id": "1", "header": "List One", "cardIds": ["1"] }])
    );
}

#[tokio::test]
async fn test_unknown_card_is_404() {
    let server = common::start_server().await;

    let res = server.authed(Method::GET, "/card/999").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Card Not Found");
}

#[tokio::test]
async fn test_create_list_with_unknown_card() {
    let server = common::start_server().await;

    let res = server
        .authed(Method::POST, "/list")
        .json(&json!({ "header": "Bad", "cardIds": ["1", "does-not-exist"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Invalid data");
    assert_eq!(server.store.list_count().unwrap(), 1);
}

#[tokio::test]
async fn test_create_list_without_card_ids() {
    let server = common::start_server().await;

    let res = server
        .authed(Method::POST, "/list")
        .json(&json!({ "header": "X" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();
    let body: Value = res.json().await.unwrap();
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body, json!({ "id": id }));
    assert_eq!(location, format!("http://localhost:8000/list/{id}"));

    let list: Value = server
        .authed(Method::GET, &format!("/list/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, json!({ "id": id, "header": "X", "cardIds": [] }));
}

#[tokio::test]
async fn test_delete_card_cascades() {
    let store = Arc::new(Store::new());
    let one = store
        .insert_card(ValidCard {
            title: "one".into(),
            content: "first".into(),
        })
        .unwrap();
    let two = store
        .insert_card(ValidCard {
            title: "two".into(),
            content: "second".into(),
        })
        .unwrap();
    let list = store
        .insert_list(ValidList {
            header: "A".into(),
            card_ids: vec![one.id.clone(), two.id.clone()],
        })
        .unwrap();

    let server = common::start_server_with(common::test_config(), store).await;

    let res = server
        .authed(Method::DELETE, &format!("/card/{}", one.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await.unwrap().is_empty());

    let fetched: Value = server
        .authed(Method::GET, &format!("/list/{}", list.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["cardIds"], json!([two.id.as_str()]));
}

#[tokio::test]
async fn test_delete_is_not_repeatable() {
    let server = common::start_server().await;

    for path in ["/card/1", "/list/1"] {
        let first = server.authed(Method::DELETE, path).send().await.unwrap();
        assert_eq!(first.status(), StatusCode::NO_CONTENT, "{path}");

        let second = server.authed(Method::DELETE, path).send().await.unwrap();
        assert_eq!(second.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_delete_unknown_leaves_collections() {
    let server = common::start_server().await;

    let res = server.authed(Method::DELETE, "/card/nope").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = server.authed(Method::DELETE, "/list/nope").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "List Not Found");

    assert_eq!(server.store.card_count().unwrap(), 1);
    assert_eq!(server.store.list_count().unwrap(), 1);
    assert_eq!(server.store.get_list("1").unwrap().card_ids.len(), 1);
}

#[tokio::test]
async fn test_auth_required() {
    let server = common::start_server().await;

    let cases = [
        None,
        Some("Bearer wrong-token"),
        Some(common::TOKEN),
        Some("Bearer"),
    ];
    for auth in cases {
        let mut req = server.client.get(server.url("/card"));
        if let Some(value) = auth {
            req = req.header(header::AUTHORIZATION, value);
        }
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{auth:?}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Unauthorized request" }));
    }

    // scheme is not checked
    let res = server
        .client
        .get(server.url("/card"))
        .header(header::AUTHORIZATION, format!("Token {}", common::TOKEN))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unauthenticated_post_does_not_mutate() {
    let server = common::start_server().await;

    let res = server
        .client
        .post(server.url("/card"))
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(server.store.card_count().unwrap(), 1);
}

#[tokio::test]
async fn test_public_url_drives_location() {
    let mut config = common::test_config();
    config.server.public_url = "https://cards.example.com".to_string();
    let server = common::start_server_with(config, Arc::new(Store::new())).await;

    let res = server
        .authed(Method::POST, "/card")
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .unwrap();
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert!(location.starts_with("https://cards.example.com/card/"));
}
