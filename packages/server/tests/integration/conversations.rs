use serde_json::{Value, json};

use crate::common::{TestApp, routes};

const LIST_QUERY: &str = r#"
    query($first: Int, $after: String) {
        conversations(first: $first, after: $after) {
            edges {
                cursor
                node {
                    title
                    facts
                    persona { name default }
                    characters { name }
                }
            }
            pageInfo { hasNextPage hasPreviousPage }
        }
    }
"#;

fn edge_titles(data: &Value) -> Vec<String> {
    data["conversations"]["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn conversations_requires_authentication() {
    let app = TestApp::spawn().await;

    let res = app.graphql(LIST_QUERY, json!({}), None).await;
    assert_eq!(res.graphql_errors(), vec!["Authentication required"]);
}

#[tokio::test]
async fn conversations_are_scoped_to_the_viewers_personas() {
    let app = TestApp::spawn().await;
    let (owner, token) = app.create_user("Ada", "ada@example.com").await;
    let (stranger, _) = app.create_user("Bob", "bob@example.com").await;

    let persona = app.insert_persona(owner, "Kent").await;
    app.insert_conversation(persona.id, "Second Act").await;
    app.insert_conversation(persona.id, "First Act").await;

    let other_persona = app.insert_persona(stranger, "Rival").await;
    app.insert_conversation(other_persona.id, "Not Yours").await;

    let res = app.graphql(LIST_QUERY, json!({}), Some(&token)).await;
    // Ordered by title; other users' conversations never appear.
    assert_eq!(
        edge_titles(res.graphql_data()),
        vec!["First Act", "Second Act"]
    );
}

#[tokio::test]
async fn conversation_resolves_persona_characters_and_string_facts() {
    let app = TestApp::spawn().await;
    let (owner, token) = app.create_user("Ada", "ada@example.com").await;

    let persona = app.insert_persona(owner, "Kent").await;
    let conversation = app.insert_conversation(persona.id, "First Contact").await;
    let character = app.insert_character(owner, "Zara", false).await;
    app.link_character(character.id, conversation.id).await;
    app.insert_conversation_fact(conversation.id, "They met at dawn").await;

    let res = app.graphql(LIST_QUERY, json!({}), Some(&token)).await;
    let node = &res.graphql_data()["conversations"]["edges"][0]["node"];
    assert_eq!(node["persona"]["name"], "Kent");
    assert_eq!(node["persona"]["default"], false);
    assert_eq!(node["characters"][0]["name"], "Zara");
    assert_eq!(node["facts"], json!(["They met at dawn"]));
}

#[tokio::test]
async fn conversations_paginate_forward() {
    let app = TestApp::spawn().await;
    let (owner, token) = app.create_user("Ada", "ada@example.com").await;
    let persona = app.insert_persona(owner, "Kent").await;
    for title in ["Alpha", "Beta", "Gamma"] {
        app.insert_conversation(persona.id, title).await;
    }

    let res = app.graphql(LIST_QUERY, json!({ "first": 2 }), Some(&token)).await;
    let data = res.graphql_data();
    assert_eq!(edge_titles(data), vec!["Alpha", "Beta"]);
    assert_eq!(data["conversations"]["pageInfo"]["hasNextPage"], true);

    let cursor = data["conversations"]["edges"][1]["cursor"].as_str().unwrap();
    let res = app
        .graphql(LIST_QUERY, json!({ "first": 2, "after": cursor }), Some(&token))
        .await;
    let data = res.graphql_data();
    assert_eq!(edge_titles(data), vec!["Gamma"]);
    assert_eq!(data["conversations"]["pageInfo"]["hasNextPage"], false);
}

#[tokio::test]
async fn user_query_requires_authentication() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.create_user("Ada", "ada@example.com").await;

    let query = r#"query($id: ID!) { user(id: $id) { email } }"#;

    let anon = app
        .graphql(query, json!({ "id": user_id.to_string() }), None)
        .await;
    assert_eq!(anon.graphql_errors(), vec!["Authentication required"]);

    let authed = app
        .graphql(query, json!({ "id": user_id.to_string() }), Some(&token))
        .await;
    assert_eq!(authed.graphql_data()["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn legacy_listing_is_anonymous_and_inlines_relations() {
    let app = TestApp::spawn().await;
    let (owner, _) = app.create_user("Ada", "ada@example.com").await;

    let persona = app.insert_persona(owner, "Kent").await;
    let conversation = app.insert_conversation(persona.id, "First Contact").await;
    let character = app.insert_character(owner, "Zara", false).await;
    app.link_character(character.id, conversation.id).await;
    app.insert_conversation_fact(conversation.id, "They met at dawn").await;

    let res = app.get_without_token(routes::CONVERSATIONS).await;
    assert_eq!(res.status, 200, "{}", res.text);

    // Every conversation is listed, including the seeded demo one.
    let listing = res.body["conversations"].as_array().unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0]["title"], "First Contact");
    assert_eq!(listing[0]["persona"]["name"], "Kent");
    assert_eq!(listing[0]["characters"][0]["name"], "Zara");
    assert_eq!(listing[0]["conversation_facts"], json!(["They met at dawn"]));
    assert_eq!(listing[1]["title"], "Seraphima's Journey");
    assert_eq!(listing[1]["characters"][0]["name"], "Seraphima");
}
