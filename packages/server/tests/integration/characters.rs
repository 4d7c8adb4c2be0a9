use serde_json::{Value, json};

use crate::common::TestApp;

const LIST_QUERY: &str = r#"
    query($includePublic: Boolean, $first: Int, $after: String, $last: Int, $before: String) {
        characters(includePublic: $includePublic, first: $first, after: $after, last: $last, before: $before) {
            edges {
                cursor
                node { id name public }
            }
            pageInfo { hasNextPage hasPreviousPage }
        }
    }
"#;

fn edge_names(data: &Value) -> Vec<String> {
    data["characters"]["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn characters_requires_authentication() {
    let app = TestApp::spawn().await;

    let res = app.graphql(LIST_QUERY, json!({}), None).await;
    assert_eq!(res.graphql_errors(), vec!["Authentication required"]);
}

#[tokio::test]
async fn characters_lists_only_owned_by_default() {
    let app = TestApp::spawn().await;
    let (owner, token) = app.create_user("Ada", "ada@example.com").await;
    let (stranger, _) = app.create_user("Bob", "bob@example.com").await;

    app.insert_character(owner, "Zara", false).await;
    app.insert_character(owner, "Aldric", true).await;
    app.insert_character(stranger, "Briar", true).await;
    app.insert_character(stranger, "Hidden", false).await;

    let res = app.graphql(LIST_QUERY, json!({}), Some(&token)).await;
    assert_eq!(edge_names(res.graphql_data()), vec!["Aldric", "Zara"]);
}

#[tokio::test]
async fn include_public_adds_other_users_public_characters() {
    let app = TestApp::spawn().await;
    let (owner, token) = app.create_user("Ada", "ada@example.com").await;
    let (stranger, _) = app.create_user("Bob", "bob@example.com").await;

    app.insert_character(owner, "Zara", false).await;
    app.insert_character(stranger, "Briar", true).await;
    app.insert_character(stranger, "Hidden", false).await;

    let res = app
        .graphql(LIST_QUERY, json!({ "includePublic": true }), Some(&token))
        .await;
    // Seeded public demo character sorts alongside the rest.
    assert_eq!(
        edge_names(res.graphql_data()),
        vec!["Briar", "Seraphima", "Zara"]
    );
}

#[tokio::test]
async fn character_resolves_facts_traits_and_conversations() {
    let app = TestApp::spawn().await;
    let (owner, token) = app.create_user("Ada", "ada@example.com").await;

    let character = app.insert_character(owner, "Zara", false).await;
    app.insert_character_fact(character.id, "Afraid of heights").await;
    app.insert_character_trait(character.id, "personality", "stoic").await;

    let persona = app.insert_persona(owner, "Kent").await;
    let conversation = app.insert_conversation(persona.id, "First Contact").await;
    app.link_character(character.id, conversation.id).await;

    let query = r#"{
        characters {
            edges {
                node {
                    name
                    facts { fact }
                    traits { traitType value }
                    conversations { title }
                    user { email }
                }
            }
        }
    }"#;
    let res = app.graphql(query, json!({}), Some(&token)).await;
    let node = &res.graphql_data()["characters"]["edges"][0]["node"];
    assert_eq!(node["facts"][0]["fact"], "Afraid of heights");
    assert_eq!(node["traits"][0]["traitType"], "personality");
    assert_eq!(node["traits"][0]["value"], "stoic");
    assert_eq!(node["conversations"][0]["title"], "First Contact");
    assert_eq!(node["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn pagination_walks_forward_without_overlap() {
    let app = TestApp::spawn().await;
    let (owner, token) = app.create_user("Ada", "ada@example.com").await;
    for name in ["Amara", "Brin", "Cael", "Dax", "Eris"] {
        app.insert_character(owner, name, false).await;
    }

    let first_page = app
        .graphql(LIST_QUERY, json!({ "first": 2 }), Some(&token))
        .await;
    let data = first_page.graphql_data();
    assert_eq!(edge_names(data), vec!["Amara", "Brin"]);
    assert_eq!(data["characters"]["pageInfo"]["hasNextPage"], true);
    assert_eq!(data["characters"]["pageInfo"]["hasPreviousPage"], false);
    let cursor = data["characters"]["edges"][1]["cursor"].as_str().unwrap();

    let second_page = app
        .graphql(
            LIST_QUERY,
            json!({ "first": 2, "after": cursor }),
            Some(&token),
        )
        .await;
    let data = second_page.graphql_data();
    assert_eq!(edge_names(data), vec!["Cael", "Dax"]);
    assert_eq!(data["characters"]["pageInfo"]["hasPreviousPage"], true);

    let cursor = data["characters"]["edges"][1]["cursor"].as_str().unwrap();
    let last_page = app
        .graphql(
            LIST_QUERY,
            json!({ "first": 2, "after": cursor }),
            Some(&token),
        )
        .await;
    let data = last_page.graphql_data();
    assert_eq!(edge_names(data), vec!["Eris"]);
    assert_eq!(data["characters"]["pageInfo"]["hasNextPage"], false);
}

#[tokio::test]
async fn an_empty_listing_has_no_edges_and_both_flags_false() {
    let app = TestApp::spawn().await;
    let (_, token) = app.create_user("Ada", "ada@example.com").await;

    let res = app.graphql(LIST_QUERY, json!({}), Some(&token)).await;
    let data = res.graphql_data();
    assert_eq!(data["characters"]["edges"], json!([]));
    assert_eq!(data["characters"]["pageInfo"]["hasNextPage"], false);
    assert_eq!(data["characters"]["pageInfo"]["hasPreviousPage"], false);
}

#[tokio::test]
async fn pagination_rejects_bad_cursors_and_counts() {
    let app = TestApp::spawn().await;
    let (owner, token) = app.create_user("Ada", "ada@example.com").await;
    app.insert_character(owner, "Zara", false).await;

    let res = app
        .graphql(
            LIST_QUERY,
            json!({ "after": "%%%not-base64%%%" }),
            Some(&token),
        )
        .await;
    assert_eq!(res.graphql_errors(), vec!["invalid cursor"]);

    let res = app
        .graphql(LIST_QUERY, json!({ "first": -1 }), Some(&token))
        .await;
    assert_eq!(
        res.graphql_errors(),
        vec!["'first' must be a non-negative integer"]
    );
}

#[tokio::test]
async fn create_character_applies_defaults() {
    let app = TestApp::spawn().await;
    let (_, token) = app.create_user("Ada", "ada@example.com").await;

    let mutation = r#"
        mutation($input: CreateCharacterInput!) {
            createCharacter(input: $input) {
                character {
                    name description alternateNames tags public defaultModel
                }
                errors
            }
        }
    "#;
    let res = app
        .graphql(
            mutation,
            json!({ "input": { "name": "Zara", "description": "A wanderer." } }),
            Some(&token),
        )
        .await;
    let payload = &res.graphql_data()["createCharacter"];
    assert_eq!(payload["errors"], json!([]));
    assert_eq!(payload["character"]["name"], "Zara");
    assert_eq!(payload["character"]["alternateNames"], json!([]));
    assert_eq!(payload["character"]["tags"], json!([]));
    assert_eq!(payload["character"]["public"], false);
    assert_eq!(payload["character"]["defaultModel"], "llama3.2");

    // The new character shows up in the owner's listing.
    let listing = app.graphql(LIST_QUERY, json!({}), Some(&token)).await;
    assert_eq!(edge_names(listing.graphql_data()), vec!["Zara"]);
}

#[tokio::test]
async fn create_character_reports_validation_errors_in_band() {
    let app = TestApp::spawn().await;
    let (_, token) = app.create_user("Ada", "ada@example.com").await;

    let mutation = r#"
        mutation($input: CreateCharacterInput!) {
            createCharacter(input: $input) {
                character { id }
                errors
            }
        }
    "#;
    let res = app
        .graphql(
            mutation,
            json!({ "input": { "name": "", "description": " " } }),
            Some(&token),
        )
        .await;
    let payload = &res.graphql_data()["createCharacter"];
    assert!(payload["character"].is_null());
    assert_eq!(
        payload["errors"],
        json!(["Name can't be blank", "Description can't be blank"])
    );

    // Nothing was persisted.
    let listing = app.graphql(LIST_QUERY, json!({}), Some(&token)).await;
    assert_eq!(listing.graphql_data()["characters"]["edges"], json!([]));
}

#[tokio::test]
async fn create_character_rejects_anonymous_callers_in_band() {
    let app = TestApp::spawn().await;

    let mutation = r#"
        mutation {
            createCharacter(input: { name: "Zara", description: "A wanderer." }) {
                character { id }
                errors
            }
        }
    "#;
    let res = app.graphql(mutation, json!({}), None).await;
    let payload = &res.graphql_data()["createCharacter"];
    assert!(payload["character"].is_null());
    assert_eq!(payload["errors"], json!(["Authentication required"]));
}

#[tokio::test]
async fn available_models_lists_the_supported_model() {
    let app = TestApp::spawn().await;

    let res = app.graphql("{ availableModels }", json!({}), None).await;
    assert_eq!(res.graphql_data()["availableModels"], json!(["Llama 3.2"]));
}
