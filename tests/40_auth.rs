mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use advantage_api::auth::{generate_jwt, Claims, Role};

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = generate_jwt(&Claims::new(Role::Student, 1, 1)?, "not-the-server-secret")?;

    let res = reqwest::Client::new()
        .get(format!("{}/advantages", server.base_url))
        .header("authorization", format!("Bearer {}", token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["error"], "AUTH401");
    Ok(())
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = reqwest::Client::new()
        .get(format!("{}/advantages", server.base_url))
        .header("authorization", "Basic YWx1bm86c2VuaGE=")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn collapsed_mode_reports_every_error_as_500() -> Result<()> {
    let mut config = common::test_config();
    config.api.collapse_error_status = true;
    let server = common::spawn_server_with(config).await?;
    let owner = server.store.seed_business("Livraria").await;
    let intruder = server.store.seed_business("Cinema").await;
    let client = reqwest::Client::new();

    // Missing claim
    let res = client.get(format!("{}/advantages", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?["error"], "ADV500LS");

    // Ownership mismatch keeps its code and message
    let created = client
        .post(format!("{}/advantages", server.base_url))
        .header("authorization", server.bearer(Role::Business, owner.id))
        .json(&json!({ "advantage": { "description": "Livro", "cost": 30 } }))
        .send()
        .await?;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = created.json::<Value>().await?["createdAdvantage"]["id"]
        .as_i64()
        .expect("id");

    let res = client
        .delete(format!("{}/advantages/{}", server.base_url, id))
        .header("authorization", server.bearer(Role::Business, intruder.id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json::<Value>().await?,
        json!({
            "error": "ADV500D",
            "message": "A vantagem selecionado não pertence a essa empresa"
        })
    );

    // Successes are untouched
    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}
