mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use advantage_api::auth::Role;

fn department(name: &str) -> Value {
    json!({ "department": { "name": name } })
}

async fn create_department(server: &common::TestServer, institution_id: i64, name: &str) -> Result<i64> {
    let res = reqwest::Client::new()
        .post(format!("{}/departments", server.base_url))
        .header("authorization", server.bearer(Role::Institution, institution_id))
        .json(&department(name))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<Value>().await?;
    Ok(body["createdDepartment"]["id"].as_i64().expect("id"))
}

#[tokio::test]
async fn listing_needs_no_authentication() -> Result<()> {
    let server = common::spawn_server().await?;
    let institution = server.store.seed_institution("PUC Minas").await;
    create_department(&server, institution.id, "Engenharia de Software").await?;
    create_department(&server, institution.id, "Direito").await?;

    let res = reqwest::get(format!("{}/departments/{}", server.base_url, institution.id)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let names: Vec<&str> = body["departments"]
        .as_array()
        .expect("departments array")
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Engenharia de Software", "Direito"]);

    Ok(())
}

#[tokio::test]
async fn listing_with_non_numeric_id_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = reqwest::get(format!("{}/departments/abc", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "DPT500L");

    Ok(())
}

#[tokio::test]
async fn create_requires_existing_institution() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/departments", server.base_url))
        .json(&department("Direito"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["error"], "DPT500C");

    let res = client
        .post(format!("{}/departments", server.base_url))
        .header("authorization", server.bearer(Role::Institution, 5))
        .json(&department("Direito"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "error": "DPT500C", "message": "Instituição não encontrada" })
    );
    assert_eq!(server.store.department_count().await, 0);

    Ok(())
}

#[tokio::test]
async fn update_renames_department() -> Result<()> {
    let server = common::spawn_server().await?;
    let institution = server.store.seed_institution("PUC Minas").await;
    let id = create_department(&server, institution.id, "Engenharia").await?;

    let res = reqwest::Client::new()
        .patch(format!("{}/departments/{}", server.base_url, id))
        .header("authorization", server.bearer(Role::Institution, institution.id))
        .json(&department("Engenharia de Computação"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["updatedDepartment"]["name"], "Engenharia de Computação");
    assert_eq!(body["updatedDepartment"]["institution_id"], institution.id);

    Ok(())
}

#[tokio::test]
async fn delete_is_limited_to_owning_institution() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = server.store.seed_institution("PUC Minas").await;
    let other = server.store.seed_institution("UFMG").await;
    let id = create_department(&server, owner.id, "Engenharia").await?;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{}/departments/{}", server.base_url, id))
        .header("authorization", server.bearer(Role::Institution, other.id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        res.json::<Value>().await?,
        json!({
            "error": "DPT500D",
            "message": "O departamento selecionado não pertence a essa instituição"
        })
    );
    assert_eq!(server.store.department_count().await, 1);

    let res = client
        .delete(format!("{}/departments/{}", server.base_url, id))
        .header("authorization", server.bearer(Role::Institution, owner.id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::GONE);
    assert_eq!(res.json::<Value>().await?, json!({ "deleted": { "affected": 1 } }));

    // Deleting it again finds no row owned by the caller
    let res = client
        .delete(format!("{}/departments/{}", server.base_url, id))
        .header("authorization", server.bearer(Role::Institution, owner.id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["error"], "DPT500D");

    Ok(())
}
