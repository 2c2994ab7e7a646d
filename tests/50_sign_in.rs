mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn sign_in_page_lists_sign_up_links() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = reqwest::get(format!("{}/sign-in", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let page = &body["signIn"];
    assert_eq!(page["title"], "Entre com suas credenciais");
    assert_eq!(page["sign_up_links"].as_array().map(Vec::len), Some(2), "unexpected body: {}", body);
    Ok(())
}
