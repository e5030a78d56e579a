use std::env;

use log::{debug, warn};
use xerosign::{Client, Config};
use xerosign_core::{Context, OsEnv, Result};
use xerosign_file_read_tokio::TokioFileRead;
use xerosign_http_send_reqwest::ReqwestHttpSend;

async fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("XEROSIGN_TEST").is_err() || env::var("XEROSIGN_TEST").unwrap() != "on" {
        return None;
    }

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);

    Some(
        Client::new(ctx, config)
            .await
            .expect("client must build from env"),
    )
}

#[tokio::test]
async fn test_request_token() -> Result<()> {
    let client = init_client().await;
    if client.is_none() {
        warn!("XEROSIGN_TEST is not set, skipped");
        return Ok(());
    }
    let client = client.unwrap();

    let pair = client.oauth10a().request_token().await?;
    debug!("got request token: {pair:?}");

    let url = client.oauth10a().authorize_url(&pair.token)?;
    debug!("authorize at: {url}");

    Ok(())
}

#[tokio::test]
async fn test_sign_resource_request() -> Result<()> {
    let client = init_client().await;
    if client.is_none() {
        warn!("XEROSIGN_TEST is not set, skipped");
        return Ok(());
    }
    let client = client.unwrap();

    let mut req = http::Request::get("https://api.xero.com/api.xro/2.0/Organisation")
        .body(())
        .unwrap()
        .into_parts()
        .0;
    client.sign(&mut req).await?;

    debug!("signed request: {req:?}");
    Ok(())
}
