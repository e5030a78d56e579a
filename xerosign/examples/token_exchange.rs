//! Walk the OAuth 1.0a handshake using configuration from the environment.
//!
//! ```bash
//! export XERO_APP_TYPE=public
//! export XERO_CONSUMER_KEY=your-consumer-key
//! export XERO_CONSUMER_SECRET=your-consumer-secret
//! cargo run --example token_exchange
//! ```

use std::io::{self, BufRead, Write};

use xerosign::{Client, Config};
use xerosign_core::{Context, OsEnv, Result};
use xerosign_file_read_tokio::TokioFileRead;
use xerosign_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let client = Client::new(ctx, config).await?;

    let oauth = client.oauth10a();
    let request_token = oauth.request_token().await?;
    println!(
        "authorize at: {}",
        oauth.authorize_url(&request_token.token)?
    );

    print!("verifier: ");
    io::stdout().flush().ok();
    let mut verifier = String::new();
    io::stdin().lock().read_line(&mut verifier).ok();
    let verifier = verifier.trim();

    let access_token = oauth
        .access_token(&request_token, (!verifier.is_empty()).then_some(verifier))
        .await?;
    println!("access token: {access_token:?}");

    Ok(())
}
