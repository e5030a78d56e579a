//! Xero OAuth 1.0a signing implementation for xerosign.
//!
//! This crate manages the credentials of a Xero application and signs its
//! API requests, covering all three Xero trust models: private, public and
//! partner apps.
//!
//! ## Overview
//!
//! Xero's classic API authenticates with OAuth 1.0a. Which signature method
//! applies depends on the app type:
//!
//! - **private** — RSA-SHA1 with the app's private key certificate. The app
//!   is pre-authorized: its permanent token pair is its own consumer key
//!   and certificate content, so no handshake is needed.
//! - **public** — HMAC-SHA1 with the consumer secret. The app must run the
//!   full 3-legged handshake to obtain an access token.
//! - **partner** — RSA-SHA1 like a private app, but exchanges tokens like a
//!   public one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xerosign::{Client, Config};
//! use xerosign_core::{Context, OsEnv, Result};
//! use xerosign_file_read_tokio::TokioFileRead;
//! use xerosign_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Create context
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Configure the application
//!     let config = Config {
//!         app_type: Some("private".to_string()),
//!         consumer_key: Some("your-consumer-key".to_string()),
//!         consumer_secret: Some("your-consumer-secret".to_string()),
//!         private_key_file: Some("/path/to/privatekey.pem".to_string()),
//!         ..Default::default()
//!     };
//!
//!     // Construction resolves the credential eagerly; configuration
//!     // problems surface here, before any network call.
//!     let client = Client::new(ctx, config).await?;
//!
//!     // Sign resource requests
//!     let mut req = http::Request::get("https://api.xero.com/api.xro/2.0/Invoices")
//!         .body(())
//!         .unwrap()
//!         .into_parts()
//!         .0;
//!     client.sign(&mut req).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## The 3-legged handshake
//!
//! Public (and partner) apps obtain their access token through the
//! token-exchange handshake. The client holds no session state; the caller
//! threads the token pairs through explicitly:
//!
//! ```no_run
//! # use xerosign::{Client, Config};
//! # use xerosign_core::{Context, Result};
//! # async fn example(client: Client) -> Result<()> {
//! let oauth = client.oauth10a();
//!
//! // 1. Obtain an unauthorized request token.
//! let request_token = oauth.request_token().await?;
//!
//! // 2. Send the user to the authorize URL and collect the verifier.
//! let url = oauth.authorize_url(&request_token.token)?;
//! println!("authorize at: {url}");
//! # let verifier = "012345";
//!
//! // 3. Trade the authorized request token for an access token.
//! let access_token = oauth.access_token(&request_token, Some(verifier)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export XERO_APP_TYPE=private
//! export XERO_CONSUMER_KEY=your-consumer-key
//! export XERO_CONSUMER_SECRET=your-consumer-secret
//! export XERO_PRIVATE_KEY_FILE=/path/to/privatekey.pem
//! ```
//!
//! ### Explicit Configuration
//!
//! Fill a [`Config`] by hand, or combine both with
//! [`DefaultCredentialProvider`], which tries explicit configuration first
//! and the environment second.
//!
//! ## Testing
//!
//! Every capability is injectable: substitute the transport through
//! [`xerosign_core::Context`] and the signature computation through
//! [`TokenSign`], and the whole token-exchange flow runs hermetically
//! against in-memory fakes.

mod constants;

mod config;
pub use config::{AppType, Config};

mod credential;
pub use credential::Credential;

mod token;
pub use token::TokenPair;

mod signature;
pub use signature::{CryptoTokenSigner, SignatureMethod, SigningKeys, TokenSign};

mod oauth10a;
pub use oauth10a::OAuth10a;

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;

mod client;
pub use client::Client;
