//! End-to-end payment flow: authorize, capture, then void the capture.
//!
//! Mirrors a typical gateway sandbox session. Credentials come from the
//! environment; never hardcode them.
//!
//! # Running this example
//!
//! ```bash
//! export XPAY_API_KEY=<your api key>
//! export XPAY_SECRET_KEY=<your secret key>
//! export XPAY_BASE_URL=https://sandbox.gateway.example.com/cybersource
//! cargo run --example payment_flow
//! ```
//!
//! Sandboxes with self-signed certificates additionally need
//! `XPAY_INSECURE=1`, which enables the per-client
//! `danger_accept_invalid_certs` transport option. Never set it against a
//! production gateway.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use std::env;

use rust_decimal::Decimal;
use xpay_client::{
    ClientConfig, GatewayClient,
    client::{AuthorizationRequest, CaptureRequest, PaymentCard},
};

fn load_config() -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let api_key = env::var("XPAY_API_KEY").map_err(|_| "XPAY_API_KEY not set")?;
    let secret_key = env::var("XPAY_SECRET_KEY").map_err(|_| "XPAY_SECRET_KEY not set")?;
    let base_url = env::var("XPAY_BASE_URL").map_err(|_| "XPAY_BASE_URL not set")?;

    let mut config = ClientConfig::new(&api_key, &secret_key, &base_url);
    if env::var("XPAY_INSECURE").is_ok_and(|v| v == "1") {
        eprintln!("warning: TLS certificate verification disabled for this client");
        config.http.danger_accept_invalid_certs = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let client = GatewayClient::new(&load_config()?)?;

    // Step 1: authorize 100.00 USD against a sandbox test card.
    println!("1. Authorizing 100.00 USD...");
    let auth_request = AuthorizationRequest {
        amount: Decimal::new(10000, 2),
        currency: "USD".to_owned(),
        reference_id: Some("demo-123".to_owned()),
        payment: Some(PaymentCard {
            card_number: "4111111111111111".to_owned(),
            card_expiration_month: "10".to_owned(),
            card_expiration_year: "2028".to_owned(),
            cvv: None,
        }),
        extra: Default::default(),
    };

    let authorized = client.authorize(&auth_request).await?;
    println!("   authorized: {}", authorized.body.text());

    let auth_id = authorized
        .body
        .as_json()
        .and_then(|body| body["id"].as_str())
        .ok_or("authorization response carried no id")?
        .to_owned();

    // Step 2: capture the authorized amount.
    println!("2. Capturing authorization {auth_id}...");
    let capture_request =
        CaptureRequest { amount: Some(Decimal::new(10000, 2)), ..Default::default() };
    let captured = client.capture(&auth_id, &capture_request).await?;
    println!("   captured: {}", captured.body.text());

    let capture_id = captured
        .body
        .as_json()
        .and_then(|body| body["id"].as_str())
        .ok_or("capture response carried no id")?
        .to_owned();

    // Step 3: void the capture before settlement.
    println!("3. Voiding capture {capture_id}...");
    let voided = client.void_capture(&capture_id, None).await?;
    println!("   voided: {}", voided.body.text());

    Ok(())
}
