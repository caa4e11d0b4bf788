//! Authorize with a KSeF token and list invoices issued in the last 30 days.
//!
//! ```sh
//! KSEF_NIP=1111111111 KSEF_TOKEN=... cargo run --example search_invoices --features client
//! ```
//!
//! The token is sent unencrypted here; a real integration supplies a
//! `TokenEncryptor` that encrypts with the KSeF public key.

use chrono::{Duration, Utc};
use ksef::client::{InvoiceQuery, KsefClient, KsefConfig, TokenEncryptor};

struct PassThrough;

impl TokenEncryptor for PassThrough {
    type Error = std::convert::Infallible;

    fn encrypt(&self, payload: &[u8]) -> Result<String, Self::Error> {
        Ok(String::from_utf8_lossy(payload).into_owned())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let nip = std::env::var("KSEF_NIP")?;
    let token = std::env::var("KSEF_TOKEN")?;

    let client = KsefClient::new(KsefConfig::from_env()?)?;
    let session = client.authorize(&nip, &token, &PassThrough).await?;
    println!("session {}", session.reference_number);

    let now = Utc::now();
    let query = InvoiceQuery::new(now - Duration::days(30), now);
    let result = client.search_invoices(&session.credential(), &query).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
