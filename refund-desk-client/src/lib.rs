//! # refund-desk-client
//!
//! Best-effort IBAN lookup against an external validation API.
//!
//! The client makes exactly one request per lookup and never fails loudly:
//! connection errors, error statuses and unreadable bodies are logged and
//! reported as `None`. Deciding what "no result" means (the refund desk treats
//! it as "service unavailable") is left to the caller.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use refund_desk_client::{create_client, IbanClientConfig, IbanLookupClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_client(IbanClientConfig::new("your-api-key"))?;
//!
//!     match client.validate_iban("DE89370400440532013000").await {
//!         Some(lookup) if lookup.valid => println!("valid, issued in {:?}", lookup.country),
//!         Some(_) => println!("not a valid IBAN"),
//!         None => println!("lookup service unavailable"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.

mod clients;
mod error;
mod factory;
mod http_client;
mod traits;
mod types;
mod utils;

pub use clients::ApiNinjasClient;
pub use error::{ClientError, Result};
pub use factory::create_client;
pub use http_client::HttpUtils;
pub use traits::IbanLookupClient;
pub use types::{DEFAULT_IBAN_ENDPOINT, IbanClientConfig, IbanLookup};
pub use utils::log_sanitizer;
