//! Client factory.

use std::sync::Arc;

use crate::clients::ApiNinjasClient;
use crate::error::Result;
use crate::traits::IbanLookupClient;
use crate::types::IbanClientConfig;

/// Creates an [`IbanLookupClient`] from connection settings.
///
/// The returned client is wrapped in `Arc<dyn IbanLookupClient>` so it can be
/// injected into services and shared across request handlers.
///
/// # Examples
///
/// ```rust,no_run
/// use refund_desk_client::{create_client, IbanClientConfig};
///
/// let client = create_client(IbanClientConfig::new("your-api-key")).unwrap();
/// ```
pub fn create_client(config: IbanClientConfig) -> Result<Arc<dyn IbanLookupClient>> {
    Ok(Arc::new(ApiNinjasClient::new(config)?))
}
