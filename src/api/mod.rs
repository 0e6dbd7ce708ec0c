pub mod client;
pub mod endpoints;
pub mod transport;

pub use client::ApiClient;
pub use transport::{ApiRequest, HttpMethod, HttpTransport, REQUEST_ID_HEADER, Transport};
