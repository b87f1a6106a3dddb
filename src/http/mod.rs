//! HTTP call execution against the system under test

mod executor;
mod outcome;
mod transport;

pub use executor::{Call, Executor};
pub use outcome::{Body, Exchange, Outcome};
pub use transport::{ApiRequest, Auth, Method, RawResponse, ReqwestTransport, Transport, TransportError};
