//! HTTP plumbing shared by the geocoder and the backend clients.

pub mod envelope;
pub mod mock;
pub mod transport;

pub use envelope::{ApiResponse, Messages};
pub use transport::{
    DefaultHeaders, HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport,
    TransportError,
};
