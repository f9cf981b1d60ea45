pub mod transport;
pub mod unsplash;

pub use transport::{HttpTransport, ReqwestTransport, TransportError};
pub use unsplash::{FetchError, SearchClient};
