mod config;
mod context;
mod grpc;

pub use config::ConnectionConfig;
pub use context::{RequestContext, AGENT_HEADER, VERSION_HEADER};
pub use grpc::{connect, connect_lazy, ConnectionError, REQUEST_TIMEOUT};
