// rulekeeper-core/src/infrastructure/http/mod.rs

pub mod backend;
pub mod transport;

pub use backend::HttpBackend;
pub use transport::HttpTransport;
