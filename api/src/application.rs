pub mod http;
pub mod signature_middleware;
