pub mod entities;
pub mod policies;
pub mod value_objects;

pub use entities::*;
pub use policies::WebhookSignaturePolicy;
pub use value_objects::*;
