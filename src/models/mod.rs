pub mod auth_token;
pub mod invoice;

pub use auth_token::AuthToken;
pub use invoice::{InvoiceRequest, InvoiceResult};
