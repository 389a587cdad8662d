pub mod sat_auth_service;
pub mod sat_invoice_service;

pub use sat_auth_service::{SatAuthError, SatAuthService};
pub use sat_invoice_service::{SatInvoiceError, SatInvoiceService};
