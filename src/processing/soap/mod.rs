// SOAP plumbing for the SAT authentication surface

pub mod envelope;
pub mod token_parser;

pub use envelope::build_security_envelope;
pub use token_parser::{first_element_text, parse_token, TokenParseError};
