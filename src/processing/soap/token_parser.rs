use sxd_document::{dom::Document, parser};
use sxd_xpath::{Context, Factory, Value};
use thiserror::Error;

/// Element that carries the SAT token in the authentication response.
pub const TOKEN_ELEMENT: &str = "BinarySecurityToken";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenParseError {
    #[error("Respuesta XML inválida: {0}")]
    InvalidXml(String),

    #[error("Elemento {element} no encontrado en la respuesta")]
    MissingElement { element: String },

    #[error("Elemento {element} vacío en la respuesta")]
    EmptyElement { element: String },
}

/// Extracts the bearer token from a SAT authentication response.
pub fn parse_token(xml: &str) -> Result<String, TokenParseError> {
    let raw = first_element_text(xml, TOKEN_ELEMENT)?;
    let token = raw.trim();

    if token.is_empty() {
        return Err(TokenParseError::EmptyElement {
            element: TOKEN_ELEMENT.to_string(),
        });
    }

    Ok(token.to_string())
}

/// Returns the text content of the first element (document order) with the given
/// local name, whatever namespace prefix it uses. The text is not trimmed.
pub fn first_element_text(xml: &str, local_name: &str) -> Result<String, TokenParseError> {
    let package = parser::parse(xml).map_err(|e| TokenParseError::InvalidXml(e.to_string()))?;
    let document = package.as_document();

    evaluate_first_text(&document, &format!("//*[local-name()='{}']", local_name)).ok_or_else(
        || TokenParseError::MissingElement {
            element: local_name.to_string(),
        },
    )
}

fn evaluate_first_text(document: &Document, xpath_expr: &str) -> Option<String> {
    let factory = Factory::new();
    let context = Context::new();

    // build() yields Ok(None) for an empty expression
    let xpath = match factory.build(xpath_expr) {
        Ok(Some(xpath)) => xpath,
        _ => return None,
    };
    match xpath.evaluate(&context, document.root()) {
        Ok(Value::Nodeset(nodes)) => nodes
            .document_order_first()
            .map(|node| node.string_value()),
        _ => None,
    }
}
