use sxd_document::{writer::format_document, Package, QName};

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

/// Builds the SOAP authentication envelope for SAT.
///
/// ```xml
/// <s:Envelope xmlns:s="...soap/envelope/">
///   <s:Header>
///     <o:Security xmlns:o="...wssecurity-secext-1.0.xsd">
///       <o:BinarySecurityToken>{certificate}</o:BinarySecurityToken>
///     </o:Security>
///   </s:Header>
///   <s:Body/>
/// </s:Envelope>
/// ```
///
/// The certificate is written as a text node, so the writer takes care of escaping.
pub fn build_security_envelope(certificate: &str) -> std::io::Result<String> {
    let package = Package::new();
    let document = package.as_document();

    let envelope = document.create_element(QName::with_namespace_uri(Some(SOAP_ENVELOPE_NS), "Envelope"));
    envelope.register_prefix("s", SOAP_ENVELOPE_NS);
    envelope.set_preferred_prefix(Some("s"));

    let header = document.create_element(QName::with_namespace_uri(Some(SOAP_ENVELOPE_NS), "Header"));
    header.set_preferred_prefix(Some("s"));

    let security = document.create_element(QName::with_namespace_uri(Some(WSSE_NS), "Security"));
    security.register_prefix("o", WSSE_NS);
    security.set_preferred_prefix(Some("o"));

    let token = document.create_element(QName::with_namespace_uri(Some(WSSE_NS), "BinarySecurityToken"));
    token.set_preferred_prefix(Some("o"));
    token.append_child(document.create_text(certificate));

    // Sin cuerpo: la autenticación va completa en el encabezado
    let body = document.create_element(QName::with_namespace_uri(Some(SOAP_ENVELOPE_NS), "Body"));
    body.set_preferred_prefix(Some("s"));

    security.append_child(token);
    header.append_child(security);
    envelope.append_child(header);
    envelope.append_child(body);
    document.root().append_child(envelope);

    let mut output = Vec::new();
    format_document(&document, &mut output)?;

    String::from_utf8(output)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
