use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice creation request, as posted by the form and forwarded to SAT.
///
/// Field names on the wire are the ones SAT and the form use. No local
/// validation is applied; SAT is the judge of the contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    #[serde(rename = "rfcEmisor")]
    pub issuer_tax_id: String,
    #[serde(rename = "rfcReceptor")]
    pub receiver_tax_id: String,
    #[serde(rename = "concepto")]
    pub description: String,
    /// Accepts either `"1500.50"` or `1500.50`; serialized as a decimal string.
    #[serde(rename = "monto")]
    pub amount: Decimal,
}

/// Documents SAT returns for a generated invoice. Passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResult {
    #[serde(rename = "facturaId")]
    pub invoice_id: String,
    #[serde(rename = "xmlUrl")]
    pub xml_document_url: String,
    #[serde(rename = "pdfUrl")]
    pub pdf_document_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_accepts_form_payload() {
        // The browser form sends every field as a string
        let request: InvoiceRequest = serde_json::from_value(json!({
            "rfcEmisor": "URE180429TM6",
            "rfcReceptor": "XAXX010101000",
            "concepto": "Servicios de consultoría",
            "monto": "1500.50"
        }))
        .unwrap();

        assert_eq!(request.issuer_tax_id, "URE180429TM6");
        assert_eq!(request.receiver_tax_id, "XAXX010101000");
        assert_eq!(request.description, "Servicios de consultoría");
        assert_eq!(request.amount, Decimal::new(150050, 2));
    }

    #[test]
    fn test_request_accepts_numeric_amount() {
        let request: InvoiceRequest = serde_json::from_value(json!({
            "rfcEmisor": "URE180429TM6",
            "rfcReceptor": "XAXX010101000",
            "concepto": "Renta",
            "monto": 1200
        }))
        .unwrap();

        assert_eq!(request.amount, Decimal::new(1200, 0));
    }

    #[test]
    fn test_request_serializes_with_sat_field_names() {
        let request = InvoiceRequest {
            issuer_tax_id: "URE180429TM6".to_string(),
            receiver_tax_id: "XAXX010101000".to_string(),
            description: "Renta".to_string(),
            amount: Decimal::new(150050, 2),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "rfcEmisor": "URE180429TM6",
                "rfcReceptor": "XAXX010101000",
                "concepto": "Renta",
                "monto": "1500.50"
            })
        );
    }

    #[test]
    fn test_request_missing_fields_is_rejected() {
        let result = serde_json::from_value::<InvoiceRequest>(json!({
            "rfcEmisor": "URE180429TM6",
            "monto": "10"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_result_requires_all_document_links() {
        let result: InvoiceResult = serde_json::from_value(json!({
            "facturaId": "F-0001",
            "xmlUrl": "https://sat.example/F-0001.xml",
            "pdfUrl": "https://sat.example/F-0001.pdf",
            "extra": true
        }))
        .unwrap();

        assert_eq!(result.invoice_id, "F-0001");
        assert_eq!(result.pdf_document_url, "https://sat.example/F-0001.pdf");

        assert!(serde_json::from_value::<InvoiceResult>(json!({ "facturaId": "F-0001" })).is_err());
    }
}
