use super::xml_utils::{XmlResult, XmlWriter};
use super::{FORM_CODE, FORM_SCHEMA_VERSION, FORM_SYSTEM_CODE, fa1_ns, session_ns};

/// Build the `InitSessionTokenRequest` document for the token handshake.
///
/// `encrypted_token` is the already encrypted and encoded session token
/// payload. The document carries no XML signature.
pub fn init_session_token_request(challenge: &str, nip: &str, encrypted_token: &str) -> XmlResult {
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "ns3:InitSessionTokenRequest",
        &[
            ("xmlns", session_ns::ONLINE_TYPES),
            ("xmlns:ns2", session_ns::TYPES),
            ("xmlns:ns3", session_ns::AUTH_REQUEST),
        ],
    )?;
    w.start_element("ns3:Context")?;

    w.text_element("Challenge", challenge)?;

    w.start_element_with_attrs(
        "Identifier",
        &[
            ("xmlns:xsi", fa1_ns::XSI),
            ("xsi:type", "ns2:SubjectIdentifierByCompanyType"),
        ],
    )?;
    w.text_element("ns2:Identifier", nip)?;
    w.end_element("Identifier")?;

    w.start_element("DocumentType")?;
    w.text_element("ns2:Service", "KSeF")?;
    w.start_element("ns2:FormCode")?;
    w.text_element("ns2:SystemCode", FORM_SYSTEM_CODE)?;
    w.text_element("ns2:SchemaVersion", FORM_SCHEMA_VERSION)?;
    w.text_element("ns2:TargetNamespace", fa1_ns::TARGET_NAMESPACE)?;
    w.text_element("ns2:Value", FORM_CODE)?;
    w.end_element("ns2:FormCode")?;
    w.end_element("DocumentType")?;

    w.text_element("Token", encrypted_token)?;

    w.end_element("ns3:Context")?;
    w.end_element("ns3:InitSessionTokenRequest")?;

    Ok(w.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render() -> String {
        let bytes = init_session_token_request(
            "20230320-CR-3B5DCC20B3-C026645D90-3C",
            "1111111111",
            "ZW5jcnlwdGVk",
        )
        .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn root_declares_namespaces() {
        let xml = render();
        assert!(xml.contains("<ns3:InitSessionTokenRequest"));
        assert!(xml.contains(&format!("xmlns=\"{}\"", session_ns::ONLINE_TYPES)));
        assert!(xml.contains(&format!("xmlns:ns2=\"{}\"", session_ns::TYPES)));
        assert!(xml.contains(&format!("xmlns:ns3=\"{}\"", session_ns::AUTH_REQUEST)));
    }

    #[test]
    fn context_carries_challenge_identifier_and_token() {
        let xml = render();
        assert!(xml.contains("<Challenge>20230320-CR-3B5DCC20B3-C026645D90-3C</Challenge>"));
        assert!(xml.contains("xsi:type=\"ns2:SubjectIdentifierByCompanyType\""));
        assert!(xml.contains("<ns2:Identifier>1111111111</ns2:Identifier>"));
        assert!(xml.contains("<Token>ZW5jcnlwdGVk</Token>"));
    }

    #[test]
    fn document_type_names_fa1_form() {
        let xml = render();
        assert!(xml.contains("<ns2:Service>KSeF</ns2:Service>"));
        assert!(xml.contains("<ns2:SystemCode>FA (1)</ns2:SystemCode>"));
        assert!(xml.contains("<ns2:SchemaVersion>1-0E</ns2:SchemaVersion>"));
        assert!(xml.contains(
            "<ns2:TargetNamespace>http://crd.gov.pl/wzor/2021/11/29/11089/</ns2:TargetNamespace>"
        ));
        assert!(xml.contains("<ns2:Value>FA</ns2:Value>"));
    }

    #[test]
    fn elements_in_schema_order() {
        let xml = render();
        let order = ["<Challenge>", "<Identifier ", "<DocumentType>", "<Token>"];
        let positions: Vec<usize> = order.iter().map(|tag| xml.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|p| p[0] < p[1]));
    }
}
