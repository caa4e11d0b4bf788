//! XML documents exchanged with KSeF.
//!
//! - **FA (1)** invoice (`to_fa1_xml`, `to_fa1_xml_with_system_info`)
//! - **InitSessionTokenRequest** for the token handshake (`init_session_token_request`)
//!
//! # Example
//!
//! ```
//! use ksef::core::{Invoice, KsefError};
//! use ksef::xml;
//!
//! fn encode(invoice: &Invoice) -> Result<String, KsefError> {
//!     let document = xml::to_fa1_xml_with_system_info(invoice, "my-erp 1.0")?;
//!     Ok(String::from_utf8_lossy(&document).into_owned())
//! }
//! ```

mod fa1;
mod init_session;
pub(crate) mod xml_utils;

pub use fa1::{DEFAULT_SYSTEM_INFO, to_fa1_xml, to_fa1_xml_with_system_info};
pub use init_session::init_session_token_request;
pub use xml_utils::XmlResult;

/// Form code (`KodFormularza` text).
pub const FORM_CODE: &str = "FA";
/// `kodSystemowy` attribute of `KodFormularza`.
pub const FORM_SYSTEM_CODE: &str = "FA (1)";
/// `wersjaSchemy` attribute of `KodFormularza`.
pub const FORM_SCHEMA_VERSION: &str = "1-0E";
/// `WariantFormularza` text.
pub const FORM_VARIANT: &str = "1";

/// FA (1) namespace URIs.
pub mod fa1_ns {
    /// Default and `tns` namespace of the invoice document.
    pub const FA: &str = "http://ksef.mf.gov.pl/wzor/2021/08/05/08051/";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
    pub const SCHEMA_LOCATION: &str = "http://crd.gov.pl/wzor/2021/11/29/11089/schemat.xsd";
    /// Target namespace announced in the session's document type.
    pub const TARGET_NAMESPACE: &str = "http://crd.gov.pl/wzor/2021/11/29/11089/";
}

/// Session gateway namespace URIs.
pub mod session_ns {
    pub const ONLINE_TYPES: &str =
        "http://ksef.mf.gov.pl/schema/gtw/svc/online/types/2021/10/01/0001";
    pub const TYPES: &str = "http://ksef.mf.gov.pl/schema/gtw/svc/types/2021/10/01/0001";
    pub const AUTH_REQUEST: &str =
        "http://ksef.mf.gov.pl/schema/gtw/svc/online/auth/request/2021/10/01/0001";
}
