use serde::{Deserialize, Serialize};

/// One row from the public company search. The wire format carries the
/// service's Hungarian field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicCompany {
    pub id: i64,
    #[serde(rename = "nev")]
    pub name: String,
    #[serde(rename = "szekhely")]
    pub registered_seat: Option<String>,
    #[serde(rename = "statusz")]
    pub status: String, // "aktív", "megszűnt", or other registry states
    #[serde(rename = "cegforma")]
    pub legal_form: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyStatus {
    Active,
    Terminated,
    Other,
}

impl PublicCompany {
    pub fn status_kind(&self) -> CompanyStatus {
        match self.status.as_str() {
            "aktív" => CompanyStatus::Active,
            "megszűnt" => CompanyStatus::Terminated,
            _ => CompanyStatus::Other,
        }
    }
}

/// NAV's classification of a taxpayer. Values the service has not documented
/// pass through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Incorporation {
    Organization,
    SelfEmployed,
    TaxablePerson,
    Other(String),
}

impl From<String> for Incorporation {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ORGANIZATION" => Incorporation::Organization,
            "SELF_EMPLOYED" => Incorporation::SelfEmployed,
            "TAXABLE_PERSON" => Incorporation::TaxablePerson,
            _ => Incorporation::Other(s),
        }
    }
}

impl From<Incorporation> for String {
    fn from(i: Incorporation) -> Self {
        match i {
            Incorporation::Organization => "ORGANIZATION".to_string(),
            Incorporation::SelfEmployed => "SELF_EMPLOYED".to_string(),
            Incorporation::TaxablePerson => "TAXABLE_PERSON".to_string(),
            Incorporation::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavTaxNumberDetail {
    pub taxpayer_id: String,
    #[serde(default)]
    pub vat_code: Option<String>,
    #[serde(default)]
    pub county_code: Option<String>,
}

impl NavTaxNumberDetail {
    /// The full adószám the way NAV prints it: root-vatCode-countyCode.
    pub fn formatted(&self) -> String {
        format!(
            "{}-{}-{}",
            self.taxpayer_id,
            self.vat_code.as_deref().unwrap_or(""),
            self.county_code.as_deref().unwrap_or("")
        )
    }

    /// vatCode "2" means the taxpayer is VAT-registered. `None` when NAV did
    /// not return a code at all.
    pub fn is_vat_payer(&self) -> Option<bool> {
        self.vat_code.as_deref().map(|code| code == "2")
    }
}

/// Body of a 200 response from the NAV lookup endpoint. `success: false`
/// still arrives as a 200; the caller folds it into the error taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavTaxpayerResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub taxpayer_name: Option<String>,
    #[serde(default)]
    pub taxpayer_short_name: Option<String>,
    #[serde(default)]
    pub tax_number_detail: Option<NavTaxNumberDetail>,
    #[serde(default)]
    pub taxpayer_address_formatted: Option<String>,
    #[serde(default)]
    pub incorporation: Option<Incorporation>,
}

impl NavTaxpayerResponse {
    /// Short name is only worth showing when it differs from the full name.
    pub fn distinct_short_name(&self) -> Option<&str> {
        match (&self.taxpayer_short_name, &self.taxpayer_name) {
            (Some(short), Some(full)) if short != full => Some(short),
            (Some(short), None) => Some(short),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_company_from_wire_fields() {
        let json = r#"{
            "id": 42,
            "nev": "Teszt Kft.",
            "szekhely": "1051 Budapest, Fő utca 1.",
            "statusz": "aktív",
            "cegforma": "Kft."
        }"#;
        let c: PublicCompany = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, 42);
        assert_eq!(c.name, "Teszt Kft.");
        assert_eq!(c.registered_seat.as_deref(), Some("1051 Budapest, Fő utca 1."));
        assert_eq!(c.status_kind(), CompanyStatus::Active);
    }

    #[test]
    fn test_company_status_kinds() {
        let mut c: PublicCompany = serde_json::from_str(
            r#"{"id": 1, "nev": "X", "szekhely": null, "statusz": "megszűnt", "cegforma": null}"#,
        )
        .unwrap();
        assert_eq!(c.status_kind(), CompanyStatus::Terminated);
        c.status = "felszámolás alatt".to_string();
        assert_eq!(c.status_kind(), CompanyStatus::Other);
    }

    #[test]
    fn test_nav_response_parsing() {
        let json = r#"{
            "success": true,
            "message": null,
            "taxpayerName": "TESZT KERESKEDELMI KFT",
            "taxpayerShortName": "TESZT KFT",
            "taxNumberDetail": {"taxpayerId": "12345678", "vatCode": "2", "countyCode": "41"},
            "taxpayerAddressFormatted": "1051 BUDAPEST FŐ UTCA 1",
            "incorporation": "ORGANIZATION"
        }"#;
        let r: NavTaxpayerResponse = serde_json::from_str(json).unwrap();
        assert!(r.success);
        let detail = r.tax_number_detail.as_ref().unwrap();
        assert_eq!(detail.formatted(), "12345678-2-41");
        assert_eq!(detail.is_vat_payer(), Some(true));
        assert_eq!(r.incorporation, Some(Incorporation::Organization));
        assert_eq!(r.distinct_short_name(), Some("TESZT KFT"));
    }

    #[test]
    fn test_nav_failure_payload_parsing() {
        // Domain failures come back with most fields missing.
        let json = r#"{"success": false, "message": "Az adószámhoz nem tartozik adózó."}"#;
        let r: NavTaxpayerResponse = serde_json::from_str(json).unwrap();
        assert!(!r.success);
        assert!(r.taxpayer_name.is_none());
        assert!(r.tax_number_detail.is_none());
    }

    #[test]
    fn test_unknown_incorporation_passes_through() {
        let inc = Incorporation::from("VAT_GROUP".to_string());
        assert_eq!(inc, Incorporation::Other("VAT_GROUP".to_string()));
        assert_eq!(String::from(inc), "VAT_GROUP");
    }

    #[test]
    fn test_short_name_equal_to_name_is_hidden() {
        let r = NavTaxpayerResponse {
            success: true,
            message: None,
            taxpayer_name: Some("TESZT KFT".to_string()),
            taxpayer_short_name: Some("TESZT KFT".to_string()),
            tax_number_detail: None,
            taxpayer_address_formatted: None,
            incorporation: None,
        };
        assert_eq!(r.distinct_short_name(), None);
    }
}
