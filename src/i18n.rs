use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Incorporation;
use crate::state::GatedField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Hu,
    En,
}

impl Default for Lang {
    fn default() -> Self {
        Lang::Hu
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::Hu => write!(f, "hu"),
            Lang::En => write!(f, "en"),
        }
    }
}

impl Lang {
    pub fn labels(self) -> &'static Labels {
        match self {
            Lang::Hu => &HU,
            Lang::En => &EN,
        }
    }
}

/// Every string the company-check flow renders, in one place per language.
pub struct Labels {
    pub page_title: &'static str,
    pub page_subtitle: &'static str,
    pub badge: &'static str,
    pub search_placeholder: &'static str,
    pub search_button: &'static str,
    pub search_tip: &'static str,
    pub nav_querying: &'static str,
    pub nav_official_header: &'static str,
    pub db_searching: &'static str,
    pub label_tax_number: &'static str,
    pub label_seat: &'static str,
    pub label_vat_payer: &'static str,
    pub vat_yes: &'static str,
    pub vat_no: &'static str,
    pub label_type: &'static str,
    pub incorporation_organization: &'static str,
    pub incorporation_self_employed: &'static str,
    pub incorporation_taxable_person: &'static str,
    pub local_db_results: &'static str,
    pub no_results_title: &'static str,
    pub no_results_desc: &'static str,
    pub blurred_tax_number: &'static str,
    pub blurred_reg_number: &'static str,
    pub blurred_revenue: &'static str,
    pub blurred_risk: &'static str,
    pub subscription_required: &'static str,
    pub subscription_desc: &'static str,
    pub view_plans: &'static str,
    pub feature_tax_search: &'static str,
    pub feature_tax_search_desc: &'static str,
    pub feature_name_search: &'static str,
    pub feature_name_search_desc: &'static str,
    pub feature_official_data: &'static str,
    pub feature_official_data_desc: &'static str,
    pub error_no_taxpayer: &'static str,
    pub error_generic: &'static str,
    pub error_network: &'static str,
}

impl Labels {
    pub fn incorporation(&self, inc: &Incorporation) -> String {
        match inc {
            Incorporation::Organization => self.incorporation_organization.to_string(),
            Incorporation::SelfEmployed => self.incorporation_self_employed.to_string(),
            Incorporation::TaxablePerson => self.incorporation_taxable_person.to_string(),
            Incorporation::Other(raw) => raw.clone(),
        }
    }

    pub fn gated_field(&self, field: GatedField) -> &'static str {
        match field {
            GatedField::TaxNumber => self.blurred_tax_number,
            GatedField::RegistrationNumber => self.blurred_reg_number,
            GatedField::Revenue => self.blurred_revenue,
            GatedField::Risk => self.blurred_risk,
        }
    }
}

pub static HU: Labels = Labels {
    page_title: "Cégellenőrző",
    page_subtitle: "Adószám vagy cégnév alapján kereshet bármely magyar cégre. Az adószámos keresés a NAV hivatalos adatbázisából ad eredményt.",
    badge: "NAV adatbázissal összekapcsolva",
    search_placeholder: "pl. 24107369 vagy Teszt Kft.",
    search_button: "Keresés",
    search_tip: "Tipp: Adószámmal keresve a NAV hivatalos adatait kapja, cégnévvel a helyi adatbázisunkból keresünk.",
    nav_querying: "NAV adatbázis lekérdezése...",
    nav_official_header: "NAV — Hivatalos adóhatósági adat",
    db_searching: "Keresés a helyi adatbázisban...",
    label_tax_number: "Adószám",
    label_seat: "Székhely",
    label_vat_payer: "ÁFA alany",
    vat_yes: "Igen",
    vat_no: "Nem",
    label_type: "Típus",
    incorporation_organization: "Szervezet",
    incorporation_self_employed: "Egyéni vállalkozó",
    incorporation_taxable_person: "Adóalany",
    local_db_results: "Helyi adatbázis találatok",
    no_results_title: "Nincs találat",
    no_results_desc: "Próbáljon más keresőszót vagy adjon meg egy 8 számjegyű adószámot a NAV adatbázisból való lekérdezéshez.",
    blurred_tax_number: "Adószám",
    blurred_reg_number: "Cégjegyzékszám",
    blurred_revenue: "Árbevétel",
    blurred_risk: "Kockázat",
    subscription_required: "Előfizetés szükséges",
    subscription_desc: "A teljes céginformáció, pénzügyi adatok és kockázatelemzés megtekintéséhez válasszon előfizetési csomagot.",
    view_plans: "Csomagok megtekintése",
    feature_tax_search: "Adószám keresés",
    feature_tax_search_desc: "NAV adatbázisból",
    feature_name_search: "Cégnév keresés",
    feature_name_search_desc: "Helyi adatbázisból",
    feature_official_data: "Hivatalos adat",
    feature_official_data_desc: "NAV által hitelesítve",
    error_no_taxpayer: "Az adószámhoz nem tartozik adózó.",
    error_generic: "Hiba történt",
    error_network: "Hálózati hiba — próbálja újra.",
};

pub static EN: Labels = Labels {
    page_title: "Company Checker",
    page_subtitle: "Search for any Hungarian company by tax number or company name. Tax number searches return results from the official NAV database.",
    badge: "Connected to NAV database",
    search_placeholder: "e.g. 24107369 or Test Kft.",
    search_button: "Search",
    search_tip: "Tip: Searching by tax number returns official NAV data; searching by company name queries our local database.",
    nav_querying: "Querying NAV database...",
    nav_official_header: "NAV — Official tax authority data",
    db_searching: "Searching the local database...",
    label_tax_number: "Tax number",
    label_seat: "Registered seat",
    label_vat_payer: "VAT payer",
    vat_yes: "Yes",
    vat_no: "No",
    label_type: "Type",
    incorporation_organization: "Organization",
    incorporation_self_employed: "Self-employed",
    incorporation_taxable_person: "Taxable person",
    local_db_results: "Local database results",
    no_results_title: "No results",
    no_results_desc: "Try a different search term or enter an 8-digit tax number to query the NAV database.",
    blurred_tax_number: "Tax number",
    blurred_reg_number: "Registration number",
    blurred_revenue: "Revenue",
    blurred_risk: "Risk",
    subscription_required: "Subscription required",
    subscription_desc: "To view full company information, financial data and risk analysis, please choose a subscription plan.",
    view_plans: "View plans",
    feature_tax_search: "Tax number search",
    feature_tax_search_desc: "From NAV database",
    feature_name_search: "Company name search",
    feature_name_search_desc: "From local database",
    feature_official_data: "Official data",
    feature_official_data_desc: "Verified by NAV",
    error_no_taxpayer: "No taxpayer found for this tax number.",
    error_generic: "An error occurred",
    error_network: "Network error — please try again.",
};
