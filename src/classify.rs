/// A submitted query, split into what each backend lookup needs.
///
/// The local database search always gets the trimmed text as typed. The NAV
/// lookup only applies when the query is tax-ID-shaped: after stripping
/// whitespace and hyphens nothing but digits remain, at least 8 of them. The
/// first 8 digits are the taxpayer root id NAV keys its records on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub db_query: String,
    pub nav_root: Option<String>,
}

impl Classified {
    pub fn is_tax_id(&self) -> bool {
        self.nav_root.is_some()
    }
}

/// Classifies raw search-box input. Returns `None` for queries shorter than
/// 2 characters after trimming; those never reach the network.
pub fn classify(raw: &str) -> Option<Classified> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < 2 {
        return None;
    }

    let nav_root = if is_tax_id_shaped(trimmed) {
        Some(cleaned(trimmed)[..8].to_string())
    } else {
        None
    };

    Some(Classified {
        db_query: trimmed.to_string(),
        nav_root,
    })
}

/// True when the input, with whitespace and hyphens stripped, is 8 or more
/// digits. Used for the live NAV badge as well as classification, so it
/// tolerates untrimmed input.
pub fn is_tax_id_shaped(raw: &str) -> bool {
    let clean = cleaned(raw);
    clean.len() >= 8 && clean.bytes().all(|b| b.is_ascii_digit())
}

fn cleaned(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_digits_is_tax_id() {
        let c = classify("12345678").unwrap();
        assert!(c.is_tax_id());
        assert_eq!(c.nav_root.as_deref(), Some("12345678"));
    }

    #[test]
    fn test_seven_digits_is_name_search() {
        let c = classify("1234567").unwrap();
        assert!(!c.is_tax_id());
        assert_eq!(c.db_query, "1234567");
    }

    #[test]
    fn test_hyphens_and_spaces_stripped() {
        assert!(is_tax_id_shaped("12-345-678"));
        assert!(is_tax_id_shaped("12 345 678-2-41"));

        let c = classify("12-345-678-2-41").unwrap();
        assert_eq!(c.nav_root.as_deref(), Some("12345678"));
        // The database query keeps the text as typed.
        assert_eq!(c.db_query, "12-345-678-2-41");
    }

    #[test]
    fn test_company_name_is_not_tax_id() {
        let c = classify("Teszt Kft.").unwrap();
        assert!(!c.is_tax_id());
        assert_eq!(c.db_query, "Teszt Kft.");
    }

    #[test]
    fn test_digits_with_letters_is_name_search() {
        assert!(!is_tax_id_shaped("12345678a"));
        assert!(!classify("12345678a").unwrap().is_tax_id());
    }

    #[test]
    fn test_nav_root_truncated_to_eight() {
        let c = classify("123456789").unwrap();
        assert_eq!(c.nav_root.as_deref(), Some("12345678"));
        assert_eq!(c.db_query, "123456789");
    }

    #[test]
    fn test_short_input_rejected() {
        assert!(classify("").is_none());
        assert!(classify("a").is_none());
        assert!(classify("  x  ").is_none());
    }

    #[test]
    fn test_db_query_is_trimmed() {
        let c = classify("  Teszt Kft.  ").unwrap();
        assert_eq!(c.db_query, "Teszt Kft.");
    }
}
