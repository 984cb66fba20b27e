//! Static company knowledge: domain resolution and type classification.
//!
//! Both lookups normalize the same way (lowercase, trim) and never fail:
//! unknown companies get a synthesized domain and the "default" type.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A single card request: who gets roasted.
#[derive(Debug, Clone)]
pub struct CompanyRequest {
    pub name: String,
    pub role: String,
}

impl CompanyRequest {
    /// Build a request. A blank role falls back to "Engineers".
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        let role = role.into();
        let role = if role.trim().is_empty() {
            "Engineers".to_string()
        } else {
            role
        };
        Self {
            name: name.into(),
            role,
        }
    }
}

static COMPANY_DOMAINS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("google", "google.com"),
        ("amazon", "amazon.com"),
        ("microsoft", "microsoft.com"),
        ("meta", "meta.com"),
        ("facebook", "meta.com"),
        ("apple", "apple.com"),
        ("netflix", "netflix.com"),
        ("tesla", "tesla.com"),
        ("uber", "uber.com"),
        ("airbnb", "airbnb.com"),
        ("spotify", "spotify.com"),
        ("zoom", "zoom.us"),
        ("slack", "slack.com"),
        ("twitter", "x.com"),
        ("x", "x.com"),
        // Indian IT companies
        ("ltimindtree", "ltimindtree.com"),
        ("tcs", "tcs.com"),
        ("infosys", "infosys.com"),
        ("wipro", "wipro.com"),
        ("hcl", "hcltech.com"),
        ("tech mahindra", "techmahindra.com"),
        ("techmahindra", "techmahindra.com"),
        // Indian startups
        ("grapevine", "joingrapevineco.com"),
        ("zomato", "zomato.com"),
        ("swiggy", "swiggy.com"),
        ("paytm", "paytm.com"),
        ("flipkart", "flipkart.com"),
        ("ola", "olacabs.com"),
        ("razorpay", "razorpay.com"),
        ("cred", "cred.club"),
        ("phonepe", "phonepe.com"),
        ("byju", "byjus.com"),
        ("meesho", "meesho.com"),
        ("dunzo", "dunzo.com"),
        ("zerodha", "zerodha.com"),
    ])
});

static COMPANY_TYPES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Banks
        ("icici bank", "bank"),
        ("icici", "bank"),
        ("hdfc bank", "bank"),
        ("hdfc", "bank"),
        ("kotak", "bank"),
        ("axis bank", "bank"),
        ("sbi", "bank"),
        ("yes bank", "bank"),
        // Service/IT
        ("tcs", "service"),
        ("infosys", "service"),
        ("wipro", "service"),
        ("hcl", "service"),
        ("tech mahindra", "service"),
        ("ltimindtree", "service"),
        ("cognizant", "service"),
        ("accenture", "consulting"),
        ("deloitte", "consulting"),
        ("pwc", "consulting"),
        ("kpmg", "consulting"),
        ("ey", "consulting"),
        ("mckinsey", "consulting"),
        ("bcg", "consulting"),
        ("bain", "consulting"),
        // Big Tech
        ("google", "bigtech"),
        ("amazon", "bigtech"),
        ("microsoft", "bigtech"),
        ("meta", "bigtech"),
        ("apple", "bigtech"),
        ("netflix", "bigtech"),
        ("uber", "bigtech"),
        ("airbnb", "bigtech"),
        // Indian Startups
        ("swiggy", "startup"),
        ("zomato", "startup"),
        ("cred", "startup"),
        ("razorpay", "startup"),
        ("phonepe", "startup"),
        ("paytm", "startup"),
        ("flipkart", "startup"),
        ("meesho", "startup"),
        ("zerodha", "startup"),
        ("ola", "startup"),
        ("dunzo", "startup"),
        ("grapevine", "startup"),
        // VC/PE
        ("elevation capital", "vc"),
        ("elevation", "vc"),
        ("peak xv", "vc"),
        ("sequoia", "vc"),
        ("accel", "vc"),
        ("matrix", "vc"),
        ("lightspeed", "vc"),
        ("nexus", "vc"),
        ("blume", "vc"),
        ("kalaari", "vc"),
        // Education
        ("mesa school", "edtech"),
        ("mesa", "edtech"),
        ("isb", "edtech"),
        ("iim", "edtech"),
        ("upgrad", "edtech"),
        ("byju", "edtech"),
    ])
});

/// Resolve a free-text company name to a canonical domain.
///
/// Known names hit the static table; everything else synthesizes a domain by
/// stripping non-alphanumerics, e.g. "LTI Mindtree" -> "ltimindtree.com".
pub fn resolve_domain(name: &str) -> String {
    let normalized = name.to_lowercase().trim().to_string();

    if let Some(domain) = COMPANY_DOMAINS.get(normalized.as_str()) {
        return (*domain).to_string();
    }

    let mut domain: String = normalized
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    domain.push_str(".com");
    domain
}

/// Classify a company for progress logging (bank/service/bigtech/...).
pub fn company_type(name: &str) -> &'static str {
    let normalized = name.to_lowercase();
    COMPANY_TYPES
        .get(normalized.trim())
        .copied()
        .unwrap_or("default")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_company_resolves_from_table() {
        assert_eq!(resolve_domain("Google"), "google.com");
        assert_eq!(resolve_domain("zoom"), "zoom.us");
        assert_eq!(resolve_domain("Twitter"), "x.com");
    }

    #[test]
    fn resolution_normalizes_case_and_whitespace() {
        assert_eq!(resolve_domain("  GooGle  "), "google.com");
        assert_eq!(resolve_domain("TECH MAHINDRA"), "techmahindra.com");
    }

    #[test]
    fn unknown_company_synthesizes_domain() {
        assert_eq!(resolve_domain("Foo Bar!"), "foobar.com");
        assert_eq!(resolve_domain("LTI Mindtree 2.0"), "ltimindtree20.com");
    }

    #[test]
    fn type_lookup_with_default() {
        assert_eq!(company_type("TCS"), "service");
        assert_eq!(company_type("google"), "bigtech");
        assert_eq!(company_type("Peak XV"), "vc");
        assert_eq!(company_type("Some Garage Startup"), "default");
    }

    #[test]
    fn blank_role_defaults_to_engineers() {
        let req = CompanyRequest::new("Acme", "");
        assert_eq!(req.role, "Engineers");
        let req = CompanyRequest::new("Acme", "   ");
        assert_eq!(req.role, "Engineers");
        let req = CompanyRequest::new("Acme", "Founders");
        assert_eq!(req.role, "Founders");
    }
}
