use crate::models::CompanyRecord;

/// Tagged provider outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    /// Upstream accepted the request but the data is not ready yet (HTTP 202).
    Pending,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Pending => None,
        }
    }
}

/// Which provider produced a founder reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Primary,
    Fallback,
}

/// Opaque handle to a founder plus whatever the discovery response exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FounderRef {
    pub person_id: Option<String>,
    pub full_name: String,
    pub title: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Primary company lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyMatch {
    pub company: CompanyRecord,
    pub founders: Vec<FounderRef>,
}

/// Fallback search result. `company` is the organization the provider
/// attached to the matched people, when it sent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FounderSearch {
    pub company: Option<CompanyRecord>,
    pub founders: Vec<FounderRef>,
}

/// Person detail from either provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonProfile {
    pub person_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub title: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailType {
    Professional,
    Personal,
    /// Let the provider pick.
    Unspecified,
}

impl EmailType {
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            EmailType::Professional => Some("professional"),
            EmailType::Personal => Some("personal"),
            EmailType::Unspecified => None,
        }
    }
}

/// Trim, drop empties, and prefix scheme-less URLs with `https://`.
pub fn normalize_url(raw: Option<&str>) -> Option<String> {
    let url = raw?.trim();
    if url.is_empty() {
        return None;
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        Some(format!("https://{url}"))
    }
}

/// Trim and drop empty strings.
pub fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_found_extracts_value() {
        assert_eq!(Lookup::Found(3).found(), Some(3));
        assert_eq!(Lookup::<u8>::Pending.found(), None);
    }

    #[test]
    fn url_normalization() {
        assert_eq!(
            normalize_url(Some("linkedin.com/company/acme")).as_deref(),
            Some("https://linkedin.com/company/acme")
        );
        assert_eq!(
            normalize_url(Some("http://x.io")).as_deref(),
            Some("http://x.io")
        );
        assert_eq!(normalize_url(Some("  ")), None);
        assert_eq!(normalize_url(None), None);
    }

    #[test]
    fn email_type_query_values() {
        assert_eq!(EmailType::Professional.as_query(), Some("professional"));
        assert_eq!(EmailType::Personal.as_query(), Some("personal"));
        assert_eq!(EmailType::Unspecified.as_query(), None);
    }
}
