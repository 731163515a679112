//! Specter client: the primary company + founders provider.
//!
//! Endpoints:
//! - `POST /companies {"domain"}`: company with embedded `founder_info`
//! - `GET /people/{id}`: person profile, 202 while enrichment runs
//! - `GET /people/{id}/email?type=`: professional/personal email
//! - `POST /people {"linkedin_url"}`: person lookup by LinkedIn URL

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use super::http::{build_client, is_pending, read_json, send_error, status_error, trim_base_url};
use super::types::{
    non_empty, normalize_url, CompanyMatch, EmailType, FounderRef, Lookup, PersonProfile,
};
use super::{PrimaryProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::models::{split_full_name, CompanyRecord};

const PROVIDER: &str = "Specter";

pub struct SpecterClient {
    base_url: String,
    api_key: String,
    client: Client,
    timeout: std::time::Duration,
}

impl SpecterClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: trim_base_url(&config.base_url),
            api_key: config.api_key.clone(),
            client: build_client(config.timeout)?,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL plus path segments, each percent-encoded so an upstream id
    /// can never change the request path or add a query.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ProviderError::HttpClient(format!("invalid {PROVIDER} base URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::HttpClient(format!("{PROVIDER} base URL cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder, ProviderError> {
        Ok(self
            .client
            .get(self.endpoint(segments)?)
            .header("X-API-Key", &self.api_key)
            .header("accept", "application/json"))
    }

    fn post(&self, segments: &[&str]) -> Result<RequestBuilder, ProviderError> {
        Ok(self
            .client
            .post(self.endpoint(segments)?)
            .header("X-API-Key", &self.api_key)
            .header("accept", "application/json"))
    }

    fn send(&self, request: RequestBuilder) -> Result<reqwest::blocking::Response, ProviderError> {
        request
            .send()
            .map_err(|e| send_error(PROVIDER, &self.base_url, self.timeout, e))
    }
}

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
struct SpecterCompany {
    #[serde(default)]
    organization_name: Option<String>,
    #[serde(default)]
    website: Option<Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    industries: Option<Vec<String>>,
    #[serde(default)]
    hq: Option<SpecterHq>,
    #[serde(default)]
    employee_count: Option<u64>,
    #[serde(default)]
    socials: Option<SpecterSocials>,
    #[serde(default)]
    founder_info: Option<Vec<SpecterFounderInfo>>,
}

#[derive(Debug, Default, Deserialize)]
struct SpecterHq {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SpecterSocials {
    /// Either `{"url": "..."}` or a bare string.
    #[serde(default)]
    linkedin: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct SpecterFounderInfo {
    #[serde(default)]
    specter_person_id: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SpecterPerson {
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    current_position_title: Option<String>,
    #[serde(default)]
    linkedin_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SpecterEmail {
    #[serde(default)]
    email: Option<String>,
}

// ═══════════════════════════════════════════════════════════
// Mapping
// ═══════════════════════════════════════════════════════════

/// Company bodies come back as an object or as a list of candidates.
fn first_company(body: Value) -> Result<Option<SpecterCompany>, ProviderError> {
    let candidate = match body {
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        Value::Null => return Ok(None),
        other => other,
    };
    serde_json::from_value(candidate)
        .map(Some)
        .map_err(|e| ProviderError::ResponseParsing(e.to_string()))
}

fn map_company(raw: SpecterCompany, requested_domain: &str) -> CompanyMatch {
    let location = raw.hq.as_ref().and_then(|hq| {
        let city = non_empty(hq.city.as_deref());
        let region = non_empty(hq.region.as_deref());
        match (city, region) {
            (Some(city), Some(region)) => Some(format!("{city}, {region}")),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    });

    let linkedin = raw
        .socials
        .as_ref()
        .and_then(|s| s.linkedin.as_ref())
        .and_then(|v| match v {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("url").and_then(Value::as_str),
            _ => None,
        });

    let domain = raw
        .website
        .as_ref()
        .and_then(|w| match w {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("domain").and_then(Value::as_str),
            _ => None,
        })
        .and_then(|s| non_empty(Some(s)))
        .unwrap_or_else(|| requested_domain.to_string());

    let founders = raw
        .founder_info
        .unwrap_or_default()
        .into_iter()
        .map(|f| FounderRef {
            person_id: non_empty(f.specter_person_id.as_deref()),
            full_name: f.full_name.unwrap_or_default().trim().to_string(),
            title: non_empty(f.title.as_deref()),
            linkedin_url: None,
        })
        .collect();

    CompanyMatch {
        company: CompanyRecord {
            name: non_empty(raw.organization_name.as_deref())
                .unwrap_or_else(|| requested_domain.to_string()),
            domain,
            industry: raw
                .industries
                .and_then(|list| list.into_iter().find(|i| !i.trim().is_empty())),
            location,
            employee_count: raw.employee_count,
            linkedin_url: normalize_url(linkedin),
            description: non_empty(raw.description.as_deref()),
        },
        founders,
    }
}

fn map_person(raw: SpecterPerson) -> PersonProfile {
    let full_name = non_empty(raw.full_name.as_deref()).unwrap_or_else(|| {
        [raw.first_name.as_deref(), raw.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    });
    let (split_first, split_last) = split_full_name(&full_name);

    PersonProfile {
        person_id: non_empty(raw.person_id.as_deref()),
        first_name: non_empty(raw.first_name.as_deref()).unwrap_or(split_first),
        last_name: non_empty(raw.last_name.as_deref()).unwrap_or(split_last),
        full_name,
        title: non_empty(raw.current_position_title.as_deref()),
        linkedin_url: normalize_url(raw.linkedin_url.as_deref()),
        email: None,
    }
}

// ═══════════════════════════════════════════════════════════
// PrimaryProvider
// ═══════════════════════════════════════════════════════════

impl PrimaryProvider for SpecterClient {
    fn lookup_company(&self, domain: &str) -> Result<Lookup<CompanyMatch>, ProviderError> {
        tracing::info!(domain, "Specter: company lookup");
        let response = self.send(
            self.post(&["companies"])?
                .json(&serde_json::json!({ "domain": domain })),
        )?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!(domain, "Specter: no company for domain");
            return Ok(Lookup::NotFound);
        }
        if is_pending(status) {
            return Ok(Lookup::Pending);
        }
        if !status.is_success() {
            return Err(status_error(PROVIDER, response));
        }

        let Some(body) = read_json::<Value>(response)? else {
            return Ok(Lookup::NotFound);
        };
        match first_company(body)? {
            Some(raw) => {
                let matched = map_company(raw, domain);
                tracing::info!(
                    domain,
                    company = %matched.company.name,
                    founders = matched.founders.len(),
                    "Specter: company found"
                );
                Ok(Lookup::Found(matched))
            }
            None => {
                tracing::info!(domain, "Specter: empty company result");
                Ok(Lookup::NotFound)
            }
        }
    }

    fn lookup_person(&self, person_id: &str) -> Result<Lookup<PersonProfile>, ProviderError> {
        let response = self.send(self.get(&["people", person_id])?)?;
        let status = response.status();

        if is_pending(status) {
            tracing::warn!(person_id, "Specter: person enrichment in progress");
            return Ok(Lookup::Pending);
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(status_error(PROVIDER, response));
        }

        Ok(match read_json::<SpecterPerson>(response)? {
            Some(raw) => Lookup::Found(map_person(raw)),
            None => Lookup::NotFound,
        })
    }

    fn lookup_person_email(
        &self,
        person_id: &str,
        email_type: EmailType,
    ) -> Result<Lookup<String>, ProviderError> {
        let mut request = self.get(&["people", person_id, "email"])?;
        if let Some(kind) = email_type.as_query() {
            request = request.query(&[("type", kind)]);
        }
        let response = self.send(request)?;
        let status = response.status();

        // 202 here means the address is still being discovered; callers
        // treat it the same as "no email".
        if is_pending(status) {
            tracing::warn!(person_id, "Specter: email enrichment in progress");
            return Ok(Lookup::Pending);
        }
        if status == StatusCode::NOT_FOUND {
            tracing::info!(person_id, "Specter: no email on file");
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(status_error(PROVIDER, response));
        }

        let email = read_json::<SpecterEmail>(response)?
            .and_then(|body| non_empty(body.email.as_deref()));
        Ok(match email {
            Some(email) => Lookup::Found(email),
            None => Lookup::NotFound,
        })
    }

    fn lookup_person_by_linkedin(
        &self,
        linkedin_url: &str,
    ) -> Result<Lookup<PersonProfile>, ProviderError> {
        if linkedin_url.trim().is_empty() {
            return Ok(Lookup::NotFound);
        }
        tracing::info!(linkedin_url, "Specter: person lookup by LinkedIn");
        let response = self.send(
            self.post(&["people"])?
                .json(&serde_json::json!({ "linkedin_url": linkedin_url })),
        )?;
        let status = response.status();

        // A 202 may still carry the new person's id, which is enough for an
        // email lookup.
        if is_pending(status) {
            let person_id = read_json::<SpecterPerson>(response)?
                .and_then(|raw| non_empty(raw.person_id.as_deref()));
            return Ok(match person_id {
                Some(person_id) => {
                    tracing::info!(person_id = %person_id, "Specter: person enrichment pending, id returned");
                    Lookup::Found(PersonProfile {
                        person_id: Some(person_id),
                        linkedin_url: normalize_url(Some(linkedin_url)),
                        ..Default::default()
                    })
                }
                None => {
                    tracing::warn!(linkedin_url, "Specter: person enrichment pending, no id returned");
                    Lookup::Pending
                }
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(status_error(PROVIDER, response));
        }

        Ok(match read_json::<SpecterPerson>(response)? {
            Some(raw) if non_empty(raw.person_id.as_deref()).is_some() => {
                let mut profile = map_person(raw);
                if profile.linkedin_url.is_none() {
                    profile.linkedin_url = normalize_url(Some(linkedin_url));
                }
                Lookup::Found(profile)
            }
            _ => Lookup::NotFound,
        })
    }
}
