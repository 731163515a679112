//! Apollo client: the fallback founder search and person match provider.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::http::{build_client, read_json, send_error, status_error, trim_base_url};
use super::types::{non_empty, normalize_url, FounderRef, FounderSearch, Lookup, PersonProfile};
use super::{FallbackProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::models::{split_full_name, CompanyRecord};

const PROVIDER: &str = "Apollo";

/// Placeholder Apollo returns when the address exists but is not unlocked.
const LOCKED_EMAIL_SENTINEL: &str = "email_not_unlocked@domain.com";

const SEARCH_PAGE_SIZE: u32 = 10;

pub struct ApolloClient {
    base_url: String,
    api_key: String,
    client: Client,
    timeout: std::time::Duration,
}

impl ApolloClient {
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

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("Cache-Control", "no-cache")
            .header("accept", "application/json")
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ProviderError> {
        request
            .send()
            .map_err(|e| send_error(PROVIDER, &self.base_url, self.timeout, e))
    }

    fn people_match(&self, body: &MatchRequest<'_>) -> Result<Lookup<PersonProfile>, ProviderError> {
        let response = self.send(self.post("/people/match").json(body))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(status_error(PROVIDER, response));
        }

        let person = read_json::<MatchResponse>(response)?.and_then(|r| r.person);
        Ok(match person {
            Some(person) => Lookup::Found(map_person(person)),
            None => Lookup::NotFound,
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q_organization_domains: &'a str,
    person_titles: &'a [&'a str],
    page: u32,
    per_page: u32,
}

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin_url: Option<&'a str>,
    reveal_personal_emails: bool,
    reveal_phone_number: bool,
}

impl<'a> MatchRequest<'a> {
    fn by_id(id: &'a str) -> Self {
        Self {
            id: Some(id),
            linkedin_url: None,
            reveal_personal_emails: false,
            reveal_phone_number: false,
        }
    }

    fn by_linkedin(linkedin_url: &'a str) -> Self {
        Self {
            id: None,
            linkedin_url: Some(linkedin_url),
            reveal_personal_emails: false,
            reveal_phone_number: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    people: Vec<ApolloPerson>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchResponse {
    #[serde(default)]
    person: Option<ApolloPerson>,
}

#[derive(Debug, Default, Deserialize)]
struct ApolloPerson {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    linkedin_url: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    organization: Option<ApolloOrganization>,
}

#[derive(Debug, Default, Deserialize)]
struct ApolloOrganization {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    primary_domain: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    estimated_num_employees: Option<u64>,
    #[serde(default)]
    linkedin_url: Option<String>,
}

// ═══════════════════════════════════════════════════════════
// Mapping
// ═══════════════════════════════════════════════════════════

fn unlocked_email(raw: Option<&str>) -> Option<String> {
    non_empty(raw).filter(|e| !e.eq_ignore_ascii_case(LOCKED_EMAIL_SENTINEL))
}

fn display_name(person: &ApolloPerson) -> String {
    non_empty(person.name.as_deref()).unwrap_or_else(|| {
        [person.first_name.as_deref(), person.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    })
}

fn map_person(person: ApolloPerson) -> PersonProfile {
    let full_name = display_name(&person);
    let (split_first, split_last) = split_full_name(&full_name);
    PersonProfile {
        person_id: non_empty(person.id.as_deref()),
        first_name: non_empty(person.first_name.as_deref()).unwrap_or(split_first),
        last_name: non_empty(person.last_name.as_deref()).unwrap_or(split_last),
        full_name,
        title: non_empty(person.title.as_deref()),
        linkedin_url: normalize_url(person.linkedin_url.as_deref()),
        email: unlocked_email(person.email.as_deref()),
    }
}

fn map_organization(org: &ApolloOrganization, requested_domain: &str) -> CompanyRecord {
    let location = match (non_empty(org.city.as_deref()), non_empty(org.state.as_deref())) {
        (Some(city), Some(state)) => Some(format!("{city}, {state}")),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    };
    CompanyRecord {
        name: non_empty(org.name.as_deref()).unwrap_or_else(|| requested_domain.to_string()),
        domain: non_empty(org.primary_domain.as_deref())
            .unwrap_or_else(|| requested_domain.to_string()),
        industry: non_empty(org.industry.as_deref()),
        location,
        employee_count: org.estimated_num_employees,
        linkedin_url: normalize_url(org.linkedin_url.as_deref()),
        description: None,
    }
}

fn map_search(response: SearchResponse, requested_domain: &str) -> FounderSearch {
    let company = response
        .people
        .iter()
        .find_map(|p| p.organization.as_ref())
        .map(|org| map_organization(org, requested_domain));

    let founders = response
        .people
        .iter()
        .map(|p| FounderRef {
            person_id: non_empty(p.id.as_deref()),
            full_name: display_name(p),
            title: non_empty(p.title.as_deref()),
            linkedin_url: normalize_url(p.linkedin_url.as_deref()),
        })
        .filter(|f| f.person_id.is_some() || !f.full_name.is_empty())
        .collect();

    FounderSearch { company, founders }
}

// ═══════════════════════════════════════════════════════════
// FallbackProvider
// ═══════════════════════════════════════════════════════════

impl FallbackProvider for ApolloClient {
    fn search_founders(&self, domain: &str, titles: &[&str]) -> Result<FounderSearch, ProviderError> {
        tracing::info!(domain, ?titles, "Apollo: founder search");
        let body = SearchRequest {
            q_organization_domains: domain,
            person_titles: titles,
            page: 1,
            per_page: SEARCH_PAGE_SIZE,
        };
        let response = self.send(self.post("/mixed_people/search").json(&body))?;
        if !response.status().is_success() {
            return Err(status_error(PROVIDER, response));
        }

        let search = read_json::<SearchResponse>(response)?
            .map(|r| map_search(r, domain))
            .unwrap_or_default();
        tracing::info!(domain, founders = search.founders.len(), "Apollo: search complete");
        Ok(search)
    }

    fn match_person(&self, person_id: &str) -> Result<Lookup<PersonProfile>, ProviderError> {
        self.people_match(&MatchRequest::by_id(person_id))
    }

    fn match_by_linkedin(&self, linkedin_url: &str) -> Result<Lookup<PersonProfile>, ProviderError> {
        if linkedin_url.trim().is_empty() {
            return Ok(Lookup::NotFound);
        }
        tracing::info!(linkedin_url, "Apollo: person match by LinkedIn");
        self.people_match(&MatchRequest::by_linkedin(linkedin_url))
    }
}
