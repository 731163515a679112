//! In-memory providers for orchestrator tests.
//!
//! Responses are keyed by domain / person id / LinkedIn URL; anything not
//! configured is `NotFound`. Ids listed in `failing` return a 503 status
//! error. Every call is counted.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::types::{CompanyMatch, EmailType, FounderSearch, Lookup, PersonProfile};
use super::{FallbackProvider, PrimaryProvider, ProviderError};

fn unavailable(provider: &'static str) -> ProviderError {
    ProviderError::Status {
        provider,
        status: 503,
        body: "stub unavailable".into(),
    }
}

#[derive(Default)]
pub struct StubPrimary {
    pub companies: HashMap<String, Lookup<CompanyMatch>>,
    pub people: HashMap<String, Lookup<PersonProfile>>,
    pub emails: HashMap<String, String>,
    pub by_linkedin: HashMap<String, Lookup<PersonProfile>>,
    pub failing: HashSet<String>,
    calls: AtomicUsize,
    email_calls: AtomicUsize,
    linkedin_calls: AtomicUsize,
}

impl StubPrimary {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn email_calls(&self) -> usize {
        self.email_calls.load(Ordering::SeqCst)
    }

    pub fn linkedin_calls(&self) -> usize {
        self.linkedin_calls.load(Ordering::SeqCst)
    }
}

impl PrimaryProvider for StubPrimary {
    fn lookup_company(&self, domain: &str) -> Result<Lookup<CompanyMatch>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(domain) {
            return Err(unavailable("StubPrimary"));
        }
        Ok(self.companies.get(domain).cloned().unwrap_or(Lookup::NotFound))
    }

    fn lookup_person(&self, person_id: &str) -> Result<Lookup<PersonProfile>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(person_id) {
            return Err(unavailable("StubPrimary"));
        }
        Ok(self.people.get(person_id).cloned().unwrap_or(Lookup::NotFound))
    }

    fn lookup_person_email(
        &self,
        person_id: &str,
        _email_type: EmailType,
    ) -> Result<Lookup<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.email_calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.emails.get(person_id) {
            Some(email) => Lookup::Found(email.clone()),
            None => Lookup::NotFound,
        })
    }

    fn lookup_person_by_linkedin(
        &self,
        linkedin_url: &str,
    ) -> Result<Lookup<PersonProfile>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.linkedin_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .by_linkedin
            .get(linkedin_url)
            .cloned()
            .unwrap_or(Lookup::NotFound))
    }
}

#[derive(Default)]
pub struct StubFallback {
    pub searches: HashMap<String, FounderSearch>,
    pub people: HashMap<String, Lookup<PersonProfile>>,
    pub by_linkedin: HashMap<String, Lookup<PersonProfile>>,
    pub failing: HashSet<String>,
    calls: AtomicUsize,
    search_calls: AtomicUsize,
    linkedin_calls: AtomicUsize,
    search_titles: Mutex<Vec<String>>,
}

impl StubFallback {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn linkedin_calls(&self) -> usize {
        self.linkedin_calls.load(Ordering::SeqCst)
    }

    /// Title filters sent with the most recent search.
    pub fn search_titles(&self) -> Vec<String> {
        self.search_titles.lock().unwrap().clone()
    }
}

impl FallbackProvider for StubFallback {
    fn search_founders(&self, domain: &str, titles: &[&str]) -> Result<FounderSearch, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.search_titles.lock().unwrap() = titles.iter().map(|t| t.to_string()).collect();
        if self.failing.contains(domain) {
            return Err(unavailable("StubFallback"));
        }
        Ok(self.searches.get(domain).cloned().unwrap_or_default())
    }

    fn match_person(&self, person_id: &str) -> Result<Lookup<PersonProfile>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(person_id) {
            return Err(unavailable("StubFallback"));
        }
        Ok(self.people.get(person_id).cloned().unwrap_or(Lookup::NotFound))
    }

    fn match_by_linkedin(&self, linkedin_url: &str) -> Result<Lookup<PersonProfile>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.linkedin_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .by_linkedin
            .get(linkedin_url)
            .cloned()
            .unwrap_or(Lookup::NotFound))
    }
}
