use std::sync::Arc;

use uuid::Uuid;

use super::deadline::Deadline;
use super::founders::{resolve_all, ResolvedFounder};
use super::status::derive_status;
use crate::ai::writer::Recipient;
use crate::ai::{Classification, OutreachWriter};
use crate::models::{split_full_name, CompanyRecord, EnrichmentRequest, EnrichmentResult, FounderRecord};
use crate::outreach::{ListSourcePolicy, Owner};
use crate::providers::{FallbackProvider, FounderRef, Lookup, PrimaryProvider, ProviderKind};

/// Title filters for the fallback founder search.
pub const FOUNDER_TITLES: &[&str] = &["Founder", "Co-Founder", "CEO", "CTO"];

/// Company plus the founder references to resolve, and who found them.
struct Discovery {
    company: CompanyRecord,
    founders: Vec<FounderRef>,
    source: ProviderKind,
}

/// Enrichment orchestrator.
///
/// Coordinates: validate source → primary lookup → fallback search →
/// founder resolution → classification + email drafts → status.
/// Stateless across requests; share it behind an `Arc`.
pub struct EnrichmentPipeline {
    primary: Arc<dyn PrimaryProvider>,
    fallback: Arc<dyn FallbackProvider>,
    writer: OutreachWriter,
    policy: ListSourcePolicy,
    fallback_enabled: bool,
}

impl EnrichmentPipeline {
    pub fn new(
        primary: Arc<dyn PrimaryProvider>,
        fallback: Arc<dyn FallbackProvider>,
        writer: OutreachWriter,
        policy: ListSourcePolicy,
    ) -> Self {
        Self {
            primary,
            fallback,
            writer,
            policy,
            fallback_enabled: true,
        }
    }

    /// Disable every fallback-provider call, including the email hop.
    pub fn with_fallback_enabled(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    fn fallback(&self) -> Option<&dyn FallbackProvider> {
        self.fallback_enabled.then_some(self.fallback.as_ref())
    }

    /// Run one enrichment request to completion. Blocking; never fails.
    pub fn run(&self, request: &EnrichmentRequest) -> EnrichmentResult {
        self.run_until(request, Deadline::none())
    }

    /// Like [`run`](Self::run), but no provider or model call starts once
    /// `deadline` has passed. Work cut short that way leaves founders
    /// unresolved or undrafted.
    pub fn run_until(&self, request: &EnrichmentRequest, deadline: Deadline) -> EnrichmentResult {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("enrichment", %request_id, domain = %request.domain);
        let _guard = span.enter();

        // Step 1: Attribute the list source. Unattributed sources stop here.
        let Some(owner) = self.policy.classify(&request.list_source).owner else {
            tracing::info!(list_source = %request.list_source, "Invalid list source, skipping lookups");
            return EnrichmentResult::invalid();
        };
        let owner_email = Some(owner.email.to_string());

        let domain = request.domain.trim();
        if domain.is_empty() {
            tracing::warn!("Empty domain, nothing to look up");
            return EnrichmentResult::failed(owner_email);
        }

        // Step 2: Discover company + founder references
        let Some(discovery) = self.discover(domain, deadline) else {
            tracing::info!("No company or founders from any provider");
            return EnrichmentResult::failed(owner_email);
        };

        // Step 3: Resolve each founder's profile and email
        let resolved = resolve_all(
            self.primary.as_ref(),
            self.fallback(),
            discovery.founders,
            discovery.source,
            deadline,
        );

        // Step 4: Build founder records, drafting emails for resolved profiles
        let founders = self.build_records(&discovery.company, resolved, &owner, deadline);
        if deadline.expired() {
            tracing::warn!("Request deadline passed before enrichment finished");
        }

        // Step 5: Derive status
        let status = derive_status(Some(&discovery.company), &founders);
        tracing::info!(
            ?status,
            founders = founders.len(),
            with_email = founders.iter().filter(|f| f.has_email()).count(),
            "Enrichment complete"
        );

        EnrichmentResult {
            status,
            owner: owner_email,
            company: Some(discovery.company),
            founders,
        }
    }

    /// Primary company lookup, then the fallback search when the primary has
    /// no company or no founders. The company record always comes from a
    /// single provider.
    fn discover(&self, domain: &str, deadline: Deadline) -> Option<Discovery> {
        if deadline.stops("primary.lookup_company") {
            return None;
        }
        let primary_match = match self.primary.lookup_company(domain) {
            Ok(Lookup::Found(found)) => Some(found),
            Ok(Lookup::NotFound) => None,
            Ok(Lookup::Pending) => {
                tracing::info!("Primary company lookup still processing");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Primary company lookup failed");
                None
            }
        };

        if let Some(found) = &primary_match {
            if !found.founders.is_empty() {
                return Some(Discovery {
                    company: found.company.clone(),
                    founders: found.founders.clone(),
                    source: ProviderKind::Primary,
                });
            }
            tracing::info!("Primary company has no founders, trying fallback search");
        }

        let search = match self.fallback() {
            _ if deadline.stops("fallback.search_founders") => Default::default(),
            Some(fallback) => fallback
                .search_founders(domain, FOUNDER_TITLES)
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Fallback founder search failed");
                    Default::default()
                }),
            None => Default::default(),
        };

        match primary_match {
            Some(found) => Some(Discovery {
                company: found.company,
                founders: search.founders,
                source: ProviderKind::Fallback,
            }),
            None if !search.founders.is_empty() => {
                let company = search.company.unwrap_or_else(|| {
                    tracing::info!("Fallback found founders without organization data");
                    CompanyRecord::from_domain(domain)
                });
                Some(Discovery {
                    company,
                    founders: search.founders,
                    source: ProviderKind::Fallback,
                })
            }
            None => None,
        }
    }

    fn build_records(
        &self,
        company: &CompanyRecord,
        resolved: Vec<ResolvedFounder>,
        owner: &Owner,
        deadline: Deadline,
    ) -> Vec<FounderRecord> {
        // Classified at most once, and only if some founder gets an email draft.
        let mut cached: Option<Classification> = None;

        resolved
            .into_iter()
            .map(|founder| match founder.profile {
                Some(profile) => {
                    let reference = founder.reference;
                    let name = if profile.full_name.is_empty() {
                        reference.full_name.clone()
                    } else {
                        profile.full_name
                    };
                    let (split_first, split_last) = split_full_name(&name);
                    let first_name = if profile.first_name.is_empty() {
                        split_first
                    } else {
                        profile.first_name
                    };
                    let last_name = if profile.last_name.is_empty() {
                        split_last
                    } else {
                        profile.last_name
                    };
                    let title = profile.title.or(reference.title).unwrap_or_default();

                    let classification = match cached {
                        Some(done) => Some(done),
                        None if deadline.stops("ai.classify") => None,
                        None => Some(*cached.insert(self.writer.classify(company))),
                    };
                    let generated_email = classification
                        .filter(|_| !deadline.stops("ai.write_email"))
                        .map(|classification| {
                            self.writer.write_email(
                                &Recipient {
                                    first_name: &first_name,
                                    full_name: &name,
                                    title: &title,
                                },
                                company,
                                classification,
                                owner,
                            )
                        });

                    FounderRecord {
                        name,
                        first_name,
                        last_name,
                        title,
                        email: profile.email,
                        linkedin_url: profile.linkedin_url.or(reference.linkedin_url),
                        generated_email,
                    }
                }
                None => {
                    let reference = founder.reference;
                    let (first_name, last_name) = split_full_name(&reference.full_name);
                    FounderRecord {
                        name: reference.full_name,
                        first_name,
                        last_name,
                        title: reference.title.unwrap_or_default(),
                        email: None,
                        linkedin_url: reference.linkedin_url,
                        generated_email: None,
                    }
                }
            })
            .collect()
    }
}
