//! Per-founder profile and email resolution across the provider chain.
//!
//! A founder is resolved by the provider that discovered it. When that
//! provider has the profile but no email, the other provider gets exactly
//! one attempt, keyed by the founder's LinkedIn URL.

use super::deadline::Deadline;
use crate::providers::{
    EmailType, FallbackProvider, FounderRef, Lookup, PersonProfile, PrimaryProvider, ProviderError,
    ProviderKind,
};

/// Founder reference plus whatever profile could be resolved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFounder {
    pub reference: FounderRef,
    pub profile: Option<PersonProfile>,
}

/// Collapse a provider outcome to "have it or not", logging why not.
fn settle<T>(result: Result<Lookup<T>, ProviderError>, operation: &str, key: &str) -> Option<T> {
    match result {
        Ok(Lookup::Found(value)) => Some(value),
        Ok(Lookup::NotFound) => {
            tracing::debug!(operation, key, "No data");
            None
        }
        Ok(Lookup::Pending) => {
            tracing::info!(operation, key, "Provider still processing, treating as no data");
            None
        }
        Err(e) => {
            tracing::warn!(operation, key, error = %e, "Provider call failed, treating as no data");
            None
        }
    }
}

/// Resolve a founder found by the primary provider.
///
/// Profile from `lookup_person`, email from `lookup_person_email`. Without
/// an email, one fallback match by LinkedIn URL.
pub fn resolve_from_primary(
    primary: &dyn PrimaryProvider,
    fallback: Option<&dyn FallbackProvider>,
    reference: &FounderRef,
    deadline: Deadline,
) -> Option<PersonProfile> {
    let person_id = reference.person_id.as_deref()?;
    if deadline.stops("primary.lookup_person") {
        return None;
    }
    let mut profile = settle(primary.lookup_person(person_id), "primary.lookup_person", person_id)?;

    if profile.email.is_none() && !deadline.stops("primary.lookup_person_email") {
        profile.email = settle(
            primary.lookup_person_email(person_id, EmailType::Professional),
            "primary.lookup_person_email",
            person_id,
        );
    }

    if profile.email.is_none() && !deadline.stops("fallback.match_by_linkedin") {
        if let (Some(fallback), Some(linkedin)) = (fallback, profile.linkedin_url.clone()) {
            tracing::info!(person_id, linkedin = %linkedin, "Trying fallback email by LinkedIn");
            profile.email = settle(
                fallback.match_by_linkedin(&linkedin),
                "fallback.match_by_linkedin",
                &linkedin,
            )
            .and_then(|matched| matched.email);
        }
    }

    Some(profile)
}

/// Resolve a founder found by the fallback provider.
///
/// Profile from `match_person` (or a LinkedIn match when the search gave no
/// id). Without an email, one primary lookup by LinkedIn URL followed by the
/// primary email lookup for the id it returns.
pub fn resolve_from_fallback(
    primary: &dyn PrimaryProvider,
    fallback: &dyn FallbackProvider,
    reference: &FounderRef,
    deadline: Deadline,
) -> Option<PersonProfile> {
    if deadline.stops("fallback.match_person") {
        return None;
    }
    let mut profile = match (reference.person_id.as_deref(), reference.linkedin_url.as_deref()) {
        (Some(id), _) => settle(fallback.match_person(id), "fallback.match_person", id)?,
        (None, Some(linkedin)) => settle(
            fallback.match_by_linkedin(linkedin),
            "fallback.match_by_linkedin",
            linkedin,
        )?,
        (None, None) => return None,
    };

    if profile.linkedin_url.is_none() {
        profile.linkedin_url = reference.linkedin_url.clone();
    }

    if profile.email.is_none() && !deadline.stops("primary.lookup_person_by_linkedin") {
        if let Some(linkedin) = profile.linkedin_url.clone() {
            tracing::info!(linkedin = %linkedin, "Trying primary email by LinkedIn");
            profile.email = settle(
                primary.lookup_person_by_linkedin(&linkedin),
                "primary.lookup_person_by_linkedin",
                &linkedin,
            )
            .and_then(|person| person.person_id)
            .filter(|_| !deadline.stops("primary.lookup_person_email"))
            .and_then(|id| {
                settle(
                    primary.lookup_person_email(&id, EmailType::Professional),
                    "primary.lookup_person_email",
                    &id,
                )
            });
        }
    }

    Some(profile)
}

/// Resolve every founder in discovery order. Founders reached after the
/// deadline keep their reference only.
pub fn resolve_all(
    primary: &dyn PrimaryProvider,
    fallback: Option<&dyn FallbackProvider>,
    references: Vec<FounderRef>,
    source: ProviderKind,
    deadline: Deadline,
) -> Vec<ResolvedFounder> {
    references
        .into_iter()
        .map(|reference| {
            let profile = match (source, fallback) {
                _ if deadline.expired() => None,
                (ProviderKind::Primary, _) => {
                    resolve_from_primary(primary, fallback, &reference, deadline)
                }
                (ProviderKind::Fallback, Some(fallback)) => {
                    resolve_from_fallback(primary, fallback, &reference, deadline)
                }
                (ProviderKind::Fallback, None) => None,
            };
            if profile.is_none() {
                tracing::info!(founder = %reference.full_name, "Founder profile unresolved, keeping reference only");
            }
            ResolvedFounder { reference, profile }
        })
        .collect()
}
