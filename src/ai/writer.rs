//! Outreach email writer.
//!
//! Always builds the deterministic template draft first. When drafting is
//! enabled the model may reword it, but a rewrite that drops the scheduling
//! link or the sender's name is discarded. If the model call itself fails the
//! plain template (no vertical/region paragraphs) is returned.

use std::sync::Arc;

use super::classify::{classify_company, Classification};
use super::{LlmClient, Prompt};
use crate::models::CompanyRecord;
use crate::outreach::templates::EmailFields;
use crate::outreach::{Owner, TemplateStore};

const DRAFT_SYSTEM: &str = "You edit short cold outreach emails from a venture capital fund \
to startup founders. Keep the facts, paragraphs, scheduling link and signature. \
Return only the email body.";

const DRAFT_TEMPERATURE: f32 = 0.7;
const DRAFT_MAX_TOKENS: u32 = 500;

/// Founder details the writer needs.
#[derive(Debug, Clone, Copy)]
pub struct Recipient<'a> {
    pub first_name: &'a str,
    pub full_name: &'a str,
    pub title: &'a str,
}

pub struct OutreachWriter {
    llm: Arc<dyn LlmClient>,
    templates: TemplateStore,
    draft_enabled: bool,
}

impl OutreachWriter {
    pub fn new(llm: Arc<dyn LlmClient>, draft_enabled: bool) -> Self {
        Self {
            llm,
            templates: TemplateStore,
            draft_enabled,
        }
    }

    pub fn classify(&self, company: &CompanyRecord) -> Classification {
        classify_company(self.llm.as_ref(), company)
    }

    /// Produce the email body for one founder. Never fails.
    pub fn write_email(
        &self,
        recipient: &Recipient<'_>,
        company: &CompanyRecord,
        classification: Classification,
        owner: &Owner,
    ) -> String {
        let fields = EmailFields {
            first_name: recipient.first_name,
            company_name: &company.name,
            owner,
        };
        let draft = self
            .templates
            .render(&fields, classification.vertical, classification.region);

        if !self.draft_enabled {
            return draft;
        }

        let user = build_prompt(recipient, company, &draft);
        let prompt = Prompt {
            system: DRAFT_SYSTEM,
            user: &user,
            temperature: DRAFT_TEMPERATURE,
            max_tokens: DRAFT_MAX_TOKENS,
        };

        match self.llm.complete(&prompt) {
            Ok(reply) if keeps_required_parts(&reply, owner) => {
                tracing::info!(founder = recipient.full_name, company = %company.name, "Email drafted");
                reply
            }
            Ok(_) => {
                tracing::warn!(
                    founder = recipient.full_name,
                    "Drafted email dropped the scheduling link or signature, using template"
                );
                draft
            }
            Err(e) => {
                tracing::warn!(founder = recipient.full_name, error = %e, "Email drafting failed, using plain template");
                self.templates.render_plain(&fields)
            }
        }
    }
}

fn build_prompt(recipient: &Recipient<'_>, company: &CompanyRecord, draft: &str) -> String {
    format!(
        "Company: {company}\n\
         Founder: {founder} ({title})\n\
         Location: {location}\n\n\
         Lightly personalize this email for the founder. Do not invent facts.\n\n\
         {draft}",
        company = company.name,
        founder = recipient.full_name,
        title = recipient.title,
        location = company.location.as_deref().unwrap_or("unknown"),
    )
}

fn keeps_required_parts(reply: &str, owner: &Owner) -> bool {
    reply.contains(owner.scheduling_link) && reply.contains(owner.sender_name)
}
