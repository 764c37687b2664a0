//! Follow-up questions asked once an item is completed.
//!
//! Finished work may be worth announcing. Each yes answer appends the
//! question's tag to the item's system tags; all answers are kept under
//! `metadata.completionFlow`.

use std::{collections::BTreeMap, fmt, str::FromStr};

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Result, SieveError},
    models::{GtdStage, WorkItem},
    store::ItemStore,
};

/// Key under `metadata` holding the recorded answers.
pub const COMPLETION_FLOW_KEY: &str = "completionFlow";

/// One yes/no announcement question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUp {
    #[serde(rename = "investor")]
    Investors,
    Users,
    Ad,
    Email,
    Blog,
    Changelog,
    Team,
}

impl FollowUp {
    /// Questions asked first, in order.
    pub const INITIAL: [FollowUp; 3] = [FollowUp::Investors, FollowUp::Users, FollowUp::Team];

    /// Key of the answer under `metadata.completionFlow`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUp::Investors => "investor",
            FollowUp::Users => "users",
            FollowUp::Ad => "ad",
            FollowUp::Email => "email",
            FollowUp::Blog => "blog",
            FollowUp::Changelog => "changelog",
            FollowUp::Team => "team",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            FollowUp::Investors => "Would this be appropriate to update investors about?",
            FollowUp::Users => "Would this be appropriate to update users about?",
            FollowUp::Ad => "Would this be appropriate content to turn into an ad?",
            FollowUp::Email => "Should this go into an email update to all users?",
            FollowUp::Blog => "Should this go into the blog?",
            FollowUp::Changelog => "Should this go into the change log?",
            FollowUp::Team => "Would this be something you should notify your team about?",
        }
    }

    /// Hint shown under the question, if any.
    pub fn note(&self) -> Option<&'static str> {
        match self {
            FollowUp::Email => Some("If this is both substantial and high impact, it should"),
            _ => None,
        }
    }

    /// System tag recorded for a yes answer.
    pub fn tag(&self) -> &'static str {
        match self {
            FollowUp::Investors => "update:investors",
            FollowUp::Users => "update:users",
            FollowUp::Ad => "content:ad",
            FollowUp::Email => "content:email",
            FollowUp::Blog => "content:blog",
            FollowUp::Changelog => "content:changelog",
            FollowUp::Team => "update:team",
        }
    }

    /// Questions asked only after a yes to this one.
    pub fn follow_ups(&self) -> &'static [FollowUp] {
        match self {
            FollowUp::Users => &[FollowUp::Ad, FollowUp::Email, FollowUp::Blog, FollowUp::Changelog],
            _ => &[],
        }
    }

    /// The question this one follows up on.
    pub fn parent(&self) -> Option<FollowUp> {
        match self {
            FollowUp::Ad | FollowUp::Email | FollowUp::Blog | FollowUp::Changelog => {
                Some(FollowUp::Users)
            }
            _ => None,
        }
    }
}

impl fmt::Display for FollowUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FollowUp {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "investors" | "investor" => Ok(FollowUp::Investors),
            "users" => Ok(FollowUp::Users),
            "ad" => Ok(FollowUp::Ad),
            "email" => Ok(FollowUp::Email),
            "blog" => Ok(FollowUp::Blog),
            "changelog" => Ok(FollowUp::Changelog),
            "team" => Ok(FollowUp::Team),
            other => Err(SieveError::invalid_input("follow_up")
                .with_reason(format!("Unknown follow-up question '{other}'"))),
        }
    }
}

/// Yes/no answers, keyed by question.
pub type CompletionAnswers = BTreeMap<FollowUp, bool>;

/// Records `answers` on a completed item.
///
/// # Errors
///
/// `SieveError::ItemNotFound` for an unknown ID and
/// `SieveError::InvalidInput` if the item is not completed or a follow-up is
/// answered without a yes to the question it follows.
pub async fn record_answers(
    store: &ItemStore,
    id: u64,
    answers: &CompletionAnswers,
) -> Result<WorkItem> {
    let item = store.require_item(id).await?;
    let updated = apply_answers(&item, answers)?;
    let saved = store.save_item(&updated).await?;

    info!(
        "Recorded {} completion answers for item {id}",
        answers.len()
    );
    Ok(saved)
}

/// Applies `answers` to a copy of `item` without saving it.
pub fn apply_answers(item: &WorkItem, answers: &CompletionAnswers) -> Result<WorkItem> {
    if item.effective_stage() != GtdStage::Completed {
        return Err(SieveError::invalid_input("stage").with_reason(format!(
            "Only completed items have follow-up questions; item {} is in {}",
            item.id,
            item.effective_stage().label()
        )));
    }

    for question in answers.keys() {
        if let Some(parent) = question.parent() {
            if answers.get(&parent) != Some(&true) {
                return Err(SieveError::invalid_input("follow_up").with_reason(format!(
                    "'{question}' is only asked after a yes to '{parent}'"
                )));
            }
        }
    }

    let mut updated = item.clone();
    let recorded: Map<String, Value> = answers
        .iter()
        .map(|(question, yes)| (question.as_str().to_string(), Value::Bool(*yes)))
        .collect();

    let mut metadata = match updated.metadata.take() {
        Some(Value::Object(existing)) => existing,
        _ => Map::new(),
    };
    metadata.insert(COMPLETION_FLOW_KEY.to_string(), Value::Object(recorded));
    updated.metadata = Some(Value::Object(metadata));

    for (question, _) in answers.iter().filter(|(_, yes)| **yes) {
        updated.push_system_tag(question.tag());
    }

    Ok(updated)
}
