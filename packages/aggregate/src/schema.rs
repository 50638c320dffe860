//! schema.org `FAQPage` structured data built from FAQ item summaries.

use crate::store::ItemSummary;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqAnswer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqQuestion {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub accepted_answer: FaqAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPageSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub main_entity: Vec<FaqQuestion>,
}

impl FaqPageSchema {
    /// Items with an empty title or content are left out
    pub fn from_items(items: &[ItemSummary]) -> Self {
        let main_entity = items
            .iter()
            .filter(|item| !item.title.is_empty() && !item.content.is_empty())
            .map(|item| FaqQuestion {
                kind: "Question",
                name: item.title.clone(),
                accepted_answer: FaqAnswer {
                    kind: "Answer",
                    text: item.content.clone(),
                },
            })
            .collect();

        Self {
            context: "https://schema.org",
            kind: "FAQPage",
            main_entity,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
