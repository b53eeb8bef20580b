use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::format_description};
use validator::Validate;

use crate::Stage;

pub fn quote_code(id: u64) -> String {
    format!("COT-{id}")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "fecha", with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(rename = "nota")]
    pub note: String,
}

impl HistoryEntry {
    pub fn stage_changed(date: OffsetDateTime, stage: Stage) -> Self {
        Self {
            date,
            note: format!("Etapa cambiada a {}", stage.name()),
        }
    }

    /// `dd/mm/yyyy hh:mm:ss`, the format the sales team reads.
    pub fn display_date(&self) -> String {
        let format = format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");
        self.date
            .format(format)
            .unwrap_or_else(|_| self.date.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u64,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "resumen", default)]
    pub summary: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "comentarios", default)]
    pub comments: String,
    #[serde(default)]
    pub total: String,
    #[serde(rename = "etapa", default)]
    pub stage: Stage,
    #[serde(rename = "historico", default)]
    pub history: Vec<HistoryEntry>,
    #[serde(
        rename = "entregaProgramada",
        default,
        with = "time::serde::rfc3339::option"
    )]
    pub scheduled_delivery: Option<OffsetDateTime>,
    #[serde(rename = "archivos", default)]
    pub files: Vec<String>,
}

#[derive(Validate, Clone, Debug, Default)]
pub struct NewQuote {
    #[validate(length(min = 1))]
    pub client: String,
    pub summary: String,
    pub address: String,
    pub comments: String,
    pub total: String,
    pub scheduled_delivery: Option<OffsetDateTime>,
    pub files: Vec<String>,
}

impl NewQuote {
    pub(crate) fn into_quote(self, id: u64) -> Quote {
        Quote {
            id,
            code: quote_code(id),
            client: self.client,
            summary: self.summary,
            address: self.address,
            comments: self.comments,
            total: self.total,
            stage: Stage::FIRST,
            history: vec![],
            scheduled_delivery: self.scheduled_delivery,
            files: self.files,
        }
    }
}
