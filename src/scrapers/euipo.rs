//! EU Intellectual Property Office register scraper.
//!
//! The register serves one JSON document per trademark number from
//! `<base>/<number>`. Record data lives under `entity`; an unknown number is
//! answered with a top-level `message` of `"404 Not Found"` (configurable).
//!
//! # Field Paths
//!
//! | Column | Path |
//! |--------|------|
//! | tmnumber | `entity.number` |
//! | application / registration / expiry date | `entity.filingdate` / `regdate` / `expirydate` (epoch ms) |
//! | application type | `entity.feature` |
//! | nature | `entity.kind` |
//! | status | `entity.status` |
//! | publication date / number | first `entity.publications[]` with `section == "A.1"`: `date` / `bulletinNumber` |
//! | goods | `entity.gs.defaultValue.values[]`: `"<number>: <value>"` joined by newline |
//! | owner | `entity.applicants[0].address.postalAddress` |

use super::{Lookup, RecordSource, join_identifier};
use crate::config::EuipoSettings;
use crate::errors::ScrapeError;
use crate::models::EuipoRow;
use crate::utils::{epoch_millis_to_date, scalar_to_cell};
use itertools::Itertools;
use serde_json::Value;

/// Publication section code of the first publication of an application.
const FIRST_PUBLICATION_SECTION: &str = "A.1";

#[derive(Debug, Clone)]
pub struct Euipo {
    settings: EuipoSettings,
}

impl Euipo {
    pub fn new(settings: EuipoSettings) -> Self {
        Self { settings }
    }

    fn is_not_found(&self, doc: &Value) -> bool {
        doc.get("message").and_then(Value::as_str)
            == Some(self.settings.not_found_message.as_str())
    }
}

impl RecordSource for Euipo {
    type Row = EuipoRow;
    const NAME: &'static str = "euipo";

    fn header(&self) -> &'static [&'static str] {
        &EuipoRow::HEADER
    }

    fn record_url(&self, identifier: &str) -> String {
        join_identifier(&self.settings.base_url, identifier)
    }

    fn interpret(&self, _identifier: &str, body: &str) -> Result<Lookup<EuipoRow>, ScrapeError> {
        let doc: Value = serde_json::from_str(body)?;
        if self.is_not_found(&doc) {
            return Ok(Lookup::NotFound { fallback: None });
        }
        Ok(Lookup::Found(extract(&doc)))
    }
}

/// Map a register document to a row. Never fails; absent fields are empty.
pub fn extract(doc: &Value) -> EuipoRow {
    let entity = doc.get("entity").unwrap_or(&Value::Null);
    let first_pub = first_publication(entity);

    EuipoRow {
        tm_number: scalar_at(entity, "number").unwrap_or_default(),
        application_date: date_at(entity, "filingdate").unwrap_or_default(),
        registration_date: date_at(entity, "regdate").unwrap_or_default(),
        expiry_date: date_at(entity, "expirydate").unwrap_or_default(),
        application_type: scalar_at(entity, "feature").unwrap_or_default(),
        nature: scalar_at(entity, "kind").unwrap_or_default(),
        status: scalar_at(entity, "status").unwrap_or_default(),
        publication_date: first_pub
            .and_then(|p| date_at(p, "date"))
            .unwrap_or_default(),
        publication_number: first_pub
            .and_then(|p| scalar_at(p, "bulletinNumber"))
            .unwrap_or_default(),
        goods: goods(entity).unwrap_or_default(),
        owner: owner_address(entity).unwrap_or_default(),
    }
}

fn scalar_at(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_to_cell)
}

fn date_at(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(epoch_millis_to_date)
}

fn first_publication(entity: &Value) -> Option<&Value> {
    entity
        .get("publications")?
        .as_array()?
        .iter()
        .find(|p| {
            p.get("section").and_then(Value::as_str) == Some(FIRST_PUBLICATION_SECTION)
        })
}

/// Goods and services by class. A malformed entry blanks the whole cell
/// rather than emitting a partial class list.
fn goods(entity: &Value) -> Option<String> {
    let values = entity.pointer("/gs/defaultValue/values")?.as_array()?;
    let lines = values
        .iter()
        .map(|v| {
            let number = scalar_at(v, "number")?;
            let terms = v.get("value")?.as_str()?;
            Some(format!("{number}: {terms}"))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(lines.into_iter().join("\n"))
}

fn owner_address(entity: &Value) -> Option<String> {
    entity
        .pointer("/applicants/0/address/postalAddress")
        .and_then(scalar_to_cell)
}
