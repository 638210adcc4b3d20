//! Input documents and the per-hymn entry shapes they contain.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use tracing::{debug, info};

use crate::error::ExportError;

/// MongoDB's typed-number wrapper, e.g. `{"$numberInt": "12"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MongoDatum {
    #[serde(rename = "$numberInt")]
    pub number_int: Option<String>,
    #[serde(rename = "$numberDouble")]
    pub number_double: Option<String>,
}

impl MongoDatum {
    pub fn int(value: impl Into<String>) -> Self {
        Self {
            number_int: Some(value.into()),
            number_double: None,
        }
    }

    pub fn double(value: impl Into<String>) -> Self {
        Self {
            number_int: None,
            number_double: Some(value.into()),
        }
    }
}

/// One hymn's `[queries, launches, lastAccessed]` triple.
///
/// The shape is decided per hymn, so a document may mix both forms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HymnEntry {
    /// Every element is a MongoDB wrapper object.
    Extended([MongoDatum; 3]),
    /// Bare numbers; the timestamp may be `null`.
    Plain(Number, Number, Option<f64>),
}

/// The `hymnal` payload. In raw dumps this is the whole document.
#[derive(Debug, Deserialize)]
struct HymnalData {
    #[serde(rename = "DATA")]
    data: Map<String, Value>,
    #[serde(rename = "__CHECKSUM__")]
    checksum: Option<Value>,
    #[serde(rename = "__FILETYPE__")]
    file_type: Option<Value>,
    #[serde(rename = "__DATECREATED")]
    date_created: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct MongoPackage {
    hymnal: HymnalData,
}

/// Pick the hymn mapping out of a parsed document and decode each entry,
/// keeping the document's key order.
pub fn load_hymns(document: Value, raw: bool) -> Result<Vec<(String, HymnEntry)>> {
    let hymnal = select_hymnal(document, raw)?;

    info!(
        hymns = hymnal.data.len(),
        file_type = ?hymnal.file_type,
        checksum = ?hymnal.checksum,
        created = ?hymnal.date_created,
        "loaded hymnal data"
    );

    hymnal
        .data
        .into_iter()
        .map(|(id, value)| {
            let entry = serde_json::from_value(value)
                .with_context(|| format!("Hymn '{id}' is not a valid usage record"))?;
            Ok((id, entry))
        })
        .collect()
}

fn select_hymnal(mut document: Value, raw: bool) -> Result<HymnalData> {
    if raw {
        if document.get("DATA").is_none() {
            return Err(ExportError::MissingData.into());
        }
        debug!("reading raw Hymnal Browser dump");
        return serde_json::from_value(document).context("Invalid raw input file");
    }

    let Some(package) = document.get_mut("PACKAGE").map(Value::take) else {
        return Err(ExportError::MissingPackage.into());
    };
    debug!("reading MongoDB export");
    let package: MongoPackage =
        serde_json::from_value(package).context("Invalid PACKAGE section in MongoDB export")?;
    Ok(package.hymnal)
}
