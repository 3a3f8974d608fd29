//! Output row types, one per register.
//!
//! Every column is a plain `String`; a field the source did not provide is an
//! empty string so the CSV columns always stay aligned. Field order is the
//! column order, and `serde` renames carry the exact header text.

use serde::Serialize;

/// An opaque register reference, as supplied by the user.
pub type Identifier = String;

/// One row of the EU register output (`euiposcrape.csv`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EuipoRow {
    #[serde(rename = "tmnumber")]
    pub tm_number: String,
    #[serde(rename = "application date")]
    pub application_date: String,
    #[serde(rename = "registration date")]
    pub registration_date: String,
    #[serde(rename = "expiry date")]
    pub expiry_date: String,
    #[serde(rename = "application type")]
    pub application_type: String,
    pub nature: String,
    pub status: String,
    /// Date of the first (`A.1`) publication.
    #[serde(rename = "publication date")]
    pub publication_date: String,
    /// Bulletin number of the first (`A.1`) publication.
    #[serde(rename = "publication number")]
    pub publication_number: String,
    /// `"<class>: <terms>"` entries, one per line.
    pub goods: String,
    /// Postal address of the first applicant.
    pub owner: String,
}

impl EuipoRow {
    pub const HEADER: [&'static str; 11] = [
        "tmnumber",
        "application date",
        "registration date",
        "expiry date",
        "application type",
        "nature",
        "status",
        "publication date",
        "publication number",
        "goods",
        "owner",
    ];
}

/// One row of the UK register output (`tmdata.csv`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UkipoRow {
    #[serde(rename = "TM Name")]
    pub tm_name: String,
    #[serde(rename = "Filed")]
    pub filed: String,
    #[serde(rename = "Registered")]
    pub registered: String,
    #[serde(rename = "Renewal")]
    pub renewal: String,
    #[serde(rename = "Status")]
    pub status: String,
    /// Image links or word-mark text from the mark's slides, one per line.
    #[serde(rename = "Details")]
    pub details: String,
    #[serde(rename = "Owner Name")]
    pub owner_name: String,
    #[serde(rename = "Owner Address")]
    pub owner_address: String,
    #[serde(rename = "Rep Name")]
    pub rep_name: String,
    #[serde(rename = "Rep Address")]
    pub rep_address: String,
    #[serde(rename = "Journal")]
    pub journal: String,
    #[serde(rename = "Pub Date")]
    pub pub_date: String,
    #[serde(rename = "Goods")]
    pub goods: String,
}

impl UkipoRow {
    pub const HEADER: [&'static str; 13] = [
        "TM Name",
        "Filed",
        "Registered",
        "Renewal",
        "Status",
        "Details",
        "Owner Name",
        "Owner Address",
        "Rep Name",
        "Rep Address",
        "Journal",
        "Pub Date",
        "Goods",
    ];
}
