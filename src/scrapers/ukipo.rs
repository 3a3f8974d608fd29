//! UK Intellectual Property Office register scraper.
//!
//! The register renders one HTML case page per trademark from
//! `<base>/page/Results/1/<identifier>`. Unknown identifiers do not 404; the
//! site falls back to its search page, recognised by the first `<h1>`.
//!
//! # Page Anchors
//!
//! | Column | Anchor |
//! |--------|--------|
//! | TM Name | first `<h1>` |
//! | Filed / Registered / Renewal | 1st / 2nd / 3rd `.column-one-third`, first `<dd>` |
//! | Status | first `.offset`, first `<dd>` |
//! | Owner / Rep | 1st / 2nd `<dl>` under `#tab-3`: `<dt>` name, `<dd>` address |
//! | Journal / Pub Date | 1st / 2nd `<dd>` under `#tab-4` |
//! | Goods | `#tab-2`: `.subsection__title` paired with `.no-print` |
//! | Details | each `.slide`: image link if it has the lightbox anchor, else first `<dd>` text |
//!
//! Text is whitespace-trimmed; dates are reformatted from `5 March 2021` to
//! `05/03/2021`.

use super::{Lookup, RecordSource, join_identifier};
use crate::config::UkipoSettings;
use crate::errors::ScrapeError;
use crate::models::UkipoRow;
use crate::utils::long_date_to_date;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Path under the site root that renders a single case.
const RESULTS_PATH: &str = "page/Results/1/";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static DD: Lazy<Selector> = Lazy::new(|| selector("dd"));
static DT: Lazy<Selector> = Lazy::new(|| selector("dt"));
static DL: Lazy<Selector> = Lazy::new(|| selector("dl"));
static DATE_COLUMN: Lazy<Selector> = Lazy::new(|| selector(".column-one-third"));
static STATUS: Lazy<Selector> = Lazy::new(|| selector(".offset"));
static NAMES_TAB: Lazy<Selector> = Lazy::new(|| selector("div#tab-3"));
static PUBLICATION_TAB: Lazy<Selector> = Lazy::new(|| selector("div#tab-4"));
static CLASSES_TAB: Lazy<Selector> = Lazy::new(|| selector("div#tab-2"));
static CLASS_NUMBER: Lazy<Selector> = Lazy::new(|| selector(".subsection__title"));
static CLASS_TERMS: Lazy<Selector> = Lazy::new(|| selector(".no-print"));
static SLIDE: Lazy<Selector> = Lazy::new(|| selector(".slide"));
static LIGHTBOX: Lazy<Selector> = Lazy::new(|| selector("a#lightbox-2-1"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

#[derive(Debug, Clone)]
pub struct Ukipo {
    settings: UkipoSettings,
}

impl Ukipo {
    pub fn new(settings: UkipoSettings) -> Self {
        Self { settings }
    }

    fn placeholder(&self, identifier: &str) -> UkipoRow {
        UkipoRow {
            tm_name: identifier.to_string(),
            filed: self.settings.not_found_filed_text.clone(),
            ..Default::default()
        }
    }
}

impl RecordSource for Ukipo {
    type Row = UkipoRow;
    const NAME: &'static str = "ukipo";

    fn header(&self) -> &'static [&'static str] {
        &UkipoRow::HEADER
    }

    fn record_url(&self, identifier: &str) -> String {
        let base = if self.settings.base_url.ends_with('/') {
            format!("{}{RESULTS_PATH}", self.settings.base_url)
        } else {
            format!("{}/{RESULTS_PATH}", self.settings.base_url)
        };
        join_identifier(&base, identifier)
    }

    fn interpret(&self, identifier: &str, body: &str) -> Result<Lookup<UkipoRow>, ScrapeError> {
        let doc = Html::parse_document(body);
        if title(&doc).as_deref() == Some(self.settings.not_found_title.as_str()) {
            return Ok(Lookup::NotFound {
                fallback: Some(self.placeholder(identifier)),
            });
        }
        Ok(Lookup::Found(extract(&doc)))
    }
}

/// Map a case page to a row. Never fails; absent fields are empty.
pub fn extract(doc: &Html) -> UkipoRow {
    let (owner, rep) = parties(doc);
    let (owner_name, owner_address) = owner.unwrap_or_default();
    let (rep_name, rep_address) = rep.unwrap_or_default();

    UkipoRow {
        tm_name: title(doc).unwrap_or_default(),
        filed: date_column(doc, 0).unwrap_or_default(),
        registered: date_column(doc, 1).unwrap_or_default(),
        renewal: date_column(doc, 2).unwrap_or_default(),
        status: status(doc).unwrap_or_default(),
        details: details(doc).unwrap_or_default(),
        owner_name: owner_name.unwrap_or_default(),
        owner_address: owner_address.unwrap_or_default(),
        rep_name: rep_name.unwrap_or_default(),
        rep_address: rep_address.unwrap_or_default(),
        journal: publication_entry(doc, 0).unwrap_or_default(),
        pub_date: publication_entry(doc, 1)
            .and_then(|d| long_date_to_date(&d))
            .unwrap_or_default(),
        goods: goods(doc).unwrap_or_default(),
    }
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_dd(el: ElementRef<'_>) -> Option<String> {
    el.select(&DD).next().map(text_of)
}

fn title(doc: &Html) -> Option<String> {
    doc.select(&H1).next().map(text_of)
}

fn date_column(doc: &Html, index: usize) -> Option<String> {
    let raw = first_dd(doc.select(&DATE_COLUMN).nth(index)?)?;
    long_date_to_date(&raw)
}

fn status(doc: &Html) -> Option<String> {
    first_dd(doc.select(&STATUS).next()?)
}

type Party = (Option<String>, Option<String>);

/// Owner and representative blocks; name and address resolve separately.
fn parties(doc: &Html) -> (Option<Party>, Option<Party>) {
    let Some(tab) = doc.select(&NAMES_TAB).next() else {
        return (None, None);
    };
    let party = |dl: ElementRef<'_>| -> Party {
        (dl.select(&DT).next().map(text_of), first_dd(dl))
    };
    let mut blocks = tab.select(&DL);
    let owner = blocks.next().map(party);
    let rep = blocks.next().map(party);
    (owner, rep)
}

fn publication_entry(doc: &Html, index: usize) -> Option<String> {
    let tab = doc.select(&PUBLICATION_TAB).next()?;
    tab.select(&DD).nth(index).map(text_of)
}

/// Class numbers and class terms are separate element lists; pair them by
/// position and drop whatever the longer list has left over.
fn goods(doc: &Html) -> Option<String> {
    let tab = doc.select(&CLASSES_TAB).next()?;
    let numbers = tab.select(&CLASS_NUMBER).map(text_of).collect::<Vec<_>>();
    let terms = tab.select(&CLASS_TERMS).map(text_of).collect::<Vec<_>>();
    if numbers.is_empty() || terms.is_empty() {
        return None;
    }
    Some(pair_classes(&numbers, &terms))
}

fn pair_classes(numbers: &[String], terms: &[String]) -> String {
    numbers
        .iter()
        .zip(terms)
        .map(|(n, t)| format!("{n}: {t}"))
        .join("\n")
}

fn details(doc: &Html) -> Option<String> {
    let entries = doc
        .select(&SLIDE)
        .filter_map(detail_entry)
        .collect::<Vec<_>>();
    if entries.is_empty() {
        return None;
    }
    Some(entries.join("\n"))
}

/// A slide is either the mark image (link to the full-size picture) or a
/// word mark shown as text.
fn detail_entry(slide: ElementRef<'_>) -> Option<String> {
    if slide.select(&LIGHTBOX).count() == 1 {
        slide
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string)
    } else {
        first_dd(slide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASE_PAGE: &str = r#"
<html><body>
  <h1>
    ACME ROCKETS
  </h1>
  <div class="column-one-third"><dl><dt>Filed</dt><dd>5 March 2021</dd></dl></div>
  <div class="column-one-third"><dl><dt>Registered</dt><dd>
      18 June 2021
  </dd></dl></div>
  <div class="column-one-third"><dl><dt>Renewal</dt><dd>5 March 2031</dd></dl></div>
  <div class="offset"><dl><dt>Status</dt><dd>Registered</dd></dl></div>
  <div class="slides">
    <div class="slide"><a id="lightbox-2-1" href="/img/UK0000123.jpg"><img src="/thumb.jpg"></a></div>
    <div class="slide"><dl><dt>Mark text</dt><dd>ACME ROCKETS</dd></dl></div>
    <div class="slide"><p>no usable content</p></div>
  </div>
  <div id="tab-2">
    <h3 class="subsection__title">Class 12</h3><p class="no-print">Rockets; launchers.</p>
    <h3 class="subsection__title">Class 28</h3><p class="no-print">Toy rockets.</p>
  </div>
  <div id="tab-3">
    <dl><dt>Acme Ltd</dt><dd>1 High Street, London</dd></dl>
    <dl><dt>Agents LLP</dt><dd>2 Low Road, Leeds</dd></dl>
  </div>
  <div id="tab-4">
    <dl><dt>Journal</dt><dd>  2021/012  </dd><dt>Date</dt><dd>26 March 2021</dd></dl>
  </div>
</body></html>
"#;

    fn source() -> Ukipo {
        Ukipo::new(UkipoSettings::default())
    }

    fn row_for(html: &str) -> UkipoRow {
        extract(&Html::parse_document(html))
    }

    fn case_row() -> UkipoRow {
        UkipoRow {
            tm_name: "ACME ROCKETS".into(),
            filed: "05/03/2021".into(),
            registered: "18/06/2021".into(),
            renewal: "05/03/2031".into(),
            status: "Registered".into(),
            details: "/img/UK0000123.jpg\nACME ROCKETS".into(),
            owner_name: "Acme Ltd".into(),
            owner_address: "1 High Street, London".into(),
            rep_name: "Agents LLP".into(),
            rep_address: "2 Low Road, Leeds".into(),
            journal: "2021/012".into(),
            pub_date: "26/03/2021".into(),
            goods: "Class 12: Rockets; launchers.\nClass 28: Toy rockets.".into(),
        }
    }

    #[test]
    fn test_extract_full_page() {
        assert_eq!(row_for(CASE_PAGE), case_row());
    }

    #[test]
    fn test_each_missing_section_leaves_others_intact() {
        let removals: [(&str, &str, fn(&mut UkipoRow)); 9] = [
            ("h1>", "h2>", |r| r.tm_name.clear()),
            ("<dd>5 March 2021</dd>", "<dd>pending</dd>", |r| r.filed.clear()),
            ("18 June 2021", "not yet", |r| r.registered.clear()),
            ("5 March 2031", "unknown", |r| r.renewal.clear()),
            (r#"class="offset""#, r#"class="aside""#, |r| r.status.clear()),
            (r#"class="slide""#, r#"class="panel""#, |r| r.details.clear()),
            (r#"id="tab-2""#, r#"id="tab-9""#, |r| r.goods.clear()),
            (r#"id="tab-3""#, r#"id="tab-9""#, |r| {
                r.owner_name.clear();
                r.owner_address.clear();
                r.rep_name.clear();
                r.rep_address.clear();
            }),
            (r#"id="tab-4""#, r#"id="tab-9""#, |r| {
                r.journal.clear();
                r.pub_date.clear();
            }),
        ];
        for (from, to, blank) in removals {
            assert!(CASE_PAGE.contains(from), "fixture lacks {from}");
            let html = CASE_PAGE.replace(from, to);
            let mut expected = case_row();
            blank(&mut expected);
            assert_eq!(row_for(&html), expected, "replacing {from}");
        }
    }

    #[test]
    fn test_search_page_yields_placeholder() {
        let html = "<html><body><h1>Search for a trade mark</h1><form></form></body></html>";
        let lookup = source().interpret("UK0000999", html).unwrap();
        assert_eq!(
            lookup,
            Lookup::NotFound {
                fallback: Some(UkipoRow {
                    tm_name: "UK0000999".into(),
                    filed: "No data found.".into(),
                    ..Default::default()
                })
            }
        );
    }

    #[test]
    fn test_case_page_is_found() {
        let lookup = source().interpret("UK0000123", CASE_PAGE).unwrap();
        assert!(matches!(lookup, Lookup::Found(r) if r.tm_name == "ACME ROCKETS"));
    }

    #[test]
    fn test_pending_mark_without_registration() {
        let html = r#"<h1>PENDING</h1>
            <div class="column-one-third"><dd>1 January 2024</dd></div>
            <div class="column-one-third"><dd>Not yet registered</dd></div>"#;
        let row = row_for(html);
        assert_eq!(row.filed, "01/01/2024");
        assert_eq!(row.registered, "");
        assert_eq!(row.renewal, "");
        assert_eq!(row.tm_name, "PENDING");
    }

    #[test]
    fn test_missing_representative_keeps_owner() {
        let html =
            r#"<div id="tab-3"><dl><dt>Solo Ltd</dt><dd>Somewhere</dd></dl></div>"#;
        let row = row_for(html);
        assert_eq!(row.owner_name, "Solo Ltd");
        assert_eq!(row.owner_address, "Somewhere");
        assert_eq!(row.rep_name, "");
        assert_eq!(row.rep_address, "");
    }

    #[test]
    fn test_owner_name_without_address() {
        let html = r#"<div id="tab-3">
            <dl><dt>Anon</dt></dl>
            <dl><dt>Rep</dt><dd>Addr</dd></dl>
        </div>"#;
        let row = row_for(html);
        assert_eq!(row.owner_name, "Anon");
        assert_eq!(row.owner_address, "");
        assert_eq!(row.rep_name, "Rep");
        assert_eq!(row.rep_address, "Addr");
    }

    #[test]
    fn test_unparseable_pub_date_keeps_journal() {
        let html = r#"<div id="tab-4"><dd>2021/012</dd><dd>sometime</dd></div>"#;
        let row = row_for(html);
        assert_eq!(row.journal, "2021/012");
        assert_eq!(row.pub_date, "");
    }

    #[test]
    fn test_class_pairing_truncates_to_shorter_list() {
        let html = r#"<div id="tab-2">
            <h3 class="subsection__title">1</h3>
            <h3 class="subsection__title">2</h3>
            <h3 class="subsection__title">3</h3>
            <p class="no-print">Widgets</p>
            <p class="no-print">Gadgets</p>
        </div>"#;
        assert_eq!(row_for(html).goods, "1: Widgets\n2: Gadgets");
    }

    #[test]
    fn test_pair_classes() {
        let numbers = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let terms = vec!["Widgets".to_string(), "Gadgets".to_string()];
        let paired = pair_classes(&numbers, &terms);
        assert_eq!(paired.lines().count(), 2);
        assert_eq!(paired, "1: Widgets\n2: Gadgets");
    }

    #[test]
    fn test_class_terms_outside_tab_are_ignored() {
        let html = r#"<p class="no-print">Print me not</p>
            <div id="tab-2"><h3 class="subsection__title">9</h3></div>"#;
        assert_eq!(row_for(html).goods, "");
    }

    #[test]
    fn test_detail_link_needs_single_lightbox_anchor() {
        let html = r#"<div class="slide">
            <a href="/other.html">other</a>
            <dl><dd>WORDMARK</dd></dl>
        </div>"#;
        assert_eq!(row_for(html).details, "WORDMARK");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(row_for(""), UkipoRow::default());
    }

    #[test]
    fn test_custom_not_found_title() {
        let s = Ukipo::new(UkipoSettings {
            not_found_title: "Trade mark search".into(),
            not_found_filed_text: "missing".into(),
            ..Default::default()
        });
        let lookup = s.interpret("X", "<h1>Trade mark search</h1>").unwrap();
        let Lookup::NotFound { fallback: Some(row) } = lookup else {
            panic!("expected placeholder");
        };
        assert_eq!(row.filed, "missing");
        // The default title no longer matches.
        assert!(matches!(
            s.interpret("X", "<h1>Search for a trade mark</h1>").unwrap(),
            Lookup::Found(_)
        ));
    }

    #[test]
    fn test_record_url_encodes_identifier() {
        assert_eq!(
            source().record_url("UK00003456789"),
            "https://trademarks.ipo.gov.uk/ipo-tmcase/page/Results/1/UK00003456789"
        );
        let s = Ukipo::new(UkipoSettings {
            base_url: "http://localhost:8080/case".into(),
            ..Default::default()
        });
        assert_eq!(
            s.record_url("A B"),
            "http://localhost:8080/case/page/Results/1/A%20B"
        );
    }
}
