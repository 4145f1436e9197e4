use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

// gov.br tab bar: one anchor per year, plus an "Sobre" (about) tab.
static YEAR_TAB_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.govbr-tabs .tabs .tab a[data-id]").unwrap());
static TAB_CONTENT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.tab-content").unwrap());

const ABOUT_TAB: &str = "Sobre";

/// Years with published documents, newest first. The "Sobre" tab is not a
/// year and is skipped.
pub fn available_years(doc: &Html) -> Vec<String> {
    let mut years: Vec<String> = doc
        .select(&YEAR_TAB_SEL)
        .filter_map(|a| a.value().attr("data-id"))
        .filter(|id| !id.is_empty() && *id != ABOUT_TAB)
        .map(str::to_string)
        .collect();
    years.sort_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// The subtree holding one year's tab content, if the page has it.
pub fn year_scope<'a>(doc: &'a Html, year: &str) -> Option<ElementRef<'a>> {
    doc.select(&TAB_CONTENT_SEL)
        .find(|el| el.value().attr("data-id") == Some(year))
}
