use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::normalize::normalize;

static CALLOUT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.callout").unwrap());

/// Find the labeling element that introduces a document group: the first
/// `p.callout` in document order whose normalized text contains every
/// keyword as a substring. Keywords need not be contiguous or in order.
///
/// `None` means the year simply does not have this document group; callers
/// treat it as a soft outcome.
pub fn find_callout<'a>(scope: ElementRef<'a>, keywords: &[&str]) -> Option<ElementRef<'a>> {
    scope.select(&CALLOUT_SEL).find(|el| {
        let text = el.text().collect::<Vec<_>>().join(" ");
        let normalized = normalize(&text);
        keywords.iter().all(|kw| normalized.contains(kw))
    })
}
