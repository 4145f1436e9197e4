use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// A hyperlink as harvested from the page: visible text plus href.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub text: String,
    pub href: String,
}

/// Collect every anchor reachable from a callout through the small set of
/// structural relations the page has used over the years. Link lists are
/// sometimes direct following-siblings of the callout and sometimes
/// following-siblings of the callout's parent, wrapped either in a `ul` or
/// a plain `div`. All four probes run in a fixed order and their results
/// are concatenated:
///
///   1. `ul` siblings of the callout
///   2. `div` siblings of the callout
///   3. `ul` siblings of the callout's parent
///   4. `div` siblings of the callout's parent
///
/// Duplicates are not removed; classification takes the first match per
/// kind, so repeats are harmless. An empty result is not an error.
pub fn harvest_links(callout: ElementRef) -> Vec<Anchor> {
    let mut anchors = Vec::new();
    sibling_container_anchors(callout, "ul", &mut anchors);
    sibling_container_anchors(callout, "div", &mut anchors);
    if let Some(parent) = callout.parent().and_then(ElementRef::wrap) {
        sibling_container_anchors(parent, "ul", &mut anchors);
        sibling_container_anchors(parent, "div", &mut anchors);
    }
    anchors
}

/// Anchors under following-siblings of `start` whose element name is
/// `container`, in document order. Anchors without an href are skipped.
fn sibling_container_anchors(start: ElementRef, container: &str, out: &mut Vec<Anchor>) {
    for sibling in start.next_siblings() {
        let Some(el) = ElementRef::wrap(sibling) else {
            continue;
        };
        if el.value().name() != container {
            continue;
        }
        for a in el.select(&ANCHOR_SEL) {
            let Some(href) = a.value().attr("href") else {
                continue;
            };
            let text = a.text().collect::<Vec<_>>().join(" ");
            out.push(Anchor {
                text: text.trim().to_string(),
                href: href.to_string(),
            });
        }
    }
}
