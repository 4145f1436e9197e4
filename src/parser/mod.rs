pub mod callout;
pub mod classify;
pub mod harvest;

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::info;

use crate::catalog::{Category, DocKind, LinkRecord, CATALOG, ESSAY_THEME_KEY, ESSAY_THEME_LABEL};
use crate::report::Report;

static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Run the identification pipeline over one year's tab content: for each
/// catalog category, locate the callout, harvest the sibling links, and
/// classify them; then search the whole scope for the re-application essay
/// theme anchor. A missing category never aborts the pass: everything not
/// found becomes a report entry and extraction moves to the next slot.
pub fn extract_all(scope: ElementRef, year: &str, report: &mut Report) -> Vec<LinkRecord> {
    let mut records = Vec::new();
    for category in CATALOG {
        extract_category(scope, category, year, &mut records, report);
    }
    extract_essay_theme(scope, year, &mut records, report);
    records
}

fn extract_category(
    scope: ElementRef,
    category: &Category,
    year: &str,
    records: &mut Vec<LinkRecord>,
    report: &mut Report,
) {
    let Some(found) = callout::find_callout(scope, category.keywords) else {
        report.warn(format!(
            "Pattern '{}' not found for {} (keywords: {:?}).",
            category.description, year, category.keywords
        ));
        return;
    };
    info!("Callout found for '{}' in {}", category.description, year);

    let anchors = harvest::harvest_links(found);
    let classified = classify::classify(&anchors);

    match classified.exam {
        Some(url) => {
            info!("Exam link for '{}' in {} found", category.description, year);
            records.push(LinkRecord {
                year: year.to_string(),
                category_key: format!("{}_prova_azul", category.key),
                kind: DocKind::Exam,
                url,
            });
        }
        None => report.warn(format!(
            "Exam link not found for '{}' in {}.",
            category.description, year
        )),
    }

    match classified.answer_key {
        Some(url) => {
            info!(
                "Answer-key link for '{}' in {} found",
                category.description, year
            );
            records.push(LinkRecord {
                year: year.to_string(),
                category_key: format!("{}_gabarito_azul", category.key),
                kind: DocKind::AnswerKey,
                url,
            });
        }
        None => report.warn(format!(
            "Answer-key link not found for '{}' in {}.",
            category.description, year
        )),
    }
}

/// The essay theme has no callout and no exam/answer-key pair: search the
/// whole scope for an anchor whose raw text carries the fixed label. Many
/// years simply do not publish it, so absence is informational.
fn extract_essay_theme(
    scope: ElementRef,
    year: &str,
    records: &mut Vec<LinkRecord>,
    report: &mut Report,
) {
    let hit = scope
        .select(&ANCHOR_SEL)
        .find(|a| a.text().collect::<String>().contains(ESSAY_THEME_LABEL));
    match hit.and_then(|a| a.value().attr("href")) {
        Some(url) => {
            info!("Essay theme link (re-application) for {} found", year);
            records.push(LinkRecord {
                year: year.to_string(),
                category_key: ESSAY_THEME_KEY.to_string(),
                kind: DocKind::EssayTheme,
                url: url.to_string(),
            });
        }
        None => report.info(format!(
            "Essay theme (re-application) not found for {} (may not exist).",
            year
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn scope_of(doc: &Html) -> ElementRef<'_> {
        let sel = Selector::parse("div.tab-content").unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn callout_with_sibling_list_yields_exam_and_answer_key() {
        let doc = Html::parse_document(
            r#"<div class="tab-content" data-id="2024">
                 <p class="callout">1º Dia – Caderno 1 – Azul – Aplicação Regular</p>
                 <ul>
                   <li><a href="https://a.test/prova.pdf">Prova</a></li>
                   <li><a href="https://a.test/gabarito.pdf">Gabarito</a></li>
                 </ul>
               </div>"#,
        );
        let mut report = Report::new();
        let records = extract_all(scope_of(&doc), "2024", &mut report);

        let exam = records.iter().find(|r| r.kind == DocKind::Exam).unwrap();
        assert_eq!(exam.url, "https://a.test/prova.pdf");
        assert_eq!(exam.category_key, "regular_d1_prova_azul");

        let key = records
            .iter()
            .find(|r| r.kind == DocKind::AnswerKey)
            .unwrap();
        assert_eq!(key.url, "https://a.test/gabarito.pdf");
        assert_eq!(key.category_key, "regular_d1_gabarito_azul");

        // Only regular day 1 exists; every other slot reports its absence.
        assert_eq!(records.len(), 2);
        assert!(!report.is_empty());
    }

    #[test]
    fn empty_scope_reports_every_category_and_yields_nothing() {
        let doc = Html::parse_document(r#"<div class="tab-content" data-id="2020"></div>"#);
        let mut report = Report::new();
        let records = extract_all(scope_of(&doc), "2020", &mut report);
        assert!(records.is_empty());
        // One entry per callout category plus the essay theme note.
        assert_eq!(report.len(), CATALOG.len() + 1);
    }

    #[test]
    fn missing_exam_does_not_block_answer_key() {
        let doc = Html::parse_document(
            r#"<div class="tab-content" data-id="2022">
                 <p class="callout">2º Dia – Caderno 7 – Azul – Aplicação Regular</p>
                 <ul><li><a href="/gab.pdf">Gabarito</a></li></ul>
               </div>"#,
        );
        let mut report = Report::new();
        let records = extract_all(scope_of(&doc), "2022", &mut report);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, DocKind::AnswerKey);
        assert!(report
            .entries()
            .iter()
            .any(|e| e.contains("Exam link not found")));
    }

    #[test]
    fn essay_theme_found_by_anchor_text() {
        let doc = Html::parse_document(
            r#"<div class="tab-content" data-id="2023">
                 <p>Reaplicação</p>
                 <ul><li><a href="/tema.pdf">Tema da Redação - Reaplicação</a></li></ul>
               </div>"#,
        );
        let mut report = Report::new();
        let records = extract_all(scope_of(&doc), "2023", &mut report);
        let theme = records
            .iter()
            .find(|r| r.kind == DocKind::EssayTheme)
            .unwrap();
        assert_eq!(theme.url, "/tema.pdf");
        assert_eq!(theme.category_key, "reaplicacao_redacao");
    }

    #[test]
    fn fixture_page_both_markup_variants() {
        let html = std::fs::read_to_string("tests/fixtures/provas_page.html").unwrap();
        let doc = Html::parse_document(&html);

        // 2024: lists are direct siblings of the callouts.
        let scope = crate::page::year_scope(&doc, "2024").unwrap();
        let mut report = Report::new();
        let records = extract_all(scope, "2024", &mut report);
        let keys: Vec<&str> = records.iter().map(|r| r.category_key.as_str()).collect();
        assert!(keys.contains(&"regular_d1_prova_azul"));
        assert!(keys.contains(&"regular_d2_gabarito_azul"));
        assert!(keys.contains(&"digital_d1_prova_azul"));
        assert!(keys.contains(&"reaplicacao_d1_prova_azul"));
        assert!(keys.contains(&"reaplicacao_redacao"));

        // 2023: lists are siblings of the callouts' parent wrapper, and the
        // digital application was not published.
        let scope = crate::page::year_scope(&doc, "2023").unwrap();
        let mut report = Report::new();
        let records = extract_all(scope, "2023", &mut report);
        let keys: Vec<&str> = records.iter().map(|r| r.category_key.as_str()).collect();
        assert!(keys.contains(&"regular_d1_prova_azul"));
        assert!(keys.contains(&"regular_d1_gabarito_azul"));
        assert!(!keys.iter().any(|k| k.starts_with("digital")));
        assert!(report
            .entries()
            .iter()
            .any(|e| e.contains("Aplicação Digital")));
    }
}
