use crate::normalize::normalize;
use crate::parser::harvest::Anchor;

// Link labels on the page: "Prova" marks the exam booklet, "Gabarito" the
// answer key.
const EXAM_KEYWORD: &str = "prova";
const ANSWER_KEY_KEYWORD: &str = "gabarito";

/// Exam and answer-key URLs latched from a harvested anchor sequence.
#[derive(Debug, Default)]
pub struct Classified {
    pub exam: Option<String>,
    pub answer_key: Option<String>,
}

/// Scan the anchors once, in harvest order. The first anchor whose
/// normalized text contains "prova" latches the exam URL; otherwise the
/// first containing "gabarito" latches the answer key. Each kind latches at
/// most once, the scan stops early when both are assigned, and anchors
/// matching neither keyword are ignored.
pub fn classify(anchors: &[Anchor]) -> Classified {
    let mut out = Classified::default();
    for anchor in anchors {
        let text = normalize(&anchor.text);
        if out.exam.is_none() && text.contains(EXAM_KEYWORD) {
            out.exam = Some(anchor.href.clone());
        } else if out.answer_key.is_none() && text.contains(ANSWER_KEY_KEYWORD) {
            out.answer_key = Some(anchor.href.clone());
        }
        if out.exam.is_some() && out.answer_key.is_some() {
            break;
        }
    }
    out
}
