//! Response Parser — splits the reviewer's free-form answer into feedback and revised HTML.
//!
//! The prompt asks for two sections introduced by the literal markers `1)` and `2)`.
//! The model does not always comply, so parsing never fails: missing markers
//! degrade to "everything is feedback, no revision".
//!
//! Known limitation: only the first `1)` and the first `2)` after it are honoured.
//! A `2)` inside the feedback text (e.g. a numbered list) splits the answer early.

use serde::Serialize;

pub const FEEDBACK_MARKER: &str = "1)";
pub const REVISION_MARKER: &str = "2)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedFeedback {
    pub feedback_text: String,
    pub revised_html: String,
}

impl ParsedFeedback {
    pub fn has_revision(&self) -> bool {
        !self.revised_html.is_empty()
    }
}

pub fn parse_ai_response(raw: &str) -> ParsedFeedback {
    let Some((_, after_feedback_marker)) = raw.split_once(FEEDBACK_MARKER) else {
        return ParsedFeedback {
            feedback_text: raw.trim().to_string(),
            revised_html: String::new(),
        };
    };

    match after_feedback_marker.split_once(REVISION_MARKER) {
        Some((feedback, revised)) => ParsedFeedback {
            feedback_text: feedback.trim().to_string(),
            revised_html: revised.trim().to_string(),
        },
        None => ParsedFeedback {
            feedback_text: after_feedback_marker.trim().to_string(),
            revised_html: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_markers_split_feedback_and_html() {
        let parsed = parse_ai_response("blah 1) Great resume, add metrics. 2) <html>...</html>");
        assert_eq!(parsed.feedback_text, "Great resume, add metrics.");
        assert_eq!(parsed.revised_html, "<html>...</html>");
        assert!(parsed.has_revision());
    }

    #[test]
    fn test_no_markers_is_all_feedback() {
        let parsed = parse_ai_response("Just feedback, no markers.");
        assert_eq!(parsed.feedback_text, "Just feedback, no markers.");
        assert_eq!(parsed.revised_html, "");
        assert!(!parsed.has_revision());
    }

    #[test]
    fn test_no_markers_trims_whitespace() {
        let parsed = parse_ai_response("\n\n  Tighten the summary.  \t\n");
        assert_eq!(parsed.feedback_text, "Tighten the summary.");
        assert_eq!(parsed.revised_html, "");
    }

    #[test]
    fn test_feedback_marker_without_revision_marker() {
        let parsed = parse_ai_response("Preamble 1)\n  Bullets lack numbers.\n");
        assert_eq!(parsed.feedback_text, "Bullets lack numbers.");
        assert_eq!(parsed.revised_html, "");
    }

    #[test]
    fn test_revision_marker_before_feedback_marker_is_ignored() {
        // The only `2)` precedes `1)`, so nothing follows the feedback marker.
        let parsed = parse_ai_response("2) early <b>x</b> 1) real feedback");
        assert_eq!(parsed.feedback_text, "real feedback");
        assert_eq!(parsed.revised_html, "");
    }

    #[test]
    fn test_only_first_markers_are_honoured() {
        let raw = "1) Fix a) and b). 2) <p>Step 2) done</p> 1) again";
        let parsed = parse_ai_response(raw);
        assert_eq!(parsed.feedback_text, "Fix a) and b).");
        assert_eq!(parsed.revised_html, "<p>Step 2) done</p> 1) again");
    }

    #[test]
    fn test_revision_marker_inside_feedback_splits_early() {
        // Documented limitation: a numbered list in the feedback mis-splits.
        let raw = "1) Issues: 1) vague summary 2) no metrics\n2) <html></html>";
        let parsed = parse_ai_response(raw);
        assert_eq!(parsed.feedback_text, "Issues: 1) vague summary");
        assert_eq!(parsed.revised_html, "no metrics\n2) <html></html>");
    }

    #[test]
    fn test_multiline_prompt_shaped_answer() {
        let raw = "1)\n**Analysis and Feedback**\n- Add keywords\n\n2)\n<!DOCTYPE html>\n<html><body>cv</body></html>\n";
        let parsed = parse_ai_response(raw);
        assert_eq!(parsed.feedback_text, "**Analysis and Feedback**\n- Add keywords");
        assert_eq!(
            parsed.revised_html,
            "<!DOCTYPE html>\n<html><body>cv</body></html>"
        );
    }

    #[test]
    fn test_empty_sections() {
        let parsed = parse_ai_response("1)2)");
        assert_eq!(parsed, ParsedFeedback::default());
        assert_eq!(parse_ai_response(""), ParsedFeedback::default());
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let inputs = [
            "1) a 2) b",
            "nothing here",
            "x 1) only feedback",
            "  1)  spaced  2)  <p>html</p>  ",
        ];
        for input in inputs {
            assert_eq!(parse_ai_response(input), parse_ai_response(input));
        }
    }

    #[test]
    fn test_both_markers_property_over_generated_inputs() {
        let prefixes = ["", "intro ", "Sure!\n"];
        let feedbacks = ["", " ok ", "Add metrics.\n- more"];
        let htmls = ["", "<p>x</p>", "\n<html>\n</html>\n"];
        for prefix in prefixes {
            for feedback in feedbacks {
                for html in htmls {
                    let raw = format!("{prefix}1){feedback}2){html}");
                    let parsed = parse_ai_response(&raw);
                    assert_eq!(parsed.feedback_text, feedback.trim(), "input: {raw:?}");
                    assert_eq!(parsed.revised_html, html.trim(), "input: {raw:?}");
                }
            }
        }
    }

    #[test]
    fn test_no_feedback_marker_property_over_generated_inputs() {
        let texts = ["", "  ", "Looks fine.", " 2) stray second marker ", "a\n\n<html>1</html>\n"];
        for text in texts {
            let parsed = parse_ai_response(text);
            assert_eq!(parsed.feedback_text, text.trim(), "input: {text:?}");
            assert_eq!(parsed.revised_html, "", "input: {text:?}");
        }
    }

    #[test]
    fn test_feedback_marker_only_property_over_generated_inputs() {
        let prefixes = ["", "intro ", "2) before\n"];
        let tails = ["", " ok ", "Add metrics.\n- more", "\n<html></html>\n"];
        for prefix in prefixes {
            for tail in tails {
                let raw = format!("{prefix}1){tail}");
                let parsed = parse_ai_response(&raw);
                assert_eq!(parsed.feedback_text, tail.trim(), "input: {raw:?}");
                assert_eq!(parsed.revised_html, "", "input: {raw:?}");
            }
        }
    }
}
