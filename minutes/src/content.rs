//! Entry content reconstruction.
//!
//! The content of an entry is a run of `<p>` blocks whose sentences are split
//! across many adjacent `<span>` fragments with no separators between them.
//! Reading the text of a whole block keeps the markup's stray whitespace;
//! reading it fragment by fragment and trimming only line breaks and tabs
//! gives readable text with the paragraph breaks intact.
//!
//! Every `<span>` inside a block contributes, nested ones included, so text
//! held by a nested span appears once per enclosing span.

use crate::markup::Region;

/// Reconstructs the text of an entry's content region.
///
/// Each `<p>` block becomes one line: the concatenated text of its `<span>`
/// fragments in document order, each stripped of leading and trailing `\n`
/// and `\t`. The result is trimmed of surrounding whitespace.
#[must_use]
pub fn reconstruct_content<R: Region>(region: &R) -> String {
    let mut content = String::new();

    for block in region.find_all("p", None) {
        for fragment in block.find_all("span", None) {
            let text = fragment.visible_text();
            content.push_str(text.trim_matches(|c: char| c == '\n' || c == '\t'));
        }
        content.push('\n');
    }

    content.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Page;

    fn reconstruct(html: &str) -> String {
        let page = Page::parse_fragment(html);
        reconstruct_content(&page.root())
    }

    const FOUR_BLOCKS: &str = concat!(
        "<div class=\"itemContent\">",
        "<p><span>&nbsp;</span><span class=\"sdtSpan\"><span>12</span></span>",
        "<span>First anniversary of the loss of Malaysia Airlines Flight MH370</span></p>\n",
        "<p><span>Mr Abbott</span><span> </span><span>(</span><span>Prime Minister</span>",
        "<span>)</span><span>, moved</span><span>\u{2014}</span><span>That this House:</span></p>\n",
        "<p><span><span>\n</span>(1)<span> </span></span>",
        "<span>note that the House sits;</span></p>\n",
        "<p><span>\t(2) </span><span>extend its heartfelt sympathies.</span></p>",
        "</div>",
    );

    #[test]
    fn reconstructs_fixture_exactly() {
        assert_eq!(
            reconstruct(FOUR_BLOCKS),
            "1212First anniversary of the loss of Malaysia Airlines Flight MH370\n\
             Mr Abbott (Prime Minister), moved\u{2014}That this House:\n\
             (1)  note that the House sits;\n\
             (2) extend its heartfelt sympathies."
        );
    }

    #[test]
    fn one_segment_per_block() {
        let content = reconstruct(FOUR_BLOCKS);
        let segments: Vec<&str> = content.split('\n').collect();
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn keeps_interior_line_breaks_and_spaces() {
        let content = reconstruct("<p><span>Flight\nMH370</span><span>  spaced </span></p>");
        assert_eq!(content, "Flight\nMH370  spaced");
    }

    #[test]
    fn ignores_text_outside_spans() {
        let content = reconstruct("<p>loose text<span>kept</span></p>");
        assert_eq!(content, "kept");
    }

    #[test]
    fn empty_region_yields_empty_string() {
        assert_eq!(reconstruct("<div class=\"itemContent\"></div>"), "");
    }

    #[test]
    fn empty_blocks_collapse_at_edges_only() {
        let content = reconstruct("<p></p><p><span>a</span></p><p></p><p><span>b</span></p><p></p>");
        assert_eq!(content, "a\n\nb");
    }
}
