//! Structural queries over the minutes markup.
//!
//! The minutes page is served as loosely-formed HTML. The parsing code in
//! this crate never walks the tree directly; it goes through the [`Region`]
//! trait, which exposes only the three capabilities it needs:
//!
//! - find descendant elements by tag name and class
//! - read the concatenated visible text of an element
//! - read the raw text of embedded `<script>` elements
//!
//! [`Page`] owns a tolerant `scraper` parse of a document and hands out
//! [`ElementRef`] regions, which implement [`Region`].

use scraper::{ElementRef, Html};

/// A queryable region of a parsed document.
pub trait Region: Sized {
    /// Returns every descendant element (excluding `self`) with the given
    /// tag name, in document order.
    ///
    /// `class` may hold several whitespace-separated class names; an element
    /// matches only if it carries all of them. `None` matches any class.
    fn find_all(&self, tag: &str, class: Option<&str>) -> Vec<Self>;

    /// Returns the first descendant matching `tag` and `class`.
    fn find(&self, tag: &str, class: Option<&str>) -> Option<Self> {
        self.find_all(tag, class).into_iter().next()
    }

    /// Concatenated text of every text node below this region.
    fn visible_text(&self) -> String;

    /// Raw text of every `<script>` element below this region.
    fn script_texts(&self) -> Vec<String> {
        self.find_all("script", None)
            .iter()
            .map(Self::visible_text)
            .collect()
    }
}

impl<'a> Region for ElementRef<'a> {
    fn find_all(&self, tag: &str, class: Option<&str>) -> Vec<Self> {
        let wanted: Vec<&str> = class
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();

        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name().eq_ignore_ascii_case(tag))
            .filter(|el| {
                wanted
                    .iter()
                    .all(|w| el.value().classes().any(|c| c == *w))
            })
            .collect()
    }

    fn visible_text(&self) -> String {
        self.text().collect()
    }
}

/// An owned, parsed minutes document.
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses a full HTML document. Malformed markup is recovered from, never
    /// rejected.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    /// Parses a markup fragment, such as a single entry container.
    #[must_use]
    pub fn parse_fragment(text: &str) -> Self {
        Self {
            html: Html::parse_fragment(text),
        }
    }

    /// The root element of the document.
    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}
