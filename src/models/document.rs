/// Ordered pages of book text. Pages may contain `\n` line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pages: Vec<String>,
}

impl Document {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Single-page document.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            pages: vec![text.into()],
        }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// True when there are no pages or every page is whitespace.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }

    /// All pages joined with `\n`.
    pub fn joined(&self) -> String {
        self.pages.join("\n")
    }

    /// Lines of every page in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|page| page.lines())
    }
}

impl From<Vec<String>> for Document {
    fn from(pages: Vec<String>) -> Self {
        Self::new(pages)
    }
}
