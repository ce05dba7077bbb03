use ammonia::Builder;
use pulldown_cmark::{html, Options, Parser};

/// Renders post bodies fetched from the content API. The API stores raw
/// Markdown; it is converted and sanitized here on every render, since the
/// front-end keeps no copy of the post between requests.
pub struct MarkdownRenderer {
    sanitizer: Builder<'static>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut tags = ammonia::Builder::default().clone_tags();
        tags.insert("pre");
        tags.insert("code");
        tags.insert("table");
        tags.insert("thead");
        tags.insert("tbody");
        tags.insert("tr");
        tags.insert("th");
        tags.insert("td");
        tags.insert("del");

        let mut attrs = ammonia::Builder::default().clone_tag_attributes();
        attrs.insert(
            "img",
            ["src", "alt", "title", "width", "height", "loading"]
                .iter()
                .cloned()
                .collect(),
        );

        let mut sanitizer = Builder::default();
        sanitizer
            .tags(tags)
            .tag_attributes(attrs)
            .link_rel(Some("noopener noreferrer"));

        Self { sanitizer }
    }

    pub fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);

        let parser = Parser::new_ext(markdown, options);
        let mut raw = String::new();
        html::push_html(&mut raw, parser);

        self.sanitizer.clean(&raw).to_string()
    }
}
