use crate::domain::ports::Renderer;
use pulldown_cmark::{html, Options, Parser};

/// CommonMark to HTML, no extensions.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options);
        let mut html_output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }
}

/// Used with `--no-parse`: content goes out exactly as read.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Renderer for Passthrough {
    fn render(&self, source: &str) -> String {
        source.to_string()
    }
}

pub fn renderer_for(no_parse: bool) -> Box<dyn Renderer> {
    if no_parse {
        Box::new(Passthrough)
    } else {
        Box::new(MarkdownRenderer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_fixtures() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(
            renderer.render("# Title\n\nHello *world*\n"),
            "<h1>Title</h1>\n<p>Hello <em>world</em></p>\n"
        );
        assert_eq!(
            renderer.render("- one\n- two\n"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
        assert_eq!(
            renderer.render("[site](http://example.com)"),
            "<p><a href=\"http://example.com\">site</a></p>\n"
        );
    }

    #[test]
    fn test_passthrough_keeps_markup() {
        let raw = "# Not a heading\n<b>kept</b>\n";
        assert_eq!(Passthrough.render(raw), raw);
        assert_eq!(renderer_for(true).render(raw), raw);
        assert_ne!(renderer_for(false).render(raw), raw);
    }
}
