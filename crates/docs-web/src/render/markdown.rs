//! Markdown rendering for viewer documents.
//!
//! Raw HTML in a document is shown as text, and fenced code blocks become
//! copyable `code-ref` blocks tagged with their language.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

use crate::escape::{data_attr, escape_html, escape_html_text};

pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let events = CodeBlocks::new(Parser::new_ext(markdown, options)).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Collapses each code block into a single pre-rendered HTML event.
struct CodeBlocks<'a, I> {
    inner: I,
    block: Option<(Option<String>, String)>,
    _marker: std::marker::PhantomData<Event<'a>>,
}

impl<'a, I> CodeBlocks<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    fn new(inner: I) -> Self {
        Self {
            inner,
            block: None,
            _marker: std::marker::PhantomData,
        }
    }
}

fn code_block_html(lang: Option<&str>, code: &str) -> String {
    let class = lang
        .map(|l| format!(" class=\"language-{}\"", escape_html(l)))
        .unwrap_or_default();
    format!(
        "<pre class=\"code-block\"><code{class}>{}</code><button class=\"code-ref copy-code\"{} title=\"Click to copy\">Copy</button></pre>\n",
        escape_html_text(code),
        data_attr("copy", code.trim_end()),
    )
}

impl<'a, I> Iterator for CodeBlocks<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let event = self.inner.next()?;
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.trim().is_empty() => {
                            lang.split_whitespace().next().map(str::to_string)
                        }
                        _ => None,
                    };
                    self.block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    let (lang, code) = self.block.take().unwrap_or_default();
                    return Some(Event::Html(code_block_html(lang.as_deref(), &code).into()));
                }
                Event::Text(text) if self.block.is_some() => {
                    if let Some((_, code)) = &mut self.block {
                        code.push_str(&text);
                    }
                }
                other => return Some(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_markdown() {
        let html = render_markdown("# Setup\n\nRun the **server**.");
        assert!(html.contains("<h1>Setup</h1>"));
        assert!(html.contains("<strong>server</strong>"));
    }

    #[test]
    fn code_blocks_are_copyable_and_escaped() {
        let html = render_markdown("```bash\nnpm run dev && echo \"<ok>\"\n```");
        assert!(html.contains("class=\"language-bash\""), "{html}");
        assert!(html.contains("&lt;ok&gt;"), "{html}");
        assert!(html.contains("data-copy=\"npm run dev &amp;&amp; echo &quot;&lt;ok&gt;&quot;\""), "{html}");
        assert!(!html.contains("<ok>"));
    }

    #[test]
    fn raw_html_is_shown_as_text() {
        let html = render_markdown("<script>alert(1)</script>\n\ninline <b>bold</b>");
        assert!(!html.contains("<script>"), "{html}");
        assert!(!html.contains("<b>"), "{html}");
    }

    #[test]
    fn tables_render() {
        let html = render_markdown("| Stage | Latency |\n|---|---|\n| Acronyms | 0-2ms |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>Acronyms</td>"));
    }
}
