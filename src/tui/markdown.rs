// Markdown rendering for the content viewport
//
// Uses pulldown-cmark to parse markdown into a flat list of segments, then
// flows those segments word by word into ratatui Lines of a fixed width.
// Supports: headings, paragraphs, emphasis, strong, strikethrough, inline
// code, fenced code blocks, lists, blockquotes, rules, links.

use crate::theme::Theme;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Inline formatting active for a run of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inline {
    pub strong: bool,
    pub emphasis: bool,
    pub strike: bool,
    pub code: bool,
    pub link: bool,
}

/// A segment of parsed markdown with semantic meaning
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Run of text with uniform inline formatting
    Text { text: String, inline: Inline },
    /// URL shown after a link's text when they differ
    LinkTarget(String),
    /// Heading with level (1-6)
    Heading { level: u8, text: String },
    /// Fenced or indented code block, verbatim
    CodeBlock(String),
    /// Soft break (single newline in source), flows as a space
    SoftBreak,
    /// Hard break (explicit line break)
    HardBreak,
    /// End of paragraph (adds blank line for spacing)
    ParagraphEnd,
    /// List item marker; `number` is None for bullets
    ItemStart { number: Option<u64> },
    ItemEnd,
    /// End of the outermost list
    ListEnd,
    QuoteStart,
    QuoteEnd,
    /// Horizontal rule (---)
    Rule,
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Parse markdown into segments
pub fn parse_markdown(markdown: &str) -> Vec<Segment> {
    let options = Options::ENABLE_STRIKETHROUGH;

    let mut segments = Vec::new();
    let mut inline = Inline::default();
    // Next number per open list; None for bullet lists
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut heading: Option<(u8, String)> = None;
    let mut code_block: Option<String> = None;
    let mut link_url: Option<String> = None;
    let mut link_text = String::new();

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Text(text) => {
                if let Some(code) = code_block.as_mut() {
                    code.push_str(&text);
                } else if let Some((_, h)) = heading.as_mut() {
                    h.push_str(&text);
                } else {
                    if link_url.is_some() {
                        link_text.push_str(&text);
                    }
                    segments.push(Segment::Text {
                        text: text.into_string(),
                        inline: inline.clone(),
                    });
                }
            }
            Event::Code(code) => {
                if let Some((_, h)) = heading.as_mut() {
                    h.push_str(&code);
                } else {
                    segments.push(Segment::Text {
                        text: code.into_string(),
                        inline: Inline {
                            code: true,
                            ..inline.clone()
                        },
                    });
                }
            }

            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((heading_level(level), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = heading.take() {
                    segments.push(Segment::Heading { level, text });
                }
            }

            Event::Start(Tag::CodeBlock(_)) => code_block = Some(String::new()),
            Event::End(TagEnd::CodeBlock) => {
                if let Some(code) = code_block.take() {
                    segments.push(Segment::CodeBlock(code));
                }
            }

            Event::End(TagEnd::Paragraph) => segments.push(Segment::ParagraphEnd),
            Event::SoftBreak => {
                if let Some((_, h)) = heading.as_mut() {
                    h.push(' ');
                } else {
                    segments.push(Segment::SoftBreak);
                }
            }
            Event::HardBreak => segments.push(Segment::HardBreak),

            Event::Start(Tag::List(first)) => lists.push(first),
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    segments.push(Segment::ListEnd);
                }
            }
            Event::Start(Tag::Item) => {
                if let Some(next) = lists.last_mut() {
                    let number = *next;
                    if let Some(n) = next.as_mut() {
                        *n += 1;
                    }
                    segments.push(Segment::ItemStart { number });
                }
            }
            Event::End(TagEnd::Item) => segments.push(Segment::ItemEnd),

            Event::Start(Tag::Strong) => inline.strong = true,
            Event::End(TagEnd::Strong) => inline.strong = false,
            Event::Start(Tag::Emphasis) => inline.emphasis = true,
            Event::End(TagEnd::Emphasis) => inline.emphasis = false,
            Event::Start(Tag::Strikethrough) => inline.strike = true,
            Event::End(TagEnd::Strikethrough) => inline.strike = false,

            Event::Start(Tag::Link { dest_url, .. }) => {
                inline.link = true;
                link_url = Some(dest_url.into_string());
                link_text.clear();
            }
            Event::End(TagEnd::Link) => {
                inline.link = false;
                if let Some(url) = link_url.take() {
                    if link_text.is_empty() {
                        segments.push(Segment::Text {
                            text: url,
                            inline: Inline {
                                link: true,
                                ..inline.clone()
                            },
                        });
                    } else if link_text != url {
                        segments.push(Segment::LinkTarget(url));
                    }
                }
            }

            Event::Start(Tag::BlockQuote) => segments.push(Segment::QuoteStart),
            Event::End(TagEnd::BlockQuote) => segments.push(Segment::QuoteEnd),
            Event::Rule => segments.push(Segment::Rule),

            // Raw HTML is shown as written
            Event::Html(html) | Event::InlineHtml(html) => segments.push(Segment::Text {
                text: html.into_string(),
                inline: inline.clone(),
            }),

            _ => {}
        }
    }

    segments
}

/// Accumulates spans into width-bounded lines
struct LineBuilder<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    used: usize,
    /// Prefix repeated at the start of every line (quote bars, list indents)
    prefix: Vec<(String, Style)>,
}

impl<'t> LineBuilder<'t> {
    fn new(width: usize, theme: &'t Theme) -> Self {
        Self {
            theme,
            width: width.max(1),
            lines: Vec::new(),
            spans: Vec::new(),
            used: 0,
            prefix: Vec::new(),
        }
    }

    fn prefix_width(&self) -> usize {
        self.prefix.iter().map(|(s, _)| s.width()).sum()
    }

    fn start_line(&mut self) {
        for (text, style) in &self.prefix {
            self.spans.push(Span::styled(text.clone(), *style));
        }
        self.used = self.prefix_width();
    }

    /// End the current line if it has content
    fn flush(&mut self) {
        if !self.spans.is_empty() && self.used > self.prefix_width() {
            let mut spans = std::mem::take(&mut self.spans);
            // Trailing spaces would count against the width
            while let Some(last) = spans.last_mut() {
                let trimmed = last.content.trim_end();
                if !trimmed.is_empty() {
                    let trimmed = trimmed.to_string();
                    last.content = trimmed.into();
                    break;
                }
                spans.pop();
            }
            self.lines.push(Line::from(spans));
        }
        self.spans.clear();
        self.used = 0;
    }

    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn push_line(&mut self, line: Line<'static>) {
        self.flush();
        self.lines.push(line);
    }

    /// Flow `text` word by word, breaking lines at `width`
    fn push_words(&mut self, text: &str, style: Style) {
        for word in text.split_inclusive(' ') {
            if self.spans.is_empty() {
                self.start_line();
            }
            let at_line_start = self.used == self.prefix_width();
            let word = if at_line_start { word.trim_start() } else { word };
            if word.is_empty() {
                continue;
            }

            let visible = word.trim_end().width();
            if !at_line_start && self.used + visible > self.width {
                self.flush();
                self.start_line();
                let word = word.trim_start();
                self.used += word.width();
                self.spans.push(Span::styled(word.to_string(), style));
                continue;
            }

            self.used += word.width();
            self.spans.push(Span::styled(word.to_string(), style));
        }
    }

    fn inline_style(&self, inline: &Inline) -> Style {
        let mut style = Style::default();
        if inline.code {
            style = style.fg(self.theme.code_inline);
        }
        if inline.link {
            style = style
                .fg(self.theme.link)
                .add_modifier(Modifier::UNDERLINED);
        }
        if inline.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if inline.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if inline.strike {
            style = style.add_modifier(Modifier::CROSSED_OUT | Modifier::DIM);
        }
        style
    }

    fn heading_style(&self, level: u8) -> Style {
        let color = match level {
            1 => self.theme.heading_primary,
            2 => self.theme.heading_secondary,
            _ => self.theme.heading_other,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Convert parsed segments to ratatui Lines no wider than `width`
pub fn segments_to_lines(segments: &[Segment], width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = LineBuilder::new(width, theme);
    let marker_style = Style::default().fg(theme.border);

    for segment in segments {
        match segment {
            Segment::Text { text, inline } => {
                let style = out.inline_style(inline);
                // Raw HTML blocks may carry their own newlines
                let mut parts = text.split('\n').peekable();
                while let Some(part) = parts.next() {
                    out.push_words(part, style);
                    if parts.peek().is_some() {
                        out.flush();
                    }
                }
            }
            Segment::LinkTarget(url) => {
                out.push_words(&format!(" ({})", url), Style::default().fg(theme.muted));
            }
            Segment::Heading { level, text } => {
                out.blank();
                let style = out.heading_style(*level);
                let prefix = "#".repeat(*level as usize);
                out.push_words(&format!("{} {}", prefix, text), style);
                out.blank();
            }
            Segment::CodeBlock(code) => {
                out.flush();
                let style = Style::default().fg(theme.code_block);
                for line in code.lines() {
                    out.push_line(Line::from(Span::styled(format!("  {}", line), style)));
                }
                out.blank();
            }
            Segment::SoftBreak => out.push_words(" ", Style::default()),
            Segment::HardBreak => out.flush(),
            Segment::ParagraphEnd => out.blank(),
            Segment::ItemStart { number } => {
                out.flush();
                // Nested items inherit the parent's continuation indent
                let marker = match number {
                    Some(n) => format!("{}. ", n),
                    None => "• ".to_string(),
                };
                out.start_line();
                out.used += marker.width();
                out.spans.push(Span::styled(marker.clone(), marker_style));
                // Continuation lines align under the item text
                out.prefix.push((" ".repeat(marker.width()), Style::default()));
            }
            Segment::ItemEnd => {
                out.flush();
                out.prefix.pop();
            }
            Segment::ListEnd => out.blank(),
            Segment::QuoteStart => {
                out.flush();
                out.prefix.push(("│ ".to_string(), marker_style));
            }
            Segment::QuoteEnd => {
                out.flush();
                out.prefix.pop();
                out.blank();
            }
            Segment::Rule => {
                let rule = "─".repeat(width.saturating_sub(2).max(3));
                out.push_line(Line::from(Span::styled(rule, marker_style)));
                out.blank();
            }
        }
    }

    out.finish()
}

/// Strip control characters that can cause TUI rendering artifacts
///
/// ANSI escape sequences are dropped whole; tab and newline are kept.
fn sanitize_for_tui(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => {
                // ESC [ <params> <letter>
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            '\t' | '\n' => result.push(ch),
            c if c.is_control() => {}
            _ => result.push(ch),
        }
    }

    result
}

/// Parse markdown and lay it out for a viewport `width` columns wide
pub fn render_markdown(markdown: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let sanitized = sanitize_for_tui(markdown);
    let segments = parse_markdown(&sanitized);
    segments_to_lines(&segments, width, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_parse_inline_formatting() {
        let segments = parse_markdown("Use **bold** and `code`");
        assert!(segments.contains(&Segment::Text {
            text: "bold".to_string(),
            inline: Inline {
                strong: true,
                ..Inline::default()
            }
        }));
        assert!(segments.contains(&Segment::Text {
            text: "code".to_string(),
            inline: Inline {
                code: true,
                ..Inline::default()
            }
        }));
    }

    #[test]
    fn test_parse_ordered_list_numbers() {
        let segments = parse_markdown("3. three\n4. four\n");
        let numbers: Vec<_> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::ItemStart { number, .. } => *number,
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![3, 4]);
    }

    #[test]
    fn test_lines_never_exceed_width() {
        let md = "# Title\n\nThe quick brown fox jumps over the lazy dog and keeps \
                  on running through the field until the sun goes down.\n\n\
                  - a list item that is long enough to wrap onto another line\n";
        let width = 20;
        let lines = render_markdown(md, width, &Theme::default());
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.width() <= width, "line too wide: {:?}", line);
        }
    }

    #[test]
    fn test_heading_and_paragraph_are_separated() {
        let lines = render_markdown("# Hello\n\nworld", 40, &Theme::default());
        assert_eq!(plain(&lines), vec!["# Hello", "", "world"]);
    }

    #[test]
    fn test_code_block_is_verbatim_and_indented() {
        let lines = render_markdown("```\nlet x = 1;\n```", 40, &Theme::default());
        assert_eq!(plain(&lines), vec!["  let x = 1;"]);
    }

    #[test]
    fn test_link_shows_target() {
        let lines = render_markdown("[RFC](https://www.rfc-editor.org)", 80, &Theme::default());
        assert_eq!(plain(&lines), vec!["RFC (https://www.rfc-editor.org)"]);
    }

    #[test]
    fn test_quote_prefix_on_every_line() {
        let lines = render_markdown("> one two three four", 10, &Theme::default());
        let text = plain(&lines);
        assert!(text.len() > 1);
        assert!(text.iter().all(|l| l.starts_with("│ ")));
    }

    #[test]
    fn test_sanitize_strips_escapes() {
        assert_eq!(sanitize_for_tui("a\x1b[31mred\x1b[0m\r\n"), "ared\n");
    }
}
