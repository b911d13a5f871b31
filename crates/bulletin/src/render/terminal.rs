//! Plain-text rendering for terminals.

use std::fmt::Write as _;
use std::io::Write;

use super::{PostCard, Renderer, View};
use crate::error::Result;

/// Writes views as plain text.
///
/// Each render is assembled in memory and written in one call. Control
/// characters in user text are shown escaped (`\u{1b}`) so posts cannot move
/// the cursor, change colors or otherwise drive the terminal.
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    /// Render to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The writer being rendered to.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &View) -> Result<()> {
        let text = render_text(view);
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

fn render_text(view: &View) -> String {
    let mut text = String::new();
    match view {
        View::Empty { message } => {
            let _ = writeln!(text, "{}", sanitize_line(message));
        }
        View::Posts { cards } => {
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    text.push('\n');
                }
                write_card(&mut text, card);
            }
        }
    }
    text
}

fn write_card(text: &mut String, card: &PostCard) {
    let _ = writeln!(
        text,
        "{}  {}",
        sanitize_line(&card.author),
        card.display_time
    );
    for line in card.content.lines() {
        let _ = writeln!(text, "    {}", sanitize_line(line));
    }
    let _ = writeln!(
        text,
        "  [{}] {}",
        card.delete_label,
        sanitize_line(&card.id)
    );
}

/// Escape every control character in `line`, tabs and bidirectional
/// formatting characters included.
#[must_use]
pub fn sanitize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        if c.is_control() || is_bidi_control(c) {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

/// Characters that change the display order of the text around them.
fn is_bidi_control(c: char) -> bool {
    matches!(
        c,
        '\u{061c}' | '\u{200e}' | '\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2066}'..='\u{2069}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, author: &str, content: &str) -> PostCard {
        PostCard {
            id: id.to_string(),
            author: author.to_string(),
            anonymous: false,
            display_time: "2024/01/15 09:05".to_string(),
            datetime: "2024-01-15T00:05:00.000Z".to_string(),
            content: content.to_string(),
            delete_label: "Delete post".to_string(),
        }
    }

    fn rendered(view: &View) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(view).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_state() {
        let view = View::Empty {
            message: "No posts".to_string(),
        };
        assert_eq!(rendered(&view), "No posts\n");
    }

    #[test]
    fn test_card_layout() {
        let view = View::Posts {
            cards: vec![card("1", "A", "hi\nthere")],
        };
        assert_eq!(
            rendered(&view),
            "A  2024/01/15 09:05\n    hi\n    there\n  [Delete post] 1\n"
        );
    }

    #[test]
    fn test_cards_separated_by_blank_line() {
        let view = View::Posts {
            cards: vec![card("2", "B", "b"), card("1", "A", "a")],
        };
        let text = rendered(&view);
        assert!(text.contains("[Delete post] 2\n\nA  "));
        assert!(text.find("B  ").unwrap() < text.find("A  ").unwrap());
    }

    #[test]
    fn test_control_characters_escaped() {
        let view = View::Posts {
            cards: vec![card("1", "evil\u{1b}[2J", "\u{1b}[31mred\r")],
        };
        let text = rendered(&view);
        assert!(!text.contains('\u{1b}'));
        assert!(!text.contains('\r'));
        assert!(text.contains("evil\\u{1b}[2J"));
        assert!(text.contains("\\u{1b}[31mred"));
    }

    #[test]
    fn test_sanitize_line() {
        assert_eq!(sanitize_line("plain"), "plain");
        assert_eq!(sanitize_line("a\tb"), "a\\tb");
        assert_eq!(sanitize_line("日本語"), "日本語");
    }

    #[test]
    fn test_bidi_overrides_escaped() {
        let view = View::Posts {
            cards: vec![card("1", "admin\u{202e}txt.exe", "a\u{2066}b\u{2069}c\u{200f}")],
        };
        let text = rendered(&view);
        for c in ['\u{202e}', '\u{2066}', '\u{2069}', '\u{200f}'] {
            assert!(!text.contains(c), "{c:?} passed through");
        }
        assert!(text.contains("admin\\u{202e}txt.exe"));
        assert_eq!(sanitize_line("\u{061c}x"), "\\u{61c}x");
    }

    #[test]
    fn test_zero_width_joiner_kept() {
        assert_eq!(sanitize_line("👩\u{200d}💻"), "👩\u{200d}💻");
    }

    #[test]
    fn test_render_twice_same_output() {
        let view = View::Posts {
            cards: vec![card("1", "A", "hi")],
        };
        assert_eq!(rendered(&view), rendered(&view));
    }
}
