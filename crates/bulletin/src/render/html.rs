//! HTML fragment rendering.

use std::fmt::Write as _;
use std::io::Write;

use ammonia::clean_text;

use super::{Locale, PostCard, Renderer, View};
use crate::error::Result;

/// Writes views as an HTML `<section>` of `<article>` cards.
///
/// Every piece of text, in element bodies and attributes alike, goes through
/// [`ammonia::clean_text`]; posts are never interpreted as markup.
#[derive(Debug)]
pub struct HtmlRenderer<W> {
    out: W,
    locale: Locale,
}

impl<W: Write> HtmlRenderer<W> {
    /// Render to `out`, tagging the fragment with `locale`.
    pub fn new(out: W, locale: Locale) -> Self {
        Self { out, locale }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for HtmlRenderer<W> {
    fn render(&mut self, view: &View) -> Result<()> {
        let mut html = String::new();
        let _ = writeln!(html, r#"<section id="posts" lang="{}">"#, self.locale.tag());
        match view {
            View::Empty { message } => {
                let _ = writeln!(html, r#"  <p class="empty-state">{}</p>"#, clean_text(message));
            }
            View::Posts { cards } => {
                for card in cards {
                    write_card(&mut html, card);
                }
            }
        }
        html.push_str("</section>\n");

        self.out.write_all(html.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

fn write_card(html: &mut String, card: &PostCard) {
    let author_class = if card.anonymous {
        "author anonymous"
    } else {
        "author"
    };
    let _ = writeln!(html, r#"  <article class="post" data-id="{}">"#, clean_text(&card.id));
    let _ = writeln!(
        html,
        r#"    <header><span class="{author_class}">{}</span> <time datetime="{}">{}</time></header>"#,
        clean_text(&card.author),
        clean_text(&card.datetime),
        clean_text(&card.display_time),
    );
    let _ = writeln!(html, "    <p>{}</p>", clean_text(&card.content));
    let _ = writeln!(
        html,
        r#"    <button type="button" aria-label="{}">&times;</button>"#,
        clean_text(&card.delete_label)
    );
    html.push_str("  </article>\n");
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
            delete_label: "投稿を削除".to_string(),
        }
    }

    fn rendered(view: &View) -> String {
        let mut renderer = HtmlRenderer::new(Vec::new(), Locale::Ja);
        renderer.render(view).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_state() {
        let html = rendered(&View::Empty {
            message: "none <yet>".to_string(),
        });
        assert!(html.contains(r#"<p class="empty-state">none&#32;&lt;yet&gt;</p>"#));
        assert!(!html.contains("<article"));
        assert!(html.contains(r#"lang="ja-JP""#));
    }

    #[test]
    fn test_card_markup() {
        let html = rendered(&View::Posts {
            cards: vec![card("1", "A", "hi")],
        });
        assert!(html.contains(r#"<article class="post" data-id="1">"#));
        assert!(html.contains(r#"<time datetime="2024-01-15T00:05:00.000Z">2024&#47;01&#47;15&#32;09:05</time>"#));
        assert!(html.contains("<p>hi</p>"));
        assert!(html.contains(r#"aria-label="投稿を削除""#));
    }

    #[test]
    fn test_user_text_never_becomes_markup() {
        let html = rendered(&View::Posts {
            cards: vec![card(
                r#"1" onclick="x"#,
                "<b>bold</b>",
                "<script>alert('x')</script>",
            )],
        });
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;alert(&apos;x&apos;)&lt;&#47;script&gt;"));
        assert!(html.contains(r#"data-id="1&quot;&#32;onclick&#61;&quot;x""#));
    }

    #[test]
    fn test_multiline_content_stays_in_one_paragraph() {
        let html = rendered(&View::Posts {
            cards: vec![card("1", "A", "one\ntwo")],
        });
        assert!(html.contains("<p>one&#10;two</p>"));
    }

    #[test]
    fn test_anonymous_class() {
        let mut anon = card("1", "匿名", "x");
        anon.anonymous = true;
        let html = rendered(&View::Posts { cards: vec![anon] });
        assert!(html.contains(r#"class="author anonymous""#));
    }
}
