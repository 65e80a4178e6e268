use std::fmt::Write as _;

use indoc::{formatdoc, indoc};
use lumen_config::ServerConfig;
use lumen_core::Prompt;
use lumen_session::{View, ViewContent};

use crate::display::Gallery;

const STYLE: &str = indoc! {"
    body { font-family: sans-serif; margin: 2rem auto; max-width: 72rem; padding: 0 1rem; }
    textarea { width: 100%; min-height: 4rem; }
    .gallery { display: flex; gap: 1rem; }
    .gallery figure { flex: 1; margin: 0; }
    .gallery img { width: 100%; }
    .error { color: #b00020; }
"};

/// Page chrome shared by every render
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub title: String,
    pub notice: String,
}

impl From<&ServerConfig> for PageSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            title: config.title.clone(),
            notice: config.notice.clone(),
        }
    }
}

/// Render the full page for a session view
pub fn render(settings: &PageSettings, view: &View) -> String {
    let prompt = view.prompt.as_ref().map_or("", Prompt::as_str);

    let content = match &view.content {
        ViewContent::Images(result) => gallery(&Gallery::new(view.prompt.as_ref(), Some(result.as_ref()))),
        ViewContent::Error(error) => format!(
            r#"<p class="error" data-category="{}">{} Try a different prompt.</p>"#,
            error.category().as_str(),
            escape(error.message())
        ),
        ViewContent::Empty => String::new(),
    };

    formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
        <meta charset="utf-8">
        <title>{title}</title>
        <style>
        {STYLE}</style>
        </head>
        <body>
        <h1>{title}</h1>
        <p class="notice">{notice}</p>
        <form method="post" action="/" onsubmit="document.getElementById('busy').hidden = false">
        <label for="prompt">Prompt</label>
        <textarea id="prompt" name="prompt">{prompt}</textarea>
        <button type="submit">Generate</button>
        </form>
        <form method="post" action="/reset">
        <button type="submit">Clear</button>
        </form>
        <p id="busy" hidden>Generating images...</p>
        {content}
        </body>
        </html>
    "#,
        title = escape(&settings.title),
        notice = escape(&settings.notice),
        prompt = escape(prompt),
    }
}

fn gallery(gallery: &Gallery) -> String {
    let mut html = String::from(r#"<div class="gallery">"#);

    for column in gallery.columns() {
        let _ = write!(
            html,
            r#"<figure><img src="{source}" alt="Generated image {number}"><figcaption><a href="{href}" download="{filename}">Download</a></figcaption></figure>"#,
            source = column.source,
            number = column.index + 1,
            href = column.download_href(),
            filename = escape(&column.filename),
        );
    }

    html.push_str("</div>");
    html
}

/// Escape text for use in element content and quoted attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}
