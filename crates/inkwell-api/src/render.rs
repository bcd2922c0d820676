use axum::response::Html;
use inkwell_types::{MAX_CONTENT_CHARS, View};

const STYLE: &str = "
body { font-family: Georgia, serif; max-width: 36rem; margin: 4rem auto; padding: 0 1rem; color: #222; }
.content { font-size: 1.4rem; white-space: pre-wrap; overflow-wrap: anywhere; }
.meta { color: #777; font-size: 0.85rem; }
nav { display: flex; gap: 1rem; margin-top: 2rem; }
nav .disabled { color: #bbb; }
textarea { width: 100%; font: inherit; font-size: 1.1rem; }
";

/// Render one entry page. In edit mode the entry is replaced by a form that
/// appends a new entry; saved entries are never changed.
pub fn render_page(view: &View) -> Html<String> {
    let mut body = if view.editing {
        format!(
            r#"<form method="post" action="/save">
<textarea name="newText" rows="6" maxlength="{max}" required autofocus>{content}</textarea>
<p><button type="submit">Save</button> <a href="{cancel}">Cancel</a></p>
</form>"#,
            max = MAX_CONTENT_CHARS,
            content = escape_html(&view.content),
            cancel = view.view_link(),
        )
    } else {
        format!(r#"<p class="content">{}</p>"#, escape_html(&view.content))
    };

    body.push_str(&format!(
        r#"
<p class="meta">{timestamp} &middot; {current} / {total}</p>
<nav>{prev} {next} <a href="{edit}">Edit</a></nav>"#,
        timestamp = escape_html(&view.timestamp),
        current = view.current_index,
        total = view.total_count,
        prev = nav_link(view.prev_link(), "&larr; Previous"),
        next = nav_link(view.next_link(), "Next &rarr;"),
        edit = view.edit_link(),
    ));

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Entry {current}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        current = view.current_index,
    ))
}

fn nav_link(href: Option<String>, label: &str) -> String {
    match href {
        Some(href) => format!(r#"<a href="{}">{}</a>"#, href, label),
        None => format!(r#"<span class="disabled">{}</span>"#, label),
    }
}

/// Entries are plain text; anything that looks like markup is shown literally.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
