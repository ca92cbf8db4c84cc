//! Shared page shell.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use salat_service::dashboard::PageHeader;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 52rem; margin: 0 auto; padding: 1rem; background: #f5f6f8; color: #2c3e50; }
.title-container { text-align: center; padding: 2.5rem 1rem; background: #1f4e5f; color: #fff; border-radius: 15px; box-shadow: 0 4px 15px rgba(0,0,0,0.3); }
.title-container h1 { font-size: 2rem; margin-bottom: 5px; }
.title-container h2 { font-size: 1.2rem; margin-top: 0; font-weight: normal; }
.bar { display: flex; justify-content: space-between; align-items: center; margin: 1rem 0; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1rem; }
.prayer-card { padding: 1.5rem; border-radius: 15px; background: #fff; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
.prayer-card h3 { margin: 0 0 0.5rem 0; }
.prayer-time { font-size: 1.4rem; font-weight: bold; margin: 0.5rem 0; }
.muted { color: #6b7b8c; font-size: 0.9rem; margin: 0.2rem 0; }
.notice { padding: 0.8rem 1rem; border-radius: 8px; margin: 1rem 0; }
.notice.success { background: #e3f6e8; }
.notice.warning { background: #fff4d6; }
.notice.error { background: #fde2e1; }
form.inline { display: inline; }
fieldset { border: 1px solid #d5dbe1; border-radius: 8px; margin: 1rem 0; }
label { display: inline-block; min-width: 6rem; }
input[type=number] { width: 4.5rem; }
footer { margin-top: 2rem; border-top: 1px solid #d5dbe1; padding-top: 0.5rem; color: #6b7b8c; font-size: 0.85rem; }
"#;

/// Kind of inline notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "notice success",
            Self::Warning => "notice warning",
            Self::Error => "notice error",
        }
    }
}

/// Client re-poll directive.
#[derive(Debug, Clone, Copy)]
pub struct Refresh<'a> {
    pub seconds: u64,
    /// Path and query to reload.
    pub target: &'a str,
}

pub fn notice(level: NoticeLevel, text: &str) -> Markup {
    html! {
        div class=(level.class()) role="status" { (text) }
    }
}

/// Full document: title banner with dates, `content`, footer.
///
/// `refresh` adds a meta refresh so the browser re-polls `target` every
/// `seconds`.
pub fn page(
    header: &PageHeader,
    refresh: Option<Refresh<'_>>,
    content: Markup,
    footer: &str,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if let Some(refresh) = refresh {
                    meta http-equiv="refresh" content=(format!("{};url={}", refresh.seconds, refresh.target));
                }
                title { (header.title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="title-container" {
                    h1 { "🕌 " (header.title) }
                    h2 {
                        (header.location) " - " (header.gregorian_date) " | " (header.hijri_date)
                    }
                }
                (content)
                footer { (footer) }
            }
        }
    }
}
