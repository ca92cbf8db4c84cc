//! Login page.

use maud::{Markup, html};

use salat_service::dashboard::PageHeader;

use super::layout::{NoticeLevel, notice, page};

/// Renders the login form. `rejected` shows the failed-login message.
pub fn login_page(header: &PageHeader, rejected: bool, footer: &str) -> Markup {
    let content = html! {
        @if rejected {
            (notice(NoticeLevel::Error, "Username/password is incorrect."))
        } @else {
            (notice(NoticeLevel::Warning, "Please log in."))
        }
        form method="post" action="/login" {
            fieldset {
                legend { "Login" }
                p {
                    label for="username" { "Username" }
                    " "
                    input id="username" name="username" autocomplete="username" required;
                }
                p {
                    label for="password" { "Password" }
                    " "
                    input id="password" name="password" type="password" autocomplete="current-password" required;
                }
                p { button type="submit" { "Log in" } }
            }
        }
    };

    page(header, None, content, footer)
}
