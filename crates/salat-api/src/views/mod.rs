//! Server-rendered HTML built with `maud`.

pub mod dashboard;
pub mod layout;
pub mod login;

pub use dashboard::dashboard_page;
pub use login::login_page;
