//! Integration tests driving the full router against fake upstream APIs.

mod helpers;

mod auth_test;
mod dashboard_test;
mod offsets_test;
mod page_test;
