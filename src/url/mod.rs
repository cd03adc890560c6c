//! URL handling module for SEO Checker
//!
//! This module validates target URLs, loads URL lists from files, and
//! resolves redirect targets announced by challenge pages.

mod list;
mod resolve;
mod validate;

pub use list::{load_url_list, parse_url_list};
pub use resolve::resolve_redirect;
pub use validate::validate_url;
