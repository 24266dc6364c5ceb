//! HTML to Markdown conversion support.
//!
//! Two pieces are wired into the module tree and used by
//! `crate::pipeline::steps::convert`:
//! - [`html_preprocessing`]: main-content location (`extract_main_content`)
//!   and unwanted-element stripping (`clean_html_content`).
//! - [`custom_handlers`]: builds an `htmd::HtmlToMarkdown` converter (the
//!   crate's one genuinely wired htmd integration) with handlers for
//!   paragraphs, headings, code, links, lists, and inline formatting.

pub mod custom_handlers;
pub mod html_preprocessing;
