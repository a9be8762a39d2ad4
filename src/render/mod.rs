//! HTML rendering.
//!
//! Turns the content held by the shared
//! [`ContentContext`](crate::context::ContentContext) into static HTML. The
//! renderer only ever reads.
//!
//! ## Pages
//!
//! The site is a single page, addressed by URL (see [`crate::route`]):
//!
//! - **Public site** ([`site`]): navigation, hero, services, gallery with
//!   lightbox, pricing, footer and the enquiry dialog, in that order.
//! - **Admin login** ([`admin::render_login`]): shown for `?admin=true` while
//!   logged out.
//! - **Admin dashboard** ([`admin::render_dashboard`]): gallery and pricing
//!   editors, shown for `?admin=true` while logged in.
//!
//! ## Interactivity without JavaScript
//!
//! The lightbox and the enquiry dialog are overlays opened with fragment
//! links (`#lightbox-3`, `#enquiry`) and shown with the CSS `:target`
//! selector. The only script is an inline `onerror` handler that swaps a
//! broken image for the configured placeholder.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and prefixed with the
//! color custom properties generated from `config.toml`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

pub mod admin;
pub mod site;

use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::auth::SessionGate;
use crate::config::{self, SiteConfig};
use crate::context::ContentContext;
use crate::editor::{GalleryEditor, PricingEditor};
use crate::route::{AdminTab, View};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../../static/style.css");

/// Full stylesheet: configured colors followed by the static rules.
pub fn stylesheet(config: &SiteConfig) -> String {
    let color_css = config::generate_color_css(&config.colors);
    format!("{}\n\n{}", color_css, CSS_STATIC)
}

/// Year shown in the footer copyright line.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Render whatever `url` addresses.
///
/// Admin URLs render the login page or the dashboard depending on
/// `session`; the dashboard starts with every editor form closed.
pub fn render_url(
    url: &str,
    config: &SiteConfig,
    content: &Arc<ContentContext>,
    session: &SessionGate,
    year: i32,
) -> Markup {
    match View::from_url(url) {
        View::Public => site::render_site(&content.snapshot(), config, url, year),
        View::Admin if session.is_logged_in() => {
            let gallery = GalleryEditor::new(Arc::clone(content));
            let pricing = PricingEditor::new(Arc::clone(content));
            admin::render_dashboard(config, url, AdminTab::from_url(url), &gallery, &pricing)
        }
        View::Admin => admin::render_login(config, url, None),
    }
}

/// Write the public site to `output_dir/index.html`.
pub fn build_site(
    output_dir: &Path,
    config: &SiteConfig,
    content: &ContentContext,
    year: i32,
) -> Result<PathBuf, RenderError> {
    fs::create_dir_all(output_dir)?;
    let page = site::render_site(&content.snapshot(), config, "/", year);
    let index = output_dir.join("index.html");
    fs::write(&index, page.into_string())?;
    tracing::info!(path = %index.display(), "site written");
    Ok(index)
}

// ============================================================================
// Shared components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Business name with the outer words in the accent color.
fn brand(name: &str) -> Markup {
    let words: Vec<&str> = name.split_whitespace().collect();
    html! {
        span.brand {
            @for (idx, word) in words.iter().enumerate() {
                @if idx > 0 { " " }
                @let plain = idx > 0 && idx + 1 < words.len();
                span class=[(!plain).then_some("accent")] { (word) }
            }
        }
    }
}

/// Inline handler that swaps in `placeholder` once, if the image fails.
///
/// The URL lands in a single-quoted JS string, so `\` and `'` are escaped.
fn placeholder_onerror(placeholder: &str) -> String {
    let escaped = placeholder.replace('\\', "\\\\").replace('\'', "\\'");
    format!("this.onerror=null;this.src='{escaped}';")
}

fn markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

// ============================================================================
// Tests
// ============================================================================
