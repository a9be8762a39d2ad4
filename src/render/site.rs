//! The public site.

use maud::{Markup, html};

use super::{base_document, brand, markdown, placeholder_onerror, stylesheet};
use crate::config::{SiteConfig, SiteInfo};
use crate::context::ContentSnapshot;
use crate::defaults::{QUICK_LINKS, SERVICES, SOCIAL_LINKS};
use crate::enquiry::{DialogState, EventType};
use crate::model::{GalleryImage, PlanColor, PricingPlan};
use crate::route::admin_entry_href;

/// Fragment that opens the enquiry dialog.
pub const ENQUIRY_TARGET: &str = "enquiry";

/// Services listed in the footer. The full list is in the services section.
const FOOTER_SERVICES: usize = 5;

/// Renders the whole public page.
///
/// `current_url` is the address the page is served at; the footer's admin
/// link is derived from it. `year` goes into the copyright line.
pub fn render_site(
    content: &ContentSnapshot,
    config: &SiteConfig,
    current_url: &str,
    year: i32,
) -> Markup {
    let css = stylesheet(config);
    let page = html! {
        (render_nav(&config.site))
        main {
            (render_hero(&config.site))
            (render_services())
            (render_gallery(&content.gallery, &config.site))
            (render_pricing(&content.pricing))
        }
        (render_footer(&config.site, current_url, year))
        (render_enquiry_dialog(&DialogState::Editing))
    };
    base_document(&config.site.name, &css, None, page)
}

pub fn render_nav(site: &SiteInfo) -> Markup {
    html! {
        nav.site-nav {
            a.nav-brand href="#home" { (brand(&site.name)) }
            input.nav-toggle type="checkbox" id="nav-toggle";
            label.nav-hamburger for="nav-toggle" aria-label="Menu" {
                span.hamburger-line {}
                span.hamburger-line {}
                span.hamburger-line {}
            }
            ul.nav-links {
                @for (label, href) in QUICK_LINKS {
                    li { a href=(href) { (label) } }
                }
            }
        }
    }
}

fn render_hero(site: &SiteInfo) -> Markup {
    let background = format!("background-image: url(\"{}\");", site.hero_image);
    html! {
        section.hero #home style=(background) {
            div.hero-overlay {}
            div.hero-content {
                h1 {
                    span.accent { (site.headline) }
                    span { (site.headline_emphasis) }
                }
                p { (site.intro) }
                a.button.button-pill href={ "#" (ENQUIRY_TARGET) } { "Get Enquiry Now" }
            }
            a.scroll-hint href="#services" aria-label="Scroll to services" { "↓" }
        }
    }
}

fn section_heading(lead: &str, rest: &str, intro: &str) -> Markup {
    html! {
        header.section-heading {
            h2 { span.accent { (lead) } " " (rest) }
            div.rule {}
            p { (intro) }
        }
    }
}

fn render_services() -> Markup {
    html! {
        section.services #services {
            (section_heading(
                "Our",
                "Services",
                "We offer a wide range of professional photography services to meet your needs, from candid moments to cinematic storytelling.",
            ))
            div.service-grid {
                @for service in &SERVICES {
                    article.service-card {
                        h3 { (service.title) }
                        p { (service.description) }
                    }
                }
            }
        }
    }
}

/// Gallery grid plus one lightbox overlay per image.
///
/// Tiles link to `#lightbox-{n}` (1-based); closing the lightbox returns to
/// `#gallery`.
pub fn render_gallery(images: &[GalleryImage], site: &SiteInfo) -> Markup {
    let thumb_fallback = placeholder_onerror(&site.placeholder_thumbnail);
    let full_fallback = placeholder_onerror(&site.placeholder_full);
    html! {
        section.gallery #gallery {
            (section_heading(
                "Our",
                "Gallery",
                "Browse through some of our favorite works and get inspired for your next photoshoot.",
            ))
            @if images.is_empty() {
                p.empty-note { "No images yet." }
            } @else {
                div.gallery-grid {
                    @for (idx, image) in images.iter().enumerate() {
                        a.gallery-tile href={ "#lightbox-" (idx + 1) } {
                            img src=(image.src) alt=(image.alt) loading="lazy" onerror=(thumb_fallback);
                            div.gallery-caption {
                                span.category { (image.category) }
                                h3 { (image.alt) }
                            }
                        }
                    }
                }
            }
            @for (idx, image) in images.iter().enumerate() {
                div.lightbox id={ "lightbox-" (idx + 1) } {
                    a.lightbox-backdrop href="#gallery" aria-label="Close" {}
                    a.lightbox-close href="#gallery" aria-label="Close" { "×" }
                    img src=(image.src) alt="Enlarged gallery image" onerror=(full_fallback);
                }
            }
        }
    }
}

pub fn render_pricing(plans: &[PricingPlan]) -> Markup {
    html! {
        section.pricing #pricing {
            (section_heading(
                "Our",
                "Pricing",
                "Choose the perfect photography package that suits your needs and budget. All packages can be customized to meet your specific requirements.",
            ))
            div.pricing-grid {
                @for plan in plans {
                    (render_plan_card(plan))
                }
            }
            div.custom-quote {
                p { "Need a custom package? Contact us for a personalized quote." }
                a href="#contact" { "Get a Custom Quote →" }
            }
        }
    }
}

pub fn render_plan_card(plan: &PricingPlan) -> Markup {
    let accent = plan.color == PlanColor::Accent;
    html! {
        article.plan-card.popular[plan.popular].accent[accent] {
            @if plan.popular {
                div.plan-badge { "Most Popular" }
            }
            div.plan-summary {
                h3 { (plan.name) }
                div.plan-price {
                    span.amount { "$" (plan.price) }
                    span.unit { "/package" }
                }
                p { (plan.description) }
                button.button.plan-book type="button" { "Book Now" }
            }
            div.plan-details {
                p.list-title { "What's included:" }
                ul.included {
                    @for feature in &plan.features {
                        li { (feature) }
                    }
                }
                @if !plan.not_included.is_empty() {
                    p.list-title { "Not included:" }
                    ul.excluded {
                        @for item in &plan.not_included {
                            li { (item) }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_footer(site: &SiteInfo, current_url: &str, year: i32) -> Markup {
    html! {
        footer.site-footer #contact {
            div.footer-grid {
                div.footer-about {
                    (brand(&site.name))
                    div.about-text { (markdown(&site.about)) }
                    ul.social {
                        @for (label, href) in SOCIAL_LINKS {
                            li { a href=(href) rel="noopener" { (label) } }
                        }
                    }
                }
                div {
                    h3 { "Quick Links" }
                    ul {
                        @for (label, href) in QUICK_LINKS {
                            li { a href=(href) { (label) } }
                        }
                    }
                }
                div {
                    h3 { "Services" }
                    ul {
                        @for service in SERVICES.iter().take(FOOTER_SERVICES) {
                            li { a href="#services" { (service.title) } }
                        }
                    }
                }
                div {
                    h3 { "Contact Us" }
                    ul.contact-details {
                        li.address { (site.address) }
                        li.phone { (site.phone) }
                        li.email { a href={ "mailto:" (site.email) } { (site.email) } }
                    }
                    a.footer-cta href={ "#" (ENQUIRY_TARGET) } { "Get Enquiry Now →" }
                }
            }
            div.footer-bottom {
                p { "© " (year) " " (site.name) ". All rights reserved." }
                a.admin-link href=(admin_entry_href(current_url)) { "Admin Login" }
            }
        }
    }
}

/// The enquiry overlay, as it looks in `state`.
///
/// `Closed` renders nothing. Every other state renders the overlay, which is
/// only visible while its fragment is targeted.
pub fn render_enquiry_dialog(state: &DialogState) -> Markup {
    if *state == DialogState::Closed {
        return html! {};
    }
    html! {
        div.dialog id=(ENQUIRY_TARGET) role="dialog" aria-labelledby="enquiry-title" {
            a.dialog-backdrop href="#" aria-label="Close" {}
            div.dialog-panel {
                div.dialog-accent {}
                a.dialog-close href="#" aria-label="Close" { "×" }
                header {
                    h2 #enquiry-title { "Get in Touch" }
                    p { "Fill out the form below and we'll get back to you soon." }
                }
                @match state {
                    DialogState::Submitted => {
                        div.dialog-success {
                            h3 { "Thank You!" }
                            p { "Your enquiry has been submitted successfully. We'll contact you shortly." }
                        }
                    }
                    _ => { (render_enquiry_form(state)) }
                }
            }
        }
    }
}

fn render_enquiry_form(state: &DialogState) -> Markup {
    let submitting = *state == DialogState::Submitting;
    html! {
        form.enquiry-form {
            @if let DialogState::Failed(message) = state {
                div.error-banner role="alert" { (message) }
            }
            label for="name" { "Full Name" }
            input #name type="text" name="name" required placeholder="John Doe";
            div.field-row {
                div {
                    label for="email" { "Email" }
                    input #email type="email" name="email" required placeholder="your@email.com";
                }
                div {
                    label for="phone" { "Phone" }
                    input #phone type="tel" name="phone" placeholder="+1 (555) 123-4567";
                }
            }
            div.field-row {
                div {
                    label for="eventType" { "Event Type" }
                    select #eventType name="eventType" {
                        option value="" { "Select type" }
                        @for event_type in EventType::ALL {
                            option value=(event_type.as_str()) { (event_type.label()) }
                        }
                    }
                }
                div {
                    label for="eventDate" { "Event Date" }
                    input #eventDate type="date" name="eventDate";
                }
            }
            label for="message" { "Message" }
            textarea #message name="message" rows="4" placeholder="Tell us about your photography needs..." {}
            button.button.submit type="submit" disabled[submitting] {
                @if submitting { "Submitting..." } @else { "Submit Enquiry" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    fn snapshot() -> ContentSnapshot {
        ContentSnapshot {
            gallery: defaults::gallery(),
            pricing: defaults::pricing(),
        }
    }

    fn render_default(url: &str) -> String {
        render_site(&snapshot(), &SiteConfig::default(), url, 2026).into_string()
    }

    #[test]
    fn sections_in_fixed_order() {
        let html = render_default("/");
        let positions: Vec<usize> = [
            r#"<nav class="site-nav">"#,
            r#"id="home""#,
            r#"id="services""#,
            r#"id="gallery""#,
            r#"id="pricing""#,
            r#"id="contact""#,
            r#"id="enquiry""#,
        ]
        .iter()
        .map(|needle| html.find(needle).unwrap_or_else(|| panic!("{needle} missing")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn hero_opens_enquiry() {
        let html = render_hero(&SiteInfo::default()).into_string();
        assert!(html.contains(r##"href="#enquiry""##));
        assert!(html.contains("Get Enquiry Now"));
        assert!(html.contains("Precious Moments"));
    }

    #[test]
    fn six_services() {
        let html = render_services().into_string();
        assert_eq!(html.matches("service-card").count(), 6);
        assert!(html.contains("Photography Training"));
    }

    #[test]
    fn gallery_tiles_link_to_lightboxes() {
        let html = render_gallery(&defaults::gallery(), &SiteInfo::default()).into_string();
        assert_eq!(html.matches("gallery-tile").count(), 6);
        assert!(html.contains(r##"href="#lightbox-6""##));
        assert!(html.contains(r#"id="lightbox-6""#));
        assert!(html.contains("Enlarged gallery image"));
    }

    #[test]
    fn gallery_images_fall_back_to_placeholders() {
        let html = render_gallery(&defaults::gallery(), &SiteInfo::default()).into_string();
        assert!(html.contains("400x300?text=Image+Not+Found"));
        assert!(html.contains("800x600?text=Image+Not+Found"));
        assert!(html.contains("this.onerror=null"));
    }

    #[test]
    fn empty_gallery_renders_note() {
        let html = render_gallery(&[], &SiteInfo::default()).into_string();
        assert!(html.contains("No images yet."));
        assert!(!html.contains("lightbox-1"));
    }

    #[test]
    fn pricing_shows_badge_and_lists() {
        let html = render_pricing(&defaults::pricing()).into_string();
        assert_eq!(html.matches("Most Popular").count(), 1);
        assert!(html.contains("$499"));
        assert!(html.contains("/package"));
        assert!(html.contains("Express delivery (3 days)"));
        // Professional has nothing excluded.
        assert_eq!(html.matches("Not included:").count(), 2);
        assert_eq!(html.matches("Book Now").count(), 3);
        assert!(html.contains("Get a Custom Quote"));
    }

    #[test]
    fn popular_plan_card_classes() {
        let html = render_plan_card(&defaults::pricing()[1]).into_string();
        assert!(html.starts_with(r#"<article class="plan-card popular accent">"#));
    }

    #[test]
    fn negative_price_renders() {
        let mut plan = defaults::pricing()[0].clone();
        plan.price = -5;
        assert!(render_plan_card(&plan).into_string().contains("$-5"));
    }

    #[test]
    fn footer_has_year_contact_and_admin_link() {
        let html = render_footer(&SiteInfo::default(), "/?lang=en", 2031).into_string();
        assert!(html.contains("© 2031 Frames of Life. All rights reserved."));
        assert!(html.contains("info@framesoflife.com"));
        assert!(html.contains("123 Photography Lane"));
        assert!(html.contains(r#"href="/?lang=en&amp;admin=true""#));
        assert!(html.contains("Admin Login"));
    }

    #[test]
    fn footer_lists_five_services() {
        let html = render_footer(&SiteInfo::default(), "/", 2026).into_string();
        assert!(html.contains("Portrait Sessions"));
        assert!(!html.contains("Photography Training"));
    }

    #[test]
    fn footer_about_is_markdown() {
        let site = SiteInfo {
            about: "We love **light**.".to_string(),
            ..SiteInfo::default()
        };
        let html = render_footer(&site, "/", 2026).into_string();
        assert!(html.contains("<strong>light</strong>"));
    }

    #[test]
    fn enquiry_dialog_states() {
        let editing = render_enquiry_dialog(&DialogState::Editing).into_string();
        assert!(editing.contains("Submit Enquiry"));
        assert!(editing.contains(r#"value="commercial""#));
        assert!(!editing.contains("disabled"));

        let submitting = render_enquiry_dialog(&DialogState::Submitting).into_string();
        assert!(submitting.contains("Submitting..."));
        assert!(submitting.contains("disabled"));

        let submitted = render_enquiry_dialog(&DialogState::Submitted).into_string();
        assert!(submitted.contains("Thank You!"));
        assert!(!submitted.contains("<form"));

        let failed = render_enquiry_dialog(&DialogState::Failed("offline".to_string())).into_string();
        assert!(failed.contains("offline"));

        assert!(render_enquiry_dialog(&DialogState::Closed).into_string().is_empty());
    }

    #[test]
    fn content_is_escaped() {
        let mut images = defaults::gallery();
        images[0].alt = "<script>alert('xss')</script>".to_string();
        let html = render_gallery(&images, &SiteInfo::default()).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
