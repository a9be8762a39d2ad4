//! Admin pages: the login form and the dashboard.

use maud::{Markup, html};

use super::site::render_plan_card;
use super::{base_document, brand, placeholder_onerror, stylesheet};
use crate::config::SiteConfig;
use crate::editor::{GalleryEditor, PlanTarget, PricingEditor};
use crate::model::{GalleryImage, ImageDraft, PlanColor, PlanDraft};
use crate::route::{AdminTab, admin_tab_href, exit_admin_href};

/// Shown in the editor preview when the entered URL does not load.
const INVALID_IMAGE: &str = "https://via.placeholder.com/400x300?text=Invalid+Image+URL";

fn admin_title(config: &SiteConfig) -> String {
    format!("{} Admin", config.site.name)
}

fn admin_heading(config: &SiteConfig) -> Markup {
    html! {
        h1.admin-brand { (brand(&config.site.name)) " " span.admin-label { "Admin" } }
    }
}

/// Login form. `error` is shown in a banner above the fields.
pub fn render_login(config: &SiteConfig, current_url: &str, error: Option<&str>) -> Markup {
    let css = stylesheet(config);
    let content = html! {
        main.login-page {
            div.login-card {
                (admin_heading(config))
                @if let Some(message) = error {
                    div.error-banner role="alert" { (message) }
                }
                form.login-form method="post" {
                    label for="username" { "Username" }
                    input #username type="text" name="username" placeholder="admin";
                    label for="password" { "Password" }
                    input #password type="password" name="password" placeholder="password";
                    button.button type="submit" { "Login" }
                }
                a.return-link href=(exit_admin_href(current_url)) { "Return to Website" }
            }
        }
    };
    base_document(&admin_title(config), &css, Some("admin-view"), content)
}

/// Dashboard with the selected tab's editor.
pub fn render_dashboard(
    config: &SiteConfig,
    current_url: &str,
    tab: AdminTab,
    gallery: &GalleryEditor,
    pricing: &PricingEditor,
) -> Markup {
    let css = stylesheet(config);
    let content = html! {
        header.admin-header {
            (admin_heading(config))
            div.admin-actions {
                a.exit-admin href=(exit_admin_href(current_url)) { "Exit Admin" }
                form.logout-form method="post" {
                    input type="hidden" name="action" value="logout";
                    button.link-button type="submit" { "Logout" }
                }
            }
        }
        main.admin-main {
            nav.admin-tabs {
                @for (each, label) in [
                    (AdminTab::Gallery, "Gallery Management"),
                    (AdminTab::Pricing, "Pricing Management"),
                ] {
                    a.tab.active[each == tab] href=(admin_tab_href(current_url, each)) { (label) }
                }
            }
            @match tab {
                AdminTab::Gallery => { (render_gallery_panel(gallery)) }
                AdminTab::Pricing => { (render_pricing_panel(pricing)) }
            }
        }
    };
    base_document(&admin_title(config), &css, Some("admin-view"), content)
}

// ============================================================================
// Gallery
// ============================================================================

pub fn render_gallery_panel(editor: &GalleryEditor) -> Markup {
    let images = editor.images();
    html! {
        section.admin-panel #gallery-admin {
            div.panel-header {
                h2 { "Gallery Management" }
                @if editor.add_form().is_none() {
                    button.button type="button" data-action="open-add" { "Add New Image" }
                }
            }
            datalist #category-suggestions {
                @for category in editor.category_suggestions() {
                    option value=(category) {}
                }
            }
            @if let Some(draft) = editor.add_form() {
                div.editor-card.add-image {
                    h3 { "Add New Image" }
                    (image_fields(draft))
                    div.form-actions {
                        button.link-button type="button" data-action="close-add" { "Cancel" }
                        button.button type="submit" disabled[!editor.can_add()] { "Add Image" }
                    }
                }
            }
            @if images.is_empty() {
                p.empty-note { "No images in the gallery." }
            }
            div.admin-grid {
                @for image in &images {
                    @match editor.editing().filter(|e| e.id == image.id) {
                        Some(editing) => {
                            div.editor-card.edit-image data-id=(image.id) {
                                (image_fields(&editing.draft))
                                div.form-actions {
                                    button.link-button type="button" data-action="cancel-edit" { "Cancel" }
                                    button.button type="submit" data-action="save" data-id=(image.id) { "Save" }
                                }
                            }
                        }
                        None => { (image_card(image)) }
                    }
                }
            }
        }
    }
}

fn image_fields(draft: &ImageDraft) -> Markup {
    html! {
        div.field-row {
            div {
                label { "Image URL" }
                input type="url" name="src" value=(draft.src) placeholder="https://example.com/image.jpg";
            }
            div {
                label { "Alt Text" }
                input type="text" name="alt" value=(draft.alt) placeholder="Wedding photography";
            }
            div {
                label { "Category" }
                input type="text" name="category" value=(draft.category) list="category-suggestions" placeholder="Select a category";
            }
        }
        div.preview {
            label { "Preview" }
            @if draft.src.is_empty() {
                div.preview-empty { "Image preview will appear here" }
            } @else {
                img src=(draft.src) alt="Preview" onerror=(placeholder_onerror(INVALID_IMAGE));
            }
        }
    }
}

fn image_card(image: &GalleryImage) -> Markup {
    html! {
        div.admin-card data-id=(image.id) {
            img src=(image.src) alt=(image.alt) onerror=(placeholder_onerror(INVALID_IMAGE));
            div.admin-card-body {
                h3 { (image.alt) }
                span.category { (image.category) }
                div.card-actions {
                    button.link-button type="button" data-action="edit" data-id=(image.id) { "Edit" }
                    button.link-button.danger type="button" data-action="delete" data-id=(image.id) { "Delete" }
                }
            }
        }
    }
}

// ============================================================================
// Pricing
// ============================================================================

fn color_label(color: PlanColor) -> &'static str {
    match color {
        PlanColor::Accent => "Gold",
        PlanColor::Neutral => "Neutral",
    }
}

pub fn render_pricing_panel(editor: &PricingEditor) -> Markup {
    let plans = editor.plans();
    html! {
        section.admin-panel #pricing-admin {
            div.panel-header {
                h2 { "Pricing Management" }
                @if editor.form().is_none() {
                    button.button type="button" data-action="open-add" { "Add New Package" }
                }
            }
            @if let Some(form) = editor.form() {
                div.editor-card.plan-form {
                    h3 {
                        @match form.target {
                            PlanTarget::New => { "Add New Package" }
                            PlanTarget::Existing(_) => { "Edit Package" }
                        }
                    }
                    (plan_fields(&form.draft))
                    div.form-actions {
                        button.link-button type="button" data-action="cancel" { "Cancel" }
                        button.button type="submit" disabled[form.draft.name.is_empty()] { "Save Package" }
                    }
                }
            }
            @if plans.is_empty() {
                p.empty-note { "No pricing packages." }
            }
            div.pricing-grid {
                @for plan in &plans {
                    div.admin-plan data-id=(plan.id) {
                        (render_plan_card(plan))
                        div.card-actions {
                            button.link-button type="button" data-action="edit" data-id=(plan.id) { "Edit" }
                            button.link-button.danger type="button" data-action="delete" data-id=(plan.id) { "Delete" }
                        }
                    }
                }
            }
        }
    }
}

fn plan_fields(draft: &PlanDraft) -> Markup {
    html! {
        div.field-row {
            div {
                label { "Package Name" }
                input type="text" name="name" value=(draft.name);
            }
            div {
                label { "Price ($)" }
                input type="number" name="price" value=(draft.price);
            }
        }
        label { "Description" }
        textarea name="description" rows="2" { (draft.description) }
        div.field-row {
            label.checkbox {
                input type="checkbox" name="popular" checked[draft.popular];
                " Mark as popular"
            }
            div {
                label { "Color Theme" }
                select name="color" {
                    @for color in PlanColor::ALL {
                        option value=(color.as_str()) selected[draft.color == color] { (color_label(color)) }
                    }
                }
            }
        }
        (list_editor("Features", "features", "Add a feature", &draft.features))
        (list_editor("Not Included", "not_included", "Add not included item", &draft.not_included))
    }
}

fn list_editor(title: &str, name: &str, placeholder: &str, items: &[String]) -> Markup {
    html! {
        fieldset.list-editor {
            legend { (title) }
            ul {
                @for (idx, item) in items.iter().enumerate() {
                    li {
                        span { (item) }
                        button.link-button.danger type="button" data-action={ "remove-" (name) } data-index=(idx) { "Remove" }
                    }
                }
            }
            div.list-add {
                input type="text" name={ "new-" (name) } placeholder=(placeholder);
                button.link-button type="button" data-action={ "push-" (name) } { "Add" }
            }
        }
    }
}
