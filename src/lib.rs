//! # Frames of Life
//!
//! Marketing site and content admin for a photography studio. Visitors get a
//! single page (hero, services, gallery, pricing, contact footer and an
//! enquiry form); the operator gets a password-gated panel for managing the
//! gallery images and pricing packages shown on it.
//!
//! # Architecture: One Shared Content Service
//!
//! ```text
//! store (JSON file)  ←→  Repository<GalleryImage> ┐
//!                    ←→  Repository<PricingPlan>  ┴→ ContentContext (Arc)
//!                                                      ├→ editors (admin writes)
//!                                                      ├→ render (public + admin HTML)
//!                                                      └→ subscribers (change events)
//! ```
//!
//! Every piece of the site reads and writes content through one
//! [`context::ContentContext`]. Each collection is loaded once, seeded with
//! the built-in defaults on first run, and written back in full after every
//! successful mutation. An edit made in the admin panel is therefore what the
//! next public render shows.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Key-value persistence: in-memory and single-file JSON backends |
//! | [`model`] | `GalleryImage` and `PricingPlan`, their drafts and validation |
//! | [`defaults`] | The stock gallery, pricing plans, services and category suggestions |
//! | [`ids`] | Identifier generation for new records |
//! | [`repository`] | Generic persisted collection with add/update/remove |
//! | [`context`] | The shared content service with change notification |
//! | [`auth`] | Admin session gate and pluggable credential check |
//! | [`editor`] | Gallery and pricing editor state machines |
//! | [`route`] | URL → public site or admin panel |
//! | [`render`] | Maud templates for the public site, login page and dashboard |
//! | [`enquiry`] | Asynchronous, cancellable enquiry submission |
//! | [`config`] | `config.toml` loading, validation and color CSS |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fail Soft on Stored Data
//!
//! A store entry that is missing or does not parse falls back to the
//! defaults, with a warning. A corrupt entry never takes the site down.
//!
//! ## Validation Is a No-Op, Not an Error
//!
//! An incomplete gallery draft or a pricing draft without a name is not
//! saved, and the call reports `None`/`false` rather than failing. The admin
//! UI only enables its save controls for complete drafts, so reaching the
//! repository with one is not exceptional.
//!
//! ## Static HTML, No Client Framework
//!
//! Pages are rendered with [Maud](https://maud.lambda.xyz/). The lightbox and
//! the enquiry dialog are CSS `:target` overlays, so the built site is a
//! single `index.html` that works from any file server.

pub mod auth;
pub mod config;
pub mod context;
pub mod defaults;
pub mod editor;
pub mod enquiry;
pub mod ids;
pub mod logging;
pub mod model;
pub mod output;
pub mod render;
pub mod repository;
pub mod route;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
