//! Built-in site content.
//!
//! This is the one place the stock gallery, pricing plans and service list
//! are written down. Repository seeding and the public renderer both read
//! from here, so a store reset always shows the same content everywhere.

use crate::model::{GalleryImage, PlanColor, PricingPlan};

/// A service offered by the studio. Static; not editable from the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SERVICES: [Service; 6] = [
    Service {
        title: "Candid Photography",
        description: "Capture authentic moments as they unfold naturally, preserving genuine emotions and interactions.",
    },
    Service {
        title: "Cinematic Photography",
        description: "Dramatic, film-inspired imagery that tells a compelling visual story with artistic flair.",
    },
    Service {
        title: "Professional Editing",
        description: "Expert post-processing to enhance your photos while maintaining a natural, timeless look.",
    },
    Service {
        title: "Event Coverage",
        description: "Comprehensive photography for weddings, corporate events, and special celebrations.",
    },
    Service {
        title: "Portrait Sessions",
        description: "Stunning individual or family portraits that capture personality and create lasting memories.",
    },
    Service {
        title: "Photography Training",
        description: "Learn professional techniques and develop your own unique photographic style.",
    },
];

/// Categories the gallery editor suggests. Any other label is accepted.
pub const CATEGORY_SUGGESTIONS: [&str; 9] = [
    "Wedding",
    "Portrait",
    "Landscape",
    "Urban",
    "Travel",
    "Food",
    "Event",
    "Family",
    "Commercial",
];

/// Section anchors shown in the navigation bar and the footer.
pub const QUICK_LINKS: [(&str, &str); 5] = [
    ("Home", "#home"),
    ("Services", "#services"),
    ("Gallery", "#gallery"),
    ("Pricing", "#pricing"),
    ("Contact", "#contact"),
];

pub const SOCIAL_LINKS: [(&str, &str); 3] = [
    ("Instagram", "https://instagram.com"),
    ("Facebook", "https://facebook.com"),
    ("Twitter", "https://twitter.com"),
];

const UNSPLASH_PARAMS: &str = "?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80";

fn image(id: &str, photo: &str, alt: &str, category: &str) -> GalleryImage {
    GalleryImage {
        id: id.to_string(),
        src: format!("https://images.unsplash.com/{photo}{UNSPLASH_PARAMS}"),
        alt: alt.to_string(),
        category: category.to_string(),
    }
}

/// The six stock gallery images.
pub fn gallery() -> Vec<GalleryImage> {
    vec![
        image("1", "photo-1519741497674-611481863552", "Wedding photography", "Wedding"),
        image("2", "photo-1551316679-9c6ae9dec224", "Portrait photography", "Portrait"),
        image("3", "photo-1469594292607-7bd90f8d3ba4", "Landscape photography", "Landscape"),
        image("4", "photo-1515934751635-c81c6bc9a2d8", "Urban photography", "Urban"),
        image("5", "photo-1566737236500-c8ac43014a67", "Travel photography", "Travel"),
        image("6", "photo-1484723091739-30a097e8f929", "Food photography", "Food"),
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The three stock pricing plans.
pub fn pricing() -> Vec<PricingPlan> {
    vec![
        PricingPlan {
            id: "1".to_string(),
            name: "Basic".to_string(),
            price: 199,
            description: "Perfect for small events and personal portraits".to_string(),
            features: strings(&[
                "2-hour photo session",
                "50 edited digital photos",
                "Online gallery",
                "Personal use license",
                "1 photographer",
            ]),
            not_included: strings(&["Printed photos", "Express delivery", "Multiple locations"]),
            popular: false,
            color: PlanColor::Neutral,
        },
        PricingPlan {
            id: "2".to_string(),
            name: "Premium".to_string(),
            price: 499,
            description: "Ideal for weddings and special celebrations".to_string(),
            features: strings(&[
                "6-hour photo session",
                "200 edited digital photos",
                "Online gallery",
                "Personal use license",
                "2 photographers",
                "Printed photo album (20 pages)",
                "Multiple locations",
            ]),
            not_included: strings(&["Express delivery"]),
            popular: true,
            color: PlanColor::Accent,
        },
        PricingPlan {
            id: "3".to_string(),
            name: "Professional".to_string(),
            price: 999,
            description: "Complete coverage for major events".to_string(),
            features: strings(&[
                "Full-day photo session (10 hours)",
                "500+ edited digital photos",
                "Online gallery",
                "Commercial use license",
                "2 photographers",
                "Deluxe printed photo album (40 pages)",
                "Multiple locations",
                "Express delivery (3 days)",
                "Drone aerial photography",
            ]),
            not_included: Vec::new(),
            popular: false,
            color: PlanColor::Neutral,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn six_images_three_plans() {
        assert_eq!(gallery().len(), 6);
        assert_eq!(pricing().len(), 3);
    }

    #[test]
    fn default_ids_are_unique() {
        let image_ids: HashSet<_> = gallery().into_iter().map(|i| i.id).collect();
        assert_eq!(image_ids.len(), 6);
        let plan_ids: HashSet<_> = pricing().into_iter().map(|p| p.id).collect();
        assert_eq!(plan_ids.len(), 3);
    }

    #[test]
    fn exactly_one_popular_plan() {
        let popular: Vec<_> = pricing().into_iter().filter(|p| p.popular).collect();
        assert_eq!(popular.len(), 1);
        assert_eq!(popular[0].name, "Premium");
        assert_eq!(popular[0].color, PlanColor::Accent);
    }

    #[test]
    fn gallery_sources_are_full_urls() {
        for image in gallery() {
            assert!(image.src.starts_with("https://images.unsplash.com/photo-"));
            assert!(image.src.ends_with("q=80"));
        }
    }
}
