//! Fixed seed data loaded on first access of a session.

use chrono::{Duration, Utc};

use super::models::{
    Feedback, Photo, PortfolioCategory, Role, Service, SiteContent, UserRecord,
};
use super::StoreConfig;

fn category(
    id: &str,
    name: &str,
    subcategories: &[&str],
    photo_ids: &[u64],
) -> PortfolioCategory {
    PortfolioCategory {
        id: id.to_string(),
        name: name.to_string(),
        subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        cover_image: format!("https://picsum.photos/seed/{}/800/600", id),
        photos: photo_ids
            .iter()
            .map(|&photo_id| Photo {
                id: photo_id,
                url: format!("https://picsum.photos/seed/{}-{}/1200/800", id, photo_id),
            })
            .collect(),
    }
}

/// Categories are fixed: they are never created or deleted at runtime, only
/// their photo lists change.
pub fn initial_portfolio() -> Vec<PortfolioCategory> {
    vec![
        category(
            "wedding",
            "Wedding Photography",
            &["Pre-wedding", "Post-wedding"],
            &[1, 2, 3, 4],
        ),
        category("fashion", "Fashion Photography", &[], &[5, 6]),
        category("newborn", "Newborn Photography", &[], &[7, 8]),
        category("model", "Model Shoot", &[], &[9, 10, 11]),
        category("ear-piercing", "Ear Piercing Photography", &[], &[12]),
        category("documentary", "Documentary Photography", &[], &[13, 14]),
        category("festival", "Festival Photography", &[], &[15, 16]),
        category("product", "Product Photography", &[], &[17]),
    ]
}

pub fn initial_services() -> Vec<Service> {
    let service = |id, name: &str, base_price, discount, description: &str| Service {
        id,
        name: name.to_string(),
        base_price,
        discount,
        description: description.to_string(),
        final_price: Service::final_price_for(base_price, discount),
    };
    vec![
        service(
            1,
            "Wedding Package",
            150_000,
            15,
            "Full day coverage, from bride prep to reception. Includes a 40-page album.",
        ),
        service(
            2,
            "Fashion Shoot",
            50_000,
            10,
            "4-hour session, 3 outfits, professional editing for 20 photos.",
        ),
        service(
            3,
            "Newborn Session",
            30_000,
            0,
            "3-hour studio session with props. Safely handled by experts.",
        ),
        service(
            4,
            "Product Photography",
            25_000,
            5,
            "Up to 20 products, white background, high-resolution images for e-commerce.",
        ),
    ]
}

/// One admin (credentials come from the config, which reads env overrides)
/// and one regular account for manual testing.
pub fn initial_users(config: &StoreConfig) -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: 1,
            email: config.admin_email.clone(),
            name: "Admin".to_string(),
            role: Role::Admin,
            phone: Some("+91 9080873534".to_string()),
            created_at: Some(Utc::now() - Duration::days(10)),
            password: config.admin_password.clone(),
        },
        UserRecord {
            id: 2,
            email: "user@test.com".to_string(),
            name: "Test User".to_string(),
            role: Role::User,
            phone: Some("1234567890".to_string()),
            created_at: Some(Utc::now()),
            password: "password".to_string(),
        },
    ]
}

pub fn initial_feedback() -> Vec<Feedback> {
    vec![Feedback {
        id: 1,
        name: "Sathish Kumar".to_string(),
        rating: 5,
        review: "Absolutely stunning wedding photos!".to_string(),
        timestamp: Utc::now(),
    }]
}

pub fn initial_site_content() -> SiteContent {
    SiteContent {
        about_intro: "A passionate photographer from Namakkal with over a decade of \
            experience in capturing life's most precious moments. My journey began with \
            a simple film camera, a gift from my father, which ignited a lifelong \
            passion for storytelling through images. I specialize in weaving \
            narratives, whether it's the fairytale romance of a wedding, the raw \
            energy of a fashion shoot, or the quiet intimacy of a newborn's first \
            days. My style is a blend of cinematic and photojournalistic, focusing on \
            authentic emotions and stunning visuals. I believe that a great photograph \
            is not just seen, but felt."
            .to_string(),
        home_hero_title: "Capturing Life's Moments".to_string(),
        home_hero_subtitle: "From wedding vows to newborn smiles, we frame your \
            memories with artistry and passion."
            .to_string(),
    }
}
