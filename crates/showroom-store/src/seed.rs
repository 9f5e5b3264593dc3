//! Sample data the demo back-office starts from.

use chrono::{NaiveDate, Utc};
use showroom_core::models::{
    Asset, Block, Dimensions, Document, FuelType, Folder, Inline, Mark, Page, PageStatus, Seo,
    Transmission, Vehicle, VehicleStatus,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn photo(name: &str, size_bytes: u64, uploaded_at: NaiveDate, width: u32, height: u32) -> Asset {
    let url = format!("https://images.unsplash.com/{}", name);
    Asset::new(
        name,
        "image/jpeg",
        size_bytes,
        url.clone(),
        uploaded_at,
        Some(Dimensions { width, height }),
    )
    .with_thumbnail(format!("{}?w=300", url))
}

pub fn sample_assets() -> Vec<Asset> {
    vec![
        photo("bmw-x5-front.jpg", 2_457_600, date(2024, 1, 15), 1920, 1080),
        photo("audi-a4-interior.jpg", 1_843_200, date(2024, 1, 14), 1920, 1280),
        photo("showroom-hero.jpg", 3_145_728, date(2024, 1, 10), 2560, 1440),
        Asset::new(
            "price-list-2024.pdf",
            "application/pdf",
            524_288,
            "/documents/price-list-2024.pdf",
            date(2024, 1, 12),
            None,
        ),
        Asset::new(
            "warranty-terms.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            98_304,
            "/documents/warranty-terms.docx",
            date(2023, 12, 20),
            None,
        ),
        photo("mercedes-c-class-side.jpg", 2_097_152, date(2023, 12, 28), 1920, 1080),
    ]
}

pub fn sample_folders() -> Vec<Folder> {
    vec![
        Folder::new("Vehicles", 24, "/vehicles"),
        Folder::new("Banners", 8, "/banners"),
        Folder::new("Documents", 12, "/documents"),
        Folder::new("Team", 6, "/team"),
    ]
}

struct VehicleSeed {
    title: &'static str,
    brand: &'static str,
    model: &'static str,
    year: u16,
    price: u32,
    mileage_km: u32,
    fuel: FuelType,
    transmission: Transmission,
    image: &'static str,
    featured: bool,
}

pub fn sample_vehicles() -> Vec<Vehicle> {
    let seeds = [
        VehicleSeed {
            title: "BMW X5 xDrive40i",
            brand: "BMW",
            model: "X5",
            year: 2022,
            price: 68_900,
            mileage_km: 18_500,
            fuel: FuelType::Petrol,
            transmission: Transmission::Automatic,
            image: "bmw-x5-front.jpg",
            featured: true,
        },
        VehicleSeed {
            title: "Audi A4 Avant 40 TDI",
            brand: "Audi",
            model: "A4",
            year: 2021,
            price: 36_400,
            mileage_km: 42_000,
            fuel: FuelType::Diesel,
            transmission: Transmission::Automatic,
            image: "audi-a4-interior.jpg",
            featured: true,
        },
        VehicleSeed {
            title: "Mercedes-Benz C 300 e",
            brand: "Mercedes-Benz",
            model: "C-Class",
            year: 2023,
            price: 54_750,
            mileage_km: 7_200,
            fuel: FuelType::Hybrid,
            transmission: Transmission::Automatic,
            image: "mercedes-c-class-side.jpg",
            featured: false,
        },
    ];

    let now = Utc::now();
    seeds
        .into_iter()
        .map(|s| Vehicle {
            id: Uuid::new_v4(),
            title: s.title.to_string(),
            brand: s.brand.to_string(),
            model: s.model.to_string(),
            year: s.year,
            price: s.price,
            mileage_km: s.mileage_km,
            fuel: s.fuel,
            transmission: s.transmission,
            description: format!(
                "{} {} in excellent condition with full service history.",
                s.year, s.title
            ),
            features: vec![
                "Navigation".to_string(),
                "Heated seats".to_string(),
                "Parking sensors".to_string(),
            ],
            images: vec![format!("https://images.unsplash.com/{}", s.image)],
            seo: Seo {
                meta_title: Some(format!("{} for sale", s.title)),
                meta_description: None,
            },
            featured: s.featured,
            status: VehicleStatus::Available,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

pub fn sample_pages() -> Vec<Page> {
    let now = Utc::now();
    vec![
        Page {
            id: Uuid::new_v4(),
            title: "About Us".to_string(),
            slug: "about".to_string(),
            content: Document::new(vec![
                Block::heading(1, "About our dealership"),
                Block::Paragraph {
                    inlines: vec![
                        Inline::text("Family owned and "),
                        Inline::styled("independent", &[Mark::Bold]),
                        Inline::text(" since 1987."),
                    ],
                },
            ]),
            seo: Seo::default(),
            status: PageStatus::Published,
            updated_at: now,
        },
        Page {
            id: Uuid::new_v4(),
            title: "Financing".to_string(),
            slug: "financing".to_string(),
            content: Document::new(vec![
                Block::heading(1, "Financing options"),
                Block::List {
                    ordered: false,
                    items: vec![
                        vec![Inline::text("Leasing from 24 months")],
                        vec![Inline::text("Balloon financing")],
                    ],
                },
            ]),
            seo: Seo::default(),
            status: PageStatus::Draft,
            updated_at: now,
        },
    ]
}
