//! Query/view layer over the asset store.

use showroom_core::models::{Asset, AssetQuery, SortDirection, SortKey};
use std::cmp::Ordering;

/// Filtered, sorted view of `assets`.
///
/// Search is a case-insensitive substring match on the name only. The sort
/// is stable, so assets comparing equal keep their store order in both
/// directions.
pub fn list(assets: &[Asset], query: &AssetQuery) -> Vec<Asset> {
    let needle = query.search.to_lowercase();

    let mut view: Vec<Asset> = assets
        .iter()
        .filter(|a| needle.is_empty() || a.name.to_lowercase().contains(&needle))
        .filter(|a| query.type_filter.matches(a))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ord = compare(a, b, query.sort_by);
        match query.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    view
}

fn compare(a: &Asset, b: &Asset, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Date => a.uploaded_at.cmp(&b.uploaded_at),
        SortKey::Size => a.size_bytes.cmp(&b.size_bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;
    use showroom_core::models::TypeFilter;
    use uuid::Uuid;

    fn asset(name: &str, mime: &str, size: u64, date: (i32, u32, u32)) -> Asset {
        Asset::new(
            name,
            mime,
            size,
            format!("/{}", name),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            None,
        )
    }

    fn names(view: &[Asset]) -> Vec<&str> {
        view.iter().map(|a| a.name.as_str()).collect()
    }

    fn library() -> Vec<Asset> {
        vec![
            asset("Showroom.jpg", "image/jpeg", 300, (2023, 3, 1)),
            asset("brochure.pdf", "application/pdf", 900, (2023, 1, 5)),
            asset("room-plan.png", "image/png", 50, (2023, 2, 10)),
            asset("Terms.docx", "application/msword", 300, (2022, 12, 31)),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_on_name() {
        let query = AssetQuery::default()
            .search("ROOM")
            .sorted(SortKey::Name, SortDirection::Asc);
        assert_eq!(names(&list(&library(), &query)), vec!["Showroom.jpg", "room-plan.png"]);
    }

    #[test]
    fn test_search_does_not_match_mime_or_url() {
        let query = AssetQuery::default().search("pdf");
        assert_eq!(names(&list(&library(), &query)), vec!["brochure.pdf"]);
        let query = AssetQuery::default().search("image");
        assert!(list(&library(), &query).is_empty());
    }

    #[test]
    fn test_type_filters() {
        let images = list(&library(), &AssetQuery::default().of_type(TypeFilter::Image));
        assert!(images.iter().all(Asset::is_image));
        assert_eq!(images.len(), 2);

        let documents = list(&library(), &AssetQuery::default().of_type(TypeFilter::Document));
        assert_eq!(documents.len(), 2);
        assert!(documents.iter().all(|a| !a.is_image()));
    }

    #[test]
    fn test_sort_by_date_both_directions() {
        let asc = list(
            &library(),
            &AssetQuery::default().sorted(SortKey::Date, SortDirection::Asc),
        );
        assert_eq!(
            names(&asc),
            vec!["Terms.docx", "brochure.pdf", "room-plan.png", "Showroom.jpg"]
        );

        let desc = list(&library(), &AssetQuery::default());
        assert_eq!(
            names(&desc),
            vec!["Showroom.jpg", "room-plan.png", "brochure.pdf", "Terms.docx"]
        );
    }

    #[test]
    fn test_sort_by_name_is_lexicographic() {
        let view = list(
            &library(),
            &AssetQuery::default().sorted(SortKey::Name, SortDirection::Asc),
        );
        // Uppercase sorts before lowercase in byte order
        assert_eq!(
            names(&view),
            vec!["Showroom.jpg", "Terms.docx", "brochure.pdf", "room-plan.png"]
        );
    }

    #[test]
    fn test_size_ties_keep_store_order() {
        let asc = list(
            &library(),
            &AssetQuery::default().sorted(SortKey::Size, SortDirection::Asc),
        );
        assert_eq!(
            names(&asc),
            vec!["room-plan.png", "Showroom.jpg", "Terms.docx", "brochure.pdf"]
        );
        let desc = list(
            &library(),
            &AssetQuery::default().sorted(SortKey::Size, SortDirection::Desc),
        );
        assert_eq!(
            names(&desc),
            vec!["brochure.pdf", "Showroom.jpg", "Terms.docx", "room-plan.png"]
        );
    }

    #[test]
    fn test_result_is_permutation_for_every_sort() {
        let input = library();
        for key in [SortKey::Name, SortKey::Date, SortKey::Size] {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let view = list(&input, &AssetQuery::default().sorted(key, direction));
                assert_eq!(view.len(), input.len());
                for asset in &input {
                    assert_eq!(view.iter().filter(|a| a.id == asset.id).count(), 1);
                }
                for pair in view.windows(2) {
                    let ord = compare(&pair[0], &pair[1], key);
                    match direction {
                        SortDirection::Asc => assert_ne!(ord, Ordering::Greater),
                        SortDirection::Desc => assert_ne!(ord, Ordering::Less),
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_store_yields_empty_view() {
        assert!(list(&[], &AssetQuery::default().search("x")).is_empty());
    }

    fn arb_library() -> impl Strategy<Value = Vec<Asset>> {
        prop::collection::vec(
            ("[a-zA-Z]{0,6}", prop::bool::ANY, 0u64..2_000, 0u64..90),
            0..12,
        )
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(stem, is_image, size, day)| {
                    let (ext, mime) = if is_image {
                        ("jpg", "image/jpeg")
                    } else {
                        ("pdf", "application/pdf")
                    };
                    let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + Days::new(day);
                    Asset {
                        uploaded_at: date,
                        ..asset(&format!("{}.{}", stem, ext), mime, size, (2023, 1, 1))
                    }
                })
                .collect()
        })
    }

    fn sorted_ids(assets: &[Asset]) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = assets.iter().map(|a| a.id).collect();
        ids.sort();
        ids
    }

    proptest! {
        #[test]
        fn prop_search_returns_exactly_matching_names(
            library in arb_library(),
            term in "[a-zA-Z.]{0,3}",
        ) {
            let view = list(&library, &AssetQuery::default().search(term.clone()));
            let needle = term.to_lowercase();
            let expected: Vec<Asset> = library
                .iter()
                .filter(|a| a.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            prop_assert_eq!(sorted_ids(&view), sorted_ids(&expected));
        }

        #[test]
        fn prop_every_sort_is_an_ordered_permutation(library in arb_library()) {
            for key in [SortKey::Name, SortKey::Date, SortKey::Size] {
                for direction in [SortDirection::Asc, SortDirection::Desc] {
                    let view = list(&library, &AssetQuery::default().sorted(key, direction));
                    let ids = sorted_ids(&view);
                    prop_assert_eq!(&ids, &sorted_ids(&library));
                    prop_assert!(ids.windows(2).all(|w| w[0] != w[1]));
                    for pair in view.windows(2) {
                        let ord = compare(&pair[0], &pair[1], key);
                        match direction {
                            SortDirection::Asc => prop_assert_ne!(ord, Ordering::Greater),
                            SortDirection::Desc => prop_assert_ne!(ord, Ordering::Less),
                        }
                    }
                }
            }
        }
    }
}
