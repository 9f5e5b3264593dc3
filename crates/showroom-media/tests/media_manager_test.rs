use chrono::NaiveDate;
use showroom_core::models::{
    Asset, AssetQuery, LocalizedMetadata, MetadataField, SortDirection, SortKey, TranslationStatus,
    TypeFilter,
};
use showroom_media::{
    LocalFile, LocalizationPanel, ManagerMode, MediaManager, UploadSimulator,
};
use showroom_store::{AssetRepository, CancellationToken, SimulatedLatency};
use std::time::Duration;

fn store() -> AssetRepository {
    let a = Asset::new(
        "a.jpg",
        "image/jpeg",
        100,
        "/a.jpg",
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        None,
    );
    let b = Asset::new(
        "b.pdf",
        "application/pdf",
        50,
        "/b.pdf",
        NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
        None,
    );
    AssetRepository::with_seed(SimulatedLatency::none(), vec![a, b], vec![])
}

fn names(view: &[Asset]) -> Vec<&str> {
    view.iter().map(|a| a.name.as_str()).collect()
}

#[tokio::test]
async fn test_filter_and_sort_scenario() {
    let mut manager = MediaManager::new(store(), ManagerMode::Browse);

    manager.set_query(AssetQuery::default().of_type(TypeFilter::Image));
    assert_eq!(names(&manager.view().await), vec!["a.jpg"]);

    manager.set_query(AssetQuery::default().sorted(SortKey::Size, SortDirection::Asc));
    assert_eq!(names(&manager.view().await), vec!["b.pdf", "a.jpg"]);
}

#[tokio::test(start_paused = true)]
async fn test_upload_prepends_new_assets() {
    let repo = store();
    let simulator = UploadSimulator::new(Duration::from_millis(200));
    let files = vec![
        LocalFile::new("new-front.png", "image/png", 1234),
        LocalFile::new("brochure.pdf", "application/pdf", 5678),
    ];

    let created = simulator
        .upload(&repo, files, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(created.len(), 2);

    let stored = repo.snapshot().await;
    assert_eq!(stored.len(), 4);
    assert_eq!(
        names(&stored),
        vec!["new-front.png", "brochure.pdf", "a.jpg", "b.pdf"]
    );
    assert_eq!(stored[0].size_bytes, 1234);
    assert_eq!(stored[0].mime_type, "image/png");
    assert_eq!(stored[1].size_bytes, 5678);
    assert_eq!(stored[1].mime_type, "application/pdf");
}

#[tokio::test(start_paused = true)]
async fn test_uploaded_asset_can_be_picked() {
    let repo = store();
    UploadSimulator::default()
        .upload(
            &repo,
            vec![LocalFile::new("hero.jpg", "image/jpeg", 42)],
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let mut picker = MediaManager::new(repo, ManagerMode::Picker { multiple: true });
    let view = picker.view().await;
    let hero = view.iter().find(|a| a.name == "hero.jpg").unwrap().id;
    picker.toggle(hero).await.unwrap();

    let confirmation = picker.confirm().await;
    assert!(confirmation.close);
    assert_eq!(names(&confirmation.assets), vec!["hero.jpg"]);
}

#[tokio::test(start_paused = true)]
async fn test_auto_translate_then_save() {
    let repo = AssetRepository::with_seed(
        SimulatedLatency::new(Duration::from_millis(500)),
        store().snapshot().await,
        vec![],
    );
    let id = repo.snapshot().await[0].id;
    let cancel = CancellationToken::new();

    let mut panel = LocalizationPanel::load(&repo, id, "en").await.unwrap();
    panel.set_field("en", MetadataField::Title, "Car");
    panel.set_field("en", MetadataField::AltText, "Front");
    panel.set_field("en", MetadataField::Description, "Red car");

    panel.auto_translate(&["es"], &cancel).await.unwrap();
    assert_eq!(
        panel.entry("es"),
        Some(&LocalizedMetadata::new("🇪🇸 Car", "🇪🇸 Front", "🇪🇸 Red car"))
    );
    assert_eq!(panel.classify("fr"), TranslationStatus::NotTranslated);

    panel.save(&repo, &cancel).await.unwrap();
    assert!(!panel.is_open());

    let stored = repo.localizations(id).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored["es"].get(MetadataField::Title), Some("🇪🇸 Car"));
}
