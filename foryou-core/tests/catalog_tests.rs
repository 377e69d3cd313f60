use foryou_core::{Catalog, EntityKind, ForYouError};

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "foryou_{}_{}",
        tag,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

#[test]
fn sample_catalog_is_valid() {
    let catalog = Catalog::sample();
    catalog.validate().unwrap();
    assert!(catalog.topic("2").is_some());
    assert!(catalog.author("4").is_some());
    assert!(catalog.news_resource("5").is_some());
    assert!(catalog.news_resource("6").is_none());
}

#[test]
fn duplicate_author_ids_are_rejected() {
    let mut catalog = Catalog::sample();
    let mut dup = catalog.authors[1].clone();
    dup.name = "Someone else".into();
    catalog.authors.push(dup);

    match catalog.validate() {
        Err(ForYouError::DuplicateId { kind, id }) => {
            assert_eq!(kind, EntityKind::Author);
            assert_eq!(id, "2");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn catalog_file_is_preferred_over_the_sample() {
    let dir = temp_dir("catalog");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let json = r#"{
        "topics": [{ "id": "t1", "name": "Kotlin" }],
        "authors": [],
        "news_resources": [{
            "id": "n1",
            "title": "Hello",
            "url": "https://example.com/n1",
            "publish_date": "2022-05-04T23:00:00Z",
            "type": "podcast_episode",
            "topics": ["t1"]
        }]
    }"#;
    tokio::fs::write(dir.join("catalog.json"), json).await.unwrap();

    let catalog = Catalog::load_from_dir_or_sample(&dir).await;
    assert_eq!(catalog.topics.len(), 1);
    assert_eq!(catalog.topics[0].image_url, "");
    let resource = &catalog.news_resources[0];
    assert_eq!(resource.resource_type, foryou_core::NewsResourceType::Unknown);
    assert_eq!(resource.topics, ["t1"]);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn missing_or_broken_catalog_falls_back_to_sample() {
    let dir = temp_dir("catalog_missing");
    assert_eq!(Catalog::load_from_dir_or_sample(&dir).await, Catalog::sample());

    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("catalog.json"), "not json").await.unwrap();
    assert_eq!(Catalog::load_from_dir_or_sample(&dir).await, Catalog::sample());

    let _ = tokio::fs::remove_dir_all(&dir).await;
}
