use foryou_core::layout::number_of_columns_with;
use foryou_core::model::ImageSource;
use foryou_core::{
    chunk_feed, number_of_columns, Author, NewsResource, NewsResourceType, SaveableNewsResource,
    Topic, WindowWidthClass,
};

fn resource(id: usize) -> SaveableNewsResource {
    SaveableNewsResource {
        news_resource: NewsResource {
            id: id.to_string(),
            title: format!("News {id}"),
            content: String::new(),
            url: format!("https://example.com/{id}"),
            header_image_url: None,
            publish_date: chrono::DateTime::<chrono::Utc>::from_timestamp(1_650_000_000, 0).unwrap(),
            resource_type: NewsResourceType::Unknown,
            authors: Vec::new(),
            topics: Vec::new(),
        },
        is_saved: false,
    }
}

#[test]
fn width_classes_follow_breakpoints() {
    assert_eq!(WindowWidthClass::from_width(250.0), WindowWidthClass::Compact);
    assert_eq!(WindowWidthClass::from_width(599.9), WindowWidthClass::Compact);
    assert_eq!(WindowWidthClass::from_width(600.0), WindowWidthClass::Medium);
    assert_eq!(WindowWidthClass::from_width(839.0), WindowWidthClass::Medium);
    assert_eq!(WindowWidthClass::from_width(840.0), WindowWidthClass::Expanded);
}

#[test]
fn column_count_per_layout() {
    assert_eq!(number_of_columns(WindowWidthClass::Compact, 250.0), 1);
    assert_eq!(number_of_columns(WindowWidthClass::Medium, 900.0), 1);
    assert_eq!(number_of_columns(WindowWidthClass::Expanded, 900.0), 3);
    assert_eq!(number_of_columns(WindowWidthClass::Expanded, 300.0), 1);
    assert_eq!(number_of_columns(WindowWidthClass::Expanded, 120.0), 1);
    assert_eq!(number_of_columns(WindowWidthClass::Expanded, 1299.0), 4);
}

#[test]
fn column_count_follows_width_changes() {
    let wide = number_of_columns(WindowWidthClass::Expanded, 1200.0);
    let narrower = number_of_columns(WindowWidthClass::Expanded, 650.0);
    assert_eq!(wide, 4);
    assert_eq!(narrower, 2);
}

#[test]
fn column_count_handles_degenerate_input() {
    assert_eq!(number_of_columns_with(WindowWidthClass::Expanded, 900.0, 0.0), 1);
    assert_eq!(number_of_columns_with(WindowWidthClass::Expanded, f32::NAN, 300.0), 1);
    assert_eq!(number_of_columns_with(WindowWidthClass::Expanded, 900.0, 450.0), 2);
}

#[test]
fn chunking_pads_the_last_row() {
    let feed: Vec<_> = (0..5).map(resource).collect();
    let rows = chunk_feed(&feed, 2);

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.len() == 2));
    let ids: Vec<Vec<Option<String>>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|slot| slot.as_ref().map(|r| r.news_resource.id.clone()))
                .collect()
        })
        .collect();
    assert_eq!(
        ids,
        vec![
            vec![Some("0".to_string()), Some("1".to_string())],
            vec![Some("2".to_string()), Some("3".to_string())],
            vec![Some("4".to_string()), None],
        ]
    );
}

#[test]
fn chunking_edge_cases() {
    assert!(chunk_feed(&[], 3).is_empty());

    let feed: Vec<_> = (0..3).map(resource).collect();
    let single = chunk_feed(&feed, 0);
    assert_eq!(single.len(), 3);
    assert!(single.iter().all(|row| row.len() == 1 && row[0].is_some()));

    let exact = chunk_feed(&feed, 3);
    assert_eq!(exact.len(), 1);
    assert!(exact[0].iter().all(Option::is_some));
}

#[test]
fn empty_image_url_maps_to_placeholder() {
    let author = Author {
        id: "1".into(),
        name: "Android Dev".into(),
        image_url: String::new(),
        twitter: String::new(),
        medium_page: String::new(),
        bio: String::new(),
    };
    assert_eq!(author.image(), ImageSource::Placeholder);

    let topic = Topic {
        id: "1".into(),
        name: "UI".into(),
        short_description: String::new(),
        long_description: String::new(),
        url: String::new(),
        image_url: "  ".into(),
    };
    assert!(topic.image().is_placeholder());

    let with_image = Topic {
        image_url: "https://example.com/ui.svg".into(),
        ..topic
    };
    assert_eq!(with_image.image(), ImageSource::Remote("https://example.com/ui.svg"));
    assert!(resource(1).news_resource.header_image().is_placeholder());
}
