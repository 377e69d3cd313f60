use std::sync::Arc;

use foryou_core::{
    spawn_provider, Catalog, EntityKind, FeedState, ForYouError, ForYouProvider, Intent,
    InterestsSelectionState, PreferencesStore, Section, SnapshotSource, UserPreferences,
};
use tokio::sync::mpsc;

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

fn in_memory_provider() -> ForYouProvider {
    ForYouProvider::new(
        Catalog::sample(),
        PreferencesStore::in_memory(UserPreferences::default()),
    )
}

fn feed_ids(state: &FeedState) -> Vec<String> {
    match state {
        FeedState::Success(feed) => feed.iter().map(|r| r.news_resource.id.clone()).collect(),
        FeedState::Loading | FeedState::Error(_) => panic!("feed not loaded: {state:?}"),
    }
}

#[tokio::test]
async fn sources_start_loading_then_receive_snapshots() {
    let provider = in_memory_provider();
    let mut interests = provider.interests_source();
    let mut feed = provider.feed_source();
    assert!(interests.latest().is_loading());
    assert!(feed.latest().is_loading());

    provider.refresh().await;

    let Some(InterestsSelectionState::WithInterestsSelection { topics, authors }) =
        interests.poll_changed()
    else {
        panic!("expected onboarding selection");
    };
    assert_eq!(topics.len(), 6);
    assert_eq!(authors.len(), 4);
    assert!(topics.windows(2).all(|w| w[0].topic.name <= w[1].topic.name));
    assert!(topics.iter().all(|t| !t.is_followed));
    assert_eq!(feed.poll_changed(), Some(FeedState::Success(Vec::new())));
}

#[tokio::test]
async fn following_filters_the_feed_newest_first() {
    let provider = in_memory_provider();
    provider.refresh().await;

    // topic "2" (UI) tags resources 1, 3 and 5
    provider
        .apply(Intent::TopicFollowChanged {
            topic_id: "2".into(),
            followed: true,
        })
        .await
        .unwrap();
    assert_eq!(feed_ids(&provider.feed_source().latest()), ["5", "3", "1"]);

    // author "4" wrote resource 4
    provider
        .apply(Intent::AuthorFollowChanged {
            author_id: "4".into(),
            followed: true,
        })
        .await
        .unwrap();
    assert_eq!(feed_ids(&provider.feed_source().latest()), ["5", "4", "3", "1"]);

    let interests = provider.interests_source().latest();
    assert!(interests.can_save_interests());
}

#[tokio::test]
async fn saving_a_resource_updates_only_its_flag() {
    let provider = in_memory_provider();
    provider
        .apply(Intent::TopicFollowChanged {
            topic_id: "2".into(),
            followed: true,
        })
        .await
        .unwrap();
    provider
        .apply(Intent::NewsResourceSaveChanged {
            news_resource_id: "3".into(),
            saved: true,
        })
        .await
        .unwrap();

    let FeedState::Success(feed) = provider.feed_source().latest() else {
        panic!("feed not loaded");
    };
    let saved: Vec<(&str, bool)> = feed
        .iter()
        .map(|r| (r.news_resource.id.as_str(), r.is_saved))
        .collect();
    assert_eq!(saved, [("5", false), ("3", true), ("1", false)]);
}

#[tokio::test]
async fn unknown_ids_are_rejected_without_mutation() {
    let provider = in_memory_provider();
    provider.refresh().await;

    let err = provider
        .apply(Intent::TopicFollowChanged {
            topic_id: "404".into(),
            followed: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ForYouError::UnknownEntity {
            kind: EntityKind::Topic,
            ..
        }
    ));
    assert_eq!(
        provider.preferences().snapshot().await,
        UserPreferences::default()
    );
}

#[tokio::test]
async fn saving_interests_requires_a_selection() {
    let provider = in_memory_provider();
    provider.refresh().await;

    let err = provider.apply(Intent::SaveInterests).await.unwrap_err();
    assert!(matches!(err, ForYouError::NothingSelected));
    assert!(!provider.preferences().snapshot().await.onboarding_completed);
}

#[tokio::test]
async fn committed_interests_end_onboarding_across_restarts() {
    let dir = temp_dir("provider");
    let provider = ForYouProvider::new(
        Catalog::sample(),
        PreferencesStore::load_from_dir(&dir).await,
    );
    provider.refresh().await;
    provider
        .apply(Intent::AuthorFollowChanged {
            author_id: "1".into(),
            followed: true,
        })
        .await
        .unwrap();
    provider.apply(Intent::SaveInterests).await.unwrap();
    assert_eq!(
        provider.interests_source().latest(),
        InterestsSelectionState::NoInterestsSelection
    );

    let restarted = ForYouProvider::new(
        Catalog::sample(),
        PreferencesStore::load_from_dir(&dir).await,
    );
    restarted.refresh().await;
    assert_eq!(
        restarted.interests_source().latest(),
        InterestsSelectionState::NoInterestsSelection
    );
    assert_eq!(feed_ids(&restarted.feed_source().latest()), ["5", "1"]);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn invalid_catalog_publishes_errors() {
    let mut catalog = Catalog::sample();
    let duplicate = catalog.topics[0].clone();
    catalog.topics.push(duplicate);

    let provider = ForYouProvider::new(
        catalog,
        PreferencesStore::in_memory(UserPreferences::default()),
    );
    provider.refresh().await;

    let InterestsSelectionState::Error(failure) = provider.interests_source().latest() else {
        panic!("expected an error snapshot");
    };
    assert!(!failure.recoverable);
    assert!(matches!(provider.feed_source().latest(), FeedState::Error(_)));
}

#[tokio::test]
async fn unsaved_change_is_recoverable_with_retry() {
    let dir = temp_dir("provider_retry");
    let provider = ForYouProvider::new(
        Catalog::sample(),
        PreferencesStore::load_from_dir(&dir).await,
    );
    provider.refresh().await;
    provider
        .apply(Intent::AuthorFollowChanged {
            author_id: "2".into(),
            followed: true,
        })
        .await
        .unwrap();

    let tmp = dir.join("preferences.json.tmp");
    tokio::fs::create_dir_all(&tmp).await.unwrap();
    let err = provider
        .apply(Intent::TopicFollowChanged {
            topic_id: "4".into(),
            followed: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ForYouError::Io(_)));

    let FeedState::Error(failure) = provider.feed_source().latest() else {
        panic!("expected a feed error");
    };
    assert!(failure.recoverable);
    let InterestsSelectionState::WithInterestsSelection { topics, .. } =
        provider.interests_source().latest()
    else {
        panic!("expected onboarding selection");
    };
    assert!(topics.iter().any(|t| t.topic.id == "4" && t.is_followed));

    tokio::fs::remove_dir(&tmp).await.unwrap();
    provider.apply(Intent::Retry(Section::Feed)).await.unwrap();
    assert_eq!(feed_ids(&provider.feed_source().latest()), ["4", "2"]);

    let reloaded = PreferencesStore::load_from_dir(&dir).await.snapshot().await;
    assert!(reloaded.followed_topics.contains("4"));

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn spawned_provider_applies_intents_from_the_channel() {
    let provider = Arc::new(in_memory_provider());
    let mut feed = provider.feed_source();
    let (tx, rx) = mpsc::channel(8);
    let handle = spawn_provider(provider.clone(), rx);

    tx.send(Intent::TopicFollowChanged {
        topic_id: "4".into(),
        followed: true,
    })
    .await
    .unwrap();

    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(2);
    loop {
        if let Some(FeedState::Success(items)) = feed.poll_changed() {
            if items.len() == 1 {
                assert_eq!(items[0].news_resource.id, "4");
                break;
            }
        }
        assert!(tokio::time::Instant::now() < deadline, "timed out");
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    handle.stop().await.expect("stop provider");
}
