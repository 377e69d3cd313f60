use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{EntityKind, ForYouError, ForYouResult};
use crate::model::{FollowableAuthor, FollowableTopic, SaveableNewsResource};
use crate::prefs::{PreferencesStore, UserPreferences};
use crate::screen::Intent;
use crate::source::{SnapshotPublisher, WatchSource};
use crate::state::{FeedState, InterestsSelectionState, LoadFailure};

/// Derives the For You snapshots from the catalog and the user's preferences,
/// and applies the intents the screen reports.
#[derive(Debug)]
pub struct ForYouProvider {
    catalog: Arc<Catalog>,
    prefs: PreferencesStore,
    interests: SnapshotPublisher<InterestsSelectionState>,
    feed: SnapshotPublisher<FeedState>,
}

impl ForYouProvider {
    pub fn new(catalog: Catalog, prefs: PreferencesStore) -> Self {
        let (interests, _) = crate::source::snapshot_channel(InterestsSelectionState::Loading);
        let (feed, _) = crate::source::snapshot_channel(FeedState::Loading);
        Self {
            catalog: Arc::new(catalog),
            prefs,
            interests,
            feed,
        }
    }

    pub fn interests_source(&self) -> WatchSource<InterestsSelectionState> {
        self.interests.subscribe()
    }

    pub fn feed_source(&self) -> WatchSource<FeedState> {
        self.feed.subscribe()
    }

    pub fn preferences(&self) -> &PreferencesStore {
        &self.prefs
    }

    pub async fn refresh(&self) {
        if let Err(e) = self.catalog.validate() {
            warn!(error = %e, "catalog rejected");
            let failure = LoadFailure::fatal(e.to_string());
            self.interests
                .publish(InterestsSelectionState::Error(failure.clone()));
            self.feed.publish(FeedState::Error(failure));
            return;
        }
        let prefs = self.prefs.snapshot().await;
        self.interests.publish(interests_snapshot(&self.catalog, &prefs));
        self.feed.publish(feed_snapshot(&self.catalog, &prefs));
    }

    pub async fn apply(&self, intent: Intent) -> ForYouResult<()> {
        debug!(?intent, "applying intent");
        let stored = match intent {
            Intent::TopicFollowChanged { topic_id, followed } => {
                self.require(EntityKind::Topic, &topic_id)?;
                self.prefs.set_topic_followed(&topic_id, followed).await
            }
            Intent::AuthorFollowChanged {
                author_id,
                followed,
            } => {
                self.require(EntityKind::Author, &author_id)?;
                self.prefs.set_author_followed(&author_id, followed).await
            }
            Intent::NewsResourceSaveChanged {
                news_resource_id,
                saved,
            } => {
                self.require(EntityKind::NewsResource, &news_resource_id)?;
                self.prefs
                    .set_news_resource_saved(&news_resource_id, saved)
                    .await
            }
            Intent::SaveInterests => {
                if !self.interests.current().can_save_interests() {
                    return Err(ForYouError::NothingSelected);
                }
                let stored = self.prefs.complete_onboarding().await;
                if stored.is_ok() {
                    info!("interests saved, onboarding completed");
                }
                stored
            }
            Intent::Retry(section) => {
                debug!(?section, "retrying load");
                self.prefs.flush().await
            }
        };
        if let Err(e) = stored {
            self.publish_unsaved(&e).await;
            return Err(e);
        }
        self.refresh().await;
        Ok(())
    }

    // The change is kept in memory and shown, but the feed reports that it
    // was not written so the user can retry.
    async fn publish_unsaved(&self, err: &ForYouError) {
        warn!(error = %err, "preferences not saved");
        let prefs = self.prefs.snapshot().await;
        self.interests.publish(interests_snapshot(&self.catalog, &prefs));
        self.feed.publish(FeedState::Error(LoadFailure::recoverable(format!(
            "could not save your preferences: {err}"
        ))));
    }

    fn require(&self, kind: EntityKind, id: &str) -> ForYouResult<()> {
        let known = match kind {
            EntityKind::Topic => self.catalog.topic(id).is_some(),
            EntityKind::Author => self.catalog.author(id).is_some(),
            EntityKind::NewsResource => self.catalog.news_resource(id).is_some(),
        };
        if known {
            Ok(())
        } else {
            Err(ForYouError::UnknownEntity {
                kind,
                id: id.to_string(),
            })
        }
    }
}

pub fn interests_snapshot(catalog: &Catalog, prefs: &UserPreferences) -> InterestsSelectionState {
    if prefs.onboarding_completed {
        return InterestsSelectionState::NoInterestsSelection;
    }
    let mut topics: Vec<FollowableTopic> = catalog
        .topics
        .iter()
        .map(|topic| FollowableTopic {
            is_followed: prefs.followed_topics.contains(&topic.id),
            topic: topic.clone(),
        })
        .collect();
    topics.sort_by(|a, b| a.topic.name.cmp(&b.topic.name));

    let mut authors: Vec<FollowableAuthor> = catalog
        .authors
        .iter()
        .map(|author| FollowableAuthor {
            is_followed: prefs.followed_authors.contains(&author.id),
            author: author.clone(),
        })
        .collect();
    authors.sort_by(|a, b| a.author.name.cmp(&b.author.name));

    InterestsSelectionState::WithInterestsSelection { topics, authors }
}

/// Resources written by a followed author or tagged with a followed topic, newest first.
pub fn feed_snapshot(catalog: &Catalog, prefs: &UserPreferences) -> FeedState {
    let mut feed: Vec<SaveableNewsResource> = catalog
        .news_resources
        .iter()
        .filter(|r| {
            r.topics.iter().any(|t| prefs.followed_topics.contains(t))
                || r.authors.iter().any(|a| prefs.followed_authors.contains(a))
        })
        .map(|r| SaveableNewsResource {
            is_saved: prefs.saved_news_resources.contains(&r.id),
            news_resource: r.clone(),
        })
        .collect();
    feed.sort_by(|a, b| b.news_resource.publish_date.cmp(&a.news_resource.publish_date));
    FeedState::Success(feed)
}

pub struct ProviderHandle {
    cancel_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
}

impl ProviderHandle {
    pub async fn stop(self) -> ForYouResult<()> {
        let _ = self.cancel_tx.send(());
        self.join.await.map_err(ForYouError::from)
    }
}

/// Publishes the first snapshots, then applies intents until stopped or until
/// every intent sender is dropped.
pub fn spawn_provider(
    provider: Arc<ForYouProvider>,
    mut intents: mpsc::Receiver<Intent>,
) -> ProviderHandle {
    let (cancel_tx, mut cancel_rx) = broadcast::channel(1);
    let join = tokio::spawn(async move {
        provider.refresh().await;

        loop {
            tokio::select! {
                _ = cancel_rx.recv() => {
                    info!("provider shutdown requested");
                    break;
                }
                intent = intents.recv() => {
                    let Some(intent) = intent else {
                        info!("intent senders dropped, provider exiting");
                        break;
                    };
                    if let Err(err) = provider.apply(intent).await {
                        warn!(error = %err, "intent rejected");
                    }
                }
            }
        }
    });

    ProviderHandle { cancel_tx, join }
}
