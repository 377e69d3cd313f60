//! Snapshots driving the two sections of the For You screen.
//!
//! Every snapshot is an immutable value: toggles produce a new snapshot that
//! differs from the old one in exactly one flag.

use tracing::debug;

use crate::model::{FollowableAuthor, FollowableTopic, SaveableNewsResource};

/// Why a section could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub message: String,
    /// A recoverable failure may be retried by the user.
    pub recoverable: bool,
}

impl LoadFailure {
    pub fn recoverable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recoverable: true,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recoverable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InterestsSelectionState {
    #[default]
    Loading,
    /// Onboarding is done or not required; the section renders nothing.
    NoInterestsSelection,
    WithInterestsSelection {
        topics: Vec<FollowableTopic>,
        authors: Vec<FollowableAuthor>,
    },
    Error(LoadFailure),
}

impl InterestsSelectionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, InterestsSelectionState::Loading)
    }

    /// True iff at least one topic or author of this snapshot is followed.
    pub fn can_save_interests(&self) -> bool {
        match self {
            InterestsSelectionState::WithInterestsSelection { topics, authors } => {
                topics.iter().any(|t| t.is_followed) || authors.iter().any(|a| a.is_followed)
            }
            InterestsSelectionState::Loading
            | InterestsSelectionState::NoInterestsSelection
            | InterestsSelectionState::Error(_) => false,
        }
    }

    pub fn with_topic_followed(&self, topic_id: &str, followed: bool) -> Self {
        match self {
            InterestsSelectionState::WithInterestsSelection { topics, authors } => {
                if !topics.iter().any(|t| t.topic.id == topic_id) {
                    debug!(topic_id, "toggle for a topic missing from the snapshot");
                }
                InterestsSelectionState::WithInterestsSelection {
                    topics: topics
                        .iter()
                        .map(|t| {
                            if t.topic.id == topic_id {
                                FollowableTopic {
                                    topic: t.topic.clone(),
                                    is_followed: followed,
                                }
                            } else {
                                t.clone()
                            }
                        })
                        .collect(),
                    authors: authors.clone(),
                }
            }
            InterestsSelectionState::Loading
            | InterestsSelectionState::NoInterestsSelection
            | InterestsSelectionState::Error(_) => self.clone(),
        }
    }

    pub fn with_author_followed(&self, author_id: &str, followed: bool) -> Self {
        match self {
            InterestsSelectionState::WithInterestsSelection { topics, authors } => {
                if !authors.iter().any(|a| a.author.id == author_id) {
                    debug!(author_id, "toggle for an author missing from the snapshot");
                }
                InterestsSelectionState::WithInterestsSelection {
                    topics: topics.clone(),
                    authors: authors
                        .iter()
                        .map(|a| {
                            if a.author.id == author_id {
                                FollowableAuthor {
                                    author: a.author.clone(),
                                    is_followed: followed,
                                }
                            } else {
                                a.clone()
                            }
                        })
                        .collect(),
                }
            }
            InterestsSelectionState::Loading
            | InterestsSelectionState::NoInterestsSelection
            | InterestsSelectionState::Error(_) => self.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedState {
    #[default]
    Loading,
    Success(Vec<SaveableNewsResource>),
    Error(LoadFailure),
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }

    pub fn with_resource_saved(&self, news_resource_id: &str, saved: bool) -> Self {
        match self {
            FeedState::Success(feed) => FeedState::Success(
                feed.iter()
                    .map(|r| {
                        if r.news_resource.id == news_resource_id {
                            SaveableNewsResource {
                                news_resource: r.news_resource.clone(),
                                is_saved: saved,
                            }
                        } else {
                            r.clone()
                        }
                    })
                    .collect(),
            ),
            FeedState::Loading | FeedState::Error(_) => self.clone(),
        }
    }
}
