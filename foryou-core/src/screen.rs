//! Turns the two section snapshots into the ordered list of items the For You
//! screen renders, and describes the intents the screen can report back.

use crate::layout::{chunk_feed, number_of_columns, WindowWidthClass};
use crate::model::{FollowableAuthor, FollowableTopic, SaveableNewsResource};
use crate::state::{FeedState, InterestsSelectionState, LoadFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Interests,
    Feed,
}

/// A user-requested change. The screen never applies these itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    TopicFollowChanged { topic_id: String, followed: bool },
    AuthorFollowChanged { author_id: String, followed: bool },
    NewsResourceSaveChanged { news_resource_id: String, saved: bool },
    SaveInterests,
    Retry(Section),
}

impl Intent {
    pub fn toggle_topic(topic: &FollowableTopic) -> Self {
        Intent::TopicFollowChanged {
            topic_id: topic.topic.id.clone(),
            followed: !topic.is_followed,
        }
    }

    pub fn toggle_author(author: &FollowableAuthor) -> Self {
        Intent::AuthorFollowChanged {
            author_id: author.author.id.clone(),
            followed: !author.is_followed,
        }
    }

    pub fn toggle_saved(resource: &SaveableNewsResource) -> Self {
        Intent::NewsResourceSaveChanged {
            news_resource_id: resource.news_resource.id.clone(),
            saved: !resource.is_saved,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenItem {
    LoadingWheel(Section),
    OnboardingTitle,
    OnboardingSubtitle,
    AuthorsCarousel(Vec<FollowableAuthor>),
    TopicSelection(Vec<FollowableTopic>),
    SaveInterestsButton { enabled: bool },
    FeedRow(Vec<Option<SaveableNewsResource>>),
    LoadError { section: Section, failure: LoadFailure },
    BottomSpacer(f32),
}

#[derive(Debug, Clone, Copy)]
pub struct ScreenInput<'a> {
    pub interests: &'a InterestsSelectionState,
    pub feed: &'a FeedState,
    pub width_class: WindowWidthClass,
    pub available_width: f32,
    pub bottom_inset: f32,
}

pub fn compose(input: ScreenInput<'_>) -> Vec<ScreenItem> {
    let columns = number_of_columns(input.width_class, input.available_width);
    compose_with_columns(input, columns)
}

pub fn compose_with_columns(input: ScreenInput<'_>, columns: usize) -> Vec<ScreenItem> {
    let mut items = Vec::new();
    interests_section(&mut items, input.interests, true);
    // a second wheel would duplicate the interests one
    feed_section(
        &mut items,
        input.feed,
        !input.interests.is_loading(),
        columns,
    );
    items.push(ScreenItem::BottomSpacer(input.bottom_inset));
    items
}

fn interests_section(
    items: &mut Vec<ScreenItem>,
    state: &InterestsSelectionState,
    show_loading: bool,
) {
    match state {
        InterestsSelectionState::Loading => {
            if show_loading {
                items.push(ScreenItem::LoadingWheel(Section::Interests));
            }
        }
        InterestsSelectionState::NoInterestsSelection => {}
        InterestsSelectionState::WithInterestsSelection { topics, authors } => {
            items.push(ScreenItem::OnboardingTitle);
            items.push(ScreenItem::OnboardingSubtitle);
            items.push(ScreenItem::AuthorsCarousel(authors.clone()));
            items.push(ScreenItem::TopicSelection(topics.clone()));
            items.push(ScreenItem::SaveInterestsButton {
                enabled: state.can_save_interests(),
            });
        }
        InterestsSelectionState::Error(failure) => items.push(ScreenItem::LoadError {
            section: Section::Interests,
            failure: failure.clone(),
        }),
    }
}

fn feed_section(items: &mut Vec<ScreenItem>, state: &FeedState, show_loading: bool, columns: usize) {
    match state {
        FeedState::Loading => {
            if show_loading {
                items.push(ScreenItem::LoadingWheel(Section::Feed));
            }
        }
        FeedState::Success(feed) => {
            items.extend(chunk_feed(feed, columns).into_iter().map(ScreenItem::FeedRow));
        }
        FeedState::Error(failure) => items.push(ScreenItem::LoadError {
            section: Section::Feed,
            failure: failure.clone(),
        }),
    }
}
