pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod navigation;
pub mod prefs;
pub mod provider;
pub mod screen;
pub mod source;
pub mod state;

pub use catalog::Catalog;
pub use config::{AppConfig, StorageConfig, ThemeConfig, UiConfig};
pub use error::{EntityKind, ForYouError, ForYouResult};
pub use layout::{chunk_feed, number_of_columns, WindowWidthClass};
pub use model::{
    Author, FollowableAuthor, FollowableTopic, ImageSource, NewsResource, NewsResourceType,
    SaveableNewsResource, Topic,
};
pub use navigation::{RouteTable, TopLevelDestination, TopLevelNavigator, FOR_YOU};
pub use prefs::{PreferencesStore, UserPreferences};
pub use provider::{spawn_provider, ForYouProvider, ProviderHandle};
pub use screen::{compose, Intent, ScreenInput, ScreenItem, Section};
pub use source::{snapshot_channel, SnapshotPublisher, SnapshotSource, WatchSource};
pub use state::{FeedState, InterestsSelectionState, LoadFailure};
