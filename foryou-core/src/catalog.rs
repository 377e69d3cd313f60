use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EntityKind, ForYouError, ForYouResult};
use crate::model::{Author, NewsResource, NewsResourceType, Topic};

/// Everything the user can follow or read.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub news_resources: Vec<NewsResource>,
}

fn check_unique<'a>(kind: EntityKind, ids: impl Iterator<Item = &'a str>) -> ForYouResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ForYouError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

impl Catalog {
    pub fn validate(&self) -> ForYouResult<()> {
        check_unique(EntityKind::Topic, self.topics.iter().map(|t| t.id.as_str()))?;
        check_unique(EntityKind::Author, self.authors.iter().map(|a| a.id.as_str()))?;
        check_unique(
            EntityKind::NewsResource,
            self.news_resources.iter().map(|r| r.id.as_str()),
        )
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    pub fn news_resource(&self, id: &str) -> Option<&NewsResource> {
        self.news_resources.iter().find(|r| r.id == id)
    }

    pub async fn load_from(path: impl AsRef<Path>) -> ForYouResult<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let catalog: Catalog = serde_json::from_slice(&bytes)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads `catalog.json` from `dir`, or the bundled sample when it is missing or invalid.
    pub async fn load_from_dir_or_sample(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join("catalog.json");
        match Self::load_from(&path).await {
            Ok(catalog) => {
                info!(
                    topics = catalog.topics.len(),
                    authors = catalog.authors.len(),
                    news = catalog.news_resources.len(),
                    "catalog loaded"
                );
                catalog
            }
            Err(ForYouError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no catalog file, using sample content");
                Self::sample()
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "invalid catalog, using sample content");
                Self::sample()
            }
        }
    }

    pub fn sample() -> Self {
        fn topic(id: &str, name: &str, short: &str) -> Topic {
            Topic {
                id: id.into(),
                name: name.into(),
                short_description: short.into(),
                long_description: String::new(),
                url: String::new(),
                image_url: String::new(),
            }
        }

        fn author(id: &str, name: &str, twitter: &str) -> Author {
            Author {
                id: id.into(),
                name: name.into(),
                image_url: String::new(),
                twitter: twitter.into(),
                medium_page: String::new(),
                bio: String::new(),
            }
        }

        fn published(secs: i64) -> DateTime<Utc> {
            DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
        }

        Catalog {
            topics: vec![
                topic("1", "Headlines", "News we want everyone to see"),
                topic("2", "UI", "Building user interfaces"),
                topic("3", "Testing", "Making sure code does what it should"),
                topic("4", "Performance", "Startup, rendering and memory"),
                topic("5", "Architecture", "Structuring apps that last"),
                topic("6", "Accessibility", "Apps everyone can use"),
            ],
            authors: vec![
                author("1", "Android Dev", "@AndroidDev"),
                author("2", "Manuel Vivo", "@manuelvicnt"),
                author("3", "Florina Muntenescu", "@FMuntenescu"),
                author("4", "Jolanda Verhoef", "@Lojanda"),
            ],
            news_resources: vec![
                NewsResource {
                    id: "1".into(),
                    title: "Jetpack Compose 1.1 is now stable".into(),
                    content: "Lazy layouts, stretch overscroll and more.".into(),
                    url: "https://android-developers.googleblog.com/2022/02/compose-11-now-stable.html".into(),
                    header_image_url: None,
                    publish_date: published(1_643_760_000),
                    resource_type: NewsResourceType::Article,
                    authors: vec!["1".into()],
                    topics: vec!["1".into(), "2".into()],
                },
                NewsResource {
                    id: "2".into(),
                    title: "Rebuilding our guide to app architecture".into(),
                    content: "UI layer, domain layer and data layer guidance.".into(),
                    url: "https://developer.android.com/topic/architecture".into(),
                    header_image_url: None,
                    publish_date: published(1_639_526_400),
                    resource_type: NewsResourceType::Docs,
                    authors: vec!["2".into()],
                    topics: vec!["5".into()],
                },
                NewsResource {
                    id: "3".into(),
                    title: "Testing in Compose".into(),
                    content: "Semantics, finders and assertions.".into(),
                    url: "https://developer.android.com/jetpack/compose/testing".into(),
                    header_image_url: None,
                    publish_date: published(1_646_092_800),
                    resource_type: NewsResourceType::Codelab,
                    authors: vec!["3".into()],
                    topics: vec!["2".into(), "3".into()],
                },
                NewsResource {
                    id: "4".into(),
                    title: "Improving app startup with Baseline Profiles".into(),
                    content: "Ahead-of-time compilation for critical user journeys.".into(),
                    url: "https://developer.android.com/topic/performance/baselineprofiles".into(),
                    header_image_url: None,
                    publish_date: published(1_649_030_400),
                    resource_type: NewsResourceType::Video,
                    authors: vec!["4".into()],
                    topics: vec!["4".into()],
                },
                NewsResource {
                    id: "5".into(),
                    title: "Accessibility in Compose".into(),
                    content: "Content descriptions, merging and custom actions.".into(),
                    url: "https://developer.android.com/jetpack/compose/accessibility".into(),
                    header_image_url: None,
                    publish_date: published(1_651_708_800),
                    resource_type: NewsResourceType::Article,
                    authors: vec!["1".into(), "3".into()],
                    topics: vec!["2".into(), "6".into()],
                },
            ],
        }
    }
}
