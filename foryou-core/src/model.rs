use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an entity's picture comes from. An empty `image_url` never reaches the image loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource<'a> {
    Placeholder,
    Remote(&'a str),
}

impl<'a> ImageSource<'a> {
    pub fn from_url(url: &'a str) -> Self {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            ImageSource::Placeholder
        } else {
            ImageSource::Remote(trimmed)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub medium_page: String,
    #[serde(default)]
    pub bio: String,
}

impl Author {
    pub fn image(&self) -> ImageSource<'_> {
        ImageSource::from_url(&self.image_url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: String,
}

impl Topic {
    pub fn image(&self) -> ImageSource<'_> {
        ImageSource::from_url(&self.image_url)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NewsResourceType {
    Article,
    Video,
    Codelab,
    Podcast,
    Docs,
    Event,
    Api,
    #[default]
    #[serde(other)]
    Unknown,
}

impl NewsResourceType {
    pub fn label(&self) -> &'static str {
        match self {
            NewsResourceType::Article => "Article",
            NewsResourceType::Video => "Video",
            NewsResourceType::Codelab => "Codelab",
            NewsResourceType::Podcast => "Podcast",
            NewsResourceType::Docs => "Docs",
            NewsResourceType::Event => "Event",
            NewsResourceType::Api => "API change",
            NewsResourceType::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsResource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub url: String,
    #[serde(default)]
    pub header_image_url: Option<String>,
    pub publish_date: DateTime<Utc>,
    #[serde(default, rename = "type")]
    pub resource_type: NewsResourceType,
    // author ids
    #[serde(default)]
    pub authors: Vec<String>,
    // topic ids
    #[serde(default)]
    pub topics: Vec<String>,
}

impl NewsResource {
    pub fn header_image(&self) -> ImageSource<'_> {
        ImageSource::from_url(self.header_image_url.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowableAuthor {
    pub author: Author,
    pub is_followed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowableTopic {
    pub topic: Topic,
    pub is_followed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveableNewsResource {
    pub news_resource: NewsResource,
    pub is_saved: bool,
}
