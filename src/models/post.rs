use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub meta_description: String,
    /// Comma-separated keywords exactly as the editor typed them.
    pub keywords: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub content: String,
    pub plain_content: String,
    pub reading_time: u32,
    pub views: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Post {
    pub fn keyword_list(&self) -> Vec<String> {
        crate::services::text::parse_keywords(&self.keywords)
    }
}

/// Fields submitted by the editor when creating or updating a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl From<&Post> for PostInput {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            meta_description: post.meta_description.clone(),
            keywords: post.keywords.clone(),
            image_url: post.image_url.clone(),
            category: post.category.clone(),
            content: post.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub category: Option<String>,
    pub reading_time: u32,
    pub views: i64,
    pub created_at: String,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            meta_description: post.meta_description.clone(),
            keywords: post.keyword_list(),
            category: post.category.clone(),
            reading_time: post.reading_time,
            views: post.views,
            created_at: post.created_at.clone(),
        }
    }
}
