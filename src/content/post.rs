//! Blog posts

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::collection::Item;
use crate::error::Result;
use crate::helpers::date::deserialize_date;
use crate::Site;

/// Front-matter schema for a blog post
///
/// Every field is required; a file missing one fails validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Order-preserving tag list
    pub tags: Vec<String>,
    pub published: bool,
}

/// A loaded blog post
pub type Post = Item<PostMetadata>;

/// Newest first, with a slug tiebreak so equal dates order the same way
/// on every call
pub fn by_date_descending(a: &Post, b: &Post) -> Ordering {
    b.metadata
        .date
        .cmp(&a.metadata.date)
        .then_with(|| a.slug.cmp(&b.slug))
}

fn is_visible(post: &Post, include_unpublished: bool) -> bool {
    post.metadata.published || include_unpublished
}

pub(crate) fn find_all(site: &Site, include_unpublished: bool) -> Result<Vec<Post>> {
    let mut posts = site.blogs().find_all()?;
    posts.retain(|post| is_visible(post, include_unpublished));
    posts.sort_by(by_date_descending);
    Ok(posts)
}

pub(crate) fn find_by_slug(
    site: &Site,
    slug: &str,
    include_unpublished: bool,
) -> Result<Option<Post>> {
    Ok(site
        .blogs()
        .find_by_slug(slug)?
        .filter(|post| is_visible(post, include_unpublished)))
}
