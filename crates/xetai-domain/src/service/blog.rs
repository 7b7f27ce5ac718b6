//! Blog content queries

use xetai_types::{BlogCategory, BlogPost};

pub const RELATED_POSTS_LIMIT: usize = 3;
pub const RECOMMENDED_POSTS_LIMIT: usize = 2;

/// Posts of one category, newest first
pub fn posts_in_category(posts: &[BlogPost], category: BlogCategory) -> Vec<&BlogPost> {
    let mut found: Vec<&BlogPost> = posts.iter().filter(|p| p.category == category).collect();
    found.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
    found
}

/// All posts, newest first
pub fn latest_posts(posts: &[BlogPost], limit: usize) -> Vec<&BlogPost> {
    let mut sorted: Vec<&BlogPost> = posts.iter().collect();
    sorted.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
    sorted.truncate(limit);
    sorted
}

/// Other posts in the same category
pub fn related_posts<'a>(posts: &'a [BlogPost], post: &BlogPost, limit: usize) -> Vec<&'a BlogPost> {
    posts
        .iter()
        .filter(|p| p.category == post.category && p.id != post.id)
        .take(limit)
        .collect()
}

/// Posts from other categories
pub fn recommended_posts<'a>(posts: &'a [BlogPost], post: &BlogPost, limit: usize) -> Vec<&'a BlogPost> {
    posts
        .iter()
        .filter(|p| p.category != post.category && p.id != post.id)
        .take(limit)
        .collect()
}

/// Resolve a post from its `/{category-slug}/{slug}` path parts
pub fn find_post<'a>(posts: &'a [BlogPost], category_slug: &str, slug: &str) -> Option<&'a BlogPost> {
    let category = BlogCategory::from_url_slug(category_slug)?;
    posts
        .iter()
        .find(|p| p.category == category && p.slug == slug)
}
