//! Feed and timeline records
//!
//! Shapes of the JSON served by the external data providers, plus the feed
//! entries the site aggregates from them. Remote fields are defaulted so a
//! provider adding or dropping optional fields does not break decoding.

use serde::{Deserialize, Serialize};

/// A timeline ("moments") post from `talk_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    #[serde(default)]
    pub id: Option<i64>,
    /// Publication date, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Pinned posts sort before everything else
    #[serde(default)]
    pub is_top: bool,
}

/// A post pulled from a friend's feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendPost {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub pub_date: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub feed_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A raw neighbor link record from `link_data.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeighborLink {
    pub link_name: String,
    #[serde(default)]
    pub link_desc: String,
    pub link_address: String,
    #[serde(default)]
    pub link_atom: Option<String>,
    #[serde(default)]
    pub link_img: String,
    #[serde(default)]
    pub date: String,
}

/// A site listed on the feeds page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub desc: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<String>,
    pub icon: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub archs: Vec<String>,
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl From<NeighborLink> for FeedEntry {
    fn from(link: NeighborLink) -> Self {
        // Only the date part; drop the time
        let date = link
            .date
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            author: link.link_name,
            title: None,
            desc: link.link_desc,
            link: link.link_address,
            feed: link.link_atom.filter(|atom| !atom.is_empty()),
            icon: link.link_img.clone(),
            avatar: link.link_img,
            archs: vec!["服务器".to_string()],
            date,
            comment: String::new(),
        }
    }
}

/// A named group of feed entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedGroup {
    pub name: String,
    pub desc: String,
    pub entries: Vec<FeedEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moment_defaults() {
        let json = r#"{"date": "2024-01-01", "content": "hello"}"#;
        let moment: Moment = serde_json::from_str(json).unwrap();

        assert_eq!(moment.id, None);
        assert!(!moment.is_top);
        assert!(moment.tags.is_empty());
        assert!(moment.img.is_none());
    }

    #[test]
    fn test_friend_post_camel_case() {
        let json = r#"{
            "title": "Post",
            "link": "https://example.com/post",
            "pubDate": "2024-05-01",
            "author": "someone",
            "feedTitle": "Example"
        }"#;
        let post: FriendPost = serde_json::from_str(json).unwrap();

        assert_eq!(post.pub_date, "2024-05-01");
        assert_eq!(post.feed_title, "Example");
        assert!(post.content.is_none());

        let out = serde_json::to_value(&post).unwrap();
        assert_eq!(out["pubDate"], "2024-05-01");
        assert!(out.get("content").is_none());
    }

    #[test]
    fn test_neighbor_into_feed_entry() {
        let link = NeighborLink {
            link_name: "Alice".to_string(),
            link_desc: "A blog".to_string(),
            link_address: "https://alice.example".to_string(),
            link_atom: Some("https://alice.example/atom.xml".to_string()),
            link_img: "https://alice.example/avatar.png".to_string(),
            date: "2024-03-02 10:11:12".to_string(),
        };

        let entry = FeedEntry::from(link);

        assert_eq!(entry.author, "Alice");
        assert_eq!(entry.link, "https://alice.example");
        assert_eq!(entry.feed.as_deref(), Some("https://alice.example/atom.xml"));
        assert_eq!(entry.icon, entry.avatar);
        assert_eq!(entry.archs, vec!["服务器".to_string()]);
        assert_eq!(entry.date, "2024-03-02");
        assert!(entry.comment.is_empty());
    }

    #[test]
    fn test_neighbor_without_atom() {
        let json = r#"{
            "link_name": "Bob",
            "link_address": "https://bob.example",
            "link_atom": "",
            "date": "2023-12-31"
        }"#;
        let link: NeighborLink = serde_json::from_str(json).unwrap();
        let entry = FeedEntry::from(link);

        assert!(entry.feed.is_none());
        assert_eq!(entry.date, "2023-12-31");
    }
}
