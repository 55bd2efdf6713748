//! Feed Aggregation
//!
//! Builds the groups shown on the feeds page: a fixed group of places the
//! author is active in, followed by the neighbor links from the data API.

use crate::cache::DataCache;
use crate::models::{FeedEntry, FeedGroup};

/// Returns every feed group, neighbors last.
///
/// The neighbor group is empty rather than missing when the data API is down.
pub async fn feed_groups(cache: &DataCache) -> Vec<FeedGroup> {
    let neighbors = cache.get_neighbors(false).await;

    vec![
        featured_group(),
        FeedGroup {
            name: "我的邻居".to_string(),
            desc: "友情需要常联系～～".to_string(),
            entries: neighbors.as_ref().clone(),
        },
    ]
}

/// Places the author is active in.
pub fn featured_group() -> FeedGroup {
    FeedGroup {
        name: "活跃世界".to_string(),
        desc: "我经常活跃的地方～或者使用的工具～".to_string(),
        entries: vec![
            FeedEntry {
                author: "Linux.do".to_string(),
                title: Some("Linux.do".to_string()),
                desc: "新的理想型社区".to_string(),
                link: "https://linux.do/".to_string(),
                feed: None,
                icon: favicon("linux.do"),
                avatar: "https://oss.helong.online/bucket-IMG/3f6a06f102be120040b8a761a4305322c115c2376bbd84e641c294db89d88d43.png".to_string(),
                archs: Vec::new(),
                date: "2025-07-21".to_string(),
                comment: "真诚、友善、团结、专业".to_string(),
            },
            FeedEntry {
                author: "NodeSeek".to_string(),
                title: None,
                desc: "旨在为主机爱好者打造高品质社区，传递行业新闻，分享技术心得。".to_string(),
                link: "https://www.nodeseek.com/".to_string(),
                feed: None,
                icon: favicon("www.nodeseek.com"),
                avatar: favicon("www.nodeseek.com"),
                archs: Vec::new(),
                date: "2025-08-29".to_string(),
                comment: String::new(),
            },
        ],
    }
}

fn favicon(domain: &str) -> String {
    format!("https://api.jiangcheng.site/api/favicon?url={}", domain)
}
