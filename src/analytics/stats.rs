//! Aggregate totals over an account's posts

use crate::storage::{AccountStats, Post, SortField};

/// Sum the counters of `posts` into an `AccountStats` for `username`
///
/// The average is rounded to two decimals and is `0.0` for an empty slice.
pub fn summarize(username: &str, posts: &[Post]) -> AccountStats {
    let total_posts = posts.len() as u64;
    let total_views = total(posts, SortField::Views);
    let total_likes = total(posts, SortField::Likes);
    let total_comments = total(posts, SortField::Comments);
    let total_shares = total(posts, SortField::Shares);

    let avg_views_per_post = if total_posts > 0 {
        round2(total_views as f64 / total_posts as f64)
    } else {
        0.0
    };

    AccountStats {
        username: username.to_string(),
        total_posts,
        total_views,
        total_likes,
        total_comments,
        total_shares,
        avg_views_per_post,
    }
}

/// Sum of one counter, pinned at `u64::MAX` instead of wrapping
fn total(posts: &[Post], field: SortField) -> u64 {
    posts
        .iter()
        .fold(0u64, |acc, p| acc.saturating_add(p.metric(field)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_totals() {
        let posts = vec![
            Post::new("acme", "1").counts(100, 10, 1, 0),
            Post::new("acme", "2").counts(250, 5, 2, 3),
            Post::new("acme", "3").counts(0, 0, 0, 1),
        ];

        let stats = summarize("acme", &posts);
        assert_eq!(stats.username, "acme");
        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.total_views, 350);
        assert_eq!(stats.total_likes, 15);
        assert_eq!(stats.total_comments, 3);
        assert_eq!(stats.total_shares, 4);
        assert_eq!(stats.avg_views_per_post, 116.67);
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize("ghost", &[]);
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.avg_views_per_post, 0.0);
    }

    #[test]
    fn test_summarize_saturates_huge_counters() {
        let huge = i64::MAX as u64;
        let posts: Vec<Post> = (0..3)
            .map(|i| Post::new("acme", i.to_string()).counts(huge, huge, 1, 0))
            .collect();

        let stats = summarize("acme", &posts);
        assert_eq!(stats.total_views, u64::MAX);
        assert_eq!(stats.total_likes, u64::MAX);
        assert_eq!(stats.total_comments, 3);
        assert!(stats.avg_views_per_post > 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1500.0), 1500.0);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }
}
