use serde::{Deserialize, Serialize};

/// A post as served by the remote API and cached locally.
///
/// The remote payload uses camelCase field names (`userId`), hence the
/// serde rename. Identity is assigned by the remote source and stable
/// across fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Case-insensitive substring match against every column.
    ///
    /// An empty query matches everything.
    pub fn matches_filter(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.id.to_string().contains(&query)
            || self.user_id.to_string().contains(&query)
            || self.title.to_lowercase().contains(&query)
            || self.body.to_lowercase().contains(&query)
    }
}

/// A locally authored post, identity not yet assigned.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post {
            id: 42,
            user_id: 7,
            title: "Morning Report".into(),
            body: "nothing to see here".into(),
        }
    }

    #[test]
    fn test_empty_query_matches() {
        assert!(sample().matches_filter(""));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(sample().matches_filter("morning"));
        assert!(sample().matches_filter("MORNING"));
        assert!(sample().matches_filter("RePoRt"));
    }

    #[test]
    fn test_matches_any_column() {
        assert!(sample().matches_filter("42"));
        assert!(sample().matches_filter("7"));
        assert!(sample().matches_filter("see here"));
    }

    #[test]
    fn test_no_match() {
        assert!(!sample().matches_filter("evening"));
    }

    #[test]
    fn test_deserializes_remote_field_names() {
        let json = r#"{"id":1,"userId":2,"title":"a","body":"x"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.user_id, 2);
        assert_eq!(post.title, "a");
    }
}
