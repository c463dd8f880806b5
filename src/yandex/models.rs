use serde::{Deserialize, Serialize};

/// Identifies a playlist by its owner's login and numeric kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub owner_login: String,
    pub kind: u64,
}

impl PlaylistRef {
    pub fn new(owner_login: impl Into<String>, kind: u64) -> Self {
        Self {
            owner_login: owner_login.into(),
            kind,
        }
    }

    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.owner_login, self.kind)
    }
}

impl std::fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/playlists/{}", self.owner_login, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track_key: String,
    pub track_id: i64,
    pub album_id: i64,
    pub title: String,
    pub artists: Vec<String>,
    pub duration_ms: Option<i64>,
    pub cover_url: Option<String>,
    pub link: Option<String>,
}

impl TrackRecord {
    /// Builds a record whose identity is the `(track_id, album_id)` pair.
    pub fn new(track_id: i64, album_id: i64, title: impl Into<String>, artists: Vec<String>) -> Self {
        Self {
            track_key: format!("{}:{}", track_id, album_id),
            track_id,
            album_id,
            title: title.into(),
            artists,
            duration_ms: None,
            cover_url: None,
            link: None,
        }
    }

    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(|s| s.as_str()).unwrap_or("")
    }
}

/// One playlist's listing at fetch time. Tracks may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSnapshot {
    pub title: String,
    pub tracks: Vec<TrackRecord>,
}

#[cfg(test)]
impl TrackRecord {
    pub fn mock(track_id: i64, album_id: i64, title: &str) -> Self {
        Self::new(track_id, album_id, title, vec!["Artist".to_string()])
    }
}
