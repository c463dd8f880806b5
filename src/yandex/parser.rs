use url::{ParseError, Url};

use crate::error::PlaylistUrlError;
use crate::yandex::models::PlaylistRef;

const ALLOWED_HOSTS: [&str; 2] = ["music.yandex.ru", "music.yandex.com"];

/// Parse a playlist URL into its owner login and kind.
/// Supports formats:
/// - https://music.yandex.ru/users/user123/playlists/42
/// - https://music.yandex.com/users/user123/playlists/42?utm=1
/// - http://music.yandex.ru/users/user123/playlists/42/#hash
pub fn parse_playlist_url(url_str: &str) -> Result<PlaylistRef, PlaylistUrlError> {
    let url_str = url_str.trim();
    if url_str.is_empty() {
        return Err(PlaylistUrlError::Empty);
    }

    let url = Url::parse(url_str).map_err(|e| match e {
        ParseError::RelativeUrlWithoutBase => PlaylistUrlError::UnsupportedScheme,
        _ => PlaylistUrlError::UnsupportedHost,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(PlaylistUrlError::UnsupportedScheme);
    }

    match url.host_str() {
        Some(host) if ALLOWED_HOSTS.contains(&host) => {}
        _ => return Err(PlaylistUrlError::UnsupportedHost),
    }

    let mut segments: Vec<&str> = url
        .path_segments()
        .ok_or(PlaylistUrlError::InvalidPath)?
        .collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }

    // Expect /users/{login}/playlists/{kind}
    let [users, owner_login, playlists, kind] = segments.as_slice() else {
        return Err(PlaylistUrlError::InvalidPath);
    };
    if *users != "users" || *playlists != "playlists" {
        return Err(PlaylistUrlError::InvalidPath);
    }
    if owner_login.is_empty() {
        return Err(PlaylistUrlError::MissingOwner);
    }
    if kind.is_empty() || !kind.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PlaylistUrlError::InvalidKind);
    }
    let kind = kind.parse().map_err(|_| PlaylistUrlError::InvalidKind)?;

    Ok(PlaylistRef::new(*owner_login, kind))
}
