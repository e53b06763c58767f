use url::Url;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MediaError {
    #[error("No audio uploaded yet. Upload an MP3 or record and add it.")]
    NoAudio,
}

/// Rewrites a YouTube watch or short link into its embeddable player address.
///
/// Anything that is not a recognised YouTube link, including text that does not
/// parse as a URL, is returned unchanged.
pub fn to_embed_url(input: &str) -> String {
    let Ok(url) = Url::parse(input) else {
        return input.to_string();
    };
    let host = url.host_str().unwrap_or_default();

    if host.contains("youtube.com") {
        if let Some((_, video)) = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .filter(|(_, video)| !video.is_empty())
        {
            return format!("{EMBED_BASE}{video}");
        }
    }

    if host.contains("youtu.be") {
        let segment = url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .unwrap_or_default();
        if !segment.is_empty() {
            return format!("{EMBED_BASE}{segment}");
        }
    }

    input.to_string()
}

/// Checks that an audio handle points at something playable.
pub fn playable_audio(reference: &str) -> Result<&str, MediaError> {
    if reference.trim().is_empty() {
        return Err(MediaError::NoAudio);
    }
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_link_becomes_embed() {
        assert_eq!(
            to_embed_url("https://www.youtube.com/watch?v=ABC123"),
            "https://www.youtube.com/embed/ABC123"
        );
    }

    #[test]
    fn watch_link_with_extra_parameters() {
        assert_eq!(
            to_embed_url("https://youtube.com/watch?list=PL1&v=XYZ&t=42"),
            "https://www.youtube.com/embed/XYZ"
        );
    }

    #[test]
    fn short_link_becomes_embed() {
        assert_eq!(
            to_embed_url("https://youtu.be/ABC123"),
            "https://www.youtube.com/embed/ABC123"
        );
        assert_eq!(
            to_embed_url("https://youtu.be/ABC123?t=10"),
            "https://www.youtube.com/embed/ABC123"
        );
    }

    #[test]
    fn unparseable_text_passes_through() {
        assert_eq!(to_embed_url("not a url"), "not a url");
        assert_eq!(to_embed_url(""), "");
    }

    #[test]
    fn other_hosts_pass_through() {
        assert_eq!(to_embed_url("https://vimeo.com/123"), "https://vimeo.com/123");
    }

    #[test]
    fn youtube_without_video_passes_through() {
        assert_eq!(
            to_embed_url("https://www.youtube.com/embed/ABC123"),
            "https://www.youtube.com/embed/ABC123"
        );
        assert_eq!(to_embed_url("https://youtu.be/"), "https://youtu.be/");
    }

    #[test]
    fn empty_video_parameter_passes_through() {
        assert_eq!(
            to_embed_url("https://www.youtube.com/watch?v="),
            "https://www.youtube.com/watch?v="
        );
        assert_eq!(
            to_embed_url("https://www.youtube.com/watch?v=&list=PL1"),
            "https://www.youtube.com/watch?v=&list=PL1"
        );
    }

    #[test]
    fn empty_audio_is_reported() {
        assert_eq!(playable_audio(""), Err(MediaError::NoAudio));
        assert_eq!(playable_audio("blob:abc"), Ok("blob:abc"));
    }
}
