// Trailer links are free text; the detail view needs a YouTube embed URL.

use url::Url;

const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";
const VIDEO_ID_LEN: usize = 11;

/// Canonicalizes a user-supplied video link into an embeddable URL.
///
/// Empty input stays empty and embed links pass through untouched. Short
/// links (`youtu.be/<id>`) and watch links (`youtube.com/watch?v=<id>`) are
/// rewritten to `https://www.youtube.com/embed/<id>`. Anything else is
/// returned unchanged so it still renders as a plain link.
pub fn to_embed_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.contains("youtube.com/embed/") {
        return raw.to_string();
    }

    match extract_video_id(trimmed) {
        Some(id) => format!("{}{}", EMBED_PREFIX, id),
        None => raw.to_string(),
    }
}

/// Pulls the 11 character video id out of a short or watch link
pub fn extract_video_id(link: &str) -> Option<String> {
    let url = parse_lenient(link)?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let candidate = match host {
        "youtu.be" => url.path_segments()?.next()?.to_string(),
        "youtube.com" | "music.youtube.com" if url.path() == "/watch" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?,
        _ => return None,
    };

    is_video_id(&candidate).then_some(candidate)
}

fn parse_lenient(link: &str) -> Option<Url> {
    Url::parse(link)
        .ok()
        .filter(|url| url.has_host())
        .or_else(|| Url::parse(&format!("https://{}", link)).ok())
}

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://youtu.be/lWr6dhTcu-E")]
    #[case("https://www.youtube.com/watch?v=lWr6dhTcu-E")]
    #[case("https://youtube.com/watch?feature=share&v=lWr6dhTcu-E&t=42")]
    #[case("https://youtu.be/lWr6dhTcu-E?si=abcdef")]
    #[case("https://m.youtube.com/watch?v=lWr6dhTcu-E")]
    #[case("youtu.be/lWr6dhTcu-E")]
    #[case("www.youtube.com/watch?v=lWr6dhTcu-E")]
    fn test_known_forms_become_embed_urls(#[case] raw: &str) {
        assert_eq!(
            to_embed_url(raw),
            "https://www.youtube.com/embed/lWr6dhTcu-E"
        );
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(to_embed_url(""), "");
        assert_eq!(to_embed_url("   "), "");
    }

    #[rstest]
    #[case("https://www.youtube.com/embed/lWr6dhTcu-E")]
    #[case("https://www.youtube.com/embed/lWr6dhTcu-E?autoplay=1")]
    fn test_embed_urls_are_unchanged(#[case] raw: &str) {
        assert_eq!(to_embed_url(raw), raw);
    }

    #[rstest]
    #[case("https://vimeo.com/76979871")]
    #[case("https://www.youtube.com/watch?list=PL123")]
    #[case("https://youtu.be/short")]
    #[case("https://www.youtube.com/watch?v=toolongvideoid123")]
    #[case("not a link at all")]
    fn test_unmatched_links_are_returned_unchanged(#[case] raw: &str) {
        assert_eq!(to_embed_url(raw), raw);
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
    }
}
