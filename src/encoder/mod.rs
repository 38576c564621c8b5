//! Meme URL construction for the memegen image service
//!
//! Caption lines become path segments of the image URL. Characters that are
//! significant in a URL path are rewritten to the service's `~x` escapes and
//! blank lines become the `_` placeholder, so every line maps to exactly one
//! non-empty segment.

mod config;

pub use config::{EncoderConfig, DEFAULT_FORMAT, MEMEGEN_API_BASE};

/// Placeholder segment the image service renders as an empty slot
pub const BLANK_LINE: &str = "_";

/// Build the image URL for a template and its caption lines
///
/// Uses the public memegen service. The caller is expected to pass exactly as
/// many lines as the template has slots; this is not checked here.
///
/// # Example
///
/// ```rust
/// use meme_mint::encoder::encode;
///
/// let url = encode("drake", &["Code works", "Code breaks?"], "png");
/// assert_eq!(url, "https://api.memegen.link/images/drake/Code_works/Code_breaks~q.png");
/// ```
pub fn encode<S: AsRef<str>>(template_id: &str, lines: &[S], format: &str) -> String {
    encode_with_base(MEMEGEN_API_BASE, template_id, lines, format)
}

/// Build the image URL against a specific image service base
pub fn encode_with_base<S: AsRef<str>>(
    base_url: &str,
    template_id: &str,
    lines: &[S],
    format: &str,
) -> String {
    let base_url = base_url.trim_end_matches('/');

    let url = if lines.is_empty() {
        format!("{}/images/{}.{}", base_url, template_id, format)
    } else {
        let text_path = lines
            .iter()
            .map(|line| encode_line(line.as_ref()))
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/images/{}/{}.{}", base_url, template_id, text_path, format)
    };

    repair_double_slashes(&url)
}

/// Turn one caption line into a path segment
///
/// Empty and all-whitespace lines become [`BLANK_LINE`].
pub fn encode_line(line: &str) -> String {
    if line.trim().is_empty() {
        BLANK_LINE.to_string()
    } else {
        sanitize(line)
    }
}

/// Rewrite URL-significant characters to the image service escapes
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => out.push('_'),
            '?' => out.push_str("~q"),
            '&' => out.push_str("~a"),
            '%' => out.push_str("~p"),
            '#' => out.push_str("~h"),
            '/' => out.push_str("~s"),
            '\\' => out.push_str("~b"),
            '<' => out.push_str("~l"),
            '>' => out.push_str("~g"),
            _ => out.push(c),
        }
    }
    out
}

/// Fill empty path segments with `_`, leaving the `scheme://` separator alone
///
/// Every run of slashes after the scheme comes out with `_` between each pair,
/// so the result never contains `//` past the scheme and a second pass is a
/// no-op.
pub fn repair_double_slashes(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => format!("{}://{}", scheme, fill_empty_segments(rest)),
        None => fill_empty_segments(url),
    }
}

fn fill_empty_segments(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut after_slash = false;
    for c in path.chars() {
        if c == '/' && after_slash {
            out.push('_');
        }
        after_slash = c == '/';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NO_LINES: [&str; 0] = [];

    #[test]
    fn test_encode_two_lines() {
        assert_eq!(
            encode("drake", &["Code works", "Code breaks?"], "png"),
            "https://api.memegen.link/images/drake/Code_works/Code_breaks~q.png"
        );
    }

    #[test]
    fn test_encode_blank_line() {
        assert_eq!(
            encode("drake", &[""], "png"),
            "https://api.memegen.link/images/drake/_.png"
        );
    }

    #[test]
    fn test_encode_no_lines() {
        assert_eq!(
            encode("drake", &NO_LINES, "png"),
            "https://api.memegen.link/images/drake.png"
        );
    }

    #[test]
    fn test_whitespace_line_is_blank() {
        assert_eq!(
            encode("fine", &["   ", "this is fine"], "jpg"),
            "https://api.memegen.link/images/fine/_/this_is_fine.jpg"
        );
    }

    #[test]
    fn test_sanitize_every_reserved_char() {
        assert_eq!(sanitize(" ?&%#/\\<>"), "_~q~a~p~h~s~b~l~g");
    }

    #[test]
    fn test_sanitize_leaves_escapes_and_unicode() {
        assert_eq!(sanitize("~q already"), "~q_already");
        assert_eq!(sanitize("héllo wörld"), "héllo_wörld");
        assert_eq!(sanitize("50-50_chance"), "50-50_chance");
    }

    #[test]
    fn test_slash_in_caption_does_not_split_segment() {
        assert_eq!(
            encode("cmm", &["tabs/spaces"], "png"),
            "https://api.memegen.link/images/cmm/tabs~sspaces.png"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(
            encode_with_base("https://api.memegen.link/", "doge", &["wow"], "png"),
            "https://api.memegen.link/images/doge/wow.png"
        );
    }

    #[test]
    fn test_repair_double_slash() {
        assert_eq!(
            repair_double_slashes("https://api.memegen.link/images/drake//breaks.png"),
            "https://api.memegen.link/images/drake/_/breaks.png"
        );
    }

    #[test]
    fn test_repair_slash_runs() {
        assert_eq!(repair_double_slashes("https://x/a///b"), "https://x/a/_/_/b");
    }

    #[test]
    fn test_repair_without_scheme() {
        assert_eq!(repair_double_slashes("images//a.png"), "images/_/a.png");
    }

    #[test]
    fn test_repair_is_idempotent() {
        for url in [
            "https://api.memegen.link/images/drake//breaks.png",
            "https://x/a///b////c",
            "http://plain/path.png",
            "//leading",
            "no/slashes/doubled",
        ] {
            let once = repair_double_slashes(url);
            assert_eq!(repair_double_slashes(&once), once);
        }
    }

    #[test]
    fn test_empty_template_id_repaired() {
        assert_eq!(
            encode("", &["a"], "png"),
            "https://api.memegen.link/images/_/a.png"
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let lines = ["when the build passes", "on the first try?"];
        let first = encode("success", &lines, "webp");
        for _ in 0..10 {
            assert_eq!(encode("success", &lines, "webp"), first);
        }
    }
}
