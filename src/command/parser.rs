use crate::host::RepliedMessage;

/// Outcome of scanning a prompt line for a `--cref <url>` directive.
///
/// The directive is matched case-insensitively and tolerates a missing
/// space before the url. On a match the directive is stripped from the
/// remaining prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrefDirective {
    Found { url: String, rest: String },
    NotFound,
}

const CREF: &str = "--cref";

pub fn extract_cref(raw: &str) -> CrefDirective {
    let Some(pos) = find_cref(raw) else {
        return CrefDirective::NotFound;
    };

    let after = &raw[pos + CREF.len()..];
    let value = after.trim_start();
    let ws_len = after.len() - value.len();
    let url: &str = value.split_whitespace().next().unwrap_or("");
    if url.is_empty() {
        // A bare `--cref` with no value is not a directive.
        return CrefDirective::NotFound;
    }

    let end = pos + CREF.len() + ws_len + url.len();
    let rest = format!("{}{}", &raw[..pos], &raw[end..]);
    CrefDirective::Found {
        url: url.to_string(),
        rest: rest.trim().to_string(),
    }
}

/// Byte-wise ASCII case-insensitive search; the needle is ASCII so every
/// match starts on a char boundary.
fn find_cref(raw: &str) -> Option<usize> {
    let haystack = raw.as_bytes();
    let needle = CREF.as_bytes();
    if haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Prompt with its reference image resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrompt {
    pub prompt: String,
    pub reference: Option<String>,
}

/// Resolve the reference image for a prompt line.
///
/// Precedence: explicit `--cref` directive (stripped from the prompt),
/// then a URL-like token in the line, then a photo attachment on the
/// replied-to message. No match is not an error.
pub fn resolve(body: &str, replied_to: Option<&RepliedMessage>) -> ResolvedPrompt {
    if let CrefDirective::Found { url, rest } = extract_cref(body) {
        return ResolvedPrompt {
            prompt: rest,
            reference: Some(url),
        };
    }

    let prompt = body.trim().to_string();

    if let Some(url) = body
        .split_whitespace()
        .find(|token| token.starts_with("http://") || token.starts_with("https://"))
    {
        return ResolvedPrompt {
            prompt,
            reference: Some(url.to_string()),
        };
    }

    let reference = replied_to
        .and_then(|replied| replied.image_attachment())
        .map(|att| att.url.clone());

    ResolvedPrompt { prompt, reference }
}
