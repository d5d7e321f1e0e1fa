//! The `og:image` tag pointing a page at its card.

use ogcard_types::THUMBNAIL_FILE_NAME;

/// What the tag helper needs to know about the page being rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageInfo<'a> {
    pub is_post: bool,
    /// Site-relative output path, e.g. `2024/01/15/hello/index.html`.
    pub path: &'a str,
    /// A thumbnail set in the page's front matter.
    pub thumbnail: Option<&'a str>,
}

/// Builds `<meta property="og:image" ... />` for a post. Other pages get no tag.
///
/// A front-matter thumbnail wins over the generated card.
pub fn og_image_tag(site_url: &str, page: &PageInfo<'_>) -> Option<String> {
    if !page.is_post {
        return None;
    }
    let url = match page.thumbnail.filter(|t| !t.is_empty()) {
        Some(thumbnail) => full_url_for(site_url, thumbnail),
        None => {
            let page_url = full_url_for(site_url, page.path);
            let dir = page_url.strip_suffix("index.html").unwrap_or(&page_url);
            format!("{}{}", dir, THUMBNAIL_FILE_NAME)
        }
    };
    Some(format!(
        "<meta property=\"og:image\" content=\"{}\" />",
        escape_attribute(&url)
    ))
}

/// Joins a site-relative path onto `site_url`. Absolute URLs pass through.
pub fn full_url_for(site_url: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    format!(
        "{}/{}",
        site_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn is_absolute_url(path: &str) -> bool {
    let is_scheme = |s: &str| {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
    };
    path.starts_with("//") || path.split_once("://").is_some_and(|(scheme, _)| is_scheme(scheme))
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
