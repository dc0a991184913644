// file: src/gateway/pagination.rs
// description: Link header parsing for paginated list endpoints
// reference: https://docs.github.com/en/rest/using-the-rest-api/using-pagination-in-the-rest-api

/// Extract the `rel="next"` target from a `Link` header value.
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|part| {
        let mut sections = part.split(';');
        let target = sections.next()?.trim();
        let is_next = sections.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });

        if !is_next {
            return None;
        }

        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// Append `per_page` to a list URL, respecting an existing query string.
pub fn with_page_size(url: &str, per_page: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}per_page={}", url, separator, per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_found() {
        let header = r#"<https://api.github.com/organizations/1/repos?page=2>; rel="next", <https://api.github.com/organizations/1/repos?page=5>; rel="last""#;
        assert_eq!(
            next_page_url(header),
            Some("https://api.github.com/organizations/1/repos?page=2".to_string())
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let header = r#"<https://api.github.com/organizations/1/repos?page=1>; rel="first", <https://api.github.com/organizations/1/repos?page=4>; rel="prev""#;
        assert_eq!(next_page_url(header), None);
    }

    #[test]
    fn test_next_not_first_entry() {
        let header = r#"<https://x/?page=1>; rel="prev", <https://x/?page=3>; rel="next""#;
        assert_eq!(next_page_url(header), Some("https://x/?page=3".to_string()));
    }

    #[test]
    fn test_with_page_size() {
        assert_eq!(
            with_page_size("https://api.github.com/orgs/acme/repos", 100),
            "https://api.github.com/orgs/acme/repos?per_page=100"
        );
        assert_eq!(
            with_page_size("https://api.github.com/orgs/acme/repos?type=all", 30),
            "https://api.github.com/orgs/acme/repos?type=all&per_page=30"
        );
    }
}
