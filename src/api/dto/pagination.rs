//! Page-number pagination and the list envelope.

use axum::http::Uri;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use serde_json::json;
use url::Url;

use crate::config::MAX_PAGE_SIZE;
use crate::error::AppError;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse numbers from query strings.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl PaginationParams {
    /// Validates the parameters against the configured default page size.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: `default_limit`, capped at [`MAX_PAGE_SIZE`]
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` or `limit` is below 1, or if
    /// the page lies beyond the range of row offsets.
    pub fn resolve(&self, default_limit: i64) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(default_limit);

        if page < 1 {
            return Err(AppError::field("page", "Page must be greater than 0"));
        }

        if limit < 1 {
            return Err(AppError::field("limit", "Limit must be greater than 0"));
        }

        let limit = limit.min(MAX_PAGE_SIZE);
        if page.checked_mul(limit).is_none() {
            return Err(AppError::field("page", "Page is out of range"));
        }

        Ok(PageRequest { page, limit })
    }
}

/// Paginated list envelope.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wraps one page of `results` and links its neighbours.
    ///
    /// `uri` is the original request URI; links keep its other query
    /// parameters and are made absolute against `public_url`.
    pub fn new(
        results: Vec<T>,
        count: i64,
        request: PageRequest,
        public_url: &str,
        uri: &Uri,
    ) -> Self {
        let has_next = request
            .page
            .checked_mul(request.limit)
            .is_some_and(|end| end < count);
        let has_previous = request.page > 1;

        Self {
            count,
            next: has_next
                .then(|| page_url(public_url, uri, request.page + 1))
                .flatten(),
            previous: has_previous
                .then(|| page_url(public_url, uri, request.page - 1))
                .flatten(),
            results,
        }
    }
}

/// Absolute URL of `page`, dropping the `page` parameter for the first page.
fn page_url(public_url: &str, uri: &Uri, page: i64) -> Option<String> {
    let mut url = Url::parse(public_url).ok()?.join(uri.path()).ok()?;

    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(
        uri.query().unwrap_or_default().as_bytes(),
    )
    .filter(|(key, _)| key != "page")
    .map(|(key, value)| (key.into_owned(), value.into_owned()))
    .collect();

    url.set_query(None);
    if !pairs.is_empty() || page > 1 {
        let mut query = url.query_pairs_mut();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }

    Some(url.to_string())
}

/// Validation error for a query parameter that is not an integer.
pub fn invalid_number(field: &str, value: &str) -> AppError {
    AppError::bad_request(
        format!("Invalid value for {field}"),
        json!({ field: [format!("A valid integer is required, got '{value}'")] }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, limit: Option<i64>) -> PaginationParams {
        PaginationParams { page, limit }
    }

    #[test]
    fn test_defaults() {
        let request = params(None, None).resolve(6).unwrap();
        assert_eq!(request, PageRequest { page: 1, limit: 6 });
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_page_2_with_custom_limit() {
        let request = params(Some(2), Some(10)).resolve(6).unwrap();
        assert_eq!(request.offset(), 10);
        assert_eq!(request.limit, 10);
    }

    #[test]
    fn test_limit_is_capped() {
        let request = params(None, Some(1000)).resolve(6).unwrap();
        assert_eq!(request.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).resolve(6).is_err());
    }

    #[test]
    fn test_huge_page_is_error_not_overflow() {
        let result = params(Some(i64::MAX), Some(6)).resolve(6);
        assert!(matches!(result, Err(AppError::Validation { .. })));

        let result = params(Some(i64::MAX / 100 + 1), None).resolve(1000);
        assert!(result.is_err());
    }

    #[test]
    fn test_largest_page_still_has_offset() {
        let page = i64::MAX / 6;
        let request = params(Some(page), Some(6)).resolve(6).unwrap();
        assert_eq!(request.offset(), (page - 1) * 6);
    }

    #[test]
    fn test_limit_zero_is_error() {
        assert!(params(None, Some(0)).resolve(6).is_err());
    }

    #[test]
    fn test_query_strings_are_parsed() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"page": "3", "limit": "5"}"#).unwrap();
        assert_eq!(p.page, Some(3));
        assert_eq!(p.limit, Some(5));
    }

    #[test]
    fn test_page_links_keep_filters() {
        let uri: Uri = "/api/recipes?tags=lunch&page=2&limit=2".parse().unwrap();
        let request = PageRequest { page: 2, limit: 2 };

        let page = Page::new(vec![1, 2], 7, request, "https://food.example", &uri);

        assert_eq!(page.count, 7);
        assert_eq!(
            page.next.as_deref(),
            Some("https://food.example/api/recipes?tags=lunch&limit=2&page=3")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("https://food.example/api/recipes?tags=lunch&limit=2")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let uri: Uri = "/api/users?page=2".parse().unwrap();
        let request = PageRequest { page: 2, limit: 6 };

        let page = Page::new(vec!["x"], 7, request, "http://localhost:8000", &uri);

        assert!(page.next.is_none());
        assert_eq!(
            page.previous.as_deref(),
            Some("http://localhost:8000/api/users")
        );
    }

    #[test]
    fn test_first_page_has_no_previous() {
        let uri: Uri = "/api/tags".parse().unwrap();
        let page: Page<i32> = Page::new(
            vec![],
            0,
            PageRequest { page: 1, limit: 6 },
            "http://localhost:8000",
            &uri,
        );

        assert!(page.previous.is_none());
        assert!(page.next.is_none());
    }
}
