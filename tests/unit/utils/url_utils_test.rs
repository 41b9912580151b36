// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use scrapebot::utils::errors::{ScrapeFailure, UrlBuildError, URL_BUILD_FAILED};
    use scrapebot::utils::url_utils::build_url;

    fn captures(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_build_url_escapes_every_capture() {
        let url = build_url(
            "https://example.com/search?q=%s&lang=%s",
            &captures(&["rust & go", "en/us"]),
        )
        .unwrap();

        assert_eq!(url, "https://example.com/search?q=rust%20%26%20go&lang=en%2Fus");
    }

    #[test]
    fn test_build_url_without_placeholders_ignores_captures() {
        let url = build_url("https://example.com/random", &captures(&["ignored"])).unwrap();
        assert_eq!(url, "https://example.com/random");
    }

    #[test]
    fn test_build_url_reports_missing_captures() {
        let err = build_url("https://example.com/%s/%s", &captures(&["one"])).unwrap_err();

        assert_eq!(
            err,
            UrlBuildError::MissingCaptures {
                expected: 2,
                supplied: 1
            }
        );
        assert_eq!(ScrapeFailure::from(err).user_message(), URL_BUILD_FAILED);
    }
}
