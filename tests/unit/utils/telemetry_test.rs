// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use scrapebot::utils::telemetry;

    #[test]
    fn test_telemetry_initialization() {
        telemetry::init_telemetry();

        tracing::debug!("This is a debug message");
        tracing::info!(trigger = "!wiki", url = "https://example.com", "Scrape succeeded");
        tracing::warn!(outcome = "fetch", "Scrape failed");
    }

    #[test]
    fn test_repeated_initialization_keeps_first_subscriber() {
        telemetry::init_telemetry();
        telemetry::init_telemetry();

        tracing::info!("Still logging after a second init");
    }
}
