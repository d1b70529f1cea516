//! Qualifying results scraper
//!
//! Parses a per-track qualifying results page into driver records.
//! Supports caching HTML files for offline testing and reduced load.

use super::driver_code_suffix;
use crate::{FinishlineError, HttpConfig, PageSource, QualifyingRecord, Result};
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};

/// Grid slot assigned to drivers without a real one ("\N", "DQ", "NC"),
/// one worse than the last points-paying position on a full grid.
const GRID_SENTINEL: u32 = 21;

/// Number of cells a results row must carry:
/// `[grid, _, driver, _, q1, q2, q3, _]`
const ROW_CELLS: usize = 8;

/// Scraper for qualifying results pages
pub struct QualifyingScraper {
    client: reqwest::blocking::Client,
    /// Optional cache directory for offline HTML files
    cache_dir: Option<PathBuf>,
    /// If true, only use cache (no network requests)
    offline_only: bool,
}

impl QualifyingScraper {
    pub fn new(http: &HttpConfig) -> Self {
        QualifyingScraper {
            client: super::http_client(http),
            cache_dir: None,
            offline_only: false,
        }
    }

    /// Create scraper with a cache directory
    pub fn with_cache<P: AsRef<Path>>(mut self, cache_dir: P) -> Self {
        self.cache_dir = Some(cache_dir.as_ref().to_path_buf());
        self
    }

    /// Set offline-only mode (no network requests, cache must exist)
    pub fn offline_only(mut self, offline: bool) -> Self {
        self.offline_only = offline;
        self
    }

    /// Get the cache file path for a URL
    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| {
            let filename = url
                .replace("https://", "")
                .replace("http://", "")
                .replace('/', "_")
                .replace('?', "_")
                + ".html";
            dir.join(filename)
        })
    }

    /// Load HTML from cache if available
    fn load_from_cache(&self, url: &str) -> Option<String> {
        let path = self.cache_path(url)?;
        if path.exists() {
            log::debug!("Loading from cache: {}", path.display());
            std::fs::read_to_string(&path).ok()
        } else {
            None
        }
    }

    /// Save HTML to cache
    fn save_to_cache(&self, url: &str, html: &str) -> Result<()> {
        if let Some(path) = self.cache_path(url) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, html)?;
            log::debug!("Saved to cache: {}", path.display());
        }
        Ok(())
    }

    /// Parse a cached HTML file directly (for testing)
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<QualifyingRecord>> {
        let html = std::fs::read_to_string(path.as_ref())?;
        self.parse_page(&html)
    }

    /// Fetch and parse a qualifying results page (uses cache if available)
    pub fn fetch(&self, url: &str) -> Result<Vec<QualifyingRecord>> {
        if let Some(html) = self.load_from_cache(url) {
            return self.parse_page(&html);
        }

        if self.offline_only {
            return Err(FinishlineError::Scrape {
                page: PageSource::Qualifying,
                message: format!("No cached data for {} (offline mode)", url),
            });
        }

        log::debug!("Fetching {}", url);

        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(FinishlineError::Scrape {
                page: PageSource::Qualifying,
                message: format!("HTTP {}: {}", response.status(), url),
            });
        }

        let html = response.text()?;

        if let Err(e) = self.save_to_cache(url, &html) {
            log::warn!("Failed to cache {}: {}", url, e);
        }

        self.parse_page(&html)
    }

    /// Parse the results table out of page HTML
    ///
    /// The page carries no semantic markup; rows are read positionally
    /// from the first tbody, eight cells per row.
    fn parse_page(&self, html: &str) -> Result<Vec<QualifyingRecord>> {
        let document = Html::parse_document(html);
        let tbody_selector = Selector::parse("tbody").unwrap();
        let row_selector = Selector::parse("tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        let body = document.select(&tbody_selector).next().ok_or_else(|| {
            FinishlineError::Scrape {
                page: PageSource::Qualifying,
                message: "No results table found".to_string(),
            }
        })?;

        let mut records = Vec::new();

        for row in body.select(&row_selector) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect();

            if cells.len() != ROW_CELLS {
                return Err(FinishlineError::Scrape {
                    page: PageSource::Qualifying,
                    message: format!(
                        "Expected {} cells per row, found {}",
                        ROW_CELLS,
                        cells.len()
                    ),
                });
            }

            let code = driver_code_suffix(&cells[2]).ok_or_else(|| FinishlineError::Scrape {
                page: PageSource::Qualifying,
                message: format!("Driver cell too short: {:?}", cells[2]),
            })?;

            records.push(QualifyingRecord {
                code,
                q1: parse_lap_time(&cells[4]),
                q2: parse_lap_time(&cells[5]),
                q3: parse_lap_time(&cells[6]),
                grid: parse_grid(&cells[0]),
            });
        }

        log::debug!("Parsed {} qualifying rows", records.len());
        Ok(records)
    }
}

/// Parse a lap time of the form "M:SS:mmm" into fractional seconds.
///
/// Digits are read positionally, so only the length and the digit
/// positions matter. Anything else, such as the empty cell of a driver
/// eliminated in an earlier session, yields an absent time.
fn parse_lap_time(s: &str) -> Option<f64> {
    if s.len() != 8 {
        return None;
    }
    let minutes: f64 = s.get(0..1)?.parse().ok()?;
    let seconds: f64 = s.get(2..4)?.parse().ok()?;
    let millis: f64 = s.get(5..8)?.parse().ok()?;
    Some(minutes * 60.0 + seconds + millis / 1000.0)
}

/// Normalize a grid cell to a starting position.
///
/// "\N", "DQ" and "NC" mark drivers with no real slot and map to the
/// sentinel; numeric cells (integer or float form) keep their value;
/// anything else is absent and drops the row downstream.
fn parse_grid(s: &str) -> Option<u32> {
    match s {
        "\\N" | "DQ" | "NC" => Some(GRID_SENTINEL),
        _ => s
            .parse::<u32>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().map(|v| v as u32)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DriverCode;

    const RESULTS_HTML: &str = r#"
<html><body><table><tbody>
<tr><td>1</td><td>1</td><td>Max VerstappenVER</td><td>Red Bull Racing Honda RBPT</td><td>1:31:456</td><td>1:30:891</td><td>1:29:987</td><td>18</td></tr>
<tr><td>2</td><td>4</td><td>Lando NorrisNOR</td><td>McLaren Mercedes</td><td>1:31:702</td><td>1:30:994</td><td>1:30:102</td><td>21</td></tr>
<tr><td>\N</td><td>44</td><td>Lewis HamiltonHAM</td><td>Ferrari</td><td>1:32:118</td><td></td><td></td><td>9</td></tr>
</tbody></table></body></html>
"#;

    #[test]
    fn test_parse_lap_time() {
        assert_eq!(parse_lap_time("1:23:456"), Some(83.456));
        assert_eq!(parse_lap_time("1:00:000"), Some(60.0));
        assert_eq!(parse_lap_time("0:59:999"), Some(59.999));
    }

    #[test]
    fn test_parse_lap_time_rejects_wrong_lengths() {
        assert_eq!(parse_lap_time(""), None);
        assert_eq!(parse_lap_time("DNF"), None);
        assert_eq!(parse_lap_time("1:23.45"), None);
        assert_eq!(parse_lap_time("11:23:456"), None);
    }

    #[test]
    fn test_parse_lap_time_rejects_non_digit_positions() {
        assert_eq!(parse_lap_time("a:23:456"), None);
        assert_eq!(parse_lap_time("1:2x:456"), None);
    }

    #[test]
    fn test_parse_grid_sentinels() {
        assert_eq!(parse_grid("\\N"), Some(21));
        assert_eq!(parse_grid("DQ"), Some(21));
        assert_eq!(parse_grid("NC"), Some(21));
    }

    #[test]
    fn test_parse_grid_numeric() {
        assert_eq!(parse_grid("3"), Some(3));
        assert_eq!(parse_grid("20"), Some(20));
        assert_eq!(parse_grid("3.0"), Some(3));
        assert_eq!(parse_grid("started last"), None);
    }

    #[test]
    fn test_parse_results_page() {
        let http = crate::HttpConfig {
            timeout_secs: 30,
            user_agent: "test".to_string(),
        };
        let scraper = QualifyingScraper::new(&http);
        let records = scraper.parse_page(RESULTS_HTML).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            QualifyingRecord {
                code: DriverCode::from("VER"),
                q1: Some(91.456),
                q2: Some(90.891),
                q3: Some(89.987),
                grid: Some(1),
            }
        );
        // Eliminated in Q1: empty time cells stay absent, grid sentinel applied
        assert_eq!(records[2].code, DriverCode::from("HAM"));
        assert_eq!(records[2].q2, None);
        assert_eq!(records[2].grid, Some(21));
    }

    #[test]
    fn test_parse_page_without_table_fails() {
        let http = crate::HttpConfig {
            timeout_secs: 30,
            user_agent: "test".to_string(),
        };
        let scraper = QualifyingScraper::new(&http);
        let result = scraper.parse_page("<html><body><p>race postponed</p></body></html>");
        assert!(matches!(
            result,
            Err(FinishlineError::Scrape {
                page: PageSource::Qualifying,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_page_with_wrong_cell_count_fails() {
        let html = "<table><tbody><tr><td>1</td><td>Max VerstappenVER</td></tr></tbody></table>";
        let http = crate::HttpConfig {
            timeout_secs: 30,
            user_agent: "test".to_string(),
        };
        let scraper = QualifyingScraper::new(&http);
        assert!(scraper.parse_page(html).is_err());
    }
}
