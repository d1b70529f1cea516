//! Championship standings scraper
//!
//! Reads the live drivers' standings table to seed season projections.

use super::driver_code_suffix;
use crate::{FinishlineError, HttpConfig, PageSource, Result, StandingEntry};
use scraper::{Html, Selector};

/// A full grid of entries; rows past this are footnotes and reserves.
const STANDINGS_ROWS: usize = 20;

/// Scraper for the current drivers' championship standings
pub struct StandingsScraper {
    client: reqwest::blocking::Client,
    url: String,
}

impl StandingsScraper {
    pub fn new(url: &str, http: &HttpConfig) -> Self {
        StandingsScraper {
            client: super::http_client(http),
            url: url.to_string(),
        }
    }

    /// Fetch and parse the standings page
    pub fn fetch(&self) -> Result<Vec<StandingEntry>> {
        log::debug!("Fetching {}", self.url);

        let response = self.client.get(&self.url).send()?;

        if !response.status().is_success() {
            return Err(FinishlineError::Scrape {
                page: PageSource::Standings,
                message: format!("HTTP {}: {}", response.status(), self.url),
            });
        }

        let html = response.text()?;
        self.parse_page(&html)
    }

    /// Parse standings rows out of page HTML
    ///
    /// Cells are read positionally: `[_, driver, _, _, points]`.
    pub fn parse_page(&self, html: &str) -> Result<Vec<StandingEntry>> {
        let document = Html::parse_document(html);
        let tbody_selector = Selector::parse("tbody").unwrap();
        let row_selector = Selector::parse("tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        let body = document.select(&tbody_selector).next().ok_or_else(|| {
            FinishlineError::Scrape {
                page: PageSource::Standings,
                message: "No standings table found".to_string(),
            }
        })?;

        let mut entries = Vec::new();

        for row in body.select(&row_selector).take(STANDINGS_ROWS) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect();

            if cells.len() < 5 {
                return Err(FinishlineError::Scrape {
                    page: PageSource::Standings,
                    message: format!("Expected at least 5 cells per row, found {}", cells.len()),
                });
            }

            let code = driver_code_suffix(&cells[1]).ok_or_else(|| FinishlineError::Scrape {
                page: PageSource::Standings,
                message: format!("Driver cell too short: {:?}", cells[1]),
            })?;

            let points = cells[4].parse::<u32>().map_err(|_| FinishlineError::Scrape {
                page: PageSource::Standings,
                message: format!("Bad points value {:?} for {}", cells[4], code),
            })?;

            entries.push(StandingEntry { code, points });
        }

        log::debug!("Parsed {} standings rows", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DriverCode;

    fn scraper() -> StandingsScraper {
        let http = HttpConfig {
            timeout_secs: 30,
            user_agent: "test".to_string(),
        };
        StandingsScraper::new("https://example.com/standings", &http)
    }

    fn standings_row(pos: u32, driver: &str, points: u32) -> String {
        format!(
            "<tr><td>{}</td><td>{}</td><td>NED</td><td>Red Bull</td><td>{}</td></tr>",
            pos, driver, points
        )
    }

    #[test]
    fn test_parse_standings() {
        let html = format!(
            "<table><tbody>{}{}</tbody></table>",
            standings_row(1, "Max VerstappenVER", 255),
            standings_row(2, "Lando NorrisNOR", 241),
        );
        let entries = scraper().parse_page(&html).unwrap();

        assert_eq!(
            entries,
            vec![
                StandingEntry {
                    code: DriverCode::from("VER"),
                    points: 255,
                },
                StandingEntry {
                    code: DriverCode::from("NOR"),
                    points: 241,
                },
            ]
        );
    }

    #[test]
    fn test_parse_standings_caps_at_full_grid() {
        let rows: String = (0..25)
            .map(|i| standings_row(i + 1, &format!("Driver NumberD{:02}", i), 100 - i))
            .collect();
        let html = format!("<table><tbody>{}</tbody></table>", rows);
        let entries = scraper().parse_page(&html).unwrap();
        assert_eq!(entries.len(), 20);
    }

    #[test]
    fn test_parse_standings_without_table_fails() {
        let result = scraper().parse_page("<html><body></body></html>");
        assert!(matches!(
            result,
            Err(FinishlineError::Scrape {
                page: PageSource::Standings,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_standings_with_narrow_row_fails() {
        let html = "<table><tbody><tr><td>1</td><td>Max VerstappenVER</td></tr></tbody></table>";
        assert!(scraper().parse_page(html).is_err());
    }

    #[test]
    fn test_parse_standings_with_bad_points_fails() {
        let html = "<table><tbody><tr><td>1</td><td>Max VerstappenVER</td><td>NED</td>\
                    <td>Red Bull</td><td>n/a</td></tr></tbody></table>";
        assert!(scraper().parse_page(html).is_err());
    }
}
