//! Web scrapers for qualifying results and championship standings

pub mod qualifying;
pub mod standings;

use crate::{DriverCode, HttpConfig};

/// Build the blocking HTTP client the scrapers share
pub(crate) fn http_client(http: &HttpConfig) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .user_agent(http.user_agent.as_str())
        .timeout(std::time::Duration::from_secs(http.timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

/// Results pages concatenate display name and code in a single cell
/// ("Max VerstappenVER"); the code is the trailing three characters.
pub(crate) fn driver_code_suffix(cell: &str) -> Option<DriverCode> {
    let chars: Vec<char> = cell.chars().collect();
    if chars.len() < 3 {
        return None;
    }
    Some(DriverCode(chars[chars.len() - 3..].iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_code_suffix() {
        assert_eq!(
            driver_code_suffix("Max VerstappenVER"),
            Some(DriverCode::from("VER"))
        );
        assert_eq!(driver_code_suffix("VER"), Some(DriverCode::from("VER")));
        assert_eq!(driver_code_suffix("AB"), None);
    }

    #[test]
    fn test_driver_code_suffix_multibyte_name() {
        assert_eq!(
            driver_code_suffix("Nico HülkenbergHUL"),
            Some(DriverCode::from("HUL"))
        );
    }
}
