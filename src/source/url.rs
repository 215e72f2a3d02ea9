//! Yearly table URL templates

use serde::{Deserialize, Serialize};

/// CNB yearly central bank rate fixing file
pub const CNB_YEAR_URL: &str = "https://www.cnb.cz/en/financial-markets/foreign-exchange-market/central-bank-exchange-rate-fixing/central-bank-exchange-rate-fixing/year.txt?year={year}";

/// URL with a `{year}` placeholder, one file per calendar year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Template for `<base>?year=<YYYY>`
    pub fn with_year_query(base: &str) -> Self {
        Self(format!("{}?year={{year}}", base))
    }

    pub fn cnb() -> Self {
        Self::new(CNB_YEAR_URL)
    }

    /// URL of the table for `year`
    pub fn build(&self, year: i32) -> String {
        self.0.replace("{year}", &year.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self::cnb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnb_url() {
        let url = UrlTemplate::cnb().build(2015);
        assert!(url.ends_with("year.txt?year=2015"));
        assert!(url.starts_with("https://www.cnb.cz/"));
    }

    #[test]
    fn test_year_query() {
        let template = UrlTemplate::with_year_query("http://localhost/rates.txt");
        assert_eq!(template.build(2014), "http://localhost/rates.txt?year=2014");
    }
}
