use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Header the root discovery variant uses to ask for JSON instead of the page.
pub const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// How the data source exposes its field labels and box identifiers.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// `GET /` with an `X-Requested-With: XMLHttpRequest` header.
    #[default]
    Root,
    /// `GET /setup`.
    Setup,
}

impl DiscoveryMode {
    /// Path of the discovery endpoint, relative to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            DiscoveryMode::Root => "/",
            DiscoveryMode::Setup => "/setup",
        }
    }

    /// Extra request header the variant needs, if any.
    pub fn header(&self) -> Option<(&'static str, &'static str)> {
        match self {
            DiscoveryMode::Root => Some(AJAX_HEADER),
            DiscoveryMode::Setup => None,
        }
    }
}

impl FromStr for DiscoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "root" | "/" => Ok(DiscoveryMode::Root),
            "setup" | "/setup" => Ok(DiscoveryMode::Setup),
            other => Err(format!(
                "unknown discovery mode '{}', expected 'root' or 'setup'",
                other
            )),
        }
    }
}

impl Display for DiscoveryMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryMode::Root => write!(f, "root"),
            DiscoveryMode::Setup => write!(f, "setup"),
        }
    }
}

/// Both endpoint contracts of one data source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub discovery: DiscoveryMode,
    pub data_path: String,
}

impl Endpoints {
    pub fn new(
        base_url: impl Into<String>,
        discovery: DiscoveryMode,
        data_path: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            discovery,
            data_path: data_path.into(),
        }
    }

    /// Joins `path` onto the base URL without doubling or dropping slashes.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn discovery_url(&self) -> String {
        self.url(self.discovery.path())
    }

    /// Data endpoint URL for one field; the label is percent-encoded.
    pub fn data_url(&self, field: &str) -> String {
        format!(
            "{}?field={}",
            self.url(&self.data_path),
            urlencoding::encode(field)
        )
    }
}

impl Display for Endpoints {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (discovery: {}, data: {})",
            self.base_url, self.discovery, self.data_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_mode_parses_names_and_paths() {
        assert_eq!("root".parse::<DiscoveryMode>(), Ok(DiscoveryMode::Root));
        assert_eq!("SETUP".parse::<DiscoveryMode>(), Ok(DiscoveryMode::Setup));
        assert_eq!("/setup".parse::<DiscoveryMode>(), Ok(DiscoveryMode::Setup));
        assert!("index".parse::<DiscoveryMode>().is_err());
    }

    #[test]
    fn only_root_discovery_sends_the_ajax_header() {
        assert_eq!(DiscoveryMode::Root.header(), Some(AJAX_HEADER));
        assert_eq!(DiscoveryMode::Setup.header(), None);
    }

    #[test]
    fn urls_join_cleanly() {
        let endpoints = Endpoints::new("http://pi.local:5000/", DiscoveryMode::Root, "get_data");
        assert_eq!(endpoints.discovery_url(), "http://pi.local:5000/");
        assert_eq!(
            endpoints.data_url("CO2"),
            "http://pi.local:5000/get_data?field=CO2"
        );

        let setup = Endpoints::new("http://pi.local:5000", DiscoveryMode::Setup, "/get_data");
        assert_eq!(setup.discovery_url(), "http://pi.local:5000/setup");
    }

    #[test]
    fn field_labels_are_percent_encoded() {
        let endpoints = Endpoints::new("http://localhost:5000", DiscoveryMode::Root, "/get_data");
        assert_eq!(
            endpoints.data_url("Ext Temp&Hum"),
            "http://localhost:5000/get_data?field=Ext%20Temp%26Hum"
        );
    }
}
