//! Discogs catalog search client.
//!
//! Queries the Discogs database search endpoint for releases of a style and
//! year, one page at a time, and resolves master-release references to an
//! authoritative year. Discogs enforces strict rate limits, so the client
//! pauses for one second after every request. Failures here are never
//! retried: a broken discovery pass aborts the whole run, and the response
//! body travels up inside the error for diagnosability.

use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use tokio::time::sleep;

use crate::{
    Res, config,
    types::{DiscogsMasterResponse, DiscogsSearchResponse},
    utils,
};

const APP_USER_AGENT: &str = concat!("spodcli/", env!("CARGO_PKG_VERSION"));

/// Minimum delay between consecutive Discogs requests.
const RATE_LIMIT_DELAY: Duration = Duration::from_secs(1);

/// Results per search page. 100 is the Discogs maximum.
const PER_PAGE: &str = "100";

pub struct DiscogsClient {
    http: Client,
    api_url: String,
    token: String,
}

impl DiscogsClient {
    /// Builds a client from the process configuration.
    pub fn from_env() -> Self {
        DiscogsClient {
            http: Client::new(),
            api_url: config::discogs_apiurl(),
            token: config::discogs_token(),
        }
    }

    /// Fetches one page of release search results.
    ///
    /// With no cursor this issues the initial style/year query; with a
    /// cursor it follows the `pagination.urls.next` link returned by the
    /// previous page, which already carries all query parameters. The
    /// end of results is signaled by an absent next link in the response.
    pub async fn search_page(
        &self,
        style: &str,
        year: &str,
        cursor: Option<&str>,
    ) -> Res<DiscogsSearchResponse> {
        let request = match cursor {
            Some(url) => self.http.get(url),
            None => self
                .http
                .get(format!("{}/database/search", self.api_url))
                .query(&[
                    ("type", "release"),
                    ("style", style),
                    ("format", "Album"),
                    ("year", year),
                    ("token", self.token.as_str()),
                    ("per_page", PER_PAGE),
                ]),
        };

        let response = request
            .header(header::USER_AGENT, APP_USER_AGENT)
            .send()
            .await?;
        let page = utils::expect_json(response, StatusCode::OK).await?;
        sleep(RATE_LIMIT_DELAY).await;
        Ok(page)
    }

    /// Looks up the authoritative year of a master release.
    ///
    /// `master_url` comes verbatim from a search result; the access token is
    /// appended as a query parameter the way Discogs expects it.
    pub async fn master_year(&self, master_url: &str) -> Res<i32> {
        let response = self
            .http
            .get(master_url)
            .query(&[("token", self.token.as_str())])
            .header(header::USER_AGENT, APP_USER_AGENT)
            .send()
            .await?;
        let master: DiscogsMasterResponse = utils::expect_json(response, StatusCode::OK).await?;
        sleep(RATE_LIMIT_DELAY).await;
        Ok(master.year)
    }
}
