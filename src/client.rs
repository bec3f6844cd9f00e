use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};
use ureq::{Agent, AgentBuilder, Response};
use urlencoding::encode;

use crate::config::Config;
use crate::error::CatalogError;
use crate::models::{
    Playlist, RecommendationsResponse, SearchResponse, TokenResponse, Track, User,
};
use crate::mood::AudioFeatureTargets;

/// Tokens are treated as stale this long before their reported expiry
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Catalog operations available once a session exists
#[cfg_attr(test, mockall::automock)]
pub trait CatalogApi {
    /// Keyword search restricted to tracks
    fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError>;

    /// Seeded recommendations steered by audio-feature targets
    fn get_recommendations(
        &self,
        seed_tracks: &[String],
        seed_genres: &[String],
        targets: &AudioFeatureTargets,
        limit: u32,
    ) -> Result<Vec<Track>, CatalogError>;

    /// Profile of the authenticated principal (needs a user-scoped token)
    fn get_current_user(&self) -> Result<User, CatalogError>;

    /// Create a private playlist owned by `user_id`
    fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Playlist, CatalogError>;

    /// Append tracks by URI. No de-duplication is done.
    fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> Result<(), CatalogError>;
}

/// Token exchange flavour
#[derive(Debug, Clone, PartialEq)]
pub enum Grant {
    /// User-scoped access; playlist operations possible
    RefreshToken(String),
    /// App-scoped, read-only catalog access
    ClientCredentials,
}

impl Grant {
    fn form_fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Grant::RefreshToken(token) => vec![
                ("grant_type", "refresh_token"),
                ("refresh_token", token.as_str()),
            ],
            Grant::ClientCredentials => vec![("grant_type", "client_credentials")],
        }
    }
}

/// Bearer token obtained from a token exchange
#[derive(Debug, Clone)]
pub struct AuthSession {
    access_token: String,
    scope: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Parse a token endpoint body received at `now`
    pub fn from_token_body(body: &str, now: DateTime<Utc>) -> Result<Self, CatalogError> {
        let token: TokenResponse = serde_json::from_str(body)
            .map_err(|e| CatalogError::Auth(format!("failed to decode auth response: {e}")))?;

        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CatalogError::Auth("access token not found in response".to_string()))?;

        let expires_at = token
            .expires_in
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime));

        Ok(Self {
            access_token,
            scope: token.scope.filter(|s| !s.is_empty()),
            expires_at,
        })
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Whether the token should be replaced before use at `now`
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(at) => now + TimeDelta::seconds(EXPIRY_MARGIN_SECS) >= at,
            None => false,
        }
    }
}

/// Authentication state of the client. Only moves forward.
#[derive(Debug, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(AuthSession),
}

/// Spotify Web API client holding its own session
pub struct SpotifyClient {
    agent: Agent,
    client_id: String,
    client_secret: String,
    grant: Grant,
    auth_url: String,
    api_url: String,
    state: AuthState,
}

impl SpotifyClient {
    /// Create an unauthenticated client from configuration
    pub fn new(config: Config) -> Self {
        let agent = AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        let grant = match config.refresh_token {
            Some(token) => Grant::RefreshToken(token),
            None => Grant::ClientCredentials,
        };

        SpotifyClient {
            agent,
            client_id: config.client_id,
            client_secret: config.client_secret,
            grant,
            auth_url: config.auth_url,
            api_url: config.api_url,
            state: AuthState::Unauthenticated,
        }
    }

    pub fn grant(&self) -> &Grant {
        &self.grant
    }

    /// Exchange the configured credentials for a bearer token
    pub fn authenticate(&mut self) -> Result<(), CatalogError> {
        match self.grant {
            Grant::RefreshToken(_) => info!("Using refresh token for user authentication"),
            Grant::ClientCredentials => {
                info!("No refresh token found, using client credentials (limited API access)")
            }
        }

        let result = self
            .agent
            .post(&self.auth_url)
            .set(
                "Authorization",
                &basic_auth_header(&self.client_id, &self.client_secret),
            )
            .send_form(&self.grant.form_fields());

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(CatalogError::Auth(format!(
                    "auth failed with status {status}: {body}"
                )));
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(CatalogError::Transport(transport.to_string()));
            }
        };

        if response.status() != 200 {
            return Err(CatalogError::Auth(format!(
                "auth failed with status {}",
                response.status()
            )));
        }

        let body = response
            .into_string()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        let session = AuthSession::from_token_body(&body, Utc::now())?;

        if let Some(scope) = session.scope() {
            info!("Authenticated with scopes: {scope}");
        }

        self.state = AuthState::Authenticated(session);
        Ok(())
    }

    /// Replace the current session with a fresh token from the same grant
    pub fn reauthenticate(&mut self) -> Result<(), CatalogError> {
        info!("Re-authenticating with Spotify");
        self.authenticate()
    }

    /// Re-authenticate when the current token is missing or about to expire
    pub fn ensure_fresh(&mut self) -> Result<(), CatalogError> {
        let stale = match &self.state {
            AuthState::Authenticated(session) => session.is_stale(Utc::now()),
            AuthState::Unauthenticated => true,
        };
        if stale {
            self.reauthenticate()?;
        }
        Ok(())
    }

    fn bearer(&self) -> Result<String, CatalogError> {
        match &self.state {
            AuthState::Authenticated(session) => Ok(format!("Bearer {}", session.access_token)),
            AuthState::Unauthenticated => Err(CatalogError::Unauthenticated),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let bearer = self.bearer()?;
        debug!("GET {url}");

        let result = self.agent.get(url).set("Authorization", &bearer).call();
        let response = check_response(url, result)?;

        if response.status() != 200 {
            let status = response.status();
            let body = response.into_string().unwrap_or_default();
            return Err(CatalogError::api(status, body, url));
        }

        response
            .into_json::<T>()
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }

    fn post_json(&self, url: &str, payload: serde_json::Value) -> Result<Response, CatalogError> {
        let bearer = self.bearer()?;
        debug!("POST {url}");

        let result = self
            .agent
            .post(url)
            .set("Authorization", &bearer)
            .send_json(payload);
        let response = check_response(url, result)?;

        if !(200..300).contains(&response.status()) {
            let status = response.status();
            let body = response.into_string().unwrap_or_default();
            return Err(CatalogError::api(status, body, url));
        }

        Ok(response)
    }
}

impl CatalogApi for SpotifyClient {
    fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError> {
        let url = search_url(&self.api_url, query, limit);
        let result: SearchResponse = self.get_json(&url)?;
        Ok(result.tracks.items)
    }

    fn get_recommendations(
        &self,
        seed_tracks: &[String],
        seed_genres: &[String],
        targets: &AudioFeatureTargets,
        limit: u32,
    ) -> Result<Vec<Track>, CatalogError> {
        self.bearer()?;
        let url = recommendations_url(&self.api_url, seed_tracks, seed_genres, targets, limit);
        debug!("Seed tracks: {seed_tracks:?}, Seed genres: {seed_genres:?}");

        let result: RecommendationsResponse = self.get_json(&url)?;
        Ok(result.tracks)
    }

    fn get_current_user(&self) -> Result<User, CatalogError> {
        self.get_json(&format!("{}/me", self.api_url))
    }

    fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Playlist, CatalogError> {
        let url = format!("{}/users/{}/playlists", self.api_url, encode(user_id));
        let payload = json!({
            "name": name,
            "description": description,
            "public": false,
        });

        self.post_json(&url, payload)?
            .into_json::<Playlist>()
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }

    fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> Result<(), CatalogError> {
        let url = format!("{}/playlists/{}/tracks", self.api_url, encode(playlist_id));
        self.post_json(&url, json!({ "uris": track_uris }))?;
        Ok(())
    }
}

/// Map ureq's error split onto the catalog error taxonomy
fn check_response(
    url: &str,
    result: Result<Response, ureq::Error>,
) -> Result<Response, CatalogError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(CatalogError::api(status, body, url))
        }
        Err(ureq::Error::Transport(transport)) => {
            Err(CatalogError::Transport(transport.to_string()))
        }
    }
}

/// `Basic base64(id:secret)` header value for the token endpoint
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{client_id}:{client_secret}"))
    )
}

pub fn search_url(api_url: &str, query: &str, limit: u32) -> String {
    format!(
        "{}/search?q={}&type=track&limit={}",
        api_url,
        encode(query),
        limit
    )
}

/// Seed lists are joined with a literal comma after encoding each element,
/// since the endpoint does not accept `%2C` as a separator.
pub fn recommendations_url(
    api_url: &str,
    seed_tracks: &[String],
    seed_genres: &[String],
    targets: &AudioFeatureTargets,
    limit: u32,
) -> String {
    let mut params: Vec<String> = Vec::new();

    if !seed_tracks.is_empty() {
        params.push(format!("seed_tracks={}", join_encoded(seed_tracks)));
    }
    if !seed_genres.is_empty() {
        params.push(format!("seed_genres={}", join_encoded(seed_genres)));
    }
    for (key, value) in targets.query_params() {
        params.push(format!("{key}={value}"));
    }
    params.push(format!("limit={limit}"));

    format!("{}/recommendations?{}", api_url, params.join("&"))
}

fn join_encoded(values: &[String]) -> String {
    values
        .iter()
        .map(|v| encode(v).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}
