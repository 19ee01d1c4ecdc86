use log::info;
use serde_derive::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::auth::client::WilmaClient;
use crate::error::WilmaError;

/// Externally supplied credentials, immutable for the process lifetime.
pub struct Credentials {
    pub user: String,
    pub password: String,
    pub apikey: String,
}

#[derive(Deserialize)]
struct IndexResponse {
    #[serde(rename = "SessionID")]
    session_id: Option<String>,
}

#[derive(Serialize)]
struct LoginForm {
    #[serde(rename = "Login")]
    login: String,
    #[serde(rename = "Password")]
    password: String,
    #[serde(rename = "SessionId")]
    session_id: String,
    #[serde(rename = "ApiKey")]
    api_key: String,
    format: String,
}

/// Fetches the transient session key from `index_json`. The key is only used
/// to salt the login digest; the authenticated session itself lives in the
/// cookie jar afterwards.
pub async fn get_session_id(wilma: &WilmaClient) -> Result<String, WilmaError> {
    let res = wilma.client().get(wilma.url("index_json")).send().await?;
    let index: IndexResponse = res.json().await?;

    match index.session_id {
        Some(id) => {
            info!("Getting session key succesfully.");
            Ok(id)
        }
        None => Err(WilmaError::MissingSessionId),
    }
}

/// Wilma's login digest: hex-encoded SHA-1 over `user|sessionId|apikey`.
pub fn session_api_key(user: &str, session_id: &str, apikey: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{}|{}|{}", user, session_id, apikey).as_bytes());
    hex::encode(hasher.finalize())
}

/// Performs the login POST. Success is HTTP 200; any other status is fatal.
/// The server answers with a session cookie which the shared jar picks up,
/// so every later request on the same client is authenticated.
pub async fn login(wilma: &WilmaClient, credentials: &Credentials) -> Result<(), WilmaError> {
    let session_id = get_session_id(wilma).await?;
    let digest = session_api_key(&credentials.user, &session_id, &credentials.apikey);

    let form = LoginForm {
        login: credentials.user.clone(),
        password: credentials.password.clone(),
        session_id,
        api_key: format!("sha1:{}", digest),
        format: "json".to_owned(),
    };

    let res = wilma
        .client()
        .post(wilma.url("login"))
        .header("accept", "application/json")
        .form(&form)
        .send()
        .await?;

    let status = res.status();
    if status.is_success() {
        info!("Logged succesfully in. Getting status code {}.", status);
        Ok(())
    } else {
        Err(WilmaError::LoginRejected(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = session_api_key("teacher1", "abc123", "secret");
        let b = session_api_key("teacher1", "abc123", "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
    }

    #[test]
    fn digest_matches_known_vector() {
        // echo -n 'user|session|key' | sha1sum
        assert_eq!(
            session_api_key("user", "session", "key"),
            "c7229e767c2e6633fc8e7cff69756bf05fc775f5"
        );
    }

    #[test]
    fn digest_changes_with_any_input() {
        let base = session_api_key("user", "session", "key");
        assert_ne!(base, session_api_key("user2", "session", "key"));
        assert_ne!(base, session_api_key("user", "session2", "key"));
        assert_ne!(base, session_api_key("user", "session", "key2"));
    }
}
