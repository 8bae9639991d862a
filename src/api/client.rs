use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("error de red: {0}")]
    Http(#[from] reqwest::Error),
    #[error("respuesta {status} de {endpoint}")]
    Status { endpoint: String, status: u16 },
}

/// Cliente HTTP del backend de rutas. Todas las llamadas comparten el pool de
/// conexiones de reqwest.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_json<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_error_messages() {
        let error = ApiError::Status {
            endpoint: "/rutas/nearby".to_string(),
            status: 503,
        };
        assert_eq!(error.to_string(), "respuesta 503 de /rutas/nearby");
    }
}
