//! REST client for the HigherMe backend.
//!
//! Every call sends JSON and, once a session token is held, a bearer
//! `Authorization` header. Non-2xx responses become [`ClientError::Api`]
//! carrying the backend's `detail` message.

use higherme_core::{
    AuthResponse, DailyReport, ExerciseLogInput, LoginRequest, MealLogInput, MoodLogInput,
    RegisterRequest, SleepLogInput, UserStats, WaterLogInput,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, Result, error_message};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const LOGIN_PATH: &str = "/api/v1/auth/login";
const REGISTER_PATH: &str = "/api/v1/auth/register";
const STATS_PATH: &str = "/stats";
const DAILY_REPORT_PATH: &str = "/daily-report";
const MOOD_PATH: &str = "/mood";
const MEAL_PATH: &str = "/health/meal";
const EXERCISE_PATH: &str = "/health/exercise";
const SLEEP_PATH: &str = "/health/sleep";
const WATER_PATH: &str = "/health/water";
const CODE_ACTIVITY_PATH: &str = "/get-code-activity";
const CREATE_CODE_ACTIVITY_PATH: &str = "/create-code-activity";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn builder(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        debug!(%method, endpoint, authenticated = self.token.is_some(), "api request");
        let mut builder = self.builder(method.clone(), endpoint);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(%method, endpoint, error = %err, "api request failed");
            ClientError::Network(err)
        })?;
        let status = response.status();
        debug!(%method, endpoint, status = status.as_u16(), "api response");
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(&bytes);
            warn!(%method, endpoint, status = status.as_u16(), %message, "api error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.send(Method::GET, endpoint, None).await
    }

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        self.send(Method::POST, endpoint, Some(body)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post(LOGIN_PATH, &request).await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post(REGISTER_PATH, &request).await
    }

    pub async fn user_stats(&self) -> Result<UserStats> {
        self.get(STATS_PATH).await
    }

    pub async fn daily_report(&self) -> Result<DailyReport> {
        self.get(DAILY_REPORT_PATH).await
    }

    pub async fn log_mood(&self, input: &MoodLogInput) -> Result<Value> {
        input.validate()?;
        self.post(MOOD_PATH, input).await
    }

    pub async fn log_meal(&self, input: &MealLogInput) -> Result<Value> {
        input.validate()?;
        self.post(MEAL_PATH, input).await
    }

    pub async fn log_exercise(&self, input: &ExerciseLogInput) -> Result<Value> {
        input.validate()?;
        self.post(EXERCISE_PATH, input).await
    }

    pub async fn log_sleep(&self, input: &SleepLogInput) -> Result<Value> {
        input.validate()?;
        self.post(SLEEP_PATH, input).await
    }

    pub async fn log_water(&self, input: &WaterLogInput) -> Result<Value> {
        input.validate()?;
        self.post(WATER_PATH, input).await
    }

    pub async fn code_activity(&self) -> Result<Value> {
        self.get(CODE_ACTIVITY_PATH).await
    }

    pub async fn create_code_activity(&self) -> Result<Value> {
        self.send(Method::POST, CREATE_CODE_ACTIVITY_PATH, None).await
    }
}
