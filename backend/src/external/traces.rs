//! EU TRACES registry client for shipment declaration lookups
//!
//! Talks to a remote registry endpoint when one is configured; otherwise
//! answers from a built-in reference table with a configurable simulated
//! latency, which is how development and demo environments run.

use std::time::Duration;

use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::TracesConfig;
use crate::error::{AppError, AppResult};

/// Registry record for a shipment declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub valid: bool,
    pub country: String,
    pub region: String,
    pub certification: String,
}

/// Built-in reference table used when no remote endpoint is configured
const REFERENCE_TABLE: &[(&str, bool, &str, &str, &str)] = &[
    ("EUDR-2024-001", true, "Duitsland", "Bayern", "FSC"),
    ("EUDR-2024-002", true, "Polen", "Mazowieckie", "PEFC"),
    ("EUDR-2024-003", false, "Onbekend", "", ""),
    ("EUDR-2024-004", true, "België", "Ardennen", "FSC"),
    ("EUDR-2024-005", true, "Frankrijk", "Bourgogne", "PEFC"),
];

const REFERENCE_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const REFERENCE_ID_LEN: usize = 9;

/// TRACES registry client
#[derive(Clone)]
pub struct TracesClient {
    client: Client,
    api_endpoint: Option<String>,
    api_key: Option<String>,
    simulated_latency: Duration,
    timeout: Duration,
}

impl TracesClient {
    /// Create a new TracesClient from configuration
    pub fn new(config: &TracesConfig) -> Self {
        Self {
            client: Client::new(),
            api_endpoint: config.api_endpoint.clone(),
            api_key: config.api_key.clone(),
            simulated_latency: Duration::from_millis(config.simulated_latency_ms),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Look up a shipment declaration in the registry
    ///
    /// `Ok(None)` means the declaration is unknown to the registry.
    pub async fn lookup(&self, declaration_number: &str) -> AppResult<Option<RegistryRecord>> {
        tokio::time::timeout(self.timeout, self.lookup_inner(declaration_number))
            .await
            .map_err(|_| {
                AppError::ExternalService(format!(
                    "TRACES lookup for {} timed out",
                    declaration_number
                ))
            })?
    }

    async fn lookup_inner(&self, declaration_number: &str) -> AppResult<Option<RegistryRecord>> {
        match &self.api_endpoint {
            Some(endpoint) => self.lookup_remote(endpoint, declaration_number).await,
            None => self.lookup_reference_table(declaration_number).await,
        }
    }

    async fn lookup_remote(
        &self,
        endpoint: &str,
        declaration_number: &str,
    ) -> AppResult<Option<RegistryRecord>> {
        let url = format!("{}/declarations/{}", endpoint, declaration_number);
        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("TRACES request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "TRACES registry error: {} - {}",
                status, body
            )));
        }

        let record: RegistryRecord = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse TRACES response: {}", e))
        })?;
        Ok(Some(record))
    }

    /// Answer from the built-in table, pausing to mimic a live registry
    async fn lookup_reference_table(
        &self,
        declaration_number: &str,
    ) -> AppResult<Option<RegistryRecord>> {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }

        Ok(REFERENCE_TABLE
            .iter()
            .find(|(number, ..)| *number == declaration_number)
            .map(|(_, valid, country, region, certification)| RegistryRecord {
                valid: *valid,
                country: country.to_string(),
                region: region.to_string(),
                certification: certification.to_string(),
            }))
    }

    /// Mint a registry reference for a newly validated declaration
    pub fn mint_reference_id(&self) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..REFERENCE_ID_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..REFERENCE_ID_CHARSET.len());
                REFERENCE_ID_CHARSET[idx] as char
            })
            .collect();
        format!("TRACES-{}", suffix)
    }
}
