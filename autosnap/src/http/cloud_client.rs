// File: autosnap/src/http/cloud_client.rs
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Proxy, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::constants::http::{CONNECT_TIMEOUT, REGION_HEADER, REQUEST_TIMEOUT};
use crate::errors::ProviderError;
use crate::inventory::{
    Instance, InventoryProvider, ManagementMarker, Snapshot, SnapshotProvider, TagSet, Volume,
};

/// REST client for the inventory/snapshot API of one region
pub struct HttpCloudClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpCloudClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            REGION_HEADER,
            HeaderValue::from_str(&config.region)
                .map_err(|e| anyhow::anyhow!("Invalid region '{}': {}", config.region, e))?,
        );

        let mut builder = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .default_headers(headers);

        if let Some(proxy_url) = config.proxy_url() {
            let proxy = Proxy::all(&proxy_url)
                .map_err(|e| anyhow::anyhow!("Invalid proxy '{}': {}", proxy_url, e))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response, ProviderError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed {
                operation: operation.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                operation: operation.to_string(),
                status,
                message,
            });
        }

        debug!("{} succeeded with status {}", operation, response.status());
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, ProviderError> {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ProviderError::InvalidResponse {
                operation: operation.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl InventoryProvider for HttpCloudClient {
    async fn list_instances(&self, tag_filter: Option<&str>) -> Result<Vec<Instance>, ProviderError> {
        let mut request = self.client.get(self.url("/instances"));
        if let Some(tag) = tag_filter {
            request = request.query(&[("tag", tag)]);
        }
        self.send_json("list_instances", request).await
    }

    async fn list_volumes(&self, instance_id: &str) -> Result<Vec<Volume>, ProviderError> {
        let request = self
            .client
            .get(self.url(&format!("/instances/{}/volumes", instance_id)));
        self.send_json("list_volumes", request).await
    }
}

#[async_trait]
impl SnapshotProvider for HttpCloudClient {
    async fn list_snapshots(
        &self,
        volume_id: &str,
        marker: &ManagementMarker,
    ) -> Result<Vec<Snapshot>, ProviderError> {
        let request = self
            .client
            .get(self.url(&format!("/volumes/{}/snapshots", volume_id)))
            .query(&[
                ("tag_key", marker.key.as_str()),
                ("tag_value", marker.value.as_str()),
            ]);
        self.send_json("list_snapshots", request).await
    }

    async fn create_snapshot(&self, volume_id: &str, description: &str) -> Result<Snapshot, ProviderError> {
        let request = self
            .client
            .post(self.url(&format!("/volumes/{}/snapshots", volume_id)))
            .json(&json!({ "description": description }));
        self.send_json("create_snapshot", request).await
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), ProviderError> {
        let request = self
            .client
            .delete(self.url(&format!("/snapshots/{}", snapshot_id)));
        self.send("delete_snapshot", request).await?;
        Ok(())
    }

    async fn tag_resource(&self, resource_id: &str, tags: &TagSet) -> Result<(), ProviderError> {
        let request = self
            .client
            .post(self.url(&format!("/resources/{}/tags", resource_id)))
            .json(&json!({ "tags": tags }));
        self.send("tag_resource", request).await?;
        Ok(())
    }
}
