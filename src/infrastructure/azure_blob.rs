//! Azure Blob Storage over its REST API
//!
//! Uploads use "Put Blob" (`BlockBlob`) authorised either with Shared Key
//! (HMAC-SHA256 over the canonical string-to-sign) or with a SAS token
//! appended to the URL.

use std::collections::HashMap;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use sha2::Sha256;
use thiserror::Error;

use crate::domain::models::UploadRequest;
use crate::domain::services::{BlobStore, BlobStoreError};
use crate::shared::logging::log_blob_rejected;

pub const STORAGE_API_VERSION: &str = "2021-08-06";

const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// Azure blob names are limited to 1024 characters
const MAX_BLOB_NAME_CHARS: usize = 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("Malformed connection string segment: {0}")]
    MalformedSegment(String),

    #[error("Connection string is missing {0}")]
    Missing(&'static str),

    #[error("AccountKey is not valid base64: {0}")]
    InvalidAccountKey(String),
}

#[derive(Clone)]
enum Credential {
    SharedKey { account: String, key: Vec<u8> },
    Sas(String),
}

/// Endpoint and credentials parsed from a connection string
#[derive(Clone)]
pub struct StorageAccount {
    blob_endpoint: String,
    credential: Credential,
}

impl StorageAccount {
    pub fn from_connection_string(value: &str) -> Result<Self, ConnectionStringError> {
        let mut settings: HashMap<String, String> = HashMap::new();
        for segment in value.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, val) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::MalformedSegment(segment.to_string()))?;
            settings.insert(key.trim().to_ascii_lowercase(), val.trim().to_string());
        }
        let get = |key: &str| settings.get(key).map(String::as_str).filter(|v| !v.is_empty());

        if get("usedevelopmentstorage").is_some_and(|v| v.eq_ignore_ascii_case("true")) {
            return Ok(Self {
                blob_endpoint: DEV_BLOB_ENDPOINT.to_string(),
                credential: Credential::SharedKey {
                    account: DEV_ACCOUNT_NAME.to_string(),
                    key: decode_key(DEV_ACCOUNT_KEY)?,
                },
            });
        }

        let account = get("accountname");
        let blob_endpoint = match get("blobendpoint") {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => {
                let account = account.ok_or(ConnectionStringError::Missing("AccountName"))?;
                format!(
                    "{}://{}.blob.{}",
                    get("defaultendpointsprotocol").unwrap_or("https"),
                    account,
                    get("endpointsuffix").unwrap_or("core.windows.net")
                )
            }
        };

        let credential = match (get("accountkey"), get("sharedaccesssignature")) {
            (Some(key), _) => Credential::SharedKey {
                account: account
                    .ok_or(ConnectionStringError::Missing("AccountName"))?
                    .to_string(),
                key: decode_key(key)?,
            },
            (None, Some(sas)) => Credential::Sas(sas.trim_start_matches('?').to_string()),
            (None, None) => {
                return Err(ConnectionStringError::Missing(
                    "AccountKey or SharedAccessSignature",
                ));
            }
        };

        Ok(Self {
            blob_endpoint,
            credential,
        })
    }

    pub fn blob_endpoint(&self) -> &str {
        &self.blob_endpoint
    }

    pub fn uses_sas(&self) -> bool {
        matches!(self.credential, Credential::Sas(_))
    }
}

impl std::fmt::Debug for StorageAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let auth = match &self.credential {
            Credential::SharedKey { .. } => "shared_key",
            Credential::Sas(_) => "sas",
        };
        f.debug_struct("StorageAccount")
            .field("blob_endpoint", &self.blob_endpoint)
            .field("auth", &auth)
            .finish()
    }
}

fn decode_key(key: &str) -> Result<Vec<u8>, ConnectionStringError> {
    STANDARD
        .decode(key)
        .map_err(|e| ConnectionStringError::InvalidAccountKey(e.to_string()))
}

/// Canonical Shared Key string-to-sign for a Put Blob request
pub fn string_to_sign(
    content_length: usize,
    content_type: &str,
    ms_date: &str,
    canonical_resource: &str,
) -> String {
    // a zero length is signed as an empty string
    let length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };

    format!(
        "PUT\n\n\n{}\n\n{}\n\n\n\n\n\n\nx-ms-blob-type:BlockBlob\nx-ms-date:{}\nx-ms-version:{}\n{}",
        length, content_type, ms_date, STORAGE_API_VERSION, canonical_resource
    )
}

/// Base64 HMAC-SHA256 of the string-to-sign
pub fn sign(key: &[u8], string_to_sign: &str) -> Result<String, BlobStoreError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| BlobStoreError::Signing(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// `BlobStore` writing block blobs into one container
#[derive(Debug, Clone)]
pub struct AzureBlobStore {
    client: Client,
    account: StorageAccount,
    container: String,
}

impl AzureBlobStore {
    pub fn new(account: StorageAccount, container: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            account,
            container: container.into(),
        }
    }

    pub fn from_connection_string(
        connection_string: &str,
        container: impl Into<String>,
    ) -> Result<Self, ConnectionStringError> {
        Ok(Self::new(
            StorageAccount::from_connection_string(connection_string)?,
            container,
        ))
    }

    /// Public URL of a blob (never carries the SAS token)
    pub fn blob_url(&self, blob_name: &str) -> Result<String, BlobStoreError> {
        if blob_name.trim().is_empty() || blob_name.chars().count() > MAX_BLOB_NAME_CHARS {
            return Err(BlobStoreError::InvalidName(blob_name.to_string()));
        }

        Ok(format!(
            "{}/{}/{}",
            self.account.blob_endpoint,
            self.container,
            urlencoding::encode(blob_name)
        ))
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn put(&self, request: UploadRequest) -> Result<String, BlobStoreError> {
        let url = self.blob_url(&request.blob_name)?;
        let ms_date = chrono::Utc::now()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string();

        let target = match &self.account.credential {
            Credential::Sas(token) => format!("{}?{}", url, token),
            Credential::SharedKey { .. } => url.clone(),
        };

        let mut builder = self
            .client
            .put(&target)
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-date", &ms_date)
            .header("x-ms-version", STORAGE_API_VERSION)
            .header(reqwest::header::CONTENT_TYPE, &request.content_type);

        if let Credential::SharedKey { account, key } = &self.account.credential {
            let parsed = Url::parse(&url).map_err(|e| BlobStoreError::Signing(e.to_string()))?;
            let resource = format!("/{}{}", account, parsed.path());
            let signature = sign(
                key,
                &string_to_sign(request.size(), &request.content_type, &ms_date, &resource),
            )?;
            builder = builder.header(
                reqwest::header::AUTHORIZATION,
                format!("SharedKey {}:{}", account, signature),
            );
        }

        let response = builder.body(request.data).send().await?;
        let status = response.status().as_u16();
        if status != 201 {
            log_blob_rejected(&request.blob_name, status);
            let body = response.text().await.unwrap_or_default();
            return Err(BlobStoreError::Rejected { status, body });
        }

        Ok(url)
    }
}
