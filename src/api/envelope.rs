//! Response envelope shared by every storage endpoint.
//!
//! The service always answers `{ "code": int, "message": string, "data": ... }`
//! and signals failure through a non-zero `code`, not the HTTP status.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{DriveError, Result};
use crate::fs::{FileEntry, SpaceInfo};

/// Status code meaning success.
pub const CODE_OK: i64 = 0;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Turn a non-zero code into [`DriveError::ApiError`].
    pub fn into_result(self) -> Result<Option<T>> {
        if self.code != CODE_OK {
            return Err(DriveError::ApiError {
                code: self.code,
                message: self.message,
            });
        }
        Ok(self.data)
    }
}

/// Payload of `GET /files`.
#[derive(Debug, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub files: Option<Vec<FileEntry>>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Payload of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub results: Option<Vec<FileEntry>>,
}

/// Decode an envelope whose data is required.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    envelope.into_result()?.ok_or(DriveError::InvalidResponse)
}

/// Decode an envelope and ignore its data.
pub fn decode_ack(body: &str) -> Result<()> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(body)?;
    envelope.into_result().map(|_| ())
}

pub fn decode_listing(body: &str) -> Result<Vec<FileEntry>> {
    let listing: Listing = decode(body)?;
    Ok(listing.files.unwrap_or_default())
}

pub fn decode_search(body: &str) -> Result<Vec<FileEntry>> {
    let hits: SearchHits = decode(body)?;
    Ok(hits.results.unwrap_or_default())
}

pub fn decode_space(body: &str) -> Result<SpaceInfo> {
    decode(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_success() {
        let body = r#"{"code":0,"message":"success","data":{"files":[
            {"id":"r","name":"reports","size":0,"isDir":true,"modTime":"2024-01-01 00:00:00"},
            {"id":"a","name":"a.txt","size":2048,"isDir":false,"modTime":"2024-01-02 00:00:00"}
        ],"path":"/docs"}}"#;
        let files = decode_listing(body).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].is_dir);
        assert_eq!(files[1].size, 2048);
    }

    #[test]
    fn test_listing_null_files() {
        let body = r#"{"code":0,"message":"success","data":{"files":null,"path":"/empty"}}"#;
        assert!(decode_listing(body).unwrap().is_empty());
    }

    #[test]
    fn test_application_error_keeps_server_message() {
        let body = r#"{"code":1,"message":"directory not found"}"#;
        match decode_listing(body) {
            Err(DriveError::ApiError { code, message }) => {
                assert_eq!(code, 1);
                assert_eq!(message, "directory not found");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_ack_without_data() {
        assert!(decode_ack(r#"{"code":0,"message":"success","data":{"id":"x"}}"#).is_ok());
        assert!(decode_ack(r#"{"code":0,"message":"success"}"#).is_ok());
        assert!(decode_ack(r#"{"code":501,"message":"not implemented"}"#).is_err());
    }

    #[test]
    fn test_missing_data_is_invalid() {
        assert!(matches!(
            decode_space(r#"{"code":0,"message":"success"}"#),
            Err(DriveError::InvalidResponse)
        ));
    }

    #[test]
    fn test_space() {
        let body = r#"{"code":0,"message":"success","data":{"total":100,"used":40,"free":60}}"#;
        let space = decode_space(body).unwrap();
        assert_eq!(space.used, 40);
        assert_eq!(space.free, 60);
    }

    #[test]
    fn test_garbage_body() {
        assert!(matches!(
            decode_ack("<html>login</html>"),
            Err(DriveError::JsonError(_))
        ));
    }
}
