use crate::de;
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The body the upload endpoint answers with
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UploadResponse {
    /// HTTP-like status, `200` on success
    pub status: u16,
    /// Present on success
    #[serde(default)]
    pub data: Option<UploadData>,
    /// Human readable message
    #[serde(default, deserialize_with = "de::deserialize_or_default")]
    pub message: String,
}

/// Payload of a successful upload
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UploadData {
    /// Where the uploaded image can be loaded from
    #[serde(rename = "imgUrl")]
    pub img_url: String,
}

/// Errors when using an upload response
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Upload rejected with status {status}: {message}
    Rejected {
        /// The status of the response
        status: u16,
        /// The message of the response
        message: String,
    },
    /// Upload response has no image URL
    MissingUrl,
}

impl UploadResponse {
    /// The URL of the uploaded image, if the upload succeeded.
    pub fn image_url(&self) -> Result<&str, UploadError> {
        if self.status != 200 {
            return Err(UploadError::Rejected {
                status: self.status,
                message: self.message.clone(),
            });
        }
        match &self.data {
            Some(data) if !data.img_url.is_empty() => Ok(&data.img_url),
            _ => Err(UploadError::MissingUrl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{UploadError, UploadResponse};

    #[test]
    fn test_image_url() {
        let res: UploadResponse =
            serde_json::from_str(r#"{"status": 200, "data": {"imgUrl": "a.png"}}"#).unwrap();
        assert_eq!(res.image_url(), Ok("a.png"));
        assert_eq!(res.message, "");

        let res: UploadResponse =
            serde_json::from_str(r#"{"status": 200, "data": {"imgUrl": ""}, "message": null}"#)
                .unwrap();
        assert_eq!(res.image_url(), Err(UploadError::MissingUrl));

        let res: UploadResponse =
            serde_json::from_str(r#"{"status": 500, "message": "boom"}"#).unwrap();
        assert_eq!(
            res.image_url().map_err(|e| e.to_string()),
            Err("Upload rejected with status 500: boom".to_string())
        );
    }
}
