//! Resume object storage. Files are uploaded in full before the handler
//! proceeds; only the resulting URL is persisted.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;

/// A resume file lifted out of a multipart request.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Object key for a resume: millisecond timestamp prefix keeps re-uploads of
/// the same filename from clobbering each other.
pub fn resume_key(filename: &str) -> String {
    format!("resumes/{}_{}", Utc::now().timestamp_millis(), filename)
}

/// Public URL of an uploaded object, path-style (works for MinIO and AWS
/// endpoints alike).
pub fn object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
}

/// Uploads the resume and returns its URL.
pub async fn upload_resume(
    s3: &S3Client,
    bucket: &str,
    endpoint: &str,
    upload: &ResumeUpload,
) -> Result<String, AppError> {
    let key = resume_key(&upload.filename);
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .content_type(&upload.content_type)
        .body(ByteStream::from(upload.data.clone()))
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    info!("Uploaded resume to s3://{bucket}/{key}");
    Ok(object_url(endpoint, bucket, &key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_key_keeps_original_filename() {
        let key = resume_key("cv.pdf");
        assert!(key.starts_with("resumes/"));
        assert!(key.ends_with("_cv.pdf"));
    }

    #[test]
    fn test_object_url_joins_without_duplicate_slashes() {
        assert_eq!(
            object_url("http://localhost:9000/", "resumes", "resumes/1_cv.pdf"),
            "http://localhost:9000/resumes/resumes/1_cv.pdf"
        );
        assert_eq!(
            object_url("https://s3.us-east-1.amazonaws.com", "b", "k"),
            "https://s3.us-east-1.amazonaws.com/b/k"
        );
    }
}
