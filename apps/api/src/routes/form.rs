//! Multipart form reading shared by the analyze and jobs endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::documents::{resolve_resume, ResumeInput};
use crate::errors::AppError;

pub const RESUME_FILE_FIELD: &str = "resume_file";

#[derive(Debug, Default)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Bytes,
}

/// Text fields by name, plus the optional résumé upload.
#[derive(Debug, Default)]
pub struct FormFields {
    pub text: HashMap<String, String>,
    pub resume_file: Option<UploadedFile>,
}

impl FormFields {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormFields::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == RESUME_FILE_FIELD {
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                form.resume_file = Some(UploadedFile { filename, bytes });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))?;
                form.text.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        self.get(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Validation(format!("{name} is required")))
    }

    /// Resolves the résumé from `resume_text` or the upload; rejects empty content.
    pub fn resume(&self) -> Result<ResumeInput, AppError> {
        let file = self.resume_file.as_ref();
        let input = resolve_resume(
            self.get("resume_text"),
            file.and_then(|f| f.filename.as_deref()),
            file.map(|f| f.bytes.as_ref()),
        )?;

        if input.text.trim().is_empty() {
            return Err(AppError::Validation(
                "No resume content found. Paste resume text or upload a PDF/DOCX.".to_string(),
            ));
        }
        Ok(input)
    }
}
