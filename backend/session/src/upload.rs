use studyforge_core::{DocumentKind, FileUpload, StudyError};

/// Accept a PDF or text file by declared MIME type, or a `.txt` name.
///
/// The MIME check is a substring match, so `application/pdf` and
/// `text/markdown` both pass. A `.pdf` name alone is not enough.
pub fn classify(upload: &FileUpload) -> Result<DocumentKind, StudyError> {
    if upload.mime.contains("pdf") {
        return Ok(DocumentKind::Pdf);
    }
    if upload.mime.contains("text") || upload.name.to_lowercase().ends_with(".txt") {
        return Ok(DocumentKind::Text);
    }
    Err(StudyError::UnsupportedType {
        name: upload.name.clone(),
        mime: upload.mime.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_mime() {
        let upload = FileUpload::new("lecture.pdf", "application/pdf");
        assert_eq!(classify(&upload), Ok(DocumentKind::Pdf));
    }

    #[test]
    fn test_accepts_text_mime() {
        let upload = FileUpload::new("readme.md", "text/markdown");
        assert_eq!(classify(&upload), Ok(DocumentKind::Text));
    }

    #[test]
    fn test_accepts_txt_extension_without_mime() {
        let upload = FileUpload::new("NOTES.TXT", "");
        assert_eq!(classify(&upload), Ok(DocumentKind::Text));
    }

    #[test]
    fn test_rejects_pdf_extension_without_mime() {
        let upload = FileUpload::new("slides.pdf", "");
        assert!(matches!(
            classify(&upload),
            Err(StudyError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_rejects_images() {
        let upload = FileUpload::new("diagram.png", "image/png");
        assert_eq!(
            classify(&upload),
            Err(StudyError::UnsupportedType {
                name: "diagram.png".into(),
                mime: "image/png".into(),
            })
        );
    }
}
