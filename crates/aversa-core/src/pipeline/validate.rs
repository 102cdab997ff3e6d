//! Pre-decode input validation.

use std::io::Read;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Magic-byte prefixes of the raster formats the pipeline accepts.
const SIGNATURES: &[&[u8]] = &[
    &[0xFF, 0xD8, 0xFF],        // JPEG
    &[0x89, b'P', b'N', b'G'],  // PNG
    &[b'G', b'I', b'F', b'8'],  // GIF
    &[b'B', b'M'],              // BMP
    &[b'I', b'I', 0x2A, 0x00],  // TIFF little-endian
    &[b'M', b'M', 0x00, 0x2A],  // TIFF big-endian
];

/// Validates files before the (more expensive) decode stage.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check that the file exists, is within the size limit, and starts with
    /// a known image signature.
    pub fn validate(&self, path: &Path) -> Result<(), PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {}", e),
        })?;
        // Saturate so an absurd configured limit means "no limit" instead of
        // wrapping into a tiny one.
        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let mut file = std::fs::File::open(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot open file: {}", e),
        })?;
        let mut header = [0u8; 12];
        let bytes_read = file.read(&mut header).unwrap_or(0);

        if !Self::has_image_signature(&header[..bytes_read]) {
            return Err(PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Whether the header bytes match a known raster format.
    fn has_image_signature(header: &[u8]) -> bool {
        if SIGNATURES.iter().any(|sig| header.starts_with(sig)) {
            return true;
        }
        // WebP: RIFF container with a WEBP fourcc at offset 8.
        header.starts_with(b"RIFF") && (header.len() < 12 || &header[8..12] == b"WEBP")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_signature_jpeg() {
        assert!(Validator::has_image_signature(&[0xFF, 0xD8, 0xFF, 0xE0]));
    }

    #[test]
    fn test_signature_png() {
        assert!(Validator::has_image_signature(&[
            0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A
        ]));
    }

    #[test]
    fn test_signature_webp() {
        let header = [
            b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'E', b'B', b'P',
        ];
        assert!(Validator::has_image_signature(&header));
    }

    #[test]
    fn test_signature_riff_without_webp_fourcc() {
        let header = [
            b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'A', b'V', b'E',
        ];
        assert!(!Validator::has_image_signature(&header));
    }

    #[test]
    fn test_signature_garbage() {
        assert!(!Validator::has_image_signature(&[0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_validate_missing_file() {
        let validator = Validator::new(LimitsConfig::default());
        let err = validator
            .validate(Path::new("/nonexistent/photo.jpg"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let limits = LimitsConfig {
            max_file_size_mb: 1,
            ..LimitsConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF]).unwrap();
        file.write_all(&vec![0u8; 2 * 1024 * 1024]).unwrap();

        let err = Validator::new(limits).validate(&path).unwrap_err();
        assert!(matches!(err, PipelineError::FileTooLarge { .. }));
    }

    #[test]
    fn test_validate_accepts_file_under_huge_limit() {
        // The byte conversion must not wrap for an extreme configured limit.
        let limits = LimitsConfig {
            max_file_size_mb: u64::MAX,
            ..LimitsConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        assert!(Validator::new(limits).validate(&path).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.jpg");
        std::fs::write(&path, b"just some text, not pixels").unwrap();

        let err = Validator::new(LimitsConfig::default())
            .validate(&path)
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat { .. }));
    }
}
