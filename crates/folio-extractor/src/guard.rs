//! Input size precondition, checked before any parsing

use crate::error::ExtractorError;

/// Rejects payloads above a byte limit
#[derive(Debug, Clone, Copy)]
pub struct FileGuard {
    max_bytes: u64,
}

impl FileGuard {
    /// Create a guard with the given limit (inclusive)
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Fail with `FileTooLarge` when `size` exceeds the limit
    pub fn check(&self, size: u64) -> Result<(), ExtractorError> {
        if size > self.max_bytes {
            return Err(ExtractorError::FileTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_FILE_SIZE_BYTES;

    #[test]
    fn test_limit_is_inclusive() {
        let guard = FileGuard::new(DEFAULT_MAX_FILE_SIZE_BYTES);
        assert!(guard.check(0).is_ok());
        assert!(guard.check(DEFAULT_MAX_FILE_SIZE_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_oversize() {
        let guard = FileGuard::new(DEFAULT_MAX_FILE_SIZE_BYTES);
        let err = guard.check(DEFAULT_MAX_FILE_SIZE_BYTES + 1).unwrap_err();
        assert_eq!(
            err,
            ExtractorError::FileTooLarge {
                size: DEFAULT_MAX_FILE_SIZE_BYTES + 1,
                max: DEFAULT_MAX_FILE_SIZE_BYTES,
            }
        );
    }
}
