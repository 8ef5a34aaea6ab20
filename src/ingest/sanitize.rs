//! Filename sanitization for untrusted upload names.
//!
//! [`sanitize_filename`] is a pure function: it never consults the
//! filesystem and never fails. The category-specific acceptance checks
//! (extension preservation, empty and dot names) live in
//! [`SanitizedFilename::for_category`], the single constructor upload
//! handlers go through before any disk write.

use percent_encoding::percent_decode_str;

use super::UploadCategory;
use crate::error::UploadError;

/// Reduce an untrusted, possibly percent-encoded, possibly path-qualified
/// name to a single safe path segment.
///
/// Steps: percent-decode, keep only the final path segment, drop every
/// character outside the allow-set (ASCII letters, digits, space, `.`, `_`,
/// `-`), trim surrounding whitespace. Characters outside the allow-set are
/// stripped, not transliterated. The result may be empty; callers treat
/// empty as rejection. Idempotent.
pub fn sanitize_filename(raw: &str) -> String {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();

    // Both separator styles count as path structure.
    let segment = decoded.rsplit(['/', '\\']).next().unwrap_or_default();

    let kept: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect();

    kept.trim().to_string()
}

/// Cheap acceptance check on the raw claimed name, run before the blob is
/// fetched. The same check is repeated on the sanitized name.
pub fn claimed_extension_matches(claimed: &str, category: UploadCategory) -> bool {
    ends_with_ignore_case(claimed, category.extension())
}

/// A sanitized name proven safe for direct use as a single path segment
/// under a category's storage directory: non-empty, not a dot name, and
/// still carrying the category's extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFilename(String);

impl SanitizedFilename {
    /// Sanitize `raw` and validate the result against the category rules.
    ///
    /// The extension is re-checked here even when the caller already checked
    /// the raw name, since sanitization may have altered it.
    pub fn for_category(raw: &str, category: UploadCategory) -> Result<Self, UploadError> {
        let name = sanitize_filename(raw);
        if name.is_empty() || name == "." || name == ".." {
            return Err(UploadError::EmptyName);
        }
        if !ends_with_ignore_case(&name, category.extension()) {
            return Err(UploadError::WrongExtension {
                expected: category.extension(),
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SanitizedFilename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// The extension constants are lowercase ASCII, so lowercasing the candidate
// is enough for a case-insensitive suffix match.
fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.to_ascii_lowercase().ends_with(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\windows\\cmd.exe"), "cmd.exe");
        assert!(!sanitize_filename("a/b/c.pbo").contains('/'));
    }

    #[test]
    fn percent_decodes_before_stripping() {
        assert_eq!(sanitize_filename("mission%20one.pbo"), "mission one.pbo");
        // Encoded separators are decoded first, then treated as path
        // structure.
        assert_eq!(sanitize_filename("..%2F..%2Fetc%2Fpasswd"), "passwd");
    }

    #[test]
    fn strips_disallowed_characters() {
        assert_eq!(sanitize_filename("!!!.pbo"), ".pbo");
        assert_eq!(sanitize_filename("op?:*.pbo"), "op.pbo");
        // Unicode letters are stripped, not transliterated.
        assert_eq!(sanitize_filename("naïve.pbo"), "nave.pbo");
        assert_eq!(sanitize_filename("задание.pbo"), ".pbo");
    }

    #[test]
    fn preserves_inner_dots_and_case() {
        assert_eq!(sanitize_filename("a.b.pbo"), "a.b.pbo");
        assert_eq!(sanitize_filename("Report.PBO"), "Report.PBO");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize_filename("  op one.pbo  "), "op one.pbo");
        assert_eq!(sanitize_filename("%20%20.pbo"), ".pbo");
    }

    #[test]
    fn all_unsafe_input_sanitizes_to_empty() {
        assert_eq!(sanitize_filename("???"), "");
        assert_eq!(sanitize_filename("dir/"), "");
        assert_eq!(sanitize_filename(""), "");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "../../etc/passwd",
            "mission%20one.pbo",
            "!!!.pbo",
            "a.b.pbo",
            "  spaced .pbo ",
            "%252e%252e.pbo",
            "задание.pbo",
            "C:\\missions\\op.pbo",
        ];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input: {input}");
        }
    }

    #[test]
    fn for_category_accepts_case_insensitive_extension() {
        let name = SanitizedFilename::for_category("report.PBO", UploadCategory::Mission).unwrap();
        assert_eq!(name.as_str(), "report.PBO");
    }

    #[test]
    fn for_category_accepts_bare_extension() {
        // A name reduced to just the extension still ends with it.
        let name = SanitizedFilename::for_category("!!!.pbo", UploadCategory::Mission).unwrap();
        assert_eq!(name.as_str(), ".pbo");
    }

    #[test]
    fn for_category_rejects_empty_and_dot_names() {
        assert!(matches!(
            SanitizedFilename::for_category("???", UploadCategory::Mission),
            Err(UploadError::EmptyName)
        ));
        assert!(matches!(
            SanitizedFilename::for_category("..", UploadCategory::Mission),
            Err(UploadError::EmptyName)
        ));
    }

    #[test]
    fn for_category_rejects_wrong_extension() {
        assert!(matches!(
            SanitizedFilename::for_category("op.pbo", UploadCategory::Preset),
            Err(UploadError::WrongExtension { expected: ".html" })
        ));
        // Sanitization dropping the extension must also reject.
        assert!(matches!(
            SanitizedFilename::for_category("op.pbo%2F", UploadCategory::Mission),
            Err(UploadError::EmptyName)
        ));
    }

    #[test]
    fn claimed_extension_check_handles_unicode_names() {
        assert!(claimed_extension_matches("задание.PBO", UploadCategory::Mission));
        assert!(!claimed_extension_matches("op.pbo.txt", UploadCategory::Mission));
    }
}
