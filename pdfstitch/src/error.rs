//! Error types for pdfstitch.
//!
//! Every failure carries the path it relates to and the underlying cause, so
//! a batch can report exactly which input did not make it into the output.
//!
//! # Error Categories
//!
//! - **Load**: input missing, unreadable, or not a decodable image/PDF
//! - **Encode**: failure producing a normalized page
//! - **Append**: failure copying pages out of an input PDF during a merge
//! - **Write**: failure serializing or writing an output file
//! - **Config**: invalid job configuration

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfstitch operations.
pub type Result<T> = std::result::Result<T, PdfStitchError>;

/// Coarse classification of a [`PdfStitchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input could not be found, read or decoded.
    Load,
    /// A normalized page could not be produced.
    Encode,
    /// Pages could not be copied out of an input PDF.
    Append,
    /// Output could not be serialized or written.
    Write,
    /// The job configuration is invalid.
    Config,
    /// Any other failure.
    Other,
}

/// Main error type for pdfstitch operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfStitchError {
    /// An input path does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Input metadata could not be read.
    #[error("Cannot access input: {}\n  Reason: {source}", .path.display())]
    FailedToRead {
        /// Path being checked.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Input could not be decoded as a raster image.
    #[error("Failed to load image: {}\n  Reason: {source}", .path.display())]
    FailedToLoadImage {
        /// Path to the image.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// An input PDF could not be parsed.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// An input PDF parsed but has an unusable structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", .path.display())]
    CorruptedPdf {
        /// Path to the PDF.
        path: PathBuf,
        /// What is wrong with it.
        details: String,
    },

    /// An input PDF is encrypted.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the PDF.
        path: PathBuf,
    },

    /// The normalized page for an image could not be built.
    #[error("Failed to encode page for: {}\n  Reason: {reason}", .path.display())]
    FailedToEncodePage {
        /// Path to the source image.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// Pages of an input PDF could not be appended to the merged document.
    #[error("Failed to append pages from: {}\n  Reason: {reason}", .path.display())]
    FailedToAppend {
        /// Path to the input PDF.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// Two inputs would be normalized to the same output file.
    #[error(
        "Normalized page for {} would overwrite {}\n  Reason: already produced for {}",
        .path.display(),
        .output.display(),
        .first.display()
    )]
    DuplicateOutput {
        /// The later input.
        path: PathBuf,
        /// The shared output path.
        output: PathBuf,
        /// What the output already belongs to.
        first: PathBuf,
    },

    /// No input survived filtering, so there is nothing to merge.
    #[error("No PDF files to merge")]
    NoFilesToMerge,

    /// The output file or its parent directory could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Serializing or flushing the output failed.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The job configuration is unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Anything else.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfStitchError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfStitchError {
    /// Shorthand for [`Self::FileNotFound`].
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Shorthand for [`Self::NotAFile`].
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Shorthand for [`Self::FailedToLoadPdf`].
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Self::CorruptedPdf`].
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Shorthand for [`Self::EncryptedPdf`].
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Shorthand for [`Self::FailedToEncodePage`].
    pub fn failed_to_encode(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToEncodePage {
            path,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Self::FailedToAppend`].
    pub fn failed_to_append(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToAppend {
            path,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Self::DuplicateOutput`].
    pub fn duplicate_output(path: PathBuf, output: PathBuf, first: PathBuf) -> Self {
        Self::DuplicateOutput {
            path,
            output,
            first,
        }
    }

    /// Shorthand for [`Self::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Shorthand for [`Self::Other`].
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. }
            | Self::NotAFile { .. }
            | Self::FailedToRead { .. }
            | Self::FailedToLoadImage { .. }
            | Self::FailedToLoadPdf { .. }
            | Self::CorruptedPdf { .. }
            | Self::EncryptedPdf { .. } => ErrorKind::Load,
            Self::FailedToEncodePage { .. } | Self::DuplicateOutput { .. } => ErrorKind::Encode,
            Self::FailedToAppend { .. } => ErrorKind::Append,
            Self::FailedToCreateOutput { .. } | Self::FailedToWrite { .. } => ErrorKind::Write,
            Self::NoFilesToMerge | Self::InvalidConfig { .. } => ErrorKind::Config,
            Self::Io { .. } | Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Check if this error only affects a single input.
    ///
    /// Returns true for errors after which a batch can carry on with the
    /// remaining inputs.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Load | ErrorKind::Encode)
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToRead { .. } => 3,
            Self::FailedToLoadImage { .. } => 3,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::FailedToEncodePage { .. } => 6,
            Self::FailedToAppend { .. } => 6,
            Self::DuplicateOutput { .. } => 6,
            Self::NoFilesToMerge => 1,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
