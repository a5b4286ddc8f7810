use std::fmt;

/// Everything that can stop an invocation before the image is written.
#[derive(Debug)]
pub enum AppError {
    /// Rejected command line (missing image, malformed flag or pixels area)
    Usage(String),

    /// Palette catalog or color set that cannot be used
    Palette(String),

    /// Conversion requested without a single palette color loaded
    EmptyPalette,

    /// Error occurred while decoding or encoding an image
    Image(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    Io(std::io::Error),

    /// Settings file could not be read or deserialized
    Config(config::ConfigError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Usage(msg) => write!(f, "{}", msg),
            AppError::Palette(msg) => write!(f, "Palette error: {}", msg),
            AppError::EmptyPalette => write!(f, "The palette is empty, no color to convert to"),
            AppError::Image(e) => write!(f, "Image error: {}", e),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Image(e) => Some(e),
            AppError::Io(e) => Some(e),
            AppError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Image(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<clap::Error> for AppError {
    fn from(err: clap::Error) -> Self {
        AppError::Usage(err.to_string().trim_end().to_string())
    }
}

pub type Result<T = ()> = std::result::Result<T, AppError>;
