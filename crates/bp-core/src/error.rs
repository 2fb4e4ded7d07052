use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    EmptyImage,
    ChannelIndexOutOfRange { index: usize, count: usize },
    InvalidSigma(f32),
    NotComputed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::EmptyImage => write!(f, "image has zero width or height"),
            Self::ChannelIndexOutOfRange { index, count } => {
                write!(f, "channel index {index} out of range for {count} channels")
            }
            Self::InvalidSigma(s) => write!(f, "sigma must be finite and >= 0, got {s}"),
            Self::NotComputed => write!(f, "no channels computed yet"),
        }
    }
}

impl std::error::Error for Error {}
