use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NoValueFound,
    NonNumericIndex,
    OutOfBounds,
    TypeMismatch,
    NotAContainer,
    Decode,
    Usage,
    Io,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<String>,
    wanted: Option<&'static str>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            wanted: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn wanted(&self) -> Option<&'static str> {
        self.wanted
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_wanted(mut self, wanted: &'static str) -> Self {
        self.wanted = Some(wanted);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Prepend a consumed path segment onto the error's dotted path.
    ///
    /// Resolution frames call this on errors bubbling up from a recursive
    /// call, so the final error carries the full sub-path from the start of
    /// the lookup through the failing segment.
    pub fn prefixed_with(mut self, segment: &str) -> Self {
        self.path = Some(match self.path.take() {
            Some(rest) => format!("{segment}.{rest}"),
            None => segment.to_string(),
        });
        self
    }

    /// Append a segment onto the error's dotted path. Used only for typed
    /// container element errors, where the container path is already fully
    /// resolved and the offending index/key comes after it.
    pub fn appended_with(mut self, segment: &str) -> Self {
        self.path = Some(match self.path.take() {
            Some(base) => format!("{base}.{segment}"),
            None => segment.to_string(),
        });
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (at: {path})")?;
        }
        if let Some(wanted) = self.wanted {
            write!(f, " (wanted: {wanted})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NoValueFound => 3,
        ErrorKind::NonNumericIndex => 4,
        ErrorKind::OutOfBounds => 5,
        ErrorKind::TypeMismatch => 6,
        ErrorKind::NotAContainer => 7,
        ErrorKind::Decode => 8,
        ErrorKind::Io => 9,
    }
}
