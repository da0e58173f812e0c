//! Domain entities: source locations, captured call-stack frames, command status

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// A file/line pair pointing into source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Argument value held by a frame. Rendered only when a trace asks for it.
pub type FrameArg = Arc<dyn fmt::Debug + Send + Sync>;

/// One call-stack entry captured at error time.
///
/// Frames are immutable once built. Arguments are kept as `Debug` values and
/// only turned into text when a trace dump is requested.
#[derive(Debug, Clone)]
pub struct Frame {
    class: Option<String>,
    function: String,
    location: SourceLocation,
    args: Vec<FrameArg>,
}

impl Frame {
    pub fn new(function: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            class: None,
            function: function.into(),
            location,
            args: Vec::new(),
        }
    }

    /// Set the enclosing type name. Empty names are treated as free functions.
    pub fn in_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.class = (!class.is_empty()).then_some(class);
        self
    }

    pub fn with_arg<T>(mut self, arg: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        self.args.push(Arc::new(arg));
        self
    }

    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Debug + Send + Sync + 'static,
    {
        self.args
            .extend(args.into_iter().map(|a| Arc::new(a) as FrameArg));
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> &str {
        &self.location.file
    }

    pub fn line(&self) -> u32 {
        self.location.line
    }

    pub fn args(&self) -> &[FrameArg] {
        &self.args
    }

    /// Pretty debug rendering of the argument list.
    pub fn args_dump(&self) -> String {
        format!("{:#?}", self.args)
    }
}

/// Value returned by a command, normalized into an exit code by the dispatcher.
///
/// Numeric values pass through; anything non-numeric or absent becomes `0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Empty,
    Code(i64),
    Value(String),
}

impl Status {
    pub fn code(&self) -> i64 {
        match self {
            Status::Empty => 0,
            Status::Code(code) => *code,
            Status::Value(value) => parse_numeric(value).unwrap_or(0),
        }
    }
}

/// Integer and decimal strings count as numeric; decimals truncate.
fn parse_numeric(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(code) = value.parse::<i64>() {
        return Some(code);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

impl From<()> for Status {
    fn from(_: ()) -> Self {
        Status::Empty
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Status::Code(code.into())
    }
}

impl From<i64> for Status {
    fn from(code: i64) -> Self {
        Status::Code(code)
    }
}

impl From<u8> for Status {
    fn from(code: u8) -> Self {
        Status::Code(code.into())
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Status::Value(value)
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Status::Value(value.to_string())
    }
}

impl<T: Into<Status>> From<Option<T>> for Status {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
