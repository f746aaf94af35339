//! STOMP 1.2 frame types and codec.
//!
//! A frame is a command line, zero or more `name:value` header lines, a
//! blank line, and a body terminated by a NUL octet. Header names and
//! values are escaped in every frame except `CONNECT`/`CONNECTED`, per
//! the STOMP 1.2 specification.

/// The STOMP commands this client produces or consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Connect,
    Connected,
    Send,
    Subscribe,
    Unsubscribe,
    Disconnect,
    Message,
    Receipt,
    Error,
}

impl Command {
    /// Wire representation of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Connected => "CONNECTED",
            Command::Send => "SEND",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::Disconnect => "DISCONNECT",
            Command::Message => "MESSAGE",
            Command::Receipt => "RECEIPT",
            Command::Error => "ERROR",
        }
    }

    fn from_line(line: &str) -> Result<Self, FrameError> {
        match line {
            "CONNECT" => Ok(Command::Connect),
            "CONNECTED" => Ok(Command::Connected),
            "SEND" => Ok(Command::Send),
            "SUBSCRIBE" => Ok(Command::Subscribe),
            "UNSUBSCRIBE" => Ok(Command::Unsubscribe),
            "DISCONNECT" => Ok(Command::Disconnect),
            "MESSAGE" => Ok(Command::Message),
            "RECEIPT" => Ok(Command::Receipt),
            "ERROR" => Ok(Command::Error),
            other => Err(FrameError::UnknownCommand(other.to_string())),
        }
    }
}

/// Errors produced while parsing a frame off the wire.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The command line is not a STOMP 1.2 command.
    #[error("Unknown STOMP command: {0}")]
    UnknownCommand(String),

    /// A header line has no `:` separator.
    #[error("Malformed header line: {0}")]
    MalformedHeader(String),

    /// The blank line separating headers from the body is missing.
    #[error("Frame is missing the header terminator")]
    MissingHeaderTerminator,

    /// The frame contained no command line.
    #[error("Empty frame")]
    Empty,

    /// A header contained an escape sequence outside the STOMP 1.2 set.
    #[error("Invalid header escape sequence: \\{0}")]
    InvalidEscape(char),
}

/// A single STOMP frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    headers: Vec<(String, String)>,
    pub body: String,
}

impl Frame {
    /// Create a frame with no headers and an empty body.
    pub fn new(command: Command) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a header. Repeated names are kept; [`Frame::header`]
    /// returns the first occurrence, as the specification requires.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the frame body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// First value of the named header, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    // ---- well-known frame constructors ----

    /// Client `CONNECT` frame for STOMP 1.2.
    pub fn connect(host: &str) -> Self {
        Frame::new(Command::Connect)
            .with_header("accept-version", "1.2")
            .with_header("host", host)
            .with_header("heart-beat", "0,0")
    }

    /// Server `CONNECTED` frame (used by tests standing in for a broker).
    pub fn connected(version: &str) -> Self {
        Frame::new(Command::Connected).with_header("version", version)
    }

    /// Client `SUBSCRIBE` frame with automatic acknowledgement.
    pub fn subscribe(id: &str, destination: &str) -> Self {
        Frame::new(Command::Subscribe)
            .with_header("id", id)
            .with_header("destination", destination)
            .with_header("ack", "auto")
    }

    /// Client `SEND` frame carrying a body.
    pub fn send(destination: &str, content_type: &str, body: impl Into<String>) -> Self {
        let body = body.into();
        Frame::new(Command::Send)
            .with_header("destination", destination)
            .with_header("content-type", content_type)
            .with_header("content-length", body.len().to_string())
            .with_body(body)
    }

    /// Server `MESSAGE` frame (used by tests standing in for a broker).
    pub fn message(
        message_id: &str,
        subscription: &str,
        destination: &str,
        body: impl Into<String>,
    ) -> Self {
        Frame::new(Command::Message)
            .with_header("message-id", message_id)
            .with_header("subscription", subscription)
            .with_header("destination", destination)
            .with_body(body)
    }

    /// Client `DISCONNECT` frame with a receipt request.
    pub fn disconnect(receipt_id: &str) -> Self {
        Frame::new(Command::Disconnect).with_header("receipt", receipt_id)
    }

    // ---- codec ----

    /// Serialise the frame to its wire form, NUL terminator included.
    pub fn encode(&self) -> String {
        let escaped = self.headers_are_escaped();
        let mut out = String::new();
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            if escaped {
                out.push_str(&escape_header(name));
                out.push(':');
                out.push_str(&escape_header(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Parse one frame from a WebSocket text payload.
    ///
    /// Tolerates `\r\n` line endings, leading end-of-line octets from
    /// preceding heart-beats, and a missing trailing NUL.
    pub fn parse(input: &str) -> Result<Self, FrameError> {
        let input = input.trim_start_matches(['\r', '\n']);
        if input.is_empty() {
            return Err(FrameError::Empty);
        }

        let (head, body) = split_head_body(input)?;

        let mut lines = head.lines().map(|l| l.trim_end_matches('\r'));
        let command_line = lines.next().ok_or(FrameError::Empty)?;
        let command = Command::from_line(command_line)?;
        let escaped = !matches!(command, Command::Connect | Command::Connected);

        let mut headers = Vec::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| FrameError::MalformedHeader(line.to_string()))?;
            if escaped {
                headers.push((unescape_header(name)?, unescape_header(value)?));
            } else {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        // The body ends at the NUL terminator; anything after it is
        // trailing end-of-line padding.
        let body = match body.find('\0') {
            Some(idx) => &body[..idx],
            None => body,
        };

        Ok(Self {
            command,
            headers,
            body: body.to_string(),
        })
    }

    fn headers_are_escaped(&self) -> bool {
        !matches!(self.command, Command::Connect | Command::Connected)
    }
}

/// Split a raw frame at the blank line between headers and body,
/// accepting either LF or CRLF conventions.
fn split_head_body(input: &str) -> Result<(&str, &str), FrameError> {
    let lf = input.find("\n\n").map(|i| (i, 2));
    let crlf = input.find("\r\n\r\n").map(|i| (i, 4));
    let separator = match (lf, crlf) {
        (Some(a), Some(b)) => Some(std::cmp::min_by_key(a, b, |(i, _)| *i)),
        (a, b) => a.or(b),
    };
    match separator {
        Some((idx, len)) => Ok((&input[..idx], &input[idx + len..])),
        None => Err(FrameError::MissingHeaderTerminator),
    }
}

fn escape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_header(raw: &str) -> Result<String, FrameError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('c') => out.push(':'),
            Some(other) => return Err(FrameError::InvalidEscape(other)),
            None => return Err(FrameError::InvalidEscape('\0')),
        }
    }
    Ok(out)
}
