use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use reqwest::StatusCode;
use url::Url;

/// Character encodings we recognize by name. Everything else is carried as
/// `Other` with its encoding_rs label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Windows1252,
    ShiftJis,
    Gbk,
    Big5,
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        if encoding == encoding_rs::UTF_8 {
            Self::Utf8
        } else if encoding == encoding_rs::WINDOWS_1252 {
            Self::Windows1252
        } else if encoding == encoding_rs::SHIFT_JIS {
            Self::ShiftJis
        } else if encoding == encoding_rs::GBK || encoding == encoding_rs::GB18030 {
            Self::Gbk
        } else if encoding == encoding_rs::BIG5 {
            Self::Big5
        } else {
            Self::Other(encoding.name().to_string())
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::ShiftJis => encoding_rs::SHIFT_JIS,
            Self::Gbk => encoding_rs::GBK,
            Self::Big5 => encoding_rs::BIG5,
            Self::Other(label) => {
                Encoding::for_label(label.as_bytes()).unwrap_or(encoding_rs::UTF_8)
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Other(label) => label,
            _ => self.encoding().name(),
        }
    }
}

/// A fetched page with its body already decoded to UTF-8.
#[derive(Debug)]
pub struct Page {
    /// URL after following redirects.
    pub final_url: Url,
    pub status: StatusCode,
    pub body: String,
    pub charset: Charset,
    pub fetched_at: DateTime<Utc>,
}
