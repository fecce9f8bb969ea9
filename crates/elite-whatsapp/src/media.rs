// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media download, classification and spreadsheet tabulation.

use std::io::Cursor;
use std::time::Duration;

use calamine::{Reader, open_workbook_auto_from_rs};
use elite_core::EliteError;
use strum::{Display, IntoStaticStr};
use tracing::debug;

/// Data rows kept from a spreadsheet, not counting the header.
pub const SPREADSHEET_ROW_LIMIT: usize = 50;

/// What a downloaded attachment is treated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Pdf,
    Spreadsheet,
}

impl MediaKind {
    /// Classify by MIME substring; first match wins.
    pub fn classify(mime_type: &str) -> Option<Self> {
        let mime = mime_type.to_ascii_lowercase();
        if mime.contains("image") {
            Some(Self::Image)
        } else if mime.contains("audio") || mime.contains("ogg") {
            Some(Self::Audio)
        } else if mime.contains("pdf") {
            Some(Self::Pdf)
        } else if mime.contains("spreadsheet") || mime.contains("excel") {
            Some(Self::Spreadsheet)
        } else {
            None
        }
    }

    /// Value stored in `messages.analysis_tag`.
    pub fn tag(&self) -> &'static str {
        self.into()
    }

    /// Instruction sent with the bytes for kinds the media model reads directly.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::Image => Some(
                "Descreva esta imagem e extraia informações relevantes (nomes, valores, datas) se houver.",
            ),
            Self::Audio => {
                Some("Transcreva este áudio fielmente. Se houver instruções, identifique-as.")
            }
            Self::Pdf => Some("Resuma este documento e extraia os pontos principais."),
            Self::Spreadsheet => None,
        }
    }
}

/// Fetch an attachment from the WAHA file server.
///
/// Anything other than HTTP 200 is an error.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
    api_key: Option<&str>,
    timeout: Duration,
) -> Result<Vec<u8>, EliteError> {
    let mut request = client.get(url).timeout(timeout);
    if let Some(key) = api_key {
        request = request.header("X-Api-Key", key);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            EliteError::Timeout { duration: timeout }
        } else {
            EliteError::Channel {
                message: format!("media download failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(EliteError::Channel {
            message: format!("media download returned {status}"),
            source: None,
        });
    }

    let bytes = response.bytes().await.map_err(|e| EliteError::Channel {
        message: format!("failed to read media body: {e}"),
        source: Some(Box::new(e)),
    })?;
    debug!(url, size = bytes.len(), "media downloaded");
    Ok(bytes.to_vec())
}

/// Render the first worksheet as CSV: header row plus up to
/// [`SPREADSHEET_ROW_LIMIT`] data rows.
///
/// Accepts any format calamine detects (xlsx, xlsm, xlsb, xls, ods).
pub fn tabulate_spreadsheet(bytes: Vec<u8>) -> Result<String, EliteError> {
    let channel_err = |message: String| EliteError::Channel {
        message,
        source: None,
    };

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| channel_err(format!("unreadable spreadsheet: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| channel_err("spreadsheet has no worksheets".to_string()))?
        .map_err(|e| channel_err(format!("unreadable worksheet: {e}")))?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in range.rows().take(SPREADSHEET_ROW_LIMIT + 1) {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(|e| channel_err(format!("csv encoding failed: {e}")))?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| channel_err(format!("csv encoding failed: {e}")))?;
    String::from_utf8(data).map_err(|e| channel_err(format!("csv is not utf-8: {e}")))
}

/// Text prompt wrapping a tabulated spreadsheet.
pub fn spreadsheet_prompt(csv_preview: &str) -> String {
    format!(
        "Analise esta planilha (primeiras {SPREADSHEET_ROW_LIMIT} linhas):\n{csv_preview}\n\n\
         Quais são os insights principais? Responda de forma executiva."
    )
}
