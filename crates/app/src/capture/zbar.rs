//! Barcode decoding through `zbarimg`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, process::Command};

use super::{DecodeError, Decoder, Detection, Frame};

const ZBARIMG: &str = "zbarimg";

/// `zbarimg` exits with this status when the image holds no symbols.
const NO_SYMBOLS_EXIT_CODE: i32 = 4;

/// Pipes PNG frames into `zbarimg`. Symbol geometry is not reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZbarDecoder;

impl ZbarDecoder {
    /// Decoder using `zbarimg` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Decoder for ZbarDecoder {
    async fn decode(&self, frame: &Frame) -> Result<Vec<Detection>, DecodeError> {
        let mut child = Command::new(ZBARIMG)
            .args(["--quiet", "png:-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DecodeError::Spawn {
                program: ZBARIMG,
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&frame.data)
                .await
                .map_err(|source| DecodeError::Spawn {
                    program: ZBARIMG,
                    source,
                })?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| DecodeError::Spawn {
                program: ZBARIMG,
                source,
            })?;

        match output.status.code() {
            Some(0) => Ok(parse_symbols(&String::from_utf8_lossy(&output.stdout))),
            Some(NO_SYMBOLS_EXIT_CODE) => Ok(Vec::new()),
            _ => Err(DecodeError::Process {
                program: ZBARIMG,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

/// Parse `zbarimg` output: one `TYPE:data` symbol per line.
pub(crate) fn parse_symbols(stdout: &str) -> Vec<Detection> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let data = line.split_once(':').map_or(line, |(_, data)| data);

            Detection::new(data)
        })
        .collect()
}
