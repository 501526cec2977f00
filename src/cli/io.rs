//! JSON output for CLI
//!
//! - Output: single JSON object per command via stdout
//! - UTF-8 only

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Wrap `data` in the success envelope
pub fn ok_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Wrap a failure in the error envelope
pub fn error_envelope(code: &str, message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_value(&ok_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_value(&error_envelope(code, message))
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let envelope = ok_envelope(json!({"items": []}));
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["data"]["items"], json!([]));
    }

    #[test]
    fn test_error_envelope() {
        let envelope = error_envelope("SEEK_CLI_IO_ERROR", "missing file");
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["code"], "SEEK_CLI_IO_ERROR");
        assert_eq!(envelope["message"], "missing file");
    }
}
