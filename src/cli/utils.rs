use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::client::{ApiError, SubmitError};
use crate::session::SessionError;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Machine-readable code for the errors the CLI knows how to classify
pub fn error_code(error: &anyhow::Error) -> Option<&'static str> {
    if let Some(e) = error.downcast_ref::<SubmitError>() {
        return Some(match e {
            SubmitError::Login(login) => login.error_code(),
            SubmitError::Session(session) => session.error_code(),
        });
    }
    if let Some(e) = error.downcast_ref::<SessionError>() {
        return Some(e.error_code());
    }
    if let Some(e) = error.downcast_ref::<ApiError>() {
        return Some(e.error_code());
    }
    None
}

/// Report a failed command. `CLI_VERBOSE` adds the full error chain.
pub fn report_error(output_format: &OutputFormat, error: &anyhow::Error) -> anyhow::Result<()> {
    let message = match std::env::var("CLI_VERBOSE").as_deref() {
        Ok("true") | Ok("1") => format!("{error:?}"),
        _ => format!("{error:#}"),
    };
    output_error(output_format, &message, error_code(error))
}

/// Output a fetched collection: pretty JSON, or one line per record
pub fn output_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    items: &Value,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: items
            }))?);
        }
        OutputFormat::Text => match items.as_array() {
            Some(rows) if rows.is_empty() => println!("No {} found", collection_name),
            Some(rows) => {
                for row in rows {
                    println!("{}", summarize_record(row));
                }
            }
            None => println!("{}", serde_json::to_string_pretty(items)?),
        },
    }
    Ok(())
}

/// One-line summary of a record: id first, then its other scalar fields
pub fn summarize_record(record: &Value) -> String {
    let Some(fields) = record.as_object() else {
        return record.to_string();
    };

    let mut parts = Vec::new();
    if let Some(id) = fields.get("id") {
        parts.push(format!("#{}", id));
    }
    for (key, value) in fields {
        if key == "id" {
            continue;
        }
        match value {
            Value::Null => {}
            Value::String(s) if s.is_empty() => {}
            Value::String(s) => parts.push(format!("{}={}", key, s)),
            Value::Bool(_) | Value::Number(_) => parts.push(format!("{}={}", key, value)),
            _ => {}
        }
    }
    parts.join("  ")
}
