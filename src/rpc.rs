//! Prisma generator protocol.
//!
//! Prisma spawns the generator and exchanges newline-delimited JSON-RPC 2.0
//! messages with it: requests arrive on stdin, responses go to stderr.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::dmmf::Document;
use crate::generator::write_dbml_schema;

pub const PRETTY_NAME: &str = "DBML Schema";
pub const DEFAULT_OUTPUT: &str = "./dbml";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const GENERATION_FAILED: i64 = -32000;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct Response {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl Response {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Parameters of a `generate` request.
#[derive(Debug, Deserialize)]
struct GenerateParams {
    generator: GeneratorDescriptor,
    dmmf: Document,
}

#[derive(Debug, Deserialize)]
struct GeneratorDescriptor {
    #[serde(default)]
    config: HashMap<String, Value>,
}

impl GeneratorDescriptor {
    fn to_config(&self) -> GeneratorConfig {
        // List-valued options are not used by this generator.
        let config: HashMap<String, String> = self
            .config
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
            .collect();
        GeneratorConfig::from_map(&config)
    }
}

/// Answer requests from `reader` until it is exhausted.
pub fn serve<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle(&line);
        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    Ok(())
}

fn handle(line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            warn!("malformed request: {err}");
            return Response::err(Value::Null, PARSE_ERROR, err.to_string());
        }
    };
    debug!(method = %request.method, "generator request");

    match request.method.as_str() {
        "getManifest" => Response::ok(
            request.id,
            json!({
                "manifest": {
                    "prettyName": PRETTY_NAME,
                    "defaultOutput": DEFAULT_OUTPUT,
                }
            }),
        ),
        "generate" => {
            let params: GenerateParams = match serde_json::from_value(request.params) {
                Ok(params) => params,
                Err(err) => return Response::err(request.id, INVALID_PARAMS, err.to_string()),
            };
            let config = params.generator.to_config();
            match write_dbml_schema(&params.dmmf.datamodel, &config) {
                Ok(_) => Response::ok(request.id, Value::Null),
                Err(err) => Response::err(request.id, GENERATION_FAILED, format!("{err:#}")),
            }
        }
        method => Response::err(request.id, METHOD_NOT_FOUND, format!("unknown method `{method}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        serve(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_get_manifest() {
        let responses = roundtrip(r#"{"jsonrpc":"2.0","method":"getManifest","params":{},"id":1}"#);
        assert_eq!(
            responses,
            vec![json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"manifest": {"prettyName": "DBML Schema", "defaultOutput": "./dbml"}}
            })]
        );
    }

    #[test]
    fn test_unknown_method_and_blank_lines() {
        let responses = roundtrip("\n{\"jsonrpc\":\"2.0\",\"method\":\"shutdown\",\"id\":7}\n\n");
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 7);
        assert_eq!(responses[0]["error"]["code"], METHOD_NOT_FOUND);
        assert!(responses[0].get("result").is_none());
    }

    #[test]
    fn test_malformed_request() {
        let responses = roundtrip("not json\n");
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
    }

    #[test]
    fn test_generate_invalid_params() {
        let responses = roundtrip(r#"{"jsonrpc":"2.0","method":"generate","params":{},"id":2}"#);
        assert_eq!(responses[0]["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_descriptor_to_config() {
        let descriptor: GeneratorDescriptor = serde_json::from_value(json!({
            "config": {"useAlias": "true", "binaryTargets": ["native"]},
            "output": {"value": "/tmp/dbml", "fromEnvVar": null}
        }))
        .unwrap();
        let config = descriptor.to_config();
        assert!(config.use_alias);
        assert_eq!(config.directory, std::path::PathBuf::from("./"));
    }
}
