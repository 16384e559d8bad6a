use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use shapeguard_middleware::{Context, SchemaMiddleware, ValidatorOptions};
use shapeguard_schema::{Schema, SchemaRegistry};
use shapeguard_validate::MessageCatalog;

use crate::cmd::CheckArgs;
use crate::exit::{
    catalog_error, io_error, schema_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE,
};
use crate::output::{print_check, CheckReport, OutputFormat};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let gate = build_gate(&args)?;
    let body = read_body(args.body.as_deref())?;

    let mut ctx = Context::new(body);
    let flow = gate.handle(&mut ctx, |_| ());
    let errors = collected_errors(&ctx);

    tracing::info!(
        halted = flow.is_halted(),
        errors = errors.len(),
        "checked request body"
    );

    let report = CheckReport {
        valid: errors.is_empty(),
        halted: flow.is_halted(),
        status: ctx.status,
        errors,
    };
    print_check(&report, format);

    if report.halted {
        Ok(DATA_INVALID)
    } else {
        Ok(SUCCESS)
    }
}

fn build_gate(args: &CheckArgs) -> CliResult<SchemaMiddleware> {
    let mut options = ValidatorOptions {
        transfer_errors: args.transfer,
        strict_mode: args.strict,
        ..ValidatorOptions::default()
    };
    if let Some(path) = &args.locales {
        let overrides = MessageCatalog::from_json_str(&read_text(path)?)
            .map_err(|err| catalog_error(&format!("invalid locales {}", path.display()), err))?;
        options.locales = options.locales.with_overrides(overrides);
    }

    match (&args.schema, &args.schema_dir, &args.route) {
        (Some(path), _, _) => {
            let schema = Schema::from_json_str(&read_text(path)?)
                .map_err(|err| schema_error(&format!("invalid schema {}", path.display()), err))?;
            Ok(SchemaMiddleware::new(schema).with_options(options))
        }
        (None, Some(dir), Some(route)) => {
            let registry = SchemaRegistry::from_directory(dir)
                .map_err(|err| schema_error("failed loading schema directory", err))?;
            SchemaMiddleware::for_route(&registry, route, options)
                .map_err(|err| schema_error("route lookup failed", err))?
                .ok_or_else(|| {
                    CliError::new(
                        USAGE,
                        format!("no schema for route {route} in {}", dir.display()),
                    )
                })
        }
        _ => Err(CliError::new(
            USAGE,
            "either --schema or --schema-dir with --route is required",
        )),
    }
}

fn read_body(path: Option<&Path>) -> CliResult<Value> {
    let text = match path {
        Some(path) => read_text(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| io_error("failed reading stdin", err))?;
            text
        }
    };

    serde_json::from_str(&text)
        .map_err(|err| CliError::new(DATA_INVALID, format!("body is not valid JSON: {err}")))
}

fn read_text(path: &Path) -> CliResult<String> {
    fs::read_to_string(path)
        .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))
}

/// Findings end up in one of two places depending on the gate's mode.
fn collected_errors(ctx: &Context) -> Vec<String> {
    if let Some(errors) = &ctx.errors {
        return errors.iter().map(ToString::to_string).collect();
    }

    ctx.response_body
        .as_ref()
        .and_then(|body| body.get("error"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
