//! Checker for the two config-file expression grammars.
//!
//! Runs a single literal through the same parser the converter uses and
//! reports what it understood.

use std::process;

use clap::{Parser, ValueEnum};
use dat2arff_core::{parse_nominal_set, parse_transformation, TransformRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// `attr<op>value?if_true:if_false`
    Transformation,
    /// `{a,b,c}`
    Nominals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "arff-expr", version, about = "Check a dat2arff config expression")]
struct Cli {
    /// Kind of expression to check
    #[arg(value_enum)]
    kind: Kind,

    /// Expression to check
    expression: String,

    /// Output format (text or json)
    #[arg(long, default_value = "text", value_enum)]
    output: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    let ok = match cli.kind {
        Kind::Transformation => check_transformation(&cli.expression, cli.output),
        Kind::Nominals => check_nominals(&cli.expression, cli.output),
    };
    if !ok {
        process::exit(1);
    }
}

fn check_transformation(expr: &str, output: OutputFormat) -> bool {
    let rule = match parse_transformation(expr, 1) {
        Ok(rule) => rule,
        Err(_) => {
            eprintln!("Error: It is not a valid transformation expression.");
            return false;
        }
    };
    match output {
        OutputFormat::Text => print!("{}", describe_rule(&rule)),
        OutputFormat::Json => print_json(&serde_json::json!({ "transformation": rule })),
    }
    true
}

fn check_nominals(expr: &str, output: OutputFormat) -> bool {
    let labels = match parse_nominal_set(expr, 1) {
        Ok(labels) => labels,
        Err(_) => {
            eprintln!("Error: It is not a valid array of nominals.");
            return false;
        }
    };
    match output {
        OutputFormat::Text => {
            println!("Nominals expression OK.");
            println!("Nominals: [{}]", labels.join(", "));
        }
        OutputFormat::Json => print_json(&serde_json::json!({ "nominals": labels })),
    }
    true
}

fn describe_rule(rule: &TransformRule) -> String {
    format!(
        "Transformation expression OK.\n\
         Attribute to compare: '{}'\n\
         Comparison operator '{}'\n\
         Comparing to: '{}'\n\
         Result if true: '{}'\n\
         Result if false: '{}'\n",
        rule.source_attr, rule.op, rule.value_text, rule.if_true, rule.if_false
    )
}

fn print_json(value: &serde_json::Value) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}
