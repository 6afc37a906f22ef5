//! Parse one field per stdin line and print the value tree.
//!
//! Run with: echo "[1, ['a', b]]" | cargo run --example stdin_parse
//! Set RUST_LOG=debug to see parser logging.

use std::io::BufRead;

use complexfield_core::field::{parse_field, Field};
use complexfield_core::Value;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    for (n, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("read error: {}", e);
                std::process::exit(1);
            }
        };
        match parse_field(&line) {
            Ok(Field::Raw(s)) => println!("{}: raw {:?}", n + 1, s),
            Ok(Field::Structured(v)) => {
                println!("{}: {}", n + 1, v);
                print_value(&v, 1);
            }
            Err(e) => println!("{}: error: {}", n + 1, e),
        }
    }
}

fn print_value(value: &Value<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Leaf(s) => println!("{}{:?}", indent, s),
        Value::List(items) => {
            println!("{}list ({})", indent, items.len());
            for item in items {
                print_value(item, depth + 1);
            }
        }
    }
}
