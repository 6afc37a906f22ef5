//! Show the token trace and rebuilt rule tree for a field.
//!
//! Run with: cargo run --example show_trace -- "[a, (b, 'c')]"

use complexfield_core::Parser;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let input = std::env::args().nth(1).unwrap_or_else(|| String::from("[a, (b, 'c')]"));

    let trace = match Parser::new(&input).parse() {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("=== Tokens (post-order) ===\n");
    for (i, token) in trace.tokens().iter().enumerate() {
        println!(
            "{:3} {:<14} {:<8} {:?}",
            i,
            token.rule.name(),
            token.span.to_string(),
            token.span.text(&input)
        );
    }

    println!("\n=== Tree ===\n");
    print!("{}", trace.tree().render());

    println!("\n=== Value ===\n");
    match trace.build() {
        Ok(value) => println!("{}", value),
        Err(e) => eprintln!("{}", e),
    }
}
