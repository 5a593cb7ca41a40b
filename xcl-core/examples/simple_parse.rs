use xcl_core::{lex, loads, Value};

fn print(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Map(map) => {
            for (key, value) in map {
                match value {
                    Value::Map(_) | Value::List(_) => {
                        println!("{pad}{key}:");
                        print(value, indent + 1);
                    }
                    _ => println!("{pad}{key}: {value:?}"),
                }
            }
        }
        Value::List(items) => {
            for item in items {
                println!("{pad}-");
                print(item, indent + 1);
            }
        }
        scalar => println!("{pad}{scalar:?}"),
    }
}

fn main() {
    let input = "name = \"foo\"\nls = [1, 2, 3,]\np = { tl = [1 2] br = [3 4] }\n";

    println!("Input: {input:?}\n");
    println!("Tokens:");
    for lexeme in lex(input) {
        match lexeme {
            Ok(lexeme) => println!("  {:>8}  {}", lexeme.span.to_string(), lexeme.token),
            Err(err) => println!("  error: {err}"),
        }
    }

    println!("\nValue:");
    match loads(input) {
        Ok(value) => print(&value, 1),
        Err(err) => println!("  error: {err}"),
    }
}
