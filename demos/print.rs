//! Prints the glyph text of a PDF417 symbol.
//!
//! `cargo run --example print -- "Hello, world!" 6`

use std::env;

fn main() {
    let mut args = env::args().skip(1);
    let data = args.next().unwrap_or_else(|| String::from("Hello, world from *rust* !"));
    let cols: u8 = args.next().and_then(|c| c.parse().ok()).unwrap_or(4);

    match pdf417_text::encode(&data, cols, None) {
        Ok(result) => {
            println!("{}", result.text());
            println!();
            println!(
                "{} rows x {} columns, level {}, {} padding codewords (suggested columns: {})",
                result.rows(), result.columns(), result.level(), result.padding(), result.suggested_columns()
            );
        }
        Err(err) => eprintln!("error: {err}"),
    }
}
