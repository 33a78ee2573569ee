//! User-facing CLI output.
//!
//! Centralizes colorized printing so every command reports the same way.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn print_colored(text: &str, spec: &ColorSpec) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(spec);
    let _ = writeln!(stdout, "{text}");
    let _ = stdout.reset();
}

pub fn heading(text: &str) {
    print_colored(text, ColorSpec::new().set_bold(true));
}

pub fn success(text: &str) {
    print_colored(text, ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
}

pub fn warning(text: &str) {
    print_colored(text, ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
}

pub fn note(text: &str) {
    println!("{text}");
}
