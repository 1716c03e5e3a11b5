use nu_ansi_term::{AnsiGenericString, Color, Style};

pub fn bold<'a>(msg: impl AsRef<str> + 'a) -> AnsiGenericString<'a, str> {
    Style::new().bold().paint(msg.as_ref().to_owned())
}

pub fn dim<'a>(msg: impl AsRef<str> + 'a) -> AnsiGenericString<'a, str> {
    Style::new().dimmed().paint(msg.as_ref().to_owned())
}

/// Banner shown when the feed moved to a protocol version this client does not speak.
pub fn print_stale_banner(expected: &str, received: &str) {
    println!(
        "{}",
        Color::Red
            .bold()
            .paint(format!("stale client, reload required (expected {expected}, feed is on {received})"))
    );
}

pub fn print_kv(key: &str, value: impl std::fmt::Display) {
    println!("{:<24} {value}", bold(key));
}
