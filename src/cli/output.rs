use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Income,
    Outflow,
    Warning,
    Section,
}

/// Chooses the style for a signed amount line.
pub fn kind_for_amount(amount: f64) -> MessageKind {
    if amount < 0.0 {
        MessageKind::Outflow
    } else if amount > 0.0 {
        MessageKind::Income
    } else {
        MessageKind::Info
    }
}

pub fn styled(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Income => text.bright_green().to_string(),
        MessageKind::Outflow => text.bright_red().to_string(),
        MessageKind::Warning => format!("WARNING: {text}").bright_yellow().to_string(),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    match kind {
        MessageKind::Warning => eprintln!("{}", styled(kind, message)),
        MessageKind::Section => println!("\n{}", styled(kind, message)),
        _ => println!("{}", styled(kind, message)),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

/// Prints a line coloured by the sign of `amount`.
pub fn amount_line(amount: f64, line: impl fmt::Display) {
    print(kind_for_amount(amount), line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_sign_picks_style() {
        assert_eq!(kind_for_amount(-1.0), MessageKind::Outflow);
        assert_eq!(kind_for_amount(12.5), MessageKind::Income);
        assert_eq!(kind_for_amount(0.0), MessageKind::Info);
    }

    #[test]
    fn section_wraps_title() {
        colored::control::set_override(false);
        assert_eq!(styled(MessageKind::Section, " June "), "=== June ===");
        assert_eq!(styled(MessageKind::Warning, "empty"), "WARNING: empty");
    }
}
