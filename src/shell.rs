//! Line commands understood by the interactive window.

pub const DEFAULT_HISTORY_ROWS: usize = 10;

pub const HELP: &str = "\
Type text and press Enter to translate it.

  :from <code>               set the source language
  :to <code>                 set the target language
  :langs                     list language codes
  :config <app_id> <secret>  save API credentials
  :copy                      copy the last result to the clipboard
  :paste                     translate the clipboard contents
  :history [n]               show the last n translations (default 10)
  :help                      show this help
  :quit                      exit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Translate(String),
    From(String),
    To(String),
    Langs,
    Config { app_id: String, secret_key: String },
    Copy,
    Paste,
    History(usize),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Translate(trimmed.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("from", [code]) => Command::From(code.to_string()),
        ("to", [code]) => Command::To(code.to_string()),
        ("from" | "to", _) => Command::Invalid(format!("usage: :{} <code>", name)),
        ("langs", []) => Command::Langs,
        ("config", [app_id, secret_key]) => Command::Config {
            app_id: app_id.to_string(),
            secret_key: secret_key.to_string(),
        },
        ("config", _) => Command::Invalid("usage: :config <app_id> <secret_key>".into()),
        ("copy", []) => Command::Copy,
        ("paste", []) => Command::Paste,
        ("history", []) => Command::History(DEFAULT_HISTORY_ROWS),
        ("history", [n]) => match n.parse() {
            Ok(n) => Command::History(n),
            Err(_) => Command::Invalid(format!("not a number: {}", n)),
        },
        ("help" | "h" | "?", _) => Command::Help,
        ("quit" | "q" | "exit", _) => Command::Quit,
        _ => Command::Invalid(format!("unknown command :{} (try :help)", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_translated_trimmed() {
        assert_eq!(parse("  hello world \n"), Command::Translate("hello world".into()));
        assert_eq!(parse("   "), Command::Empty);
    }

    #[test]
    fn language_commands() {
        assert_eq!(parse(":from en"), Command::From("en".into()));
        assert_eq!(parse(":to zh-TW"), Command::To("zh-TW".into()));
        assert!(matches!(parse(":to"), Command::Invalid(_)));
        assert_eq!(parse(":langs"), Command::Langs);
    }

    #[test]
    fn config_needs_two_args() {
        assert_eq!(
            parse(":config 2024 secret"),
            Command::Config {
                app_id: "2024".into(),
                secret_key: "secret".into()
            }
        );
        assert!(matches!(parse(":config 2024"), Command::Invalid(_)));
    }

    #[test]
    fn history_rows() {
        assert_eq!(parse(":history"), Command::History(DEFAULT_HISTORY_ROWS));
        assert_eq!(parse(":history 3"), Command::History(3));
        assert!(matches!(parse(":history x"), Command::Invalid(_)));
    }

    #[test]
    fn misc_commands() {
        assert_eq!(parse(":copy"), Command::Copy);
        assert_eq!(parse(":paste"), Command::Paste);
        assert_eq!(parse(":q"), Command::Quit);
        assert_eq!(parse(":help"), Command::Help);
        assert!(matches!(parse(":bogus"), Command::Invalid(_)));
    }
}
