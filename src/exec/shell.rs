// src/exec/shell.rs

//! Platform shell helpers.

use tokio::process::Command;

/// Build a shell command appropriate for the platform.
pub fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

/// Quote a single word for the platform shell, leaving plain paths alone.
pub fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if plain {
        return word.to_string();
    }

    if cfg!(windows) {
        format!("\"{}\"", word.replace('"', "\\\""))
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Quote and space-join a list of words.
pub fn join_quoted<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| shell_quote(w.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(shell_quote("src/js/main.js"), "src/js/main.js");
        assert_eq!(shell_quote("--style=expanded"), "--style=expanded");
    }

    #[test]
    fn spaces_and_quotes_are_escaped() {
        assert_eq!(shell_quote("my file.scss"), "'my file.scss'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn join_quoted_uses_single_spaces() {
        assert_eq!(join_quoted(&["a.js", "b c.js"]), "a.js 'b c.js'");
    }
}
