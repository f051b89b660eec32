//! Prefix/alias command recognition.

/// Decides whether a message invokes a command.
#[derive(Debug, Clone)]
pub struct CommandMatcher {
    prefix: String,
}

impl CommandMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True if `text` starts with the prefix followed by one of `aliases`.
    ///
    /// In help mode the alias must follow `help ` instead. Matching is a
    /// case-sensitive prefix test with no word boundary, so `!kill123`
    /// matches the alias `kill`.
    pub fn is_command<S: AsRef<str>>(&self, text: &str, aliases: &[S], help: bool) -> bool {
        let Some(rest) = text.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        let rest = if help {
            match rest.strip_prefix("help ") {
                Some(rest) => rest,
                None => return false,
            }
        } else {
            rest
        };
        aliases.iter().any(|alias| rest.starts_with(alias.as_ref()))
    }
}
