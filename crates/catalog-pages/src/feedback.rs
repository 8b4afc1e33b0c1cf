/// A message produced during a build that did not stop it.
///
/// Build passes collect these instead of printing, so the caller decides
/// where they go (the CLI writes them to stderr).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Something was skipped; the build carried on.
    Warning(String),
}

impl Feedback {
    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Warning(msg) => msg,
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning(msg) => write!(f, "warning: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_is_prefixed() {
        let skip = Feedback::warning("could not write product Widget");
        assert!(skip.is_warning());
        assert_eq!(skip.message(), "could not write product Widget");
        assert_eq!(skip.to_string(), "warning: could not write product Widget");
    }
}
