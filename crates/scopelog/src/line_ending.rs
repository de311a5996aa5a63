/// Terminator appended to every rendered log line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LineEnding {
    /// A single `\n`.
    #[default]
    Lf,
    /// The `\r\n` pair used by Windows consoles and editors.
    CrLf,
}

impl LineEnding {
    /// Returns the terminator text.
    ///
    /// # Examples
    ///
    /// ```
    /// use scopelog::LineEnding;
    ///
    /// assert_eq!(LineEnding::Lf.as_str(), "\n");
    /// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Returns the conventional terminator of the target platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) { Self::CrLf } else { Self::Lf }
    }
}

#[cfg(test)]
mod tests {
    use super::LineEnding;

    #[test]
    fn default_is_lf() {
        assert_eq!(LineEnding::default(), LineEnding::Lf);
    }

    #[test]
    fn native_matches_platform() {
        let expected = if cfg!(windows) { "\r\n" } else { "\n" };
        assert_eq!(LineEnding::native().as_str(), expected);
    }
}
