use std::fmt;

const MASK: &str = "****";

/// Wrapper that keeps credentials out of logs.
///
/// Both `Debug` and `Display` render as `****`, so a `Secret` field can sit inside a config struct that derives
/// `Debug` without the value ever reaching a log line. The only way at the value is an explicit call to
/// [`Secret::reveal`].
#[derive(Clone, Default)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn reveal(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

#[cfg(test)]
mod test {
    use super::Secret;

    #[test]
    fn secrets_never_leak_through_formatting() {
        let token = Secret::new("APP_USR-1234".to_string());
        assert_eq!(format!("{token}"), "****");
        assert_eq!(format!("{token:?}"), "****");
        assert_eq!(token.reveal(), "APP_USR-1234");
    }

    #[test]
    fn secrets_hide_inside_derived_debug_output() {
        #[derive(Debug)]
        struct Config {
            url: String,
            token: Secret<String>,
        }
        let config = Config { url: "https://api.example.com".into(), token: Secret::from("hunter2".to_string()) };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("https://api.example.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
