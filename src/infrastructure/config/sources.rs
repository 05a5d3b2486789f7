//! Figment providers for the two raw configuration sources.
//!
//! Both sources hand figment untyped strings keyed by lowercase field name;
//! type coercion happens later in the loader so that every field can report
//! its own error.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use figment::value::{Dict, Map, Value};
use figment::{Error, Metadata, Profile, Provider};
use tracing::debug;

use super::loader::LoadError;
use super::schema::find_field;

fn single_profile(dict: Dict) -> Map<Profile, Dict> {
    let mut map = Map::new();
    map.insert(Profile::Default, dict);
    map
}

/// Collect settings keys from raw pairs, normalising names to lowercase.
///
/// Keys that do not name a settings field are dropped.
fn collect_fields<I, K, V>(vars: I) -> Dict
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    vars.into_iter()
        .filter_map(|(key, value)| {
            let spec = find_field(key.as_ref())?;
            Some((spec.name.to_string(), Value::from(value.into())))
        })
        .collect()
}

/// Key under which a non-UTF-8 value is stored in place of a string
const NON_UTF8_KEY: &str = "non_utf8";

/// Stand-in for a value that is not valid UTF-8.
///
/// It is stored as a table so the loader sees a present but non-text value
/// and reports the field as invalid.
fn non_utf8_value(value: &OsStr) -> Value {
    let mut dict = Dict::new();
    dict.insert(
        NON_UTF8_KEY.to_string(),
        Value::from(value.to_string_lossy().into_owned()),
    );
    Value::from(dict)
}

/// Best-effort text of a value that is not a plain string
pub(crate) fn lossy_text(value: &Value) -> String {
    value
        .as_dict()
        .and_then(|dict| dict.get(NON_UTF8_KEY))
        .and_then(Value::as_str)
        .map_or_else(|| format!("{value:?}"), ToString::to_string)
}

/// Snapshot of environment variables that name settings fields
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: Dict,
}

impl EnvSnapshot {
    /// Capture the current process environment
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Build a snapshot from platform strings.
    ///
    /// A value that is not valid UTF-8 is kept so that its field is reported
    /// as invalid. A key that is not valid UTF-8 cannot name a field.
    pub fn from_os_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        let vars = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let spec = find_field(key.as_ref().to_str()?)?;
                let value = value.as_ref();
                let value = match value.to_str() {
                    Some(text) => Value::from(text.to_string()),
                    None => non_utf8_value(value),
                };
                Some((spec.name.to_string(), value))
            })
            .collect();

        Self { vars }
    }

    /// Build a snapshot from explicit key/value pairs
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            vars: collect_fields(vars),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.vars.len()
    }
}

impl Provider for EnvSnapshot {
    fn metadata(&self) -> Metadata {
        Metadata::named("environment variable")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        Ok(single_profile(self.vars.clone()))
    }
}

/// Key/value pairs read from a `.env`-style override file.
///
/// The file is parsed without exporting anything into the process
/// environment.
#[derive(Debug, Clone)]
pub struct OverrideFile {
    path: PathBuf,
    vars: Dict,
}

impl OverrideFile {
    /// Read the override file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn read(path: impl AsRef<Path>) -> Result<Option<Self>, LoadError> {
        let path = path.as_ref();
        let to_error = |source: dotenvy::Error| LoadError::OverrideFile {
            path: path.to_path_buf(),
            source,
        };

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no override file found");
                return Ok(None);
            }
            Err(err) => return Err(to_error(dotenvy::Error::Io(err))),
        };

        let escaped = escape_bare_dollars(&contents);
        let pairs = dotenvy::from_read_iter(escaped.as_bytes())
            .collect::<Result<Vec<(String, String)>, _>>()
            .map_err(to_error)?;
        let vars = collect_fields(pairs);
        debug!(
            path = %path.display(),
            fields = vars.len(),
            "loaded override file"
        );

        Ok(Some(Self {
            path: path.to_path_buf(),
            vars,
        }))
    }

    /// Location the values were read from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Escape every `$` that does not open a `${NAME}` reference.
///
/// dotenvy substitutes a bare `$NAME` in unquoted and double-quoted values,
/// which would silently truncate secrets such as `pa$word`. Only `${NAME}`
/// is substituted here. Single-quoted text and comments pass through
/// untouched, and an existing backslash escape is kept as written.
fn escape_bare_dollars(contents: &str) -> String {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Quote {
        None,
        Single,
        Double,
    }

    let mut out = String::with_capacity(contents.len());
    let mut quote = Quote::None;
    let mut chars = contents.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::None, '\'') => quote = Quote::Single,
            (Quote::None, '"') => quote = Quote::Double,
            (Quote::None | Quote::Double, '\\') => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                    prev = Some(next);
                }
                continue;
            }
            (Quote::None, '#') if prev.is_none_or(char::is_whitespace) => {
                out.push(c);
                for rest in chars.by_ref() {
                    out.push(rest);
                    if rest == '\n' {
                        break;
                    }
                }
                prev = Some('\n');
                continue;
            }
            (Quote::None | Quote::Double, '$') if chars.peek() != Some(&'{') => {
                out.push('\\');
            }
            _ => {}
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

impl Provider for OverrideFile {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("override file {}", self.path.display()))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        Ok(single_profile(self.vars.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_env_snapshot_filters_and_lowercases() {
        let snapshot = EnvSnapshot::from_vars([
            ("SUPABASE_URL", "https://x.test"),
            ("PATH", "/usr/bin"),
            ("Debug", "true"),
        ]);

        assert_eq!(snapshot.len(), 2);
        let data = snapshot.data().unwrap();
        let dict = &data[&Profile::Default];
        assert_eq!(dict["supabase_url"].as_str(), Some("https://x.test"));
        assert_eq!(dict["debug"].as_str(), Some("true"));
        assert!(!dict.contains_key("path"));
    }

    #[test]
    fn test_override_file_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = OverrideFile::read(dir.path().join(".env")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_override_file_parses_pairs() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# local development").unwrap();
        writeln!(file, "SECRET_KEY=from-file").unwrap();
        writeln!(file, "access_token_expire_minutes=45").unwrap();
        writeln!(file, "UNRELATED=ignored").unwrap();
        file.flush().unwrap();

        let override_file = OverrideFile::read(file.path()).unwrap().unwrap();
        assert_eq!(override_file.path(), file.path());

        let data = override_file.data().unwrap();
        let dict = &data[&Profile::Default];
        assert_eq!(dict.len(), 2);
        assert_eq!(dict["secret_key"].as_str(), Some("from-file"));
        assert_eq!(dict["access_token_expire_minutes"].as_str(), Some("45"));
    }

    #[test]
    fn test_override_file_does_not_touch_process_env() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SMTP_HOST=file-only.test").unwrap();
        file.flush().unwrap();

        temp_env::with_var_unset("SMTP_HOST", || {
            OverrideFile::read(file.path()).unwrap();
            assert!(std::env::var("SMTP_HOST").is_err());
        });
    }

    #[test]
    fn test_override_file_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SECRET_KEY='unterminated").unwrap();
        file.flush().unwrap();

        let err = OverrideFile::read(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::OverrideFile { .. }));
    }

    #[test]
    fn test_escape_bare_dollars() {
        assert_eq!(escape_bare_dollars("A=pa$word"), "A=pa\\$word");
        assert_eq!(escape_bare_dollars("A=\"x$HOMEy\""), "A=\"x\\$HOMEy\"");
        assert_eq!(escape_bare_dollars("A='lit$eral'"), "A='lit$eral'");
        assert_eq!(escape_bare_dollars("A=${BASE}/v1"), "A=${BASE}/v1");
        assert_eq!(escape_bare_dollars("A=cost\\$5"), "A=cost\\$5");
        assert_eq!(
            escape_bare_dollars("# don't $expand\nA=$b"),
            "# don't $expand\nA=\\$b"
        );
    }

    #[test]
    fn test_override_file_keeps_dollar_signs() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# don't expand $HOME here").unwrap();
        writeln!(file, "INFLUENCERFLOW_SOURCES_BASE=https://x.test").unwrap();
        writeln!(file, "SECRET_KEY=pa$word").unwrap();
        writeln!(file, "SMTP_PASSWORD=\"x$HOMEy\"").unwrap();
        writeln!(file, "OPENAI_API_KEY='sk-$literal'").unwrap();
        writeln!(file, "ELEVENLABS_API_KEY=trailing$").unwrap();
        writeln!(file, "SUPABASE_URL=${{INFLUENCERFLOW_SOURCES_BASE}}/v1").unwrap();
        file.flush().unwrap();

        let override_file = temp_env::with_var_unset("INFLUENCERFLOW_SOURCES_BASE", || {
            OverrideFile::read(file.path()).unwrap().unwrap()
        });

        let data = override_file.data().unwrap();
        let dict = &data[&Profile::Default];
        assert_eq!(dict["secret_key"].as_str(), Some("pa$word"));
        assert_eq!(dict["smtp_password"].as_str(), Some("x$HOMEy"));
        assert_eq!(dict["openai_api_key"].as_str(), Some("sk-$literal"));
        assert_eq!(dict["elevenlabs_api_key"].as_str(), Some("trailing$"));
        assert_eq!(dict["supabase_url"].as_str(), Some("https://x.test/v1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_env_snapshot_keeps_non_utf8_values() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let snapshot = EnvSnapshot::from_os_vars([
            (OsString::from("SECRET_KEY"), OsString::from_vec(b"pa\xffss".to_vec())),
            (OsString::from_vec(b"SECRET_KEY\xff".to_vec()), OsString::from("dropped")),
            (OsString::from("ALGORITHM"), OsString::from("HS512")),
        ]);

        assert_eq!(snapshot.len(), 2);
        let data = snapshot.data().unwrap();
        let dict = &data[&Profile::Default];
        assert_eq!(dict["secret_key"].as_str(), None);
        assert_eq!(lossy_text(&dict["secret_key"]), "pa\u{fffd}ss");
        assert_eq!(dict["algorithm"].as_str(), Some("HS512"));
    }
}
