use std::fs::{self, File};
use std::io::{Error as IoError, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"# This configuration file is generated automatically. Feel free to modify it.

# The `timer` section specifies the countdown started by default.
[timer]
# Length of the countdown in seconds. Fractions are allowed.
duration = 1500

# The `notification` section specifies the desktop notification shown when
# the countdown runs out. `body` is optional.
[notification]
summary = "Time's up"
body = "The countdown has finished."
"#;

/// Reads the configuration file at `path`.
///
/// With `create_missing` set, a missing file is written from
/// [`DEFAULT_CONTENT`] first and that content is returned.
///
/// # Errors
///
/// This function will return an error if the file is missing and may not be
/// created, or any file system operation fails.
pub fn read_content<P: AsRef<Path>>(
    path: P,
    create_missing: bool,
) -> Result<String, ReadContentError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            ensure!(
                create_missing,
                NotFoundSnafu {
                    path: path.to_path_buf()
                }
            );
            tracing::info!(path = %path.display(), "Creating default configuration");
            write_default(path)?;
            Ok(DEFAULT_CONTENT.to_owned())
        }
        Err(err) => Err(err).context(FileSystemSnafu {
            when: "Reading configuration",
        }),
    }
}

fn write_default(path: &Path) -> Result<(), ReadContentError> {
    let mut file = File::options()
        .write(true)
        .create_new(true)
        .open(path)
        .context(FileSystemSnafu {
            when: "Creating configuration file",
        })?;

    file.write_all(DEFAULT_CONTENT.as_bytes())
        .context(FileSystemSnafu {
            when: "Writing default configuration content",
        })
}

/// An error type for reading content from the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Configuration file {} does not exist", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("File system error: {when}"))]
    FileSystem {
        when: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use predicates::path as path_pred;

    #[test]
    fn read_existing() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");
        file.write_str("[timer]\nduration = 60\n").unwrap();

        assert_eq!(
            read_content(file.path(), true).unwrap(),
            "[timer]\nduration = 60\n"
        );
    }

    #[test]
    fn read_missing() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");

        assert!(matches!(
            read_content(file.path(), false),
            Err(ReadContentError::NotFound { .. })
        ));
        file.assert(path_pred::missing());
    }

    #[test]
    fn create_missing() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");

        assert_eq!(read_content(file.path(), true).unwrap(), DEFAULT_CONTENT);
        file.assert(DEFAULT_CONTENT);
    }
}
