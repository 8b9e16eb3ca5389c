//! # Installed-Application Registry
//!
//! Windows records per-application install paths under the `App Paths` key, keyed by
//! executable file name. Other hosts have no equivalent, so [`host_registry`]
//! returns `None` there and resolution relies on the search path alone.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::domain::traits::AppRegistry;

#[cfg(windows)]
pub const APP_PATHS_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths";

#[cfg_attr(not(windows), allow(dead_code))]
static PERCENT_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%([A-Za-z0-9_()]+)%").unwrap());

/// The registry for this host, if it has one.
pub fn host_registry() -> Option<Arc<dyn AppRegistry>> {
    #[cfg(windows)]
    {
        Some(Arc::new(windows::WindowsAppPaths))
    }
    #[cfg(not(windows))]
    {
        None
    }
}

/// Expands `%VAR%` references the way `REG_EXPAND_SZ` values expect.
/// Unknown variables are left untouched.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn expand_percent_vars(value: &str) -> String {
    PERCENT_VAR
        .replace_all(value, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Registry values are often quoted (`"C:\Program Files\...\app.exe"`).
#[cfg_attr(not(windows), allow(dead_code))]
pub fn clean_registry_path(raw: &str) -> String {
    expand_percent_vars(raw.trim().trim_matches('"'))
}

#[cfg(windows)]
mod windows {
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

    use super::{APP_PATHS_KEY, clean_registry_path};
    use crate::domain::error::AccessError;
    use crate::domain::traits::AppRegistry;

    const SOURCE: &str = "registry";

    /// `App Paths` under the machine hive, then the per-user hive.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct WindowsAppPaths;

    impl AppRegistry for WindowsAppPaths {
        fn lookup(&self, executable: &str) -> Result<Option<PathBuf>, AccessError> {
            let subkey = format!(r"{APP_PATHS_KEY}\{executable}");

            for hive in [HKEY_LOCAL_MACHINE, HKEY_CURRENT_USER] {
                let key = match RegKey::predef(hive).open_subkey(&subkey) {
                    Ok(key) => key,
                    Err(e) if e.kind() == ErrorKind::NotFound => continue,
                    Err(e) => return Err(AccessError::new(SOURCE, e)),
                };
                // The default value holds the executable path.
                match key.get_value::<String, _>("") {
                    Ok(raw) if !raw.trim().is_empty() => {
                        return Ok(Some(PathBuf::from(clean_registry_path(&raw))));
                    }
                    Ok(_) => continue,
                    Err(e) if e.kind() == ErrorKind::NotFound => continue,
                    Err(e) => return Err(AccessError::new(SOURCE, e)),
                }
            }
            Ok(None)
        }
    }
}
