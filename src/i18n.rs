//! Localization context.
//!
//! A `Localizer` is built once at startup and handed by reference to whatever
//! renders text. It owns the current locale, the string bundles of both supported
//! locales, and the listeners that want to hear about locale changes.

use crate::errors::{Error, Result};
use std::{collections::HashMap, fmt};
use tracing::{debug, error, info, trace};

const EN_BUNDLE: &str = include_str!("../locales/en.toml");
const RU_BUNDLE: &str = include_str!("../locales/ru.toml");

/// The two locales the desk ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English (United Kingdom), the fallback locale
    EnglishGb,
    /// Russian, Cyrillic script
    Russian,
}

impl Locale {
    /// Supported locales, English first.
    pub const SUPPORTED: [Self; 2] = [Self::EnglishGb, Self::Russian];

    /// BCP 47 tag of the locale.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnglishGb => "en-GB",
            Self::Russian => "ru",
        }
    }

    /// Matches a language tag or POSIX locale name (`ru_RU.UTF-8`, `en-GB`, `ru-Cyrl`)
    /// by its language part.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let language = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Some(Self::EnglishGb),
            "ru" => Some(Self::Russian),
            _ => None,
        }
    }

    /// The other supported locale.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::EnglishGb => Self::Russian,
            Self::Russian => Self::EnglishGb,
        }
    }

    const fn bundle_source(self) -> &'static str {
        match self {
            Self::EnglishGb => EN_BUNDLE,
            Self::Russian => RU_BUNDLE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Picks the startup locale: configured value, then the system locale, then English.
#[must_use]
pub fn default_locale(configured: Option<&str>, system: Option<&str>) -> Locale {
    let locale = configured
        .and_then(Locale::from_tag)
        .or_else(|| system.and_then(Locale::from_tag))
        .unwrap_or(Locale::EnglishGb);
    debug!(%locale, "Default locale chosen");
    locale
}

/// Something that re-renders when the locale changes.
pub trait LocaleChangeListener: Send + Sync {
    /// Called after the locale has been switched.
    fn locale_changed(&self, locale: Locale);
}

/// Per-locale string lookup with positional arguments.
pub struct Localizer {
    current: Locale,
    bundles: HashMap<Locale, HashMap<String, String>>,
    listeners: Vec<Box<dyn LocaleChangeListener>>,
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("current", &self.current)
            .field("bundles", &self.bundles.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Localizer {
    /// Loads the embedded bundles and starts in `locale`.
    ///
    /// # Errors
    /// `Config` if an embedded bundle is not valid TOML.
    pub fn new(locale: Locale) -> Result<Self> {
        let mut bundles = HashMap::new();
        for supported in Locale::SUPPORTED {
            let bundle: HashMap<String, String> = toml::from_str(supported.bundle_source())
                .map_err(|e| Error::Config {
                    message: format!("Failed to parse {supported} string bundle: {e}"),
                })?;
            bundles.insert(supported, bundle);
        }
        debug!(%locale, "Localizer initialized");
        Ok(Self {
            current: locale,
            bundles,
            listeners: Vec::new(),
        })
    }

    /// Current locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.current
    }

    /// Switches locale and notifies every listener.
    pub fn set_locale(&mut self, locale: Locale) {
        self.current = locale;
        info!(%locale, "Locale set");
        debug!(
            "Notifying {} listeners of locale change to {locale}",
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener.locale_changed(locale);
        }
    }

    /// Switches to the other supported locale and returns it.
    pub fn toggle(&mut self) -> Locale {
        let next = self.current.other();
        self.set_locale(next);
        next
    }

    /// Registers a listener for locale changes.
    pub fn add_listener(&mut self, listener: Box<dyn LocaleChangeListener>) {
        self.listeners.push(listener);
        debug!("Locale change listener added");
    }

    /// Looks up `key` in the current locale and substitutes `{0}`, `{1}`, ... with
    /// `args`. A missing key comes back as the key itself.
    #[must_use]
    pub fn localize(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        self.localize_in(self.current, key, args)
    }

    /// Like [`Localizer::localize`], but in `locale` instead of the current one.
    #[must_use]
    pub fn localize_in(&self, locale: Locale, key: &str, args: &[&dyn fmt::Display]) -> String {
        trace!(key, %locale, "Localizing key");
        let Some(template) = self.bundles.get(&locale).and_then(|b| b.get(key)) else {
            error!(key, %locale, "Missing resource for key");
            return key.to_string();
        };

        args.iter()
            .enumerate()
            .fold(template.clone(), |text, (index, arg)| {
                text.replace(&format!("{{{index}}}"), &arg.to_string())
            })
    }

    /// Looks up `key` without arguments.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.localize(key, &[])
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::shortcut::Shortcut;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn test_lookup_in_both_locales() {
        let mut localizer = Localizer::new(Locale::EnglishGb).unwrap();
        assert_eq!(localizer.text("salaryColumn"), "Salary");

        localizer.set_locale(Locale::Russian);
        assert_eq!(localizer.text("salaryColumn"), "Оклад");
    }

    #[test]
    fn test_positional_arguments() {
        let localizer = Localizer::new(Locale::EnglishGb).unwrap();
        assert_eq!(
            localizer.localize("employee.added", &[&"Doe", &7]),
            "Employee Doe added with ID 7."
        );
    }

    #[test]
    fn test_localize_in_other_locale() {
        let localizer = Localizer::new(Locale::EnglishGb).unwrap();
        assert_eq!(
            localizer.localize_in(Locale::Russian, "salaryColumn", &[]),
            "Оклад"
        );
        assert_eq!(localizer.locale(), Locale::EnglishGb);
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let localizer = Localizer::new(Locale::Russian).unwrap();
        assert_eq!(localizer.text("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_bundles_cover_the_same_keys() {
        let localizer = Localizer::new(Locale::EnglishGb).unwrap();
        let en = &localizer.bundles[&Locale::EnglishGb];
        let ru = &localizer.bundles[&Locale::Russian];
        let mut missing: Vec<&String> = en.keys().filter(|k| !ru.contains_key(*k)).collect();
        missing.extend(ru.keys().filter(|k| !en.contains_key(*k)));
        assert!(missing.is_empty(), "keys missing in one bundle: {missing:?}");
    }

    #[test]
    fn test_every_shortcut_is_translated() {
        let localizer = Localizer::new(Locale::Russian).unwrap();
        for shortcut in Shortcut::ALL {
            let keys = std::iter::once(shortcut.label_key()).chain(shortcut.prompt_key());
            for key in keys {
                assert_ne!(localizer.text(key), key);
            }
        }
    }

    struct Recorder {
        calls: Arc<AtomicUsize>,
        last: Arc<Mutex<Option<Locale>>>,
    }

    impl LocaleChangeListener for Recorder {
        fn locale_changed(&self, locale: Locale) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(locale);
        }
    }

    #[test]
    fn test_listeners_notified_on_toggle() {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let mut localizer = Localizer::new(Locale::EnglishGb).unwrap();
        localizer.add_listener(Box::new(Recorder {
            calls: Arc::clone(&calls),
            last: Arc::clone(&last),
        }));

        assert_eq!(localizer.toggle(), Locale::Russian);
        assert_eq!(localizer.toggle(), Locale::EnglishGb);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*last.lock().unwrap(), Some(Locale::EnglishGb));
    }

    #[test]
    fn test_default_locale_resolution() {
        assert_eq!(default_locale(Some("ru"), Some("en_GB.UTF-8")), Locale::Russian);
        assert_eq!(default_locale(None, Some("ru_RU.UTF-8")), Locale::Russian);
        assert_eq!(default_locale(Some("de"), Some("fr_FR")), Locale::EnglishGb);
        assert_eq!(default_locale(None, None), Locale::EnglishGb);
        assert_eq!(Locale::from_tag("ru-Cyrl"), Some(Locale::Russian));
    }
}
