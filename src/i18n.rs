use dioxus_i18n::prelude::*;

pub const EN_US: &str = include_str!("../locales/en-US.ftl");

/// Initialize i18n configuration with English as default language
pub fn init_i18n() -> I18nConfig {
    I18nConfig::new(unic_langid::langid!("en-US"))
        .with_locale(Locale::new_static(unic_langid::langid!("en-US"), EN_US))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USED_KEYS: &[&str] = &[
        "prompt-status-saved",
        "prompt-status-saving",
        "prompt-confirmation-full",
        "prompt-confirmation-emailed",
        "prompt-done",
        "prompt-email-intro",
        "prompt-email-placeholder",
        "prompt-next",
        "prompt-code-intro",
        "prompt-code-placeholder",
        "prompt-log-in",
        "prompt-code-incorrect",
        "prompt-skip-intro",
        "prompt-skip",
        "nav-save",
        "nav-saving",
        "nav-saved",
        "editor-title",
    ];

    #[test]
    fn test_locale_has_all_keys() {
        let defined: Vec<&str> = EN_US
            .lines()
            .filter_map(|line| line.split_once(" = ").map(|(key, _)| key.trim()))
            .collect();

        for key in USED_KEYS {
            assert!(defined.contains(key), "missing locale key {}", key);
        }
    }

    #[test]
    fn test_confirmation_wording() {
        let line = |key: &str| {
            EN_US
                .lines()
                .find(|l| l.starts_with(&format!("{} = ", key)))
                .unwrap()
                .to_string()
        };
        assert!(line("prompt-confirmation-full").ends_with("to the cloud."));
        assert!(line("prompt-confirmation-emailed")
            .ends_with("and you have been emailed a link to access it!"));
    }
}
