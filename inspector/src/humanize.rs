//! Display names for identifiers.

/// Turns an identifier into a Title Case label.
///
/// Splits on underscores, lower-to-upper transitions, the end of an acronym
/// and letter/digit boundaries. A leading `_` or `m_` prefix is dropped.
///
/// ```
/// use lilium_inspector::humanize::humanize;
///
/// assert_eq!(humanize("spawn_wave"), "Spawn Wave");
/// assert_eq!(humanize("resetHTMLCache"), "Reset HTML Cache");
/// ```
pub fn humanize(ident: &str) -> String {
    let trimmed = strip_prefixes(ident);
    let words = split_words(trimmed);
    if words.is_empty() {
        return ident.to_owned();
    }

    let mut out = String::with_capacity(trimmed.len() + words.len());
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn strip_prefixes(ident: &str) -> &str {
    let ident = ident.trim_start_matches('_');
    match ident.strip_prefix("m_") {
        Some(rest) if !rest.is_empty() => rest.trim_start_matches('_'),
        _ => ident,
    }
}

fn split_words(ident: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = ident.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (pos, &(byte, c)) in chars.iter().enumerate() {
        if c == '_' || c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push(&ident[s..byte]);
            }
            continue;
        }

        let Some(s) = start else {
            start = Some(byte);
            continue;
        };

        let prev = chars[pos - 1].1;
        let next = chars.get(pos + 1).map(|&(_, n)| n);
        let boundary = (prev.is_lowercase() && c.is_uppercase())
            || (prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase()))
            || (prev.is_ascii_digit() != c.is_ascii_digit() && prev != '_');

        if boundary {
            words.push(&ident[s..byte]);
            start = Some(byte);
        }
    }

    if let Some(s) = start {
        words.push(&ident[s..]);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case() {
        assert_eq!(humanize("spawn_wave"), "Spawn Wave");
        assert_eq!(humanize("reset"), "Reset");
    }

    #[test]
    fn camel_case() {
        assert_eq!(humanize("spawnWave"), "Spawn Wave");
        assert_eq!(humanize("SpawnWave"), "Spawn Wave");
    }

    #[test]
    fn prefixes_are_dropped() {
        assert_eq!(humanize("_privateThing"), "Private Thing");
        assert_eq!(humanize("m_speed"), "Speed");
        assert_eq!(humanize("__internal"), "Internal");
    }

    #[test]
    fn acronyms_stay_together() {
        assert_eq!(humanize("HTMLParser"), "HTML Parser");
        assert_eq!(humanize("resetHTMLCache"), "Reset HTML Cache");
        assert_eq!(humanize("toRGB"), "To RGB");
    }

    #[test]
    fn digits_form_words() {
        assert_eq!(humanize("layer2Mask"), "Layer 2 Mask");
        assert_eq!(humanize("spawn_10_enemies"), "Spawn 10 Enemies");
    }

    #[test]
    fn degenerate_input_is_kept() {
        assert_eq!(humanize(""), "");
        assert_eq!(humanize("_"), "_");
    }
}
