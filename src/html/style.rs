use std::fmt;

/// An inline `style` declaration list that keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style(Vec<(String, String)>);

impl Style {
    /// An empty declaration list
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value.
    pub fn set<K: Into<String>, V: Into<String>>(mut self, property: K, value: V) -> Self {
        let property = property.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == property) {
            Some(entry) => entry.1 = value,
            None => self.0.push((property, value)),
        }
        self
    }

    /// Get the value of a property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    /// Parse a `style` attribute. Malformed declarations are skipped.
    pub fn parse(src: &str) -> Self {
        src.split(';')
            .filter_map(|decl| {
                let (k, v) = decl.split_once(':')?;
                let (k, v) = (k.trim(), v.trim());
                if k.is_empty() {
                    None
                } else {
                    Some((k.to_ascii_lowercase(), v.to_owned()))
                }
            })
            .fold(Style::new(), |style, (k, v)| style.set(k, v))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", k, v)?;
        }
        Ok(())
    }
}

impl From<Style> for String {
    fn from(style: Style) -> String {
        style.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::Style;

    #[test]
    fn test_style_roundtrip() {
        let style = Style::new()
            .set("width", "300px")
            .set("margin-left", "auto")
            .set("width", "320px");
        assert_eq!(style.to_string(), "width: 320px; margin-left: auto;");
        assert_eq!(Style::parse(&style.to_string()), style);
        assert_eq!(Style::parse("WIDTH:1px;;bogus").get("width"), Some("1px"));
    }
}
