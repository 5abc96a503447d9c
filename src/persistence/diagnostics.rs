/// One recovery the decoder performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A stored value was invalid and replaced
    Repaired {
        location: String,
        field: String,
        found: String,
        replacement: String,
    },
    /// A row or block could not be decoded at all
    Dropped { location: String, reason: String },
}

impl Diagnostic {
    /// Human-readable description of what was wrong
    pub fn issue(&self) -> String {
        match self {
            Diagnostic::Repaired {
                location,
                field,
                found,
                ..
            } => format!("{}: invalid {} {:?}", location, field, found),
            Diagnostic::Dropped { location, reason } => format!("{}: {}", location, reason),
        }
    }

    /// Human-readable description of the correction, if one was made
    pub fn fix(&self) -> Option<String> {
        match self {
            Diagnostic::Repaired {
                location,
                field,
                replacement,
                ..
            } => Some(if replacement.is_empty() {
                format!("{}: cleared {}", location, field)
            } else {
                format!("{}: reset {} to {:?}", location, field, replacement)
            }),
            Diagnostic::Dropped { .. } => None,
        }
    }
}

/// Collects diagnostics during one decode
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repaired(
        &mut self,
        location: &str,
        field: &str,
        found: &str,
        replacement: impl Into<String>,
    ) {
        self.entries.push(Diagnostic::Repaired {
            location: location.to_string(),
            field: field.to_string(),
            found: found.to_string(),
            replacement: replacement.into(),
        });
    }

    pub fn dropped(&mut self, location: &str, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(location, %reason, "skipping unreadable entry");
        self.entries.push(Diagnostic::Dropped {
            location: location.to_string(),
            reason,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}
