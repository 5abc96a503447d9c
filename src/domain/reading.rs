use super::enums::ReadingStatus;

/// Ordered tag list whose equality ignores order.
///
/// Tags are trimmed, empty tags are dropped and duplicates keep their first position.
#[derive(Debug, Clone, Default)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a tag, returns false if it was empty or already present
    pub fn insert(&mut self, tag: impl AsRef<str>) -> bool {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|existing| existing == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|tag| other.contains(tag))
    }
}

impl Eq for TagSet {}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

/// A saved article or link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub status: ReadingStatus,
    pub tags: TagSet,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub domain: Option<String>,
    pub added_at: Option<String>,
    pub read_at: Option<String>,
}

impl ReadingItem {
    pub fn new(id: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
            status: ReadingStatus::Unread,
            tags: TagSet::new(),
            notes: None,
            description: None,
            image: None,
            domain: None,
            added_at: None,
            read_at: None,
        }
    }
}
