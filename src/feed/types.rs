/// Normalized feed entry (format-agnostic: RSS and Atom both map onto this).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Plain-text summary; `None` when the feed carries no usable description.
    pub summary: Option<String>,
}
