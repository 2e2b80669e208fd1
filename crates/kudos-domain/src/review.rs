//! Review module - the normalized review value and its avatar reference

/// Glyph shown whenever a reviewer has no displayable picture
pub const PLACEHOLDER_GLYPH: &str = "👤";

/// Resolved value used to render a reviewer's picture
///
/// Only `Proxied` and `External` are ever loaded as images. A `Glyph` is
/// rendered as text, as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AvatarRef {
    /// Image routed through the image proxy (e.g. `/api/google-images?url=...`)
    Proxied(String),
    /// Image loaded directly from the external host
    External(String),
    /// Non-image sentinel displayed verbatim
    Glyph(String),
}

impl AvatarRef {
    /// The default "no image" avatar
    pub fn placeholder() -> Self {
        AvatarRef::Glyph(PLACEHOLDER_GLYPH.to_string())
    }

    /// Whether this reference should be loaded as an image
    pub fn is_image(&self) -> bool {
        matches!(self, AvatarRef::Proxied(_) | AvatarRef::External(_))
    }

    /// The raw reference string
    pub fn as_str(&self) -> &str {
        match self {
            AvatarRef::Proxied(s) | AvatarRef::External(s) | AvatarRef::Glyph(s) => s,
        }
    }

    /// Glyph to show while the image is not (or cannot be) displayed
    pub fn fallback_glyph(&self) -> &str {
        match self {
            AvatarRef::Glyph(glyph) => glyph,
            _ => PLACEHOLDER_GLYPH,
        }
    }
}

/// A customer review, normalized from a provider record
///
/// Built once per fetch cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Author name followed by list position. Not guaranteed unique.
    pub id: String,
    /// Display name of the reviewer
    pub author: String,
    /// Star rating, 1-5 per provider contract
    pub rating: f64,
    /// Locally computed age ("3 days ago"), used when `relative_time` is empty
    pub date: String,
    /// Provider supplied age, preferred for display
    pub relative_time: String,
    /// Review body, may be empty
    pub text: String,
    /// Resolved avatar
    pub avatar: AvatarRef,
}

impl Review {
    /// Age string to display: provider wording first, local fallback second
    pub fn display_age(&self) -> &str {
        if self.relative_time.is_empty() {
            &self.date
        } else {
            &self.relative_time
        }
    }
}
