//! Avatar load state machine for a single review card

use crate::AvatarRef;

/// State of one card's avatar load
///
/// Moves forward only:
/// `Pending -> Attempting -> Loaded | FailedFallback`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageLoadState {
    /// Waiting for the stagger timer
    #[default]
    Pending,
    /// Image request in flight
    Attempting,
    /// Image loaded and visible
    Loaded,
    /// Load failed; placeholder shown instead
    FailedFallback,
}

/// Input driving an [`ImageLoadState`] transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoadEvent {
    /// Stagger delay elapsed for an image avatar
    TimerFired,
    /// The image finished loading
    LoadSucceeded,
    /// The image failed to load
    LoadFailed,
}

impl ImageLoadState {
    /// Apply an event, returning the next state
    ///
    /// Events that make no sense in the current state are ignored, which is
    /// what keeps the machine from ever regressing.
    pub fn apply(self, event: ImageLoadEvent) -> Self {
        use ImageLoadEvent::*;
        use ImageLoadState::*;

        match (self, event) {
            (Pending, TimerFired) => Attempting,
            (Attempting, LoadSucceeded) => Loaded,
            (Attempting, LoadFailed) => FailedFallback,
            (state, _) => state,
        }
    }

    /// Whether no further transition can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImageLoadState::Loaded | ImageLoadState::FailedFallback)
    }

    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageLoadState::Pending => "pending",
            ImageLoadState::Attempting => "attempting",
            ImageLoadState::Loaded => "loaded",
            ImageLoadState::FailedFallback => "failed_fallback",
        }
    }
}

/// What a card shows in its avatar slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarDisplay {
    /// The loaded image
    Image(String),
    /// Placeholder text (the avatar's own glyph, or the default one)
    Placeholder(String),
}

impl AvatarDisplay {
    /// Decide what to show for an avatar in a given load state
    ///
    /// The image is shown only once it has actually loaded; until then, and
    /// after any failure, the placeholder stays visible.
    pub fn resolve(avatar: &AvatarRef, state: ImageLoadState) -> Self {
        match (avatar, state) {
            (AvatarRef::Proxied(url) | AvatarRef::External(url), ImageLoadState::Loaded) => {
                AvatarDisplay::Image(url.clone())
            }
            _ => AvatarDisplay::Placeholder(avatar.fallback_glyph().to_string()),
        }
    }

    /// Whether the image is visible
    pub fn is_image(&self) -> bool {
        matches!(self, AvatarDisplay::Image(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PLACEHOLDER_GLYPH;

    #[test]
    fn test_happy_path() {
        let state = ImageLoadState::default()
            .apply(ImageLoadEvent::TimerFired)
            .apply(ImageLoadEvent::LoadSucceeded);
        assert_eq!(state, ImageLoadState::Loaded);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_failure_path() {
        let state = ImageLoadState::Pending
            .apply(ImageLoadEvent::TimerFired)
            .apply(ImageLoadEvent::LoadFailed);
        assert_eq!(state, ImageLoadState::FailedFallback);
    }

    #[test]
    fn test_never_regresses() {
        assert_eq!(
            ImageLoadState::Loaded.apply(ImageLoadEvent::LoadFailed),
            ImageLoadState::Loaded
        );
        assert_eq!(
            ImageLoadState::FailedFallback.apply(ImageLoadEvent::LoadSucceeded),
            ImageLoadState::FailedFallback
        );
        assert_eq!(
            ImageLoadState::Attempting.apply(ImageLoadEvent::TimerFired),
            ImageLoadState::Attempting
        );
    }

    #[test]
    fn test_load_result_before_attempt_is_ignored() {
        assert_eq!(
            ImageLoadState::Pending.apply(ImageLoadEvent::LoadSucceeded),
            ImageLoadState::Pending
        );
    }

    #[test]
    fn test_display_only_shows_loaded_image() {
        let avatar = AvatarRef::Proxied("/api/google-images?url=x".to_string());

        assert_eq!(
            AvatarDisplay::resolve(&avatar, ImageLoadState::Loaded),
            AvatarDisplay::Image("/api/google-images?url=x".to_string())
        );
        for state in [
            ImageLoadState::Pending,
            ImageLoadState::Attempting,
            ImageLoadState::FailedFallback,
        ] {
            assert_eq!(
                AvatarDisplay::resolve(&avatar, state),
                AvatarDisplay::Placeholder(PLACEHOLDER_GLYPH.to_string())
            );
        }
    }

    #[test]
    fn test_display_keeps_custom_glyph() {
        let avatar = AvatarRef::Glyph("🙂".to_string());
        assert_eq!(
            AvatarDisplay::resolve(&avatar, ImageLoadState::Loaded),
            AvatarDisplay::Placeholder("🙂".to_string())
        );
    }
}
