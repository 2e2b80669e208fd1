//! Review list orchestration.
//!
//! [`ReviewBoard`] owns one fetch cycle and the cards built from it. Its
//! [`FetchResult`] is published through a watch channel; renderers either
//! subscribe to it or take a [`SectionView`] snapshot.

use crate::fetcher::ReviewFetcher;
use crate::loader::{StaggeredImageLoader, DEFAULT_STAGGER};
use kudos_domain::{
    render_stars, AvatarDisplay, FetchResult, ImageLoadState, ImageSource, Review,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Text shown while the fetch is in flight
pub const LOADING_MESSAGE: &str = "Loading reviews...";

/// Configuration hint shown under every fetch error
pub const CONFIG_HINT: &str = "Make sure the reviews proxy has GOOGLE_PLACES_API_KEY configured";

/// Label of the link to the provider's full review page
pub const MORE_REVIEWS_LABEL: &str = "Read More Reviews on Google";

/// Provider page listing every review of a place
pub fn more_reviews_url(place_id: &str) -> String {
    format!("https://www.google.com/maps/place/?q=place_id:{}", place_id)
}

/// Snapshot of one card, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// Review id (also the card key)
    pub id: String,
    /// Reviewer name
    pub author: String,
    /// Rating as star glyphs
    pub stars: String,
    /// Review body
    pub text: String,
    /// Age string to display
    pub age: String,
    /// Avatar slot content
    pub avatar: AvatarDisplay,
    /// Raw load state of the avatar
    pub image_state: ImageLoadState,
}

/// What the reviews section shows
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView {
    /// Spinner text
    Loading {
        /// Message to display
        message: String,
    },
    /// Fetch failed
    Error {
        /// Failure message
        message: String,
        /// Static configuration hint
        hint: String,
    },
    /// Provider has no reviews
    Empty {
        /// Message to display
        message: String,
    },
    /// Review grid followed by the "more reviews" link
    Populated {
        /// Business name, if the provider sent one
        business_name: Option<String>,
        /// Cards in provider order
        cards: Vec<CardView>,
        /// Link to the provider page
        more_reviews_url: String,
    },
}

/// A mounted review card: the review plus its own avatar loader
#[derive(Debug)]
pub struct ReviewCard {
    review: Review,
    loader: StaggeredImageLoader,
}

impl ReviewCard {
    /// Mount a card at `position`, scheduling its avatar load
    pub fn mount<S: ImageSource>(
        position: usize,
        review: Review,
        images: Arc<S>,
        stagger: Duration,
    ) -> Self {
        let loader = StaggeredImageLoader::spawn(position, &review.avatar, images, stagger);
        Self { review, loader }
    }

    /// The review shown on this card
    pub fn review(&self) -> &Review {
        &self.review
    }

    /// Card key
    pub fn id(&self) -> &str {
        &self.review.id
    }

    /// Current avatar load state
    pub fn image_state(&self) -> ImageLoadState {
        self.loader.state()
    }

    /// Receiver for avatar state changes
    pub fn subscribe(&self) -> watch::Receiver<ImageLoadState> {
        self.loader.subscribe()
    }

    /// Wait for the avatar load to finish
    pub async fn settled(&mut self) -> ImageLoadState {
        self.loader.settled().await
    }

    /// Snapshot for rendering
    pub fn view(&self) -> CardView {
        let image_state = self.image_state();
        CardView {
            id: self.review.id.clone(),
            author: self.review.author.clone(),
            stars: render_stars(self.review.rating),
            text: self.review.text.clone(),
            age: self.review.display_age().to_string(),
            avatar: AvatarDisplay::resolve(&self.review.avatar, image_state),
            image_state,
        }
    }
}

/// Reviews section state: one fetch per place id, one card per review
pub struct ReviewBoard<S: ImageSource> {
    fetcher: ReviewFetcher,
    images: Arc<S>,
    stagger: Duration,
    place_id: Option<String>,
    business_name: Option<String>,
    state: watch::Sender<FetchResult>,
    cards: Vec<ReviewCard>,
}

impl<S: ImageSource> fmt::Debug for ReviewBoard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewBoard")
            .field("fetcher", &self.fetcher)
            .field("stagger", &self.stagger)
            .field("place_id", &self.place_id)
            .field("business_name", &self.business_name)
            .field("result", &*self.state.borrow())
            .field("cards", &self.cards)
            .finish_non_exhaustive()
    }
}

impl<S: ImageSource> ReviewBoard<S> {
    /// Create an inactive board; it reports `Loading` until activated
    pub fn new(fetcher: ReviewFetcher, images: Arc<S>) -> Self {
        let (state, _) = watch::channel(FetchResult::Loading);
        Self {
            fetcher,
            images,
            stagger: DEFAULT_STAGGER,
            place_id: None,
            business_name: None,
            state,
            cards: Vec::new(),
        }
    }

    /// Override the delay between card avatar loads
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    /// Fetch the reviews of `place_id`
    ///
    /// Fetches only when the place id differs from the last activation, so
    /// re-activating with the same id is a no-op once that cycle has
    /// settled. A cycle abandoned mid-fetch (its future dropped) is still
    /// `Loading` and is fetched again. A new id drops the old cards
    /// (cancelling their pending avatar loads) before fetching.
    pub async fn activate(&mut self, place_id: &str) {
        if self.place_id.as_deref() == Some(place_id) && self.state.borrow().is_settled() {
            debug!("Reviews for {} already fetched", place_id);
            return;
        }

        self.place_id = Some(place_id.to_string());
        self.cards.clear();
        self.business_name = None;
        self.state.send_replace(FetchResult::Loading);

        let listing = self.fetcher.fetch_listing(place_id).await;

        self.cards = listing
            .result
            .reviews()
            .iter()
            .cloned()
            .enumerate()
            .map(|(position, review)| {
                ReviewCard::mount(position, review, Arc::clone(&self.images), self.stagger)
            })
            .collect();
        self.business_name = listing.business_name;
        self.state.send_replace(listing.result);
    }

    /// Place id of the current cycle
    pub fn place_id(&self) -> Option<&str> {
        self.place_id.as_deref()
    }

    /// Current fetch result
    pub fn result(&self) -> FetchResult {
        self.state.borrow().clone()
    }

    /// Receiver notified whenever the fetch result changes
    pub fn subscribe(&self) -> watch::Receiver<FetchResult> {
        self.state.subscribe()
    }

    /// Mounted cards, in provider order
    pub fn cards(&self) -> &[ReviewCard] {
        &self.cards
    }

    /// Wait until every card's avatar load has finished
    pub async fn settle_images(&mut self) {
        for card in &mut self.cards {
            card.settled().await;
        }
    }

    /// Snapshot of the section
    pub fn view(&self) -> SectionView {
        match &*self.state.borrow() {
            FetchResult::Loading => SectionView::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            FetchResult::Failed { message, .. } => SectionView::Error {
                message: message.clone(),
                hint: CONFIG_HINT.to_string(),
            },
            FetchResult::Empty { message } => SectionView::Empty {
                message: message.clone(),
            },
            FetchResult::Succeeded(_) => SectionView::Populated {
                business_name: self.business_name.clone(),
                cards: self.cards.iter().map(ReviewCard::view).collect(),
                more_reviews_url: more_reviews_url(self.place_id.as_deref().unwrap_or_default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudos_domain::{AvatarRef, PLACEHOLDER_GLYPH, STAR_GLYPH};

    struct NoImages;

    impl ImageSource for NoImages {
        type Error = String;

        async fn load(&self, _reference: &str) -> Result<(), String> {
            Err("offline".to_string())
        }
    }

    fn review(avatar: AvatarRef) -> Review {
        Review {
            id: "Jo0".to_string(),
            author: "Jo".to_string(),
            rating: 4.6,
            date: "2 weeks ago".to_string(),
            relative_time: String::new(),
            text: "Would hire again.".to_string(),
            avatar,
        }
    }

    #[test]
    fn test_more_reviews_url() {
        assert_eq!(
            more_reviews_url("ChIJp7me7laZj4AR1Voz18Q5NYs"),
            "https://www.google.com/maps/place/?q=place_id:ChIJp7me7laZj4AR1Voz18Q5NYs"
        );
    }

    #[tokio::test]
    async fn test_inactive_board_is_loading() {
        let board = ReviewBoard::new(ReviewFetcher::new("http://127.0.0.1:9"), Arc::new(NoImages));
        assert_eq!(
            board.view(),
            SectionView::Loading {
                message: LOADING_MESSAGE.to_string()
            }
        );
        assert!(board.cards().is_empty());
    }

    #[tokio::test]
    async fn test_board_debug_output() {
        let board = ReviewBoard::new(ReviewFetcher::new("http://127.0.0.1:9"), Arc::new(NoImages));
        let debug = format!("{:?}", board);
        assert!(debug.starts_with("ReviewBoard"));
        assert!(debug.contains("result: Loading"));
        assert!(debug.contains("cards: []"));
    }

    #[tokio::test]
    async fn test_card_view_before_and_after_failed_load() {
        let avatar = AvatarRef::Proxied("/api/google-images?url=x".to_string());
        let mut card = ReviewCard::mount(0, review(avatar), Arc::new(NoImages), Duration::ZERO);

        assert_eq!(
            card.view().avatar,
            AvatarDisplay::Placeholder(PLACEHOLDER_GLYPH.to_string())
        );
        assert_eq!(card.settled().await, ImageLoadState::FailedFallback);

        let view = card.view();
        assert_eq!(view.stars, STAR_GLYPH.repeat(4));
        assert_eq!(view.age, "2 weeks ago");
        assert_eq!(view.image_state, ImageLoadState::FailedFallback);
        assert!(!view.avatar.is_image());
    }
}
