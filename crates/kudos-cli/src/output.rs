//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kudos_domain::{AvatarDisplay, AvatarRef};
use kudos_sdk::{CardView, SectionView, MORE_REVIEWS_LABEL};
use tabled::{
    builder::Builder,
    settings::{
        object::{Columns, Rows},
        Alignment, Modify, Style, Width,
    },
};

const REVIEW_COLUMN_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the reviews section.
    pub fn format_section(&self, view: &SectionView) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_section_json(view),
            OutputFormat::Cards => Ok(self.format_section_cards(view)),
            OutputFormat::Quiet => Ok(format_section_quiet(view)),
        }
    }

    fn format_section_json(&self, view: &SectionView) -> Result<String> {
        let value = match view {
            SectionView::Loading { message } => serde_json::json!({
                "state": "loading",
                "message": message,
            }),
            SectionView::Error { message, hint } => serde_json::json!({
                "state": "error",
                "message": message,
                "hint": hint,
            }),
            SectionView::Empty { message } => serde_json::json!({
                "state": "empty",
                "message": message,
            }),
            SectionView::Populated {
                business_name,
                cards,
                more_reviews_url,
            } => serde_json::json!({
                "state": "populated",
                "business_name": business_name,
                "reviews": cards.iter().map(card_json).collect::<Vec<_>>(),
                "more_reviews_url": more_reviews_url,
            }),
        };

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_section_cards(&self, view: &SectionView) -> String {
        match view {
            SectionView::Loading { message } => self.info(message),
            SectionView::Error { message, hint } => {
                format!("{}\n{}", self.error(message), self.colorize(hint, "magenta"))
            }
            SectionView::Empty { message } => self.colorize(message, "yellow"),
            SectionView::Populated {
                business_name,
                cards,
                more_reviews_url,
            } => {
                let mut out = String::new();
                if let Some(name) = business_name {
                    out.push_str(&self.heading(name));
                    out.push('\n');
                }
                out.push_str(&cards_table(cards));
                out.push('\n');
                out.push_str(&format!(
                    "{} {}",
                    self.colorize(MORE_REVIEWS_LABEL, "blue"),
                    more_reviews_url
                ));
                out
            }
        }
    }

    /// Format a resolved avatar reference.
    pub fn format_avatar(&self, avatar: &AvatarRef) -> Result<String> {
        let kind = avatar_kind(avatar);
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "kind": kind,
                "value": avatar.as_str(),
                "is_image": avatar.is_image(),
            }))?),
            OutputFormat::Cards => Ok(format!(
                "{} {}",
                self.colorize(&format!("{}:", kind), "cyan"),
                avatar.as_str()
            )),
            OutputFormat::Quiet => Ok(avatar.as_str().to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn cards_table(cards: &[CardView]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Avatar", "Author", "Rating", "Age", "Review"]);

    for card in cards {
        let avatar = match &card.avatar {
            AvatarDisplay::Image(_) => "photo",
            AvatarDisplay::Placeholder(glyph) => glyph.as_str(),
        };
        builder.push_record([
            avatar,
            card.author.as_str(),
            card.stars.as_str(),
            card.age.as_str(),
            card.text.as_str(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .with(Modify::new(Columns::single(4)).with(Width::wrap(REVIEW_COLUMN_WIDTH)));

    table.to_string()
}

fn format_section_quiet(view: &SectionView) -> String {
    match view {
        SectionView::Loading { message }
        | SectionView::Error { message, .. }
        | SectionView::Empty { message } => message.clone(),
        SectionView::Populated { cards, .. } => cards
            .iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn card_json(card: &CardView) -> serde_json::Value {
    let (kind, value) = match &card.avatar {
        AvatarDisplay::Image(url) => ("image", url),
        AvatarDisplay::Placeholder(glyph) => ("placeholder", glyph),
    };
    serde_json::json!({
        "id": card.id,
        "author": card.author,
        "stars": card.stars,
        "text": card.text,
        "age": card.age,
        "avatar": { "kind": kind, "value": value },
        "image_state": card.image_state.as_str(),
    })
}

fn avatar_kind(avatar: &AvatarRef) -> &'static str {
    match avatar {
        AvatarRef::Proxied(_) => "proxied",
        AvatarRef::External(_) => "external",
        AvatarRef::Glyph(_) => "glyph",
    }
}
