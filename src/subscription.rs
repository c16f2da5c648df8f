//! Subscription tiers and feature gating
//!
//! Gating is a static lookup: a tier maps to a fixed feature set.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Habits allowed on the paid tier
pub const PRO_MAX_HABITS: usize = 10;

/// Default length of a referral trial
pub const DEFAULT_TRIAL_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
        }
    }

    pub fn features(&self) -> &'static TierFeatures {
        match self {
            Self::Free => &FREE_FEATURES,
            Self::Pro => &PRO_FEATURES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Monthly,
    Annual,
    Lifetime,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
            Self::Lifetime => "lifetime",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "annual" | "yearly" => Some(Self::Annual),
            "lifetime" => Some(Self::Lifetime),
            _ => None,
        }
    }
}

/// Gated features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    PhotoGallery,
    FullActivityFeed,
    Reactions,
    AdvancedStats,
    AllBadges,
    CustomChallenges,
    Exports,
    Friends,
    Squads,
}

impl Feature {
    pub fn all() -> &'static [Feature] {
        &[
            Feature::PhotoGallery,
            Feature::FullActivityFeed,
            Feature::Reactions,
            Feature::AdvancedStats,
            Feature::AllBadges,
            Feature::CustomChallenges,
            Feature::Exports,
            Feature::Friends,
            Feature::Squads,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feature::PhotoGallery => "Photo gallery",
            Feature::FullActivityFeed => "Full activity feed",
            Feature::Reactions => "Reactions",
            Feature::AdvancedStats => "Advanced stats",
            Feature::AllBadges => "All badges",
            Feature::CustomChallenges => "Custom challenges",
            Feature::Exports => "Exports",
            Feature::Friends => "Friends",
            Feature::Squads => "Squads",
        }
    }
}

/// Feature limits for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierFeatures {
    pub max_habits: usize,
    pub photo_gallery: bool,
    pub full_activity_feed: bool,
    pub reactions: bool,
    pub advanced_stats: bool,
    pub all_badges: bool,
    pub custom_challenges: bool,
    pub exports: bool,
    pub friends: bool,
    pub squads: bool,
}

impl TierFeatures {
    pub fn allows(&self, feature: Feature) -> bool {
        match feature {
            Feature::PhotoGallery => self.photo_gallery,
            Feature::FullActivityFeed => self.full_activity_feed,
            Feature::Reactions => self.reactions,
            Feature::AdvancedStats => self.advanced_stats,
            Feature::AllBadges => self.all_badges,
            Feature::CustomChallenges => self.custom_challenges,
            Feature::Exports => self.exports,
            Feature::Friends => self.friends,
            Feature::Squads => self.squads,
        }
    }
}

pub static FREE_FEATURES: TierFeatures = TierFeatures {
    max_habits: 3,
    photo_gallery: false,
    full_activity_feed: false,
    reactions: false,
    advanced_stats: false,
    all_badges: false,
    custom_challenges: false,
    exports: false,
    friends: false,
    squads: false,
};

pub static PRO_FEATURES: TierFeatures = TierFeatures {
    max_habits: PRO_MAX_HABITS,
    photo_gallery: true,
    full_activity_feed: true,
    reactions: true,
    advanced_stats: true,
    all_badges: true,
    custom_challenges: true,
    exports: true,
    friends: true,
    squads: true,
};

/// Stored subscription record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionState {
    pub tier: Tier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_trial_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_ends_at: Option<DateTime<Utc>>,
}

impl SubscriptionState {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn is_pro(&self) -> bool {
        self.tier == Tier::Pro
    }

    pub fn features(&self) -> &'static TierFeatures {
        self.tier.features()
    }

    pub fn can_access(&self, feature: Feature) -> bool {
        self.features().allows(feature)
    }

    pub fn max_habits(&self) -> usize {
        self.features().max_habits
    }
}

/// Stored trial window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    pub started_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    #[error("Unknown subscription period '{0}' (expected monthly, annual or lifetime)")]
    UnknownPeriod(String),
}

/// Resolve what the user is entitled to right now.
///
/// An expired paid subscription falls back to free. Without a stored
/// subscription an unexpired trial grants pro.
pub fn effective_subscription(
    stored: Option<SubscriptionState>,
    trial: Option<&TrialRecord>,
    now: DateTime<Utc>,
) -> SubscriptionState {
    if let Some(state) = stored {
        if state.expires_at.is_some_and(|expires| expires < now) {
            return SubscriptionState::free();
        }
        return state;
    }

    match trial {
        Some(trial) if trial.ends_at > now => SubscriptionState {
            tier: Tier::Pro,
            period: None,
            expires_at: None,
            is_trial_active: true,
            trial_ends_at: Some(trial.ends_at),
        },
        _ => SubscriptionState::free(),
    }
}

/// Start a trial of `days` days from `now`
pub fn start_trial(days: u32, now: DateTime<Utc>) -> TrialRecord {
    TrialRecord {
        started_at: now,
        ends_at: now + Duration::days(i64::from(days)),
    }
}

/// The subscription a purchase of `period` at `now` grants
pub fn purchase(period: Period, now: DateTime<Utc>) -> SubscriptionState {
    let expires_at = match period {
        Period::Monthly => now.checked_add_months(Months::new(1)),
        Period::Annual => now.checked_add_months(Months::new(12)),
        Period::Lifetime => None,
    };

    SubscriptionState {
        tier: Tier::Pro,
        period: Some(period),
        expires_at,
        is_trial_active: false,
        trial_ends_at: None,
    }
}

/// Parse a period name for the CLI
pub fn parse_period(s: &str) -> Result<Period, SubscriptionError> {
    Period::from_str(s).ok_or_else(|| SubscriptionError::UnknownPeriod(s.to_string()))
}
