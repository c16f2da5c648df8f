//! Achievement definitions and metadata
//!
//! Badges are unlocked by reaching a challenge day.

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    FirstDay,
    WeekWarrior,
    TwoWeeks,
    HabitFormer,
    MonthMaster,
    HalfwayHero,
    FiftyStreak,
    DiamondDiscipline,
}

impl AchievementId {
    /// Get the string ID used in storage and on the remote mirror
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstDay => "first_day",
            Self::WeekWarrior => "week_warrior",
            Self::TwoWeeks => "two_weeks",
            Self::HabitFormer => "habit_former",
            Self::MonthMaster => "month_master",
            Self::HalfwayHero => "halfway_hero",
            Self::FiftyStreak => "fifty_streak",
            Self::DiamondDiscipline => "diamond_discipline",
        }
    }

    /// Parse from a stored string ID
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_day" => Some(Self::FirstDay),
            "week_warrior" => Some(Self::WeekWarrior),
            "two_weeks" => Some(Self::TwoWeeks),
            "habit_former" => Some(Self::HabitFormer),
            "month_master" => Some(Self::MonthMaster),
            "halfway_hero" => Some(Self::HalfwayHero),
            "fifty_streak" => Some(Self::FiftyStreak),
            "diamond_discipline" => Some(Self::DiamondDiscipline),
            _ => None,
        }
    }

    /// Get all achievement IDs in threshold order
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstDay,
            Self::WeekWarrior,
            Self::TwoWeeks,
            Self::HabitFormer,
            Self::MonthMaster,
            Self::HalfwayHero,
            Self::FiftyStreak,
            Self::DiamondDiscipline,
        ]
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Challenge day that unlocks the badge
    pub requirement: u32,
    /// Gradient used by clients when rendering the badge
    pub color: &'static str,
}

impl Achievement {
    /// Look up the definition for an ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        // ACHIEVEMENTS is declared in AchievementId order
        &ACHIEVEMENTS[id as usize]
    }
}

/// All achievement definitions, ascending by requirement
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstDay,
        name: "First Step",
        description: "Complete your first day",
        icon: "spark",
        requirement: 1,
        color: "from-orange-500 to-red-500",
    },
    Achievement {
        id: AchievementId::WeekWarrior,
        name: "Week Warrior",
        description: "Complete 7 consecutive days",
        icon: "shield",
        requirement: 7,
        color: "from-blue-500 to-purple-500",
    },
    Achievement {
        id: AchievementId::TwoWeeks,
        name: "Two Week Streak",
        description: "Complete 14 consecutive days",
        icon: "bolt",
        requirement: 14,
        color: "from-green-500 to-teal-500",
    },
    Achievement {
        id: AchievementId::HabitFormer,
        name: "21 Day Habit",
        description: "Complete 21 consecutive days",
        icon: "target",
        requirement: 21,
        color: "from-yellow-500 to-orange-500",
    },
    Achievement {
        id: AchievementId::MonthMaster,
        name: "Month Master",
        description: "Complete 30 consecutive days",
        icon: "medal",
        requirement: 30,
        color: "from-pink-500 to-rose-500",
    },
    Achievement {
        id: AchievementId::HalfwayHero,
        name: "Halfway Hero",
        description: "Complete 33 consecutive days",
        icon: "star",
        requirement: 33,
        color: "from-cyan-500 to-blue-500",
    },
    Achievement {
        id: AchievementId::FiftyStreak,
        name: "50 Day Streak",
        description: "Complete 50 consecutive days",
        icon: "flame",
        requirement: 50,
        color: "from-red-500 to-orange-500",
    },
    Achievement {
        id: AchievementId::DiamondDiscipline,
        name: "Diamond Discipline",
        description: "Complete all 66 days",
        icon: "crown",
        requirement: 66,
        color: "from-yellow-400 via-yellow-500 to-yellow-600",
    },
];
