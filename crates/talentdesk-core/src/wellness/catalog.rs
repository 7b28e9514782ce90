//! Built-in wellness tip lists.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipCategory {
    General,
    Mental,
    Physical,
    Nutrition,
    Sleep,
}

impl TipCategory {
    pub const ALL: [TipCategory; 5] = [
        TipCategory::General,
        TipCategory::Mental,
        TipCategory::Physical,
        TipCategory::Nutrition,
        TipCategory::Sleep,
    ];

    /// Looks up a lowercased category key; unknown keys resolve to `General`.
    pub fn resolve(key: &str) -> Self {
        match key {
            "mental" => TipCategory::Mental,
            "physical" => TipCategory::Physical,
            "nutrition" => TipCategory::Nutrition,
            "sleep" => TipCategory::Sleep,
            _ => TipCategory::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TipCategory::General => "general",
            TipCategory::Mental => "mental",
            TipCategory::Physical => "physical",
            TipCategory::Nutrition => "nutrition",
            TipCategory::Sleep => "sleep",
        }
    }

    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            TipCategory::General => GENERAL,
            TipCategory::Mental => MENTAL,
            TipCategory::Physical => PHYSICAL,
            TipCategory::Nutrition => NUTRITION,
            TipCategory::Sleep => SLEEP,
        }
    }
}

const GENERAL: &[&str] = &[
    "Take regular breaks every hour to stretch and rest your eyes.",
    "Stay hydrated! Aim for 8 glasses of water a day.",
    "Practice good posture at your desk to avoid back pain.",
    "Get 7-8 hours of quality sleep tonight.",
    "Take a short walk during your lunch break.",
    "Declutter your workspace for a clearer mind.",
    "Set small, achievable goals for the day.",
];

const MENTAL: &[&str] = &[
    "Practice the 4-7-8 breathing technique when feeling overwhelmed.",
    "Write down three things you are grateful for today.",
    "Take 5 minutes to meditate or sit in silence.",
    "Connect with a colleague or friend for a quick chat.",
    "Limit your screen time after work to recharge.",
    "Be kind to yourself; acknowledge your efforts.",
    "Listen to your favorite calming music.",
];

const PHYSICAL: &[&str] = &[
    "Do some desk stretches to release tension in your neck and shoulders.",
    "Take the stairs instead of the elevator today.",
    "Stand up and move around for a few minutes every hour.",
    "Try a new physical activity or workout routine this week.",
    "Focus on your ergonomics: adjust your chair and monitor height.",
    "Rest your eyes by looking at something 20 feet away for 20 seconds.",
    "Go for a brisk walk to boost your energy levels.",
];

const NUTRITION: &[&str] = &[
    "Eat a healthy, balanced breakfast to start your day right.",
    "Swap a sugary snack for a piece of fruit or nuts.",
    "Avoid caffeine late in the afternoon to improve sleep.",
    "Pack a nutritious lunch instead of ordering out.",
    "Include more leafy greens in your meals today.",
    "Drink a glass of water before every meal.",
    "Limit processed foods and choose whole foods when possible.",
];

const SLEEP: &[&str] = &[
    "Establish a consistent bedtime routine to signal your body it's time to sleep.",
    "Avoid screens (phones, computers, TV) for at least an hour before bed.",
    "Keep your bedroom cool, dark, and quiet.",
    "Avoid heavy meals and caffeine close to bedtime.",
    "Read a book or listen to a podcast to wind down.",
    "Try progressive muscle relaxation to ease into sleep.",
    "Stick to a regular sleep schedule, even on weekends.",
];
