//! crates/oracle_core/src/tables.rs
//!
//! The fixed sign/planet lookup tables behind the inference engine, kept
//! together as data rather than scattered across branches. Per-sign tables
//! are total functions over [`ZodiacSign`]: an exhaustive `match` means a
//! sign without an entry is a compile error, not a runtime default.

use crate::domain::ZodiacSign;

//=========================================================================================
// Sign Groups
//=========================================================================================

/// Fire/air signs that pull the first type-indicator axis toward "E".
pub const EXTROVERT_SIGNS: [ZodiacSign; 6] = [
    ZodiacSign::Aries,
    ZodiacSign::Gemini,
    ZodiacSign::Leo,
    ZodiacSign::Libra,
    ZodiacSign::Sagittarius,
    ZodiacSign::Aquarius,
];

/// Earth/water signs that pull the second axis toward "S".
pub const SENSING_SIGNS: [ZodiacSign; 6] = [
    ZodiacSign::Taurus,
    ZodiacSign::Virgo,
    ZodiacSign::Capricorn,
    ZodiacSign::Cancer,
    ZodiacSign::Scorpio,
    ZodiacSign::Pisces,
];

/// Air/fire decision-making signs that pull the third axis toward "T".
pub const THINKING_SIGNS: [ZodiacSign; 6] = [
    ZodiacSign::Gemini,
    ZodiacSign::Libra,
    ZodiacSign::Aquarius,
    ZodiacSign::Aries,
    ZodiacSign::Leo,
    ZodiacSign::Sagittarius,
];

/// Cardinal/fixed signs that pull the fourth axis toward "J".
pub const JUDGING_SIGNS: [ZodiacSign; 8] = [
    ZodiacSign::Aries,
    ZodiacSign::Cancer,
    ZodiacSign::Libra,
    ZodiacSign::Capricorn,
    ZodiacSign::Taurus,
    ZodiacSign::Leo,
    ZodiacSign::Scorpio,
    ZodiacSign::Aquarius,
];

pub const WATER_SIGNS: [ZodiacSign; 3] =
    [ZodiacSign::Cancer, ZodiacSign::Scorpio, ZodiacSign::Pisces];

//=========================================================================================
// Enneagram
//=========================================================================================

/// Ranked candidate types for each sign, strongest first.
pub fn enneagram_candidates(sign: ZodiacSign) -> [u8; 3] {
    match sign {
        ZodiacSign::Aries => [8, 3, 7],
        ZodiacSign::Taurus => [9, 6, 2],
        ZodiacSign::Gemini => [7, 6, 3],
        ZodiacSign::Cancer => [2, 6, 4],
        ZodiacSign::Leo => [3, 8, 7],
        ZodiacSign::Virgo => [1, 6, 5],
        ZodiacSign::Libra => [9, 2, 7],
        ZodiacSign::Scorpio => [8, 4, 5],
        ZodiacSign::Sagittarius => [7, 8, 9],
        ZodiacSign::Capricorn => [1, 3, 8],
        ZodiacSign::Aquarius => [5, 4, 7],
        ZodiacSign::Pisces => [4, 9, 2],
    }
}

pub fn enneagram_motivation(type_number: u8) -> &'static str {
    match type_number {
        1 => "To be perfect and improve everything",
        2 => "To feel loved and needed",
        3 => "To feel valuable and worthwhile",
        4 => "To find themselves and their significance",
        5 => "To be competent and understanding",
        6 => "To have security and support",
        7 => "To maintain happiness and satisfaction",
        8 => "To be self-reliant and in control",
        9 => "To maintain inner peace and harmony",
        _ => "To find balance",
    }
}

pub fn enneagram_fear(type_number: u8) -> &'static str {
    match type_number {
        1 => "Being corrupt, defective, or wrong",
        2 => "Being unloved or unwanted",
        3 => "Being worthless without achievement",
        4 => "Having no identity or significance",
        5 => "Being useless, helpless, or incapable",
        6 => "Being without support or guidance",
        7 => "Being trapped in pain or deprivation",
        8 => "Being controlled or vulnerable",
        9 => "Loss of connection and fragmentation",
        _ => "Being disconnected",
    }
}

pub const ENNEAGRAM_STRENGTHS: [&str; 4] = ["Self-aware", "Empathetic", "Driven", "Creative"];

//=========================================================================================
// Strength Themes
//=========================================================================================

/// Each sign's strongest themes, ordered. The engine takes the top two for
/// sun and moon and the top one for rising.
pub fn sign_strength_themes(sign: ZodiacSign) -> [&'static str; 4] {
    match sign {
        ZodiacSign::Aries => ["Achiever", "Command", "Competition", "Activator"],
        ZodiacSign::Taurus => ["Deliberative", "Consistency", "Restorative", "Responsibility"],
        ZodiacSign::Gemini => ["Communication", "Intellection", "Learner", "Adaptability"],
        ZodiacSign::Cancer => ["Empathy", "Developer", "Harmony", "Includer"],
        ZodiacSign::Leo => ["Command", "Positivity", "Self-Assurance", "Maximizer"],
        ZodiacSign::Virgo => ["Analytical", "Discipline", "Focus", "Responsibility"],
        ZodiacSign::Libra => ["Harmony", "Connectedness", "Empathy", "Diplomatic"],
        ZodiacSign::Scorpio => ["Focus", "Strategic", "Restorative", "Intensity"],
        ZodiacSign::Sagittarius => ["Positivity", "Futuristic", "Learner", "Activator"],
        ZodiacSign::Capricorn => ["Achiever", "Responsibility", "Discipline", "Focus"],
        ZodiacSign::Aquarius => ["Futuristic", "Ideation", "Intellection", "Innovation"],
        ZodiacSign::Pisces => ["Empathy", "Harmony", "Connectedness", "Developer"],
    }
}

/// The full 34-theme inventory, in fill order.
pub const MASTER_THEMES: [&str; 34] = [
    "Achiever",
    "Activator",
    "Adaptability",
    "Analytical",
    "Arranger",
    "Belief",
    "Command",
    "Communication",
    "Competition",
    "Connectedness",
    "Consistency",
    "Context",
    "Deliberative",
    "Developer",
    "Discipline",
    "Empathy",
    "Focus",
    "Futuristic",
    "Harmony",
    "Ideation",
    "Includer",
    "Individualization",
    "Input",
    "Intellection",
    "Learner",
    "Maximizer",
    "Positivity",
    "Relator",
    "Responsibility",
    "Restorative",
    "Self-Assurance",
    "Significance",
    "Strategic",
    "Woo",
];

//=========================================================================================
// Love Languages
//=========================================================================================

pub const LOVE_LANGUAGES: [&str; 5] = [
    "Words of Affirmation",
    "Quality Time",
    "Receiving Gifts",
    "Acts of Service",
    "Physical Touch",
];

/// Primary love language by Venus sign.
pub fn venus_love_language(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Aries => "Physical Touch",
        ZodiacSign::Taurus => "Receiving Gifts",
        ZodiacSign::Gemini => "Words of Affirmation",
        ZodiacSign::Cancer => "Quality Time",
        ZodiacSign::Leo => "Words of Affirmation",
        ZodiacSign::Virgo => "Acts of Service",
        ZodiacSign::Libra => "Quality Time",
        ZodiacSign::Scorpio => "Physical Touch",
        ZodiacSign::Sagittarius => "Quality Time",
        ZodiacSign::Capricorn => "Acts of Service",
        ZodiacSign::Aquarius => "Words of Affirmation",
        ZodiacSign::Pisces => "Physical Touch",
    }
}

/// Secondary love language by moon sign. Signs without a distinctive lunar
/// mapping share "Acts of Service".
pub fn moon_love_language(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Cancer => "Quality Time",
        ZodiacSign::Taurus => "Physical Touch",
        ZodiacSign::Virgo => "Acts of Service",
        ZodiacSign::Leo => "Words of Affirmation",
        ZodiacSign::Scorpio => "Physical Touch",
        ZodiacSign::Aries
        | ZodiacSign::Gemini
        | ZodiacSign::Libra
        | ZodiacSign::Sagittarius
        | ZodiacSign::Capricorn
        | ZodiacSign::Aquarius
        | ZodiacSign::Pisces => "Acts of Service",
    }
}

//=========================================================================================
// Attachment Styles
//=========================================================================================

/// Attachment style and strength percentage by moon sign.
pub fn attachment_for_moon(sign: ZodiacSign) -> (&'static str, u8) {
    match sign {
        ZodiacSign::Cancer => ("Secure", 70),
        ZodiacSign::Taurus => ("Secure", 75),
        ZodiacSign::Leo => ("Secure", 65),
        ZodiacSign::Scorpio => ("Anxious", 60),
        ZodiacSign::Pisces => ("Anxious", 55),
        ZodiacSign::Virgo => ("Avoidant", 60),
        ZodiacSign::Capricorn => ("Avoidant", 65),
        ZodiacSign::Aquarius => ("Avoidant", 70),
        ZodiacSign::Aries => ("Anxious", 50),
        ZodiacSign::Gemini => ("Avoidant", 50),
        ZodiacSign::Libra => ("Secure", 60),
        ZodiacSign::Sagittarius => ("Avoidant", 55),
    }
}

pub fn attachment_characteristics(style: &str) -> Vec<&'static str> {
    match style {
        "Secure" => vec!["Comfortable with intimacy", "Good communication", "Trusting"],
        "Anxious" => vec![
            "Seeks reassurance",
            "Fear of abandonment",
            "Highly empathetic",
        ],
        "Avoidant" => vec![
            "Values independence",
            "Uncomfortable with closeness",
            "Self-reliant",
        ],
        "Disorganized" => vec![
            "Inconsistent behaviors",
            "Difficulty regulating emotions",
        ],
        _ => vec!["Balanced approach to relationships"],
    }
}

//=========================================================================================
// Holland Codes
//=========================================================================================

/// Primary Holland letter by sign.
pub fn holland_letter(sign: ZodiacSign) -> char {
    match sign {
        ZodiacSign::Aries => 'E',
        ZodiacSign::Taurus => 'R',
        ZodiacSign::Gemini => 'A',
        ZodiacSign::Cancer => 'S',
        ZodiacSign::Leo => 'E',
        ZodiacSign::Virgo => 'C',
        ZodiacSign::Libra => 'A',
        ZodiacSign::Scorpio => 'I',
        ZodiacSign::Sagittarius => 'E',
        ZodiacSign::Capricorn => 'C',
        ZodiacSign::Aquarius => 'I',
        ZodiacSign::Pisces => 'A',
    }
}

pub fn holland_type_name(letter: char) -> &'static str {
    match letter {
        'R' => "Realistic",
        'I' => "Investigative",
        'A' => "Artistic",
        'S' => "Social",
        'E' => "Enterprising",
        'C' => "Conventional",
        _ => "Social",
    }
}

pub fn holland_careers(letter: char) -> Vec<&'static str> {
    match letter {
        'R' => vec!["Engineer", "Mechanic", "Farmer", "Pilot"],
        'I' => vec!["Scientist", "Researcher", "Analyst", "Doctor"],
        'A' => vec!["Artist", "Writer", "Designer", "Musician"],
        'S' => vec!["Teacher", "Counselor", "Nurse", "Social Worker"],
        'E' => vec!["Manager", "Lawyer", "Sales", "Entrepreneur"],
        'C' => vec!["Accountant", "Administrator", "Banker", "Secretary"],
        _ => vec!["Teacher", "Counselor", "Manager"],
    }
}

pub fn holland_environments(letter: char) -> Vec<&'static str> {
    match letter {
        'R' => vec!["Hands-on work", "Outdoor settings", "Technical environments"],
        'I' => vec!["Research labs", "Academic settings", "Analytical work"],
        'A' => vec!["Creative studios", "Flexible schedules", "Artistic communities"],
        'S' => vec!["People-oriented", "Collaborative", "Helping environments"],
        'E' => vec!["Leadership roles", "Competitive", "Business settings"],
        'C' => vec!["Structured", "Detail-oriented", "Organized systems"],
        _ => vec!["Collaborative", "People-oriented"],
    }
}

//=========================================================================================
// Type-Indicator Text
//=========================================================================================

// The same lists are returned for every type code. A per-type library of
// copy has not been written yet.
pub const TYPE_STRENGTHS: [&str; 3] = [
    "Natural leadership",
    "Creative problem solving",
    "Strong communication",
];

pub const TYPE_WEAKNESSES: [&str; 3] = [
    "Can be impulsive",
    "May overlook details",
    "Difficulty with routine",
];

pub const TYPE_CAREERS: [&str; 4] = [
    "Entrepreneur",
    "Consultant",
    "Creative Director",
    "Teacher",
];
